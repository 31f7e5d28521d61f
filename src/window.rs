//! SDL2 window, input events and frame pacing.
//!
//! SDL2 is only used to open a window, read input and show the CPU-rendered
//! ARGB8888 buffer; all drawing happens in [`crate::engine`].

use std::time::Duration;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u32 = 60;

/// Keys the demos react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A letter (lower case) or digit.
    Char(char),
    Left,
    Right,
    Space,
    Escape,
}

impl Key {
    /// Map an SDL key name ("A", "1", "Space", ...) to a [`Key`].
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "Left" => Some(Key::Left),
            "Right" => Some(Key::Right),
            "Space" => Some(Key::Space),
            "Escape" => Some(Key::Escape),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => {
                        Some(Key::Char(c.to_ascii_lowercase()))
                    }
                    _ => None,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Resize(u32, u32),
    Key(Key),
}

/// Sleeps to hold a target frame rate; without a target it only measures.
pub struct FrameLimiter {
    target_frame_time: Option<u64>,
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, target_fps: Option<u32>) -> Self {
        Self {
            target_frame_time: target_fps
                .filter(|&fps| fps > 0)
                .map(|fps| 1000 / u64::from(fps)),
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    /// Delta time represents the time elapsed since the last call to this method.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if let Some(target) = self.target_frame_time {
            if delta_time < target {
                std::thread::sleep(Duration::from_millis(target - delta_time));
                current_time = window.timer().ticks64();
                delta_time = current_time.saturating_sub(self.previous_frame_time);
            }
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before `texture_creator` so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // We ensure texture is dropped before texture_creator by struct field order.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        log::debug!("Opened {width}x{height} window \"{title}\"");
        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drain pending SDL events.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(WindowEvent::Quit),
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = map_keycode(keycode) {
                        events.push(WindowEvent::Key(key));
                    }
                }
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => events.push(WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32)),
                _ => {}
            }
        }
        events
    }

    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), String> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| e.to_string())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }

    /// Time since SDL was initialised.
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.timer_subsystem.ticks64())
    }
}

fn map_keycode(keycode: Keycode) -> Option<Key> {
    Key::from_name(&keycode.name())
}
