//! The interactive demo programs and the loop that drives them.
//!
//! Every demo implements [`Demo`]: it receives key presses and the clock,
//! draws one frame into the [`Engine`] per loop iteration, and asks the loop to
//! stop through [`LoopFeedback::Exit`].

pub mod benchmark;
pub mod blend;
pub mod colors;
pub mod shapes;
pub mod transform;

use std::time::Duration;

use crate::engine::Engine;
use crate::error::Error;
use crate::window::{FrameLimiter, Key, Window, WindowEvent, FPS};

pub use benchmark::BenchmarkDemo;
pub use blend::BlendDemo;
pub use colors::{ColorDemo, ColorsDemo};
pub use shapes::ShapesDemo;
pub use transform::TransformDemo;

/// Whether the main loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopFeedback {
    Continue,
    Exit,
}

pub trait Demo {
    /// Window title, refreshed every frame.
    fn title(&self) -> String;

    /// Configure projection, view and render state before the first frame.
    fn setup(&mut self, engine: &mut Engine);

    /// React to a key press. Escape is handled by the loop.
    fn handle_key(&mut self, _key: Key) -> LoopFeedback {
        LoopFeedback::Continue
    }

    /// The window was resized; the engine buffers already have the new size.
    fn resize(&mut self, _engine: &mut Engine, _width: u32, _height: u32) {}

    /// Advance animation state. `now` is the time since start-up, `dt` the
    /// time since the previous frame.
    fn update(&mut self, _now: Duration, _dt: Duration) -> Result<LoopFeedback, Error> {
        Ok(LoopFeedback::Continue)
    }

    fn render(&mut self, engine: &mut Engine);

    /// Frame-rate cap, `None` to render as fast as possible.
    fn target_fps(&self) -> Option<u32> {
        Some(FPS)
    }
}

/// Open a window and run `demo` until it exits, the window is closed or
/// Escape is pressed.
pub fn run(demo: &mut dyn Demo, width: u32, height: u32) -> Result<(), Error> {
    let mut window = Window::new(&demo.title(), width, height).map_err(Error::Window)?;
    let mut engine = Engine::new(width, height);
    demo.setup(&mut engine);

    let mut limiter = FrameLimiter::new(&window, demo.target_fps());
    let mut title = String::new();
    let mut delta = Duration::ZERO;

    'main: loop {
        for event in window.poll_events() {
            let feedback = match event {
                WindowEvent::Quit | WindowEvent::Key(Key::Escape) => LoopFeedback::Exit,
                WindowEvent::Key(key) => demo.handle_key(key),
                WindowEvent::Resize(w, h) => {
                    window.resize(w, h).map_err(Error::Window)?;
                    engine.resize(w, h);
                    demo.resize(&mut engine, w, h);
                    LoopFeedback::Continue
                }
            };
            if feedback == LoopFeedback::Exit {
                break 'main;
            }
        }

        if demo.update(window.elapsed(), delta)? == LoopFeedback::Exit {
            break;
        }
        demo.render(&mut engine);
        window.present(engine.frame_buffer()).map_err(Error::Window)?;

        let next_title = demo.title();
        if next_title != title {
            window.set_title(&next_title).map_err(Error::Window)?;
            title = next_title;
        }

        delta = Duration::from_millis(limiter.wait_and_get_delta(&window));
    }

    log::debug!("Main loop finished");
    Ok(())
}
