//! Small linear algebra toolkit used by the renderer and the demos.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;
