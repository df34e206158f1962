pub mod animator;
pub mod buffer;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod glyph;
pub mod picking;
pub mod scene;
pub mod shapes;
pub mod stage;
pub mod timer;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

pub use animator::*;
pub use buffer::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use glyph::*;
pub use picking::*;
pub use scene::*;
pub use shapes::*;
pub use stage::*;
pub use timer::*;
