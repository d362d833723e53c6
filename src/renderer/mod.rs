//! WebGPU rendering module
//!
//! The scene builder turns a `FrameView` into flat-colored quads; the pipeline
//! maps them from playfield pixels to the screen.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::{Palette, Vertex};
