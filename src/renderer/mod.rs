//! WebGPU rendering module
//!
//! Geometry is tessellated on the CPU each frame and drawn with a single
//! colored-triangle pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::build_frame;
pub use vertex::{Vertex, colors};
