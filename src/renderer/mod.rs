//! WebGPU rendering module
//!
//! Draw commands from the simulation are tessellated into a colored
//! triangle list and drawn with a single pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::tessellate;
pub use vertex::Vertex;
