//! 3D rendering module
//!
//! CPU-side mesh tessellation feeding a single WebGPU triangle pipeline.
//! Model code never touches the GPU: it emits `DrawCommand`s into a
//! `DrawSink`, which is either a vertex batcher (live rendering) or a
//! recorder (tests).

pub mod camera;
pub mod draw;
pub mod mesh;
pub mod pipeline;
pub mod scene;
pub mod transform;
pub mod vertex;

pub use camera::{Camera, Uniforms};
pub use draw::{DrawCommand, DrawSink, Material, Recorder, Shape, VertexBatch};
pub use pipeline::RenderState;
pub use transform::TransformStack;
pub use vertex::Vertex;
