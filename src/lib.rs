//! scene-ngin
//!
//! A small headless renderer for static scenes assembled from unit
//! primitives. Textures are loaded into a fixed set of tagged slots,
//! materials are registered by tag, and every object is drawn by pushing its
//! model matrix, surface and material as named shader uniforms before the
//! primitive mesh is drawn.
//!
//! High-level modules
//! - `config`: asset paths, output size and camera
//! - `context`: headless GPU context (device, queue, depth target, camera)
//! - `data_structures`: transforms, materials, primitive geometry, GPU textures
//! - `error`: errors of the resource layer
//! - `frame`: offscreen rendering and readback into an image
//! - `pipelines`: the lit, textured scene pipeline
//! - `render`: draw composition from tags and transforms
//! - `resources`: texture registry, material registry, mesh library
//! - `scene`: the coffee shop content
//! - `shader`: named-uniform shader state and its GPU layout
//!

pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod frame;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
pub mod shader;

pub use cgmath;
pub use wgpu;
