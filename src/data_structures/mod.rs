//! Plain data used to describe and draw scene objects.
//!
//! - `transform` turns scale, rotation and translation into a model matrix
//! - `material` holds Phong surface parameters
//! - `mesh` generates the unit primitives (box, plane, cylinder, cone, sphere, torus)
//! - `texture` wraps GPU textures and backs the texture registry with wgpu

pub mod material;
pub mod mesh;
pub mod texture;
pub mod transform;
