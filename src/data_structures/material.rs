//! Phong material properties.

use cgmath::Vector3;

/// Lighting response of a surface: ambient/diffuse/specular colour and
/// shininess. Materials are looked up by tag through
/// [`MaterialRegistry`](crate::resources::material::MaterialRegistry).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient_color: Vector3<f32>,
    pub ambient_strength: f32,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    /// Plain mid-grey material.
    pub fn new() -> Self {
        Self {
            ambient_color: Vector3::new(0.2, 0.2, 0.2),
            ambient_strength: 0.3,
            diffuse_color: Vector3::new(0.5, 0.5, 0.5),
            specular_color: Vector3::new(0.2, 0.2, 0.2),
            shininess: 16.0,
        }
    }

    pub fn with_ambient(mut self, r: f32, g: f32, b: f32, strength: f32) -> Self {
        self.ambient_color = Vector3::new(r, g, b);
        self.ambient_strength = strength;
        self
    }

    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse_color = Vector3::new(r, g, b);
        self
    }

    pub fn with_specular(mut self, r: f32, g: f32, b: f32) -> Self {
        self.specular_color = Vector3::new(r, g, b);
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}
