//! The shader-state abstraction.
//!
//! Draw composition only ever talks to a [`ShaderState`]: it sets named
//! uniforms and then asks the mesh library to draw. [`ShaderUniforms`] is the
//! implementation used with the scene pipeline. It mirrors the WGSL uniform
//! blocks as plain `#[repr(C)]` structs that are copied into GPU buffers.

use cgmath::{Matrix4, SquareMatrix, Vector2, Vector3, Vector4};

use crate::data_structures::transform::normal_matrix;

pub const MODEL: &str = "model";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";
pub const MATERIAL_AMBIENT_COLOR: &str = "material.ambientColor";
pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";
pub const MATERIAL_DIFFUSE_COLOR: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR_COLOR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

/// Number of `lightSources[i]` entries the scene shader declares.
pub const MAX_LIGHTS: usize = 4;

/// Name of a field of one light, e.g. `lightSources[2].diffuseColor`.
pub fn light_uniform(index: usize, field: &str) -> String {
    format!("lightSources[{index}].{field}")
}

/// A value pushed to a named uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Mat4(Matrix4<f32>),
    Vec2(Vector2<f32>),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Float(f32),
    Int(i32),
    Bool(bool),
    /// Texture slot index; negative when the texture did not resolve.
    Sampler(i32),
}

/// Uniform-setting interface of a shader program.
///
/// Implementations decide what to do with names they do not know; none of the
/// setters can fail.
pub trait ShaderState {
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.set_uniform(name, UniformValue::Mat4(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.set_uniform(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.set_uniform(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.set_uniform(name, UniformValue::Vec4(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.set_uniform(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.set_uniform(name, UniformValue::Bool(value));
    }

    fn set_sampler(&mut self, name: &str, slot: i32) {
        self.set_uniform(name, UniformValue::Sampler(slot));
    }
}

/**
 * Per-draw uniform block (group 1, dynamic offset). Layout matches
 * `ObjectUniform` in `scene_shader.wgsl`; vec3 fields are followed by the
 * scalar that shares their 16 byte slot.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub texture_slot: i32,
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    pub _padding: f32,
}

impl Default for ObjectUniform {
    fn default() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();
        Self {
            model: identity,
            normal: identity,
            object_color: [1.0, 1.0, 1.0, 1.0],
            uv_scale: [1.0, 1.0],
            use_texture: 0,
            texture_slot: 0,
            ambient_color: [0.2, 0.2, 0.2],
            ambient_strength: 0.3,
            diffuse_color: [0.5, 0.5, 0.5],
            shininess: 16.0,
            specular_color: [0.2, 0.2, 0.2],
            _padding: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub focal_strength: f32,
    pub ambient_color: [f32; 3],
    pub specular_intensity: f32,
    pub diffuse_color: [f32; 3],
    pub _padding: f32,
    pub specular_color: [f32; 3],
    pub _padding2: f32,
}

/// Per-frame uniform block (group 0): camera plus the light sources.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    pub lights: [LightUniform; MAX_LIGHTS],
    pub use_lighting: u32,
    pub _padding: [u32; 3],
}

impl Default for FrameUniform {
    fn default() -> Self {
        Self {
            view_proj: Matrix4::<f32>::identity().into(),
            view_position: [0.0, 0.0, 0.0, 1.0],
            lights: [LightUniform::default(); MAX_LIGHTS],
            use_lighting: 0,
            _padding: [0; 3],
        }
    }
}

/// CPU copy of everything the scene shader reads, addressed by uniform name.
#[derive(Clone, Debug, Default)]
pub struct ShaderUniforms {
    pub object: ObjectUniform,
    pub frame: FrameUniform,
}

impl ShaderUniforms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self) -> ObjectUniform {
        self.object
    }

    pub fn frame(&self) -> FrameUniform {
        self.frame
    }

    pub fn set_view(&mut self, view_proj: Matrix4<f32>, eye: Vector3<f32>) {
        self.frame.view_proj = view_proj.into();
        self.frame.view_position = [eye.x, eye.y, eye.z, 1.0];
    }

    fn set_light_field(&mut self, index: usize, field: &str, value: UniformValue) -> bool {
        let Some(light) = self.frame.lights.get_mut(index) else {
            return false;
        };
        match (field, value) {
            ("position", UniformValue::Vec3(v)) => light.position = v.into(),
            ("ambientColor", UniformValue::Vec3(v)) => light.ambient_color = v.into(),
            ("diffuseColor", UniformValue::Vec3(v)) => light.diffuse_color = v.into(),
            ("specularColor", UniformValue::Vec3(v)) => light.specular_color = v.into(),
            ("focalStrength", UniformValue::Float(f)) => light.focal_strength = f,
            ("specularIntensity", UniformValue::Float(f)) => light.specular_intensity = f,
            _ => return false,
        }
        true
    }
}

impl ShaderState for ShaderUniforms {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        let object = &mut self.object;
        let accepted = match (name, value) {
            (MODEL, UniformValue::Mat4(m)) => {
                object.model = m.into();
                object.normal = normal_matrix(&m).into();
                true
            }
            (OBJECT_COLOR, UniformValue::Vec4(c)) => {
                object.object_color = c.into();
                true
            }
            (OBJECT_TEXTURE, UniformValue::Sampler(slot) | UniformValue::Int(slot)) => {
                object.texture_slot = slot;
                true
            }
            (USE_TEXTURE, UniformValue::Bool(b)) => {
                object.use_texture = b as u32;
                true
            }
            (USE_TEXTURE, UniformValue::Int(i)) => {
                object.use_texture = (i != 0) as u32;
                true
            }
            (USE_LIGHTING, UniformValue::Bool(b)) => {
                self.frame.use_lighting = b as u32;
                true
            }
            (USE_LIGHTING, UniformValue::Int(i)) => {
                self.frame.use_lighting = (i != 0) as u32;
                true
            }
            (UV_SCALE, UniformValue::Vec2(uv)) => {
                object.uv_scale = uv.into();
                true
            }
            (MATERIAL_AMBIENT_COLOR, UniformValue::Vec3(c)) => {
                object.ambient_color = c.into();
                true
            }
            (MATERIAL_AMBIENT_STRENGTH, UniformValue::Float(f)) => {
                object.ambient_strength = f;
                true
            }
            (MATERIAL_DIFFUSE_COLOR, UniformValue::Vec3(c)) => {
                object.diffuse_color = c.into();
                true
            }
            (MATERIAL_SPECULAR_COLOR, UniformValue::Vec3(c)) => {
                object.specular_color = c.into();
                true
            }
            (MATERIAL_SHININESS, UniformValue::Float(f)) => {
                object.shininess = f;
                true
            }
            _ => match parse_light_name(name) {
                Some((index, field)) => self.set_light_field(index, field, value),
                None => false,
            },
        };
        if !accepted {
            log::warn!("Ignoring uniform '{name}' = {value:?}: unknown name or wrong kind");
        }
    }
}

/// Split `lightSources[i].field` into `(i, field)`.
pub fn parse_light_name(name: &str) -> Option<(usize, &str)> {
    let rest = name.strip_prefix("lightSources[")?;
    let (index, field) = rest.split_once("].")?;
    Some((index.parse().ok()?, field))
}
