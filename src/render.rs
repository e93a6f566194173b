//! Draw composition.
//!
//! Every object in the scene is drawn the same way: compute its model matrix,
//! push the matrix, the surface (texture slot or flat colour), the UV scale and
//! the material as shader state, then ask the mesh library to draw a unit
//! primitive with that state. Nothing is retained between objects except the
//! uniform values the shader already holds.
//!
//! # Key types
//!
//! - [`RenderObject`] is the full parameter set of one draw
//! - [`RenderContext`] bundles the shader state and the mesh library a draw goes to
//! - [`Composer`] resolves texture and material tags and issues the draw
//!

use cgmath::{Vector2, Vector4};

use crate::{
    data_structures::{mesh::PrimitiveKind, transform::TransformParams},
    resources::{
        material::MaterialRegistry,
        mesh::MeshLibrary,
        texture::{TEXTURE_NOT_FOUND, TextureBackend, TextureRegistry},
    },
    shader::{self, ShaderState},
};

/// Everything needed to draw one object.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderObject<'a> {
    pub kind: PrimitiveKind,
    pub transform: TransformParams,
    /// Flat colour, pushed before the texture. Drawn as-is when `texture` is
    /// `None`.
    pub color: Option<Vector4<f32>>,
    pub texture: Option<&'a str>,
    pub uv_scale: Vector2<f32>,
    pub material: Option<&'a str>,
}

impl<'a> RenderObject<'a> {
    pub fn new(kind: PrimitiveKind, transform: TransformParams) -> Self {
        Self {
            kind,
            transform,
            color: None,
            texture: None,
            uv_scale: Vector2::new(1.0, 1.0),
            material: None,
        }
    }

    pub fn textured(mut self, tag: &'a str) -> Self {
        self.texture = Some(tag);
        self
    }

    pub fn colored(mut self, r: f32, g: f32, b: f32, a: f32) -> Self {
        self.color = Some(Vector4::new(r, g, b, a));
        self
    }

    pub fn with_uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Vector2::new(u, v);
        self
    }

    pub fn with_material(mut self, tag: &'a str) -> Self {
        self.material = Some(tag);
        self
    }
}

/// The shader state and mesh library that draws are issued against.
///
/// This replaces process-wide GPU state: whatever the composer pushes lives in
/// `shader` until the next push, and `meshes` draws with it.
pub struct RenderContext<'a, S, M> {
    pub shader: &'a mut S,
    pub meshes: &'a mut M,
}

impl<'a, S, M> RenderContext<'a, S, M>
where
    M: MeshLibrary<S>,
{
    pub fn new(shader: &'a mut S, meshes: &'a mut M) -> Self {
        Self { shader, meshes }
    }
}

pub fn set_transformations<S: ShaderState + ?Sized>(shader: &mut S, transform: &TransformParams) {
    shader.set_mat4(shader::MODEL, transform.to_matrix());
}

/// Push a flat colour and switch texturing off.
pub fn set_shader_color<S: ShaderState + ?Sized>(shader: &mut S, color: Vector4<f32>) {
    shader.set_bool(shader::USE_TEXTURE, false);
    shader.set_vec4(shader::OBJECT_COLOR, color);
}

pub fn set_texture_uv_scale<S: ShaderState + ?Sized>(shader: &mut S, u: f32, v: f32) {
    shader.set_vec2(shader::UV_SCALE, Vector2::new(u, v));
}

/// Resolves tags against the registries and composes draws.
pub struct Composer<'r, B: TextureBackend> {
    textures: &'r TextureRegistry<B>,
    materials: &'r MaterialRegistry,
}

impl<'r, B: TextureBackend> Composer<'r, B> {
    pub fn new(textures: &'r TextureRegistry<B>, materials: &'r MaterialRegistry) -> Self {
        Self {
            textures,
            materials,
        }
    }

    /// Switch texturing on and point the sampler at the slot of `tag`.
    ///
    /// An unknown tag still switches texturing on and pushes
    /// [`TEXTURE_NOT_FOUND`] as the slot.
    pub fn set_shader_texture<S: ShaderState + ?Sized>(&self, shader: &mut S, tag: &str) {
        shader.set_bool(shader::USE_TEXTURE, true);
        let slot = match self.textures.find_slot(tag) {
            Some(slot) => slot as i32,
            None => {
                log::warn!("Texture '{tag}' is not registered");
                TEXTURE_NOT_FOUND
            }
        };
        shader.set_sampler(shader::OBJECT_TEXTURE, slot);
    }

    /// Push the material registered under `tag`. Unknown tags leave the
    /// previous material values in place.
    pub fn set_shader_material<S: ShaderState + ?Sized>(&self, shader: &mut S, tag: &str) {
        let Some(material) = self.materials.find(tag) else {
            log::warn!("Material '{tag}' is not defined");
            return;
        };
        shader.set_vec3(shader::MATERIAL_AMBIENT_COLOR, material.ambient_color);
        shader.set_float(shader::MATERIAL_AMBIENT_STRENGTH, material.ambient_strength);
        shader.set_vec3(shader::MATERIAL_DIFFUSE_COLOR, material.diffuse_color);
        shader.set_vec3(shader::MATERIAL_SPECULAR_COLOR, material.specular_color);
        shader.set_float(shader::MATERIAL_SHININESS, material.shininess);
    }

    /// Push the complete state of `object` and draw it.
    pub fn draw<S, M>(&self, ctx: &mut RenderContext<'_, S, M>, object: &RenderObject<'_>)
    where
        S: ShaderState,
        M: MeshLibrary<S>,
    {
        set_transformations(ctx.shader, &object.transform);
        match (object.color, object.texture) {
            (Some(color), _) => set_shader_color(ctx.shader, color),
            (None, None) => set_shader_color(ctx.shader, Vector4::new(1.0, 1.0, 1.0, 1.0)),
            (None, Some(_)) => (),
        }
        if let Some(tag) = object.texture {
            self.set_shader_texture(ctx.shader, tag);
        }
        set_texture_uv_scale(ctx.shader, object.uv_scale.x, object.uv_scale.y);
        if let Some(tag) = object.material {
            self.set_shader_material(ctx.shader, tag);
        }
        ctx.meshes.draw_mesh(object.kind, ctx.shader);
    }

    pub fn draw_all<'o, 't: 'o, S, M>(
        &self,
        ctx: &mut RenderContext<'_, S, M>,
        objects: impl IntoIterator<Item = &'o RenderObject<'t>>,
    ) where
        S: ShaderState,
        M: MeshLibrary<S>,
    {
        for object in objects {
            self.draw(ctx, object);
        }
    }
}
