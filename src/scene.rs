//! The coffee shop: textures, materials, lights and the object list.
//!
//! A table with four legs, two padded stools, a cup, a hanging chandelier, and
//! the floor and walls of the room. Everything is built from unit primitives
//! placed by [`TransformParams`].

use std::path::Path;

use cgmath::Vector3;

use crate::{
    config::SceneConfig,
    data_structures::{material::Material, mesh::PrimitiveKind, transform::TransformParams},
    render::{Composer, RenderContext, RenderObject},
    resources::{
        material::MaterialRegistry,
        mesh::MeshLibrary,
        texture::{TextureBackend, TextureRegistry},
    },
    shader::{self, ShaderState, light_uniform},
};

/// Textures the scene expects as `<asset_dir>/<tag>.jpg`, in slot order.
pub const TEXTURE_TAGS: [&str; 5] = ["wood", "ceramic", "fabric", "glass", "wall"];

pub const TEXTURE_EXTENSION: &str = "jpg";

/// Primitive kinds the scene uploads before drawing.
pub const SCENE_MESHES: [PrimitiveKind; 6] = [
    PrimitiveKind::Plane,
    PrimitiveKind::Cylinder,
    PrimitiveKind::Torus,
    PrimitiveKind::Sphere,
    PrimitiveKind::Box,
    PrimitiveKind::Cone,
];

const CREAM: [f32; 4] = [0.96, 0.93, 0.86, 1.0];

/// One point light, as pushed to `lightSources[i]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub ambient_color: Vector3<f32>,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

impl PointLight {
    fn grey(position: [f32; 3], ambient: f32, diffuse: f32, specular: f32) -> Self {
        Self {
            position: position.into(),
            ambient_color: Vector3::new(ambient, ambient, ambient),
            diffuse_color: Vector3::new(diffuse, diffuse, diffuse),
            specular_color: Vector3::new(specular, specular, specular),
            focal_strength: 32.0,
            specular_intensity: 0.1,
        }
    }

    fn focus(mut self, focal_strength: f32, specular_intensity: f32) -> Self {
        self.focal_strength = focal_strength;
        self.specular_intensity = specular_intensity;
        self
    }

    pub fn push<S: ShaderState + ?Sized>(&self, shader: &mut S, index: usize) {
        shader.set_vec3(&light_uniform(index, "position"), self.position);
        shader.set_vec3(&light_uniform(index, "ambientColor"), self.ambient_color);
        shader.set_vec3(&light_uniform(index, "diffuseColor"), self.diffuse_color);
        shader.set_vec3(&light_uniform(index, "specularColor"), self.specular_color);
        shader.set_float(&light_uniform(index, "focalStrength"), self.focal_strength);
        shader.set_float(&light_uniform(index, "specularIntensity"), self.specular_intensity);
    }
}

/// Sun, key, fill and back light.
pub fn scene_lights() -> [PointLight; shader::MAX_LIGHTS] {
    let mut sun = PointLight::grey([0.0, 15.0, 0.0], 0.2, 1.0, 0.8).focus(128.0, 0.08);
    sun.diffuse_color = Vector3::new(1.0, 0.95, 0.9);
    [
        sun,
        PointLight::grey([0.0, 15.0, 4.0], 0.1, 0.6, 0.4).focus(128.0, 0.4),
        PointLight::grey([0.0, 7.0, 0.0], 0.5, 0.3, 0.1).focus(16.0, 0.2),
        PointLight::grey([0.0, 6.0, -6.0], 0.05, 0.4, 0.2).focus(32.0, 0.03),
    ]
}

/// Switch lighting on and push every light.
pub fn setup_lights<S: ShaderState + ?Sized>(shader: &mut S) {
    shader.set_bool(shader::USE_LIGHTING, true);
    for (index, light) in scene_lights().iter().enumerate() {
        light.push(shader, index);
    }
}

pub fn scene_materials() -> Vec<(&'static str, Material)> {
    vec![
        (
            "wood",
            Material::new()
                .with_ambient(0.3, 0.25, 0.2, 0.4)
                .with_diffuse(0.5, 0.4, 0.3)
                .with_specular(0.2, 0.2, 0.2)
                .with_shininess(10.0),
        ),
        (
            "ceramic",
            Material::new()
                .with_ambient(0.95, 0.92, 0.85, 0.4)
                .with_diffuse(0.96, 0.93, 0.86)
                .with_specular(0.9, 0.9, 0.88)
                .with_shininess(96.0),
        ),
        (
            "fabric",
            Material::new()
                .with_ambient(0.4, 0.2, 0.1, 0.5)
                .with_diffuse(0.6, 0.4, 0.3)
                .with_specular(0.1, 0.1, 0.1)
                .with_shininess(5.0),
        ),
        (
            "metal",
            Material::new()
                .with_ambient(0.2, 0.2, 0.2, 0.3)
                .with_diffuse(0.5, 0.5, 0.5)
                .with_specular(0.8, 0.8, 0.8)
                .with_shininess(128.0),
        ),
        (
            "glass",
            Material::new()
                .with_ambient(0.8, 0.8, 0.8, 0.5)
                .with_diffuse(0.9, 0.9, 0.9)
                .with_specular(1.0, 1.0, 1.0)
                .with_shininess(128.0),
        ),
    ]
}

/// Every object of the room in draw order.
pub fn scene_objects() -> Vec<RenderObject<'static>> {
    let wood = |kind, transform| {
        RenderObject::new(kind, transform)
            .textured("wood")
            .with_uv_scale(3.0, 3.0)
            .with_material("wood")
    };
    let fabric = |transform| {
        RenderObject::new(PrimitiveKind::Box, transform)
            .textured("fabric")
            .with_uv_scale(3.0, 3.0)
            .with_material("fabric")
    };
    let ceramic = |kind, transform| {
        RenderObject::new(kind, transform)
            .textured("ceramic")
            .with_uv_scale(3.0, 3.0)
            .with_material("ceramic")
    };
    let room = |transform| {
        let [r, g, b, a] = CREAM;
        RenderObject::new(PrimitiveKind::Box, transform)
            .colored(r, g, b, a)
            .textured("wall")
            .with_uv_scale(3.0, 3.0)
            .with_material("wood")
    };
    let leg = TransformParams::new().scaled(0.2, 2.0, 0.2);

    let mut objects = Vec::with_capacity(19);
    // front-left, front-right, back-left, back-right
    for (x, z) in [(-2.0, -2.0), (2.0, -2.0), (-2.0, 2.0), (2.0, 2.0)] {
        objects.push(wood(PrimitiveKind::Box, leg.at(x, 0.0, z)));
    }
    objects.push(wood(
        PrimitiveKind::Box,
        TransformParams::new().scaled(5.5, 0.2, 4.5).at(0.0, 1.0, 0.0),
    ));

    for x in [1.5, -1.5] {
        objects.push(fabric(TransformParams::new().scaled(0.8, 1.2, 0.8).at(x, -0.4, 3.5)));
        objects.push(fabric(TransformParams::new().scaled(0.9, 0.15, 0.9).at(x, 0.3, 3.5)));
    }

    objects.push(ceramic(
        PrimitiveKind::Torus,
        TransformParams::new()
            .scaled(0.3, 0.3, 0.3)
            .rotated(90.0, 0.0, 0.0)
            .at(0.0, 1.15, 0.0),
    ));
    objects.push(ceramic(
        PrimitiveKind::Cylinder,
        TransformParams::new().scaled(0.35, 0.5, 0.35).at(0.0, 1.15, 0.0),
    ));
    objects.push(ceramic(
        PrimitiveKind::Torus,
        TransformParams::new().scaled(0.3, 0.2, 0.3).at(0.2, 1.35, 0.0),
    ));

    // chandelier: glass-textured chain, wooden shade
    objects.push(
        RenderObject::new(
            PrimitiveKind::Cylinder,
            TransformParams::new().scaled(0.05, 1.0, 0.1).at(0.0, 7.5, 0.0),
        )
        .textured("glass")
        .with_uv_scale(3.0, 3.0)
        .with_material("ceramic"),
    );
    objects.push(
        RenderObject::new(
            PrimitiveKind::Cone,
            TransformParams::new().scaled(1.0, 0.8, 1.0).at(0.0, 7.0, 0.0),
        )
        .textured("wood")
        .with_uv_scale(3.0, 3.0)
        .with_material("ceramic"),
    );

    objects.push(room(
        TransformParams::new()
            .scaled(20.0, 0.1, 20.0)
            .rotated(180.0, 0.0, 0.0)
            .at(0.0, -0.1, 0.0),
    ));
    objects.push(room(
        TransformParams::new()
            .scaled(20.0, 10.0, 0.1)
            .rotated(0.0, 180.0, 0.0)
            .at(0.0, 5.0, -10.0),
    ));
    for x in [-10.0, 10.0] {
        objects.push(room(
            TransformParams::new()
                .scaled(0.1, 10.0, 20.0)
                .rotated(0.0, 0.0, 180.0)
                .at(x, 5.0, 0.0),
        ));
    }
    objects
}

/// Texture and material registries of the coffee shop.
pub struct Scene<B: TextureBackend> {
    pub textures: TextureRegistry<B>,
    pub materials: MaterialRegistry,
}

impl<B: TextureBackend> Scene<B> {
    pub fn new(backend: B) -> Self {
        Self {
            textures: TextureRegistry::new(backend),
            materials: MaterialRegistry::new(),
        }
    }

    /// Load every scene texture from `asset_dir` and bind them. A texture
    /// that fails to load is skipped; its tag then renders unresolved.
    pub fn load_textures(&mut self, asset_dir: &Path) -> usize {
        let mut loaded = 0;
        for tag in TEXTURE_TAGS {
            let path = asset_dir.join(format!("{tag}.{TEXTURE_EXTENSION}"));
            if self.textures.load(path, tag).is_ok() {
                loaded += 1;
            }
        }
        self.textures.bind_all();
        loaded
    }

    pub fn define_materials(&mut self) {
        for (tag, material) in scene_materials() {
            self.materials.define(tag, material);
        }
    }

    /// Everything that happens once before the first frame.
    pub fn prepare_scene<S, M>(
        &mut self,
        config: &SceneConfig,
        shader: &mut S,
        meshes: &mut M,
    ) -> anyhow::Result<()>
    where
        S: ShaderState,
        M: MeshLibrary<S>,
    {
        let loaded = self.load_textures(&config.asset_dir);
        if loaded < TEXTURE_TAGS.len() {
            log::warn!(
                "Only {loaded} of {} scene textures loaded from {}",
                TEXTURE_TAGS.len(),
                config.asset_dir.display()
            );
        }
        self.define_materials();
        setup_lights(shader);
        for kind in SCENE_MESHES {
            meshes.load_mesh(kind)?;
        }
        Ok(())
    }

    /// Compose every scene object into `ctx`.
    pub fn render_scene<S, M>(&self, ctx: &mut RenderContext<'_, S, M>)
    where
        S: ShaderState,
        M: MeshLibrary<S>,
    {
        let objects = scene_objects();
        Composer::new(&self.textures, &self.materials).draw_all(ctx, &objects);
    }

    pub fn release(&mut self) {
        self.textures.release_all();
    }
}
