use cgmath::{Vector2, Vector3, Vector4};
use scene_ngin::{
    data_structures::{material::Material, mesh::PrimitiveKind, transform::TransformParams},
    render::{Composer, RenderContext, RenderObject},
    resources::{material::MaterialRegistry, texture::TEXTURE_NOT_FOUND},
    shader::{self, ShaderUniforms, UniformValue},
};

use crate::common::test_utils::{
    CountingMeshes, RecordingMeshes, UniformLog, fake_registry, write_rgb_png,
};

mod common;

fn materials() -> MaterialRegistry {
    let mut materials = MaterialRegistry::new();
    materials.define(
        "wood",
        Material::new()
            .with_ambient(0.3, 0.25, 0.2, 0.4)
            .with_diffuse(0.5, 0.4, 0.3)
            .with_specular(0.2, 0.2, 0.2)
            .with_shininess(10.0),
    );
    materials
}

#[test]
fn should_push_state_in_order_then_draw() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_rgb_png(dir.path(), "wood.png", 2, 2);
    let mut textures = fake_registry();
    textures.load(&path, "wood").unwrap();
    let materials = materials();

    let mut shader = UniformLog::default();
    let mut meshes = CountingMeshes::default();
    let object = RenderObject::new(PrimitiveKind::Box, TransformParams::new().at(1.0, 2.0, 3.0))
        .textured("wood")
        .with_uv_scale(3.0, 3.0)
        .with_material("wood");

    let mut ctx = RenderContext::new(&mut shader, &mut meshes);
    Composer::new(&textures, &materials).draw(&mut ctx, &object);

    assert_eq!(
        shader.names(),
        vec![
            shader::MODEL,
            shader::USE_TEXTURE,
            shader::OBJECT_TEXTURE,
            shader::UV_SCALE,
            shader::MATERIAL_AMBIENT_COLOR,
            shader::MATERIAL_AMBIENT_STRENGTH,
            shader::MATERIAL_DIFFUSE_COLOR,
            shader::MATERIAL_SPECULAR_COLOR,
            shader::MATERIAL_SHININESS,
        ]
    );
    assert_eq!(shader.last(shader::USE_TEXTURE), Some(UniformValue::Bool(true)));
    assert_eq!(shader.last(shader::OBJECT_TEXTURE), Some(UniformValue::Sampler(0)));
    assert_eq!(
        shader.last(shader::UV_SCALE),
        Some(UniformValue::Vec2(Vector2::new(3.0, 3.0)))
    );
    assert_eq!(meshes.draws, vec![PrimitiveKind::Box]);
}

#[test]
fn should_push_not_found_for_an_unknown_texture() {
    let textures = fake_registry();
    let materials = MaterialRegistry::new();
    let mut shader = ShaderUniforms::new();
    let mut meshes = RecordingMeshes::default();

    let object = RenderObject::new(PrimitiveKind::Sphere, TransformParams::new()).textured("marble");
    let mut ctx = RenderContext::new(&mut shader, &mut meshes);
    Composer::new(&textures, &materials).draw(&mut ctx, &object);

    let (kind, uniform) = meshes.draws[0];
    assert_eq!(kind, PrimitiveKind::Sphere);
    assert_eq!(uniform.use_texture, 1);
    assert_eq!(uniform.texture_slot, TEXTURE_NOT_FOUND);
}

#[test]
fn should_leave_the_previous_material_for_an_unknown_tag() {
    let textures = fake_registry();
    let materials = materials();
    let mut shader = ShaderUniforms::new();
    let mut meshes = RecordingMeshes::default();
    let composer = Composer::new(&textures, &materials);

    let wooden = RenderObject::new(PrimitiveKind::Box, TransformParams::new()).with_material("wood");
    let unknown = RenderObject::new(PrimitiveKind::Box, TransformParams::new()).with_material("gold");
    let mut ctx = RenderContext::new(&mut shader, &mut meshes);
    composer.draw_all(&mut ctx, [&wooden, &unknown]);

    assert_eq!(meshes.draws.len(), 2);
    let (_, second) = meshes.draws[1];
    assert_eq!(second.shininess, 10.0);
    assert_eq!(second.diffuse_color, [0.5, 0.4, 0.3]);
}

#[test]
fn should_switch_texturing_off_for_flat_colours() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_rgb_png(dir.path(), "wall.png", 2, 2);
    let mut textures = fake_registry();
    textures.load(&path, "wall").unwrap();
    let materials = MaterialRegistry::new();
    let mut shader = ShaderUniforms::new();
    let mut meshes = RecordingMeshes::default();
    let composer = Composer::new(&textures, &materials);

    let textured = RenderObject::new(PrimitiveKind::Plane, TransformParams::new()).textured("wall");
    let flat = RenderObject::new(PrimitiveKind::Plane, TransformParams::new()).colored(1.0, 0.0, 0.0, 1.0);
    let mut ctx = RenderContext::new(&mut shader, &mut meshes);
    composer.draw(&mut ctx, &textured);
    composer.draw(&mut ctx, &flat);

    assert_eq!(meshes.draws[0].1.use_texture, 1);
    assert_eq!(meshes.draws[1].1.use_texture, 0);
    assert_eq!(meshes.draws[1].1.object_color, [1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn should_push_colour_before_texture_when_both_are_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_rgb_png(dir.path(), "wall.png", 2, 2);
    let mut textures = fake_registry();
    textures.load(&path, "wall").unwrap();
    let materials = MaterialRegistry::new();
    let mut shader = UniformLog::default();
    let mut meshes = CountingMeshes::default();

    let object = RenderObject::new(PrimitiveKind::Box, TransformParams::new())
        .colored(0.96, 0.93, 0.86, 1.0)
        .textured("wall");
    let mut ctx = RenderContext::new(&mut shader, &mut meshes);
    Composer::new(&textures, &materials).draw(&mut ctx, &object);

    assert_eq!(
        &shader.names()[1..5],
        &[
            shader::USE_TEXTURE,
            shader::OBJECT_COLOR,
            shader::USE_TEXTURE,
            shader::OBJECT_TEXTURE
        ]
    );
    assert_eq!(shader.last(shader::USE_TEXTURE), Some(UniformValue::Bool(true)));
    assert_eq!(
        shader.last(shader::OBJECT_COLOR),
        Some(UniformValue::Vec4(Vector4::new(0.96, 0.93, 0.86, 1.0)))
    );
}

#[test]
fn should_capture_the_model_matrix_of_each_draw() {
    let textures = fake_registry();
    let materials = MaterialRegistry::new();
    let mut shader = ShaderUniforms::new();
    let mut meshes = RecordingMeshes::default();

    let object = RenderObject::new(
        PrimitiveKind::Cone,
        TransformParams::new().scaled(1.0, 0.8, 1.0).at(0.0, 7.0, 0.0),
    );
    let mut ctx = RenderContext::new(&mut shader, &mut meshes);
    Composer::new(&textures, &materials).draw(&mut ctx, &object);

    let (_, uniform) = meshes.draws[0];
    assert_eq!(uniform.model, Into::<[[f32; 4]; 4]>::into(object.transform.to_matrix()));
    // translation column
    assert_eq!(uniform.model[3], [0.0, 7.0, 0.0, 1.0]);
    assert_eq!(Vector3::from([uniform.model[1][0], uniform.model[1][1], uniform.model[1][2]]), Vector3::new(0.0, 0.8, 0.0));
}
