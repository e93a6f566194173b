use std::path::{Path, PathBuf};

use image::DynamicImage;
use scene_ngin::{
    data_structures::mesh::PrimitiveKind,
    error::Result,
    resources::{
        mesh::MeshLibrary,
        texture::{TextureBackend, TextureRegistry},
    },
    shader::{ObjectUniform, ShaderState, ShaderUniforms, UniformValue},
};

/// Texture backend that hands out numeric handles and remembers what was
/// bound and released.
#[derive(Debug, Default)]
pub struct FakeBackend {
    next_handle: u32,
    pub uploads: Vec<(String, u32, u32)>,
    pub bound: Vec<(usize, u32)>,
    pub released: Vec<u32>,
}

impl TextureBackend for FakeBackend {
    type Handle = u32;

    fn upload(&mut self, image: &DynamicImage, label: &str) -> Result<u32> {
        self.uploads
            .push((label.to_string(), image.width(), image.height()));
        self.next_handle += 1;
        Ok(self.next_handle)
    }

    fn bind(&mut self, slot: usize, handle: &u32) {
        self.bound.push((slot, *handle));
    }

    fn release(&mut self, handle: u32) {
        self.released.push(handle);
    }
}

pub fn fake_registry() -> TextureRegistry<FakeBackend> {
    TextureRegistry::new(FakeBackend::default())
}

/// Mesh library that records every draw together with the object uniform
/// the shader held at that moment.
#[derive(Debug, Default)]
pub struct RecordingMeshes {
    pub loaded: Vec<PrimitiveKind>,
    pub draws: Vec<(PrimitiveKind, ObjectUniform)>,
}

impl MeshLibrary<ShaderUniforms> for RecordingMeshes {
    fn load_mesh(&mut self, kind: PrimitiveKind) -> anyhow::Result<()> {
        self.loaded.push(kind);
        Ok(())
    }

    fn draw_mesh(&mut self, kind: PrimitiveKind, shader: &ShaderUniforms) {
        self.draws.push((kind, shader.object()));
    }
}

/// Shader state that only logs the uniforms pushed to it, in order.
#[derive(Debug, Default)]
pub struct UniformLog {
    pub pushed: Vec<(String, UniformValue)>,
}

impl UniformLog {
    pub fn names(&self) -> Vec<&str> {
        self.pushed.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn last(&self, name: &str) -> Option<UniformValue> {
        self.pushed
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }
}

impl ShaderState for UniformLog {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.pushed.push((name.to_string(), value));
    }
}

/// Mesh library for [`UniformLog`]; counts draws per kind.
#[derive(Debug, Default)]
pub struct CountingMeshes {
    pub draws: Vec<PrimitiveKind>,
}

impl MeshLibrary<UniformLog> for CountingMeshes {
    fn load_mesh(&mut self, _: PrimitiveKind) -> anyhow::Result<()> {
        Ok(())
    }

    fn draw_mesh(&mut self, kind: PrimitiveKind, _: &UniformLog) {
        self.draws.push(kind);
    }
}

pub fn write_rgb_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_fn(width, height, |x, y| image::Rgb([x as u8, y as u8, 128]))
        .save(&path)
        .unwrap();
    path
}

pub fn write_rgba_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]))
        .save(&path)
        .unwrap();
    path
}

pub fn write_gray_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::GrayImage::from_pixel(4, 4, image::Luma([200]))
        .save(&path)
        .unwrap();
    path
}

pub fn write_gray_alpha_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::GrayAlphaImage::from_pixel(4, 4, image::LumaA([200, 255]))
        .save(&path)
        .unwrap();
    path
}

pub fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
    for axis in 0..3 {
        assert!(
            (actual[axis] - expected[axis]).abs() < 1e-5,
            "axis {axis}: {actual:?} != {expected:?}"
        );
    }
}
