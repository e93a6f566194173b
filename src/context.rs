use anyhow::Context as _;

use crate::{config::{CameraConfig, SceneConfig}, data_structures::texture};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Fixed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: cgmath::Point3<f32>,
    pub target: cgmath::Point3<f32>,
    pub up: cgmath::Vector3<f32>,
    pub aspect: f32,
    pub fovy: cgmath::Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            eye: config.eye,
            target: config.target,
            up: config.up,
            aspect,
            fovy: cgmath::Deg(config.fovy_degrees),
            znear: config.znear,
            zfar: config.zfar,
        }
    }

    pub fn view_projection(&self) -> cgmath::Matrix4<f32> {
        let view = cgmath::Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }

    pub fn position(&self) -> cgmath::Vector3<f32> {
        cgmath::Vector3::new(self.eye.x, self.eye.y, self.eye.z)
    }
}

/// Headless GPU context: device, queue and the offscreen target description.
#[derive(Debug)]
pub struct Context {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    /// Format of the colour target frames are rendered into.
    pub format: wgpu::TextureFormat,
    pub width: u32,
    pub height: u32,
    pub depth_texture: texture::Texture,
    pub camera: Camera,
    pub clear_colour: wgpu::Color,
}

impl Context {
    pub async fn new(config: &SceneConfig) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("scene device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await
            .context("could not open the GPU device")?;

        let width = config.width.max(1);
        let height = config.height.max(1);
        let depth_texture =
            texture::Texture::create_depth_texture(&device, [width, height], "depth_texture");
        let camera = Camera::new(&config.camera, config.aspect());

        Ok(Self {
            device,
            queue,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            width,
            height,
            depth_texture,
            camera,
            clear_colour: config.clear_colour,
        })
    }
}
