//! Runtime configuration for the headless renderer.
//!
//! Everything has a sensible default. The asset directory and output path can
//! be overridden through `SCENE_NGIN_ASSETS` and `SCENE_NGIN_OUTPUT`.

use std::path::PathBuf;

pub const ASSET_DIR_ENV: &str = "SCENE_NGIN_ASSETS";
pub const OUTPUT_ENV: &str = "SCENE_NGIN_OUTPUT";

/// Fixed viewpoint used to build the view-projection uniform.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub eye: cgmath::Point3<f32>,
    pub target: cgmath::Point3<f32>,
    pub up: cgmath::Vector3<f32>,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            // slightly above table height, looking across the near stools
            eye: cgmath::Point3::new(0.0, 5.0, 12.0),
            target: cgmath::Point3::new(0.0, 1.5, 0.0),
            up: cgmath::Vector3::unit_y(),
            fovy_degrees: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Directory holding `<tag>.jpg` for every scene texture.
    pub asset_dir: PathBuf,
    /// Where the rendered frame is written.
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub clear_colour: wgpu::Color,
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets").join("textures"),
            output: PathBuf::from("scene.png"),
            width: 1280,
            height: 720,
            clear_colour: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
            camera: CameraConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Defaults, with path overrides taken from the environment.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var_os(ASSET_DIR_ENV).map(PathBuf::from),
            std::env::var_os(OUTPUT_ENV).map(PathBuf::from),
        )
    }

    pub fn with_overrides(mut self, asset_dir: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if let Some(dir) = asset_dir {
            self.asset_dir = dir;
        }
        if let Some(out) = output {
            self.output = out;
        }
        self
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn texture_path(&self, file_name: &str) -> PathBuf {
        self.asset_dir.join(file_name)
    }
}
