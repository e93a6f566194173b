use anyhow::Context as _;

use scene_ngin::{
    config::SceneConfig,
    context::Context,
    data_structures::texture::GpuTextureBackend,
    frame::render_to_image,
    pipelines::scene::ScenePipeline,
    render::RenderContext,
    resources::mesh::ShapeMeshes,
    scene::Scene,
    shader::ShaderUniforms,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = SceneConfig::from_env();
    futures::executor::block_on(run(&config))
}

async fn run(config: &SceneConfig) -> anyhow::Result<()> {
    let ctx = Context::new(config).await?;

    let mut meshes = ShapeMeshes::new(&ctx.device);
    let backend = GpuTextureBackend::new(&ctx.device, &ctx.queue);
    let pipeline = ScenePipeline::new(&ctx.device, ctx.format, meshes.object_layout(), backend.layout());

    let mut shader = ShaderUniforms::new();
    shader.set_view(ctx.camera.view_projection(), ctx.camera.position());

    let mut scene = Scene::new(backend);
    scene.prepare_scene(config, &mut shader, &mut meshes)?;
    {
        let mut render_ctx = RenderContext::new(&mut shader, &mut meshes);
        scene.render_scene(&mut render_ctx);
    }
    log::info!("Composed {} draws", meshes.commands().len());

    let frame = render_to_image(&ctx, &pipeline, &shader, scene.textures.backend(), &mut meshes)?;
    frame
        .save(&config.output)
        .with_context(|| format!("could not write {}", config.output.display()))?;
    log::info!("Wrote {}x{} frame to {}", frame.width(), frame.height(), config.output.display());

    scene.release();
    Ok(())
}
