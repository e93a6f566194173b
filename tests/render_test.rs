#[cfg(feature = "integration-tests")]
mod gpu {
    use scene_ngin::{
        config::SceneConfig,
        context::Context,
        data_structures::{mesh::PrimitiveKind, texture::GpuTextureBackend, transform::TransformParams},
        frame::render_to_image,
        pipelines::scene::ScenePipeline,
        render::{Composer, RenderContext, RenderObject},
        resources::{material::MaterialRegistry, mesh::{MeshLibrary, ShapeMeshes}, texture::TextureRegistry},
        scene::{Scene, TEXTURE_TAGS},
        shader::ShaderUniforms,
    };
    use wgpu::Color;

    fn small_config(asset_dir: &std::path::Path) -> SceneConfig {
        let mut config = SceneConfig::default().with_overrides(Some(asset_dir.to_path_buf()), None);
        config.width = 64;
        config.height = 48;
        config
    }

    #[test]
    fn should_render_clear_colour() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config(dir.path());
        config.clear_colour = Color::WHITE;
        let ctx = futures::executor::block_on(Context::new(&config)).unwrap();
        let mut meshes = ShapeMeshes::new(&ctx.device);
        let backend = GpuTextureBackend::new(&ctx.device, &ctx.queue);
        let pipeline = ScenePipeline::new(&ctx.device, ctx.format, meshes.object_layout(), backend.layout());
        let shader = ShaderUniforms::new();

        let frame = render_to_image(&ctx, &pipeline, &shader, &backend, &mut meshes).unwrap();

        assert_eq!((frame.width(), frame.height()), (64, 48));
        for pixel in frame.pixels() {
            assert_eq!(*pixel, image::Rgba([255, 255, 255, 255]));
        }
    }

    #[test]
    fn should_draw_a_flat_coloured_box_over_the_clear_colour() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config(dir.path());
        config.clear_colour = Color::BLACK;
        let ctx = futures::executor::block_on(Context::new(&config)).unwrap();
        let mut meshes = ShapeMeshes::new(&ctx.device);
        let textures = TextureRegistry::new(GpuTextureBackend::new(&ctx.device, &ctx.queue));
        let materials = MaterialRegistry::new();
        let pipeline = ScenePipeline::new(
            &ctx.device,
            ctx.format,
            meshes.object_layout(),
            textures.backend().layout(),
        );
        let mut shader = ShaderUniforms::new();
        shader.set_view(ctx.camera.view_projection(), ctx.camera.position());
        meshes.load_mesh(PrimitiveKind::Box).unwrap();

        // big enough to cover the centre of the view, lighting off
        let object = RenderObject::new(
            PrimitiveKind::Box,
            TransformParams::new().scaled(6.0, 6.0, 6.0).at(0.0, 1.5, 0.0),
        )
        .colored(1.0, 0.0, 0.0, 1.0);
        {
            let mut render_ctx = RenderContext::new(&mut shader, &mut meshes);
            Composer::new(&textures, &materials).draw(&mut render_ctx, &object);
        }

        let frame = render_to_image(&ctx, &pipeline, &shader, textures.backend(), &mut meshes).unwrap();

        assert_eq!(*frame.get_pixel(32, 24), image::Rgba([255, 0, 0, 255]));
        assert_eq!(*frame.get_pixel(0, 0), image::Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn should_render_the_coffee_shop() {
        let dir = tempfile::tempdir().unwrap();
        for tag in TEXTURE_TAGS {
            image::RgbImage::from_pixel(16, 16, image::Rgb([150, 110, 70]))
                .save(dir.path().join(format!("{tag}.jpg")))
                .unwrap();
        }
        let mut config = small_config(dir.path());
        config.clear_colour = Color::BLACK;
        let ctx = futures::executor::block_on(Context::new(&config)).unwrap();
        let mut meshes = ShapeMeshes::new(&ctx.device);
        let backend = GpuTextureBackend::new(&ctx.device, &ctx.queue);
        let pipeline = ScenePipeline::new(&ctx.device, ctx.format, meshes.object_layout(), backend.layout());
        let mut shader = ShaderUniforms::new();
        shader.set_view(ctx.camera.view_projection(), ctx.camera.position());

        let mut scene = Scene::new(backend);
        scene.prepare_scene(&config, &mut shader, &mut meshes).unwrap();
        assert_eq!(scene.textures.backend().bound_slots(), TEXTURE_TAGS.len());
        {
            let mut render_ctx = RenderContext::new(&mut shader, &mut meshes);
            scene.render_scene(&mut render_ctx);
        }
        assert_eq!(meshes.commands().len(), 19);

        let frame = render_to_image(&ctx, &pipeline, &shader, scene.textures.backend(), &mut meshes).unwrap();
        let background = image::Rgba([0, 0, 0, 255]);
        let drawn = frame.pixels().filter(|p| **p != background).count();
        assert!(drawn > frame.pixels().len() / 2, "only {drawn} pixels drawn");

        scene.release();
        assert_eq!(scene.textures.backend().bound_slots(), 0);
    }

    #[test]
    fn should_compose_a_fresh_queue_every_frame() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(dir.path());
        let ctx = futures::executor::block_on(Context::new(&config)).unwrap();
        let mut meshes = ShapeMeshes::new(&ctx.device);
        let backend = GpuTextureBackend::new(&ctx.device, &ctx.queue);
        let pipeline = ScenePipeline::new(&ctx.device, ctx.format, meshes.object_layout(), backend.layout());
        let mut shader = ShaderUniforms::new();
        shader.set_view(ctx.camera.view_projection(), ctx.camera.position());
        let mut scene = Scene::new(backend);
        scene.prepare_scene(&config, &mut shader, &mut meshes).unwrap();

        for _ in 0..2 {
            {
                let mut render_ctx = RenderContext::new(&mut shader, &mut meshes);
                scene.render_scene(&mut render_ctx);
            }
            assert_eq!(meshes.commands().len(), 19);
            render_to_image(&ctx, &pipeline, &shader, scene.textures.backend(), &mut meshes).unwrap();
            assert!(meshes.commands().is_empty());
        }
    }

    #[test]
    fn should_skip_draws_of_unloaded_meshes() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(dir.path());
        let ctx = futures::executor::block_on(Context::new(&config)).unwrap();
        let mut meshes = ShapeMeshes::new(&ctx.device);
        let shader = ShaderUniforms::new();
        meshes.load_mesh(PrimitiveKind::Box).unwrap();

        meshes.draw_mesh(PrimitiveKind::Torus, &shader);
        assert!(!meshes.is_loaded(PrimitiveKind::Torus));
        assert!(meshes.commands().is_empty());

        meshes.draw_mesh(PrimitiveKind::Box, &shader);
        assert_eq!(meshes.commands().len(), 1);
        assert_eq!(meshes.commands()[0].kind, PrimitiveKind::Box);
    }

    #[test]
    fn should_grow_the_object_buffer_for_many_draws() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config(dir.path());
        config.clear_colour = Color::BLACK;
        let ctx = futures::executor::block_on(Context::new(&config)).unwrap();
        let mut meshes = ShapeMeshes::new(&ctx.device);
        let textures = TextureRegistry::new(GpuTextureBackend::new(&ctx.device, &ctx.queue));
        let materials = MaterialRegistry::new();
        let pipeline = ScenePipeline::new(
            &ctx.device,
            ctx.format,
            meshes.object_layout(),
            textures.backend().layout(),
        );
        let mut shader = ShaderUniforms::new();
        shader.set_view(ctx.camera.view_projection(), ctx.camera.position());
        meshes.load_mesh(PrimitiveKind::Box).unwrap();

        // 99 small boxes first, then one large green box over the centre
        let mut objects: Vec<RenderObject> = (0..99)
            .map(|i| {
                RenderObject::new(
                    PrimitiveKind::Box,
                    TransformParams::new()
                        .scaled(0.1, 0.1, 0.1)
                        .at(-5.0 + (i % 10) as f32, 8.0 + (i / 10) as f32 * 0.2, -20.0),
                )
                .colored(0.0, 0.0, 1.0, 1.0)
            })
            .collect();
        objects.push(
            RenderObject::new(
                PrimitiveKind::Box,
                TransformParams::new().scaled(6.0, 6.0, 6.0).at(0.0, 1.5, 0.0),
            )
            .colored(0.0, 1.0, 0.0, 1.0),
        );
        {
            let mut render_ctx = RenderContext::new(&mut shader, &mut meshes);
            Composer::new(&textures, &materials).draw_all(&mut render_ctx, &objects);
        }
        assert_eq!(meshes.commands().len(), 100);

        let frame = render_to_image(&ctx, &pipeline, &shader, textures.backend(), &mut meshes).unwrap();

        // the last draw reads the uniform at the far end of the grown buffer
        assert_eq!(*frame.get_pixel(32, 24), image::Rgba([0, 255, 0, 255]));
    }
}
