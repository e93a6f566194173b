//! Offscreen frame rendering and readback.

use std::{iter, time::Duration};

use anyhow::Context as _;

use crate::{
    context::Context,
    data_structures::texture::GpuTextureBackend,
    pipelines::scene::ScenePipeline,
    resources::mesh::ShapeMeshes,
    shader::ShaderUniforms,
};

const BYTES_PER_PIXEL: u32 = 4;
const READBACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Rows of a texture-to-buffer copy must be padded to this many bytes.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Draw every queued mesh command into an offscreen target and read the
/// result back as an RGBA image. The queue is empty afterwards, ready for the
/// next frame to be composed.
///
/// `uniforms` supplies the per-frame block (camera and lights); the per-draw
/// blocks were captured by `meshes` when the draws were composed.
pub fn render_to_image(
    ctx: &Context,
    pipeline: &ScenePipeline,
    uniforms: &ShaderUniforms,
    textures: &GpuTextureBackend,
    meshes: &mut ShapeMeshes,
) -> anyhow::Result<image::RgbaImage> {
    let (width, height) = (ctx.width, ctx.height);
    pipeline.write_frame(&ctx.queue, &uniforms.frame());
    meshes.prepare(&ctx.queue);

    let extent = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let target = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Offscreen Colour Target"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: ctx.format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Scene Render Encoder"),
        });
    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &target_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(ctx.clear_colour),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &ctx.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
            multiview_mask: None,
        });

        render_pass.set_pipeline(&pipeline.pipeline);
        render_pass.set_bind_group(0, &pipeline.frame_bind_group, &[]);
        render_pass.set_bind_group(2, textures.bind_group(), &[]);
        meshes.draw(&mut render_pass);
    }
    meshes.clear();

    let padded_row = padded_bytes_per_row(width);
    let output_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Readback Buffer"),
        size: (padded_row * height) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &target,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row),
                rows_per_image: Some(height),
            },
        },
        extent,
    );
    ctx.queue.submit(iter::once(encoder.finish()));

    let pixels = futures::executor::block_on(read_buffer(&ctx.device, &output_buffer))?;
    let image = unpad_rows(&pixels, width, height, padded_row);
    output_buffer.unmap();
    target.destroy();

    image::RgbaImage::from_raw(width, height, image).context("readback has the wrong size")
}

async fn read_buffer(device: &wgpu::Device, buffer: &wgpu::Buffer) -> anyhow::Result<Vec<u8>> {
    // The mapping must be requested before polling, or the wait never resolves.
    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
    let buffer_slice = buffer.slice(..);
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device
        .poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(READBACK_TIMEOUT),
        })
        .context("waiting for the GPU failed")?;
    rx.receive()
        .await
        .context("readback channel closed")?
        .context("could not map the readback buffer")?;
    let data = buffer_slice.get_mapped_range();
    Ok(data.to_vec())
}

/// Drop the per-row padding added for the buffer copy.
pub fn unpad_rows(data: &[u8], width: u32, height: u32, padded_row: u32) -> Vec<u8> {
    let row = (width * BYTES_PER_PIXEL) as usize;
    let padded_row = padded_row as usize;
    (0..height as usize)
        .flat_map(|y| &data[y * padded_row..y * padded_row + row])
        .copied()
        .collect()
}
