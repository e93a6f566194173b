use wgpu::util::DeviceExt;

use crate::{
    data_structures::mesh::{MeshData, PrimitiveKind},
    shader::{ObjectUniform, ShaderUniforms},
};

/// Unit-geometry draws for each [`PrimitiveKind`].
///
/// `load_mesh` uploads a kind once; `draw_mesh` draws it with whatever state
/// `shader` currently holds.
pub trait MeshLibrary<S: ?Sized> {
    fn load_mesh(&mut self, kind: PrimitiveKind) -> anyhow::Result<()>;

    fn draw_mesh(&mut self, kind: PrimitiveKind, shader: &S);
}

pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

/// One queued draw: which primitive, and the object uniform at draw time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub kind: PrimitiveKind,
    pub object: ObjectUniform,
}

const INITIAL_COMMAND_CAPACITY: usize = 32;

/**
 * GPU mesh library for the scene pipeline.
 *
 * A render pass cannot be paused to change uniforms between draws, so draws are
 * queued with a snapshot of the object uniform. Before the pass every snapshot
 * is written into one uniform buffer at a fixed stride and each draw selects
 * its snapshot through a dynamic offset.
 */
pub struct ShapeMeshes {
    device: wgpu::Device,
    meshes: Vec<Option<GpuMesh>>,
    commands: Vec<DrawCommand>,
    layout: wgpu::BindGroupLayout,
    stride: wgpu::BufferAddress,
    capacity: usize,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ShapeMeshes {
    pub fn new(device: &wgpu::Device) -> Self {
        let layout = object_bind_group_layout(device);
        let alignment = device.limits().min_uniform_buffer_offset_alignment as wgpu::BufferAddress;
        let stride = align_to(std::mem::size_of::<ObjectUniform>() as wgpu::BufferAddress, alignment);
        let (buffer, bind_group) = mk_object_buffer(device, &layout, stride, INITIAL_COMMAND_CAPACITY);
        Self {
            device: device.clone(),
            meshes: PrimitiveKind::ALL.iter().map(|_| None).collect(),
            commands: Vec::new(),
            layout,
            stride,
            capacity: INITIAL_COMMAND_CAPACITY,
            buffer,
            bind_group,
        }
    }

    /// Layout of bind group 1 (per-draw object uniform, dynamic offset).
    pub fn object_layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn is_loaded(&self, kind: PrimitiveKind) -> bool {
        self.meshes[kind.index()].is_some()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget the queued draws, e.g. at the start of a new frame.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Copy every queued object uniform into the GPU buffer, growing it when
    /// there are more draws than slots.
    pub fn prepare(&mut self, queue: &wgpu::Queue) {
        if self.commands.is_empty() {
            return;
        }
        if self.commands.len() > self.capacity {
            let capacity = self.commands.len().next_power_of_two();
            let (buffer, bind_group) = mk_object_buffer(&self.device, &self.layout, self.stride, capacity);
            self.buffer = buffer;
            self.bind_group = bind_group;
            self.capacity = capacity;
        }
        let stride = self.stride as usize;
        let mut data = vec![0u8; stride * self.commands.len()];
        for (i, command) in self.commands.iter().enumerate() {
            let bytes = bytemuck::bytes_of(&command.object);
            data[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        queue.write_buffer(&self.buffer, 0, &data);
    }

    /// Record every queued draw into `render_pass`. The scene pipeline and
    /// bind groups 0 and 2 must already be set.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        for (i, command) in self.commands.iter().enumerate() {
            let Some(mesh) = &self.meshes[command.kind.index()] else {
                continue;
            };
            let offset = (i as wgpu::BufferAddress * self.stride) as wgpu::DynamicOffset;
            render_pass.set_bind_group(1, &self.bind_group, &[offset]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.num_elements, 0, 0..1);
        }
    }
}

impl MeshLibrary<ShaderUniforms> for ShapeMeshes {
    fn load_mesh(&mut self, kind: PrimitiveKind) -> anyhow::Result<()> {
        if self.is_loaded(kind) {
            return Ok(());
        }
        let data = MeshData::for_kind(kind);
        if data.indices.is_empty() {
            anyhow::bail!("{} mesh has no triangles", kind.name());
        }
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", kind.name())),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", kind.name())),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        log::debug!(
            "Loaded {} mesh: {} vertices, {} triangles",
            kind.name(),
            data.vertices.len(),
            data.triangle_count()
        );
        self.meshes[kind.index()] = Some(GpuMesh {
            vertex_buffer,
            index_buffer,
            num_elements: data.indices.len() as u32,
        });
        Ok(())
    }

    fn draw_mesh(&mut self, kind: PrimitiveKind, shader: &ShaderUniforms) {
        if !self.is_loaded(kind) {
            log::warn!("Skipping draw of {} mesh: it was never loaded", kind.name());
            return;
        }
        self.commands.push(DrawCommand {
            kind,
            object: shader.object(),
        });
    }
}

pub fn object_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
            },
            count: None,
        }],
        label: Some("object_bind_group_layout"),
    })
}

fn mk_object_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    stride: wgpu::BufferAddress,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Object Uniform Buffer"),
        size: stride * capacity as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
            }),
        }],
        label: Some("object_bind_group"),
    });
    (buffer, bind_group)
}

/// Round `value` up to a multiple of `alignment`.
pub fn align_to(value: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    value.div_ceil(alignment) * alignment
}
