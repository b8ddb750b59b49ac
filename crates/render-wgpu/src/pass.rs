use crate::shaders;
use bytemuck::{Pod, Zeroable};
use shadowcast_common::ChunkPos;
use shadowcast_render::{ChunkDraw, DirectionalLight};
use wgpu::util::DeviceExt;

/// Depth format of the shadow map.
pub const SHADOW_MAP_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    light_view_proj: [[f32; 4]; 4],
    time: f32,
    _pad: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ChunkLocals {
    // xyz = chunk offset, w unused (vec4 for uniform alignment).
    chunk_offset: [f32; 4],
}

/// GPU-side buffers for one uploaded chunk.
pub struct GpuChunk {
    pub chunk: ChunkPos,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    locals_bind_group: wgpu::BindGroup,
}

impl GpuChunk {
    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

/// Depth-only shadow map renderer.
///
/// Owns the shadow map texture and a pipeline whose single vertex attribute
/// is the packed `u32` position.
pub struct ShadowMapRenderer {
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    locals_layout: wgpu::BindGroupLayout,
    shadow_map: wgpu::TextureView,
    size: u32,
}

impl ShadowMapRenderer {
    /// Create the pass with a square shadow map of the given edge length.
    pub fn new(device: &wgpu::Device, size: u32) -> Self {
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shadow_globals"),
            contents: bytemuck::bytes_of(&Globals {
                light_view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
                time: 0.0,
                _pad: [0.0; 3],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_globals_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow_globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let locals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_locals_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shadow_pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &locals_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shadow_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SHADOW_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shadow_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_shadow"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<u32>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Uint32,
                    ],
                }],
            },
            // Depth capture only; no color targets.
            fragment: None,
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: SHADOW_MAP_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let shadow_map = Self::create_shadow_map(device, size);

        Self {
            pipeline,
            globals_buffer,
            globals_bind_group,
            locals_layout,
            shadow_map,
            size,
        }
    }

    /// Upload one chunk draw. The chunk offset is baked into a per-chunk
    /// uniform here and never rewritten.
    pub fn upload_chunk(&self, device: &wgpu::Device, draw: &ChunkDraw) -> GpuChunk {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk_vertex_buffer"),
            contents: bytemuck::cast_slice(&draw.mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk_index_buffer"),
            contents: bytemuck::cast_slice(&draw.mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let locals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk_locals"),
            contents: bytemuck::bytes_of(&ChunkLocals {
                chunk_offset: [draw.offset.x, draw.offset.y, draw.offset.z, 0.0],
            }),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let locals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("chunk_locals_bind_group"),
            layout: &self.locals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: locals_buffer.as_entire_binding(),
            }],
        });

        tracing::debug!(
            chunk = ?draw.chunk,
            vertices = draw.mesh.vertex_count(),
            "uploaded chunk for shadow pass"
        );

        GpuChunk {
            chunk: draw.chunk,
            vertex_buffer,
            index_buffer,
            index_count: draw.mesh.indices.len() as u32,
            locals_bind_group,
        }
    }

    /// Render the shadow pass: clear the map, then draw every chunk.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        chunks: &[GpuChunk],
        light: &DirectionalLight,
        time: f32,
    ) {
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                light_view_proj: light.view_projection().to_cols_array_2d(),
                time,
                _pad: [0.0; 3],
            }),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("shadow_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_map,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for chunk in chunks {
                pass.set_bind_group(1, &chunk.locals_bind_group, &[]);
                pass.set_vertex_buffer(0, chunk.vertex_buffer.slice(..));
                pass.set_index_buffer(chunk.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..chunk.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    /// View of the shadow map for sampling in later passes.
    pub fn shadow_map_view(&self) -> &wgpu::TextureView {
        &self.shadow_map
    }

    /// Edge length of the square shadow map.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn resize(&mut self, device: &wgpu::Device, size: u32) {
        self.size = size;
        self.shadow_map = Self::create_shadow_map(device, size);
    }

    fn create_shadow_map(device: &wgpu::Device, size: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("shadow_map"),
            size: wgpu::Extent3d {
                width: size.max(1),
                height: size.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SHADOW_MAP_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
