//! Offscreen wgpu backend for the debug renderer.
//!
//! Owns the device, one RGBA8 render target, and one pipeline plus vertex
//! buffer per primitive batch. Each call to [`GpuRenderer::render`] drains
//! the facade's frame, uploads every batch in one write, and issues one draw
//! call per batch chunk inside a single render pass -- triangles first, then
//! lines, then points, so fills sit under outlines and markers.
//!
//! There is no window or surface: frames render offscreen and can be read
//! back and streamed to disk as numbered PNGs for an external encoder (see
//! [`capture::FrameExporter`]). Device creation is async the way wgpu wants
//! it; drive it with `pollster::block_on` like the engine does.
//!
//! GPU validation errors keep wgpu's default fatal behavior (panic). This is
//! a developer visualization tool; there is no recovery path worth building.

pub mod capture;
pub mod textures;

use std::ops::Range;
use std::path::Path;

use crate::camera::Camera;
use crate::color::Color;
use crate::draw::{DebugRenderer, DrawPass};
use crate::vertex::{
    LineVertex, PointVertex, TriangleVertex, LINE_BATCH_CAPACITY, POINT_BATCH_CAPACITY,
    TRIANGLE_BATCH_CAPACITY,
};

use self::capture::FrameExporter;
use self::textures::MaterialTextures;

// ---------------------------------------------------------------------------
// RenderError
// ---------------------------------------------------------------------------

/// Errors from GPU setup, frame read-back, and frame export.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No usable GPU adapter on this machine.
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    /// The adapter refused to hand out a device.
    #[error("failed to acquire GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// Mapping the read-back buffer failed.
    #[error("GPU read-back failed: {0}")]
    Readback(#[from] wgpu::BufferAsyncError),

    /// The read-back callback never delivered a result.
    #[error("GPU read-back did not complete")]
    ReadbackLost,

    /// A material texture could not be decoded or a frame could not be
    /// encoded.
    #[error("image encode/decode failed: {0}")]
    Image(#[from] image::ImageError),

    /// Material textures must all share one size to live in one array.
    #[error("material texture size mismatch: expected {expected:?}, got {got:?}")]
    MaterialTextureSize {
        expected: (u32, u32),
        got: (u32, u32),
    },

    /// Filesystem failure while exporting frames.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// RenderConfig
// ---------------------------------------------------------------------------

/// Construction parameters for [`GpuRenderer`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Render target width in pixels.
    pub width: u32,
    /// Render target height in pixels.
    pub height: u32,
    /// Background color of every frame.
    pub clear_color: Color,
    /// Material texture images, indexed by texture layer. Empty disables
    /// texturing (a placeholder keeps the pipeline layout valid).
    pub material_textures: Vec<std::path::PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 800,
            height: 600,
            clear_color: Color::rgb(0.05, 0.05, 0.1),
            material_textures: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Globals uniform
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Copy, Clone, bytemuck_derive::Pod, bytemuck_derive::Zeroable)]
struct Globals {
    projection: [f32; 16],
    viewport: [f32; 2],
    _pad: [f32; 2],
}

// ---------------------------------------------------------------------------
// Vertex buffer layouts
// ---------------------------------------------------------------------------

fn triangle_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 4] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4, 2 => Float32x2, 3 => Sint32];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<TriangleVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

fn line_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

fn point_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4, 2 => Float32];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
        // One marker per instance; the shader expands it to a quad.
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRS,
    }
}

// ---------------------------------------------------------------------------
// Growable vertex buffer
// ---------------------------------------------------------------------------

/// A vertex buffer preallocated to the batch threshold that grows (by
/// recreation) when a frame overflows it. The threshold is a capacity hint,
/// not a hard cap.
struct VertexBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: u64,
}

impl VertexBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: u64) -> VertexBuffer {
        VertexBuffer {
            label,
            buffer: Self::create(device, label, capacity),
            capacity,
        }
    }

    fn create(device: &wgpu::Device, label: &str, capacity: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        if bytes.len() as u64 > self.capacity {
            let grown = (bytes.len() as u64).next_power_of_two();
            tracing::debug!(label = self.label, bytes = grown, "growing vertex buffer");
            self.buffer = Self::create(device, self.label, grown);
            self.capacity = grown;
        }
        queue.write_buffer(&self.buffer, 0, bytes);
    }

    fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}

// ---------------------------------------------------------------------------
// GpuRenderer
// ---------------------------------------------------------------------------

enum PassDraw {
    Triangles(Range<u32>),
    Lines(Range<u32>),
    Points(Range<u32>),
}

/// Offscreen renderer for [`DebugRenderer`] frames.
pub struct GpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    target: wgpu::Texture,
    target_view: wgpu::TextureView,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    materials: MaterialTextures,
    has_material_textures: bool,
    triangle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    triangle_buffer: VertexBuffer,
    line_buffer: VertexBuffer,
    point_buffer: VertexBuffer,
    exporter: Option<FrameExporter>,
    /// The 2D orthographic camera; uploaded every frame.
    pub camera: Camera,
}

impl GpuRenderer {
    /// Initialize wgpu and build pipelines and buffers.
    ///
    /// Async because wgpu adapter/device selection is; call with `.await` or
    /// `pollster::block_on`.
    ///
    /// # Errors
    ///
    /// Fails if no GPU adapter or device is available, or a configured
    /// material texture cannot be loaded.
    pub async fn new(config: RenderConfig) -> Result<GpuRenderer, RenderError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("orrery_debug_renderer"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        tracing::info!(adapter = %adapter.get_info().name, "GPU device ready");

        let format = wgpu::TextureFormat::Rgba8UnormSrgb;
        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen_target"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());

        // Globals uniform: projection + viewport, rewritten per frame.
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals_uniform"),
            size: std::mem::size_of::<Globals>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
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
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let materials = MaterialTextures::new(&device, &queue, &config.material_textures)?;
        let has_material_textures = !config.material_textures.is_empty();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("debug_renderer_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders.wgsl").into()),
        });

        let triangle_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("triangle_pipeline_layout"),
                bind_group_layouts: &[&globals_layout, materials.layout()],
                push_constant_ranges: &[],
            });
        let thin_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("thin_pipeline_layout"),
                bind_group_layouts: &[&globals_layout],
                push_constant_ranges: &[],
            });

        let make_pipeline = |label: &str,
                             layout: &wgpu::PipelineLayout,
                             vs: &str,
                             fs: &str,
                             buffer: wgpu::VertexBufferLayout<'_>,
                             topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(vs),
                    buffers: &[buffer],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fs),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
        };

        let triangle_pipeline = make_pipeline(
            "triangle_pipeline",
            &triangle_pipeline_layout,
            "vs_triangle",
            "fs_triangle",
            triangle_buffer_layout(),
            wgpu::PrimitiveTopology::TriangleList,
        );
        let line_pipeline = make_pipeline(
            "line_pipeline",
            &thin_pipeline_layout,
            "vs_line",
            "fs_line",
            line_buffer_layout(),
            wgpu::PrimitiveTopology::LineList,
        );
        let point_pipeline = make_pipeline(
            "point_pipeline",
            &thin_pipeline_layout,
            "vs_point",
            "fs_point",
            point_buffer_layout(),
            wgpu::PrimitiveTopology::TriangleList,
        );

        let triangle_buffer = VertexBuffer::new(
            &device,
            "triangle_vertices",
            (TRIANGLE_BATCH_CAPACITY * std::mem::size_of::<TriangleVertex>()) as u64,
        );
        let line_buffer = VertexBuffer::new(
            &device,
            "line_vertices",
            (LINE_BATCH_CAPACITY * std::mem::size_of::<LineVertex>()) as u64,
        );
        let point_buffer = VertexBuffer::new(
            &device,
            "point_vertices",
            (POINT_BATCH_CAPACITY * std::mem::size_of::<PointVertex>()) as u64,
        );

        Ok(GpuRenderer {
            device,
            queue,
            target,
            target_view,
            width: config.width,
            height: config.height,
            clear_color: wgpu::Color {
                r: config.clear_color.r as f64,
                g: config.clear_color.g as f64,
                b: config.clear_color.b as f64,
                a: config.clear_color.a as f64,
            },
            globals_buffer,
            globals_bind_group,
            materials,
            has_material_textures,
            triangle_pipeline,
            line_pipeline,
            point_pipeline,
            triangle_buffer,
            line_buffer,
            point_buffer,
            exporter: None,
            camera: Camera::default(),
        })
    }

    /// Whether real material textures were loaded (as opposed to the
    /// placeholder). Use this to decide the facade's texture capability.
    pub fn has_material_textures(&self) -> bool {
        self.has_material_textures
    }

    /// Number of selectable material texture layers.
    pub fn material_layer_count(&self) -> u32 {
        self.materials.layer_count()
    }

    /// Render target size in pixels.
    pub fn target_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Enable PNG frame export into `dir` after every rendered frame.
    pub fn set_frame_export(&mut self, dir: impl AsRef<Path>) -> Result<(), RenderError> {
        self.exporter = Some(FrameExporter::new(dir.as_ref())?);
        tracing::info!(dir = %dir.as_ref().display(), "frame export enabled");
        Ok(())
    }

    /// Disable frame export. Rendering continues offscreen with no
    /// read-back cost.
    pub fn clear_frame_export(&mut self) {
        self.exporter = None;
    }

    /// Drain the facade and render one frame.
    ///
    /// Uploads each batch kind once, then replays the frame's passes in
    /// order inside a single render pass: one draw call per batch chunk.
    /// With frame export enabled, the finished frame is read back and
    /// written as the next numbered PNG.
    pub fn render(&mut self, renderer: &mut DebugRenderer) -> Result<(), RenderError> {
        let frame = renderer.take_frame();

        let mut triangles: Vec<TriangleVertex> = Vec::new();
        let mut lines: Vec<LineVertex> = Vec::new();
        let mut points: Vec<PointVertex> = Vec::new();
        let mut draws: Vec<PassDraw> = Vec::with_capacity(frame.passes.len());
        for pass in &frame.passes {
            match pass {
                DrawPass::Triangles(chunk) => {
                    let start = triangles.len() as u32;
                    triangles.extend_from_slice(chunk);
                    draws.push(PassDraw::Triangles(start..start + chunk.len() as u32));
                }
                DrawPass::Lines(chunk) => {
                    let start = lines.len() as u32;
                    lines.extend_from_slice(chunk);
                    draws.push(PassDraw::Lines(start..start + chunk.len() as u32));
                }
                DrawPass::Points(chunk) => {
                    let start = points.len() as u32;
                    points.extend_from_slice(chunk);
                    draws.push(PassDraw::Points(start..start + chunk.len() as u32));
                }
            }
        }

        let globals = Globals {
            projection: self.camera.matrix(),
            viewport: [self.width as f32, self.height as f32],
            _pad: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        self.triangle_buffer
            .upload(&self.device, &self.queue, bytemuck::cast_slice(&triangles));
        self.line_buffer
            .upload(&self.device, &self.queue, bytemuck::cast_slice(&lines));
        self.point_buffer
            .upload(&self.device, &self.queue, bytemuck::cast_slice(&points));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("debug_renderer_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("debug_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for draw in &draws {
                match draw {
                    PassDraw::Triangles(range) => {
                        pass.set_pipeline(&self.triangle_pipeline);
                        pass.set_bind_group(1, self.materials.bind_group(), &[]);
                        pass.set_vertex_buffer(0, self.triangle_buffer.slice());
                        pass.draw(range.clone(), 0..1);
                    }
                    PassDraw::Lines(range) => {
                        pass.set_pipeline(&self.line_pipeline);
                        pass.set_vertex_buffer(0, self.line_buffer.slice());
                        pass.draw(range.clone(), 0..1);
                    }
                    PassDraw::Points(range) => {
                        pass.set_pipeline(&self.point_pipeline);
                        pass.set_vertex_buffer(0, self.point_buffer.slice());
                        // Six quad corners per marker instance.
                        pass.draw(0..6, range.clone());
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));

        if self.exporter.is_some() {
            let rgba = capture::read_rgba(
                &self.device,
                &self.queue,
                &self.target,
                self.width,
                self.height,
            )?;
            if let Some(exporter) = self.exporter.as_mut() {
                exporter.write_frame(self.width, self.height, &rgba)?;
            }
        }

        Ok(())
    }
}
