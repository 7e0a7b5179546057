//! Material texture array for filled shapes.
//!
//! The fragment stage selects among a small fixed set of material textures
//! by per-vertex layer index. All images load into one 2D array texture, so
//! every material must share the same dimensions. With no images configured
//! a 1x1 white placeholder keeps the bind group valid; callers then leave
//! the facade's texture capability off.

use std::path::Path;

use crate::gpu::RenderError;

pub(crate) struct MaterialTextures {
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    layer_count: u32,
}

impl MaterialTextures {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        paths: &[impl AsRef<Path>],
    ) -> Result<MaterialTextures, RenderError> {
        let layers = if paths.is_empty() {
            vec![(1u32, 1u32, vec![255u8; 4])]
        } else {
            let mut decoded = Vec::with_capacity(paths.len());
            for path in paths {
                let image = image::open(path.as_ref())?.into_rgba8();
                decoded.push((image.width(), image.height(), image.into_raw()));
            }
            decoded
        };

        let (width, height, _) = layers[0];
        for (w, h, _) in &layers {
            if (*w, *h) != (width, height) {
                return Err(RenderError::MaterialTextureSize {
                    expected: (width, height),
                    got: (*w, *h),
                });
            }
        }
        let layer_count = layers.len() as u32;

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("material_textures"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: layer_count,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (layer, (_, _, pixels)) in layers.iter().enumerate() {
            queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                pixels,
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("material_textures_view"),
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            ..Default::default()
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("material_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2Array,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material_bind_group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        tracing::debug!(layers = layer_count, width, height, "material textures ready");

        Ok(MaterialTextures {
            layout,
            bind_group,
            layer_count,
        })
    }

    pub(crate) fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Number of selectable material layers (1 for the placeholder).
    pub(crate) fn layer_count(&self) -> u32 {
        self.layer_count
    }
}
