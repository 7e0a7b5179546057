//! Frame read-back and PNG export.
//!
//! The offscreen target is copied into a mappable buffer, row padding is
//! stripped, and the pixels are written out as numbered PNG frames. An
//! external encoder turns the frame sequence into video; encoding itself is
//! out of scope here.

use std::path::{Path, PathBuf};

use crate::gpu::RenderError;

/// Copy the render target into CPU memory as tightly-packed RGBA8 rows.
///
/// Blocks until the copy completes. Rows are unpadded from wgpu's 256-byte
/// row alignment before returning.
pub(crate) fn read_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, RenderError> {
    let bytes_per_row = 4 * width;
    let padded_bytes_per_row =
        bytes_per_row.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("frame_readback"),
        size: padded_bytes_per_row as u64 * height as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("frame_readback_encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::ImageCopyTexture {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::ImageCopyBuffer {
            buffer: &readback,
            layout: wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = readback.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    let _ = device.poll(wgpu::Maintain::Wait);
    rx.recv().map_err(|_| RenderError::ReadbackLost)??;

    let mapped = slice.get_mapped_range();
    let mut pixels = Vec::with_capacity((bytes_per_row * height) as usize);
    for row in mapped.chunks_exact(padded_bytes_per_row as usize) {
        pixels.extend_from_slice(&row[..bytes_per_row as usize]);
    }
    drop(mapped);
    readback.unmap();

    Ok(pixels)
}

/// Streams completed frames to a directory as numbered PNG files.
pub struct FrameExporter {
    dir: PathBuf,
    next_frame: u32,
}

impl FrameExporter {
    /// Create the output directory (if needed) and start at frame zero.
    pub fn new(dir: impl Into<PathBuf>) -> Result<FrameExporter, RenderError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(FrameExporter { dir, next_frame: 0 })
    }

    /// Write one tightly-packed RGBA8 frame and advance the frame counter.
    pub fn write_frame(
        &mut self,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<PathBuf, RenderError> {
        let path = self.dir.join(format!("frame_{:05}.png", self.next_frame));
        image::save_buffer(&path, rgba, width, height, image::ExtendedColorType::Rgba8)?;
        self.next_frame += 1;
        tracing::trace!(path = %path.display(), "frame exported");
        Ok(path)
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u32 {
        self.next_frame
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
