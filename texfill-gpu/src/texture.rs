//! RGBA8 texture upload and readback

use crate::utils::{padded_bytes_per_row, strip_row_padding};
use crate::GpuContext;
use texfill_core::{Error, Result, Rgba8Image, BYTES_PER_TEXEL};

/// Texture format used for both fill kernel images
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

fn extent(width: u32, height: u32) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    }
}

impl GpuContext {
    /// Create a 2D RGBA8 texture
    pub fn create_rgba8_texture(&self, label: &str, width: u32, height: u32, usage: wgpu::TextureUsages) -> Result<wgpu::Texture> {
        self.validate_extent(width, height)?;
        log::debug!("Creating texture '{}' {}x{} ({:?})", label, width, height, usage);

        Ok(self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent(width, height),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage,
            view_formats: &[TEXTURE_FORMAT],
        }))
    }

    /// Write the contents of `image` into `texture`, which must have the same size
    /// and `COPY_DST` usage
    pub fn upload_rgba8(&self, texture: &wgpu::Texture, image: &Rgba8Image) -> Result<()> {
        if (texture.width(), texture.height()) != image.dimensions() {
            return Err(Error::InvalidData(format!(
                "Image {}x{} does not match texture {}x{}",
                image.width(),
                image.height(),
                texture.width(),
                texture.height()
            )));
        }

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_bytes(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(BYTES_PER_TEXEL * image.width()),
                rows_per_image: Some(image.height()),
            },
            extent(image.width(), image.height()),
        );
        Ok(())
    }

    /// Copy `texture` back to host memory. The texture needs `COPY_SRC` usage.
    pub async fn download_rgba8(&self, texture: &wgpu::Texture) -> Result<Rgba8Image> {
        let width = texture.width();
        let height = texture.height();
        let padded_row = padded_bytes_per_row(width);

        let staging_buffer = self.create_buffer(
            "Readback Staging Buffer",
            padded_row as u64 * height as u64,
            wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        );

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Texture Readback"),
        });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &staging_buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            extent(width, height),
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = staging_buffer.slice(..);
        let (sender, receiver) = futures_intrusive::channel::shared::oneshot_channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |v| {
            // the receiver only goes away if the caller dropped the future
            let _ = sender.send(v);
        });

        self.device.poll(wgpu::Maintain::wait()).panic_on_timeout();

        match receiver.receive().await {
            Some(Ok(())) => {
                let data = buffer_slice.get_mapped_range();
                let texels = strip_row_padding(&data, width, height, padded_row);
                drop(data);
                staging_buffer.unmap();

                Rgba8Image::from_raw(width, height, texels)
            }
            Some(Err(e)) => Err(e.into()),
            None => Err(Error::Gpu("Failed to read GPU results".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn try_create_gpu_context() -> Option<GpuContext> {
        match GpuContext::new().await {
            Ok(gpu) => Some(gpu),
            Err(_) => {
                println!("GPU not available, skipping GPU-dependent test");
                None
            }
        }
    }

    /// Gradient with a distinct value in every channel of every texel
    fn gradient(width: u32, height: u32) -> Rgba8Image {
        let mut image = Rgba8Image::new(width, height);
        for y in 0..height {
            for x in 0..width {
                image
                    .put_texel(x, y, [x as u8, y as u8, (x ^ y) as u8, 255])
                    .unwrap();
            }
        }
        image
    }

    #[test]
    fn test_upload_download_unaligned_width() {
        pollster::block_on(async {
            let Some(gpu) = try_create_gpu_context().await else {
                return;
            };

            // 70 texels = 280 bytes per row, padded to 512 on readback
            let image = gradient(70, 5);
            let texture = gpu
                .create_rgba8_texture(
                    "Test Texture",
                    70,
                    5,
                    wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::COPY_SRC,
                )
                .unwrap();
            gpu.upload_rgba8(&texture, &image).unwrap();

            let back = gpu.download_rgba8(&texture).await.unwrap();
            assert_eq!(back, image);
        });
    }

    #[test]
    fn test_upload_size_mismatch() {
        pollster::block_on(async {
            let Some(gpu) = try_create_gpu_context().await else {
                return;
            };

            let texture = gpu
                .create_rgba8_texture("Test Texture", 4, 4, wgpu::TextureUsages::COPY_DST)
                .unwrap();
            let result = gpu.upload_rgba8(&texture, &Rgba8Image::new(4, 3));
            assert!(matches!(result, Err(Error::InvalidData(_))));
        });
    }

    #[test]
    fn test_zero_extent_rejected() {
        pollster::block_on(async {
            let Some(gpu) = try_create_gpu_context().await else {
                return;
            };

            let result = gpu.create_rgba8_texture("Empty", 0, 4, wgpu::TextureUsages::COPY_DST);
            assert!(result.is_err());
        });
    }
}
