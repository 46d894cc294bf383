//! GPU fill kernel
//!
//! Every invocation stores the bound color into the output texel addressed by
//! its global invocation id. Workgroups hold a single invocation, so a dispatch
//! of `width x height x 1` workgroups touches exactly the texels of a
//! `width x height` region anchored at the origin. Invocations write disjoint
//! texels and need no ordering between them.

use crate::texture::TEXTURE_FORMAT;
use crate::GpuContext;
use texfill_core::{Color, DispatchGrid, Error, Result, Rgba8Image};

/// Name of the kernel's entry point
pub const FILL_ENTRY_POINT: &str = "fill";

/// Binding slots of the kernel's single bind group
pub const SOURCE_BINDING: u32 = 0;
pub const OUTPUT_BINDING: u32 = 1;
pub const COLOR_BINDING: u32 = 2;

// `source_image` is part of the interface but is never sampled.
const FILL_SHADER: &str = r#"
@group(0) @binding(0) var source_image: texture_2d<f32>;
@group(0) @binding(1) var output_image: texture_storage_2d<rgba8unorm, write>;
@group(0) @binding(2) var<uniform> color: vec4<f32>;

@compute @workgroup_size(1)
fn fill(@builtin(global_invocation_id) global_id: vec3<u32>) {
    textureStore(output_image, vec2<i32>(global_id.xy), color);
}
"#;

/// Compiled fill pipeline and its bind group layout
pub struct FillKernel {
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub pipeline: wgpu::ComputePipeline,
}

impl FillKernel {
    /// Compile the kernel for `gpu`
    pub fn new(gpu: &GpuContext) -> Self {
        let shader = gpu.create_shader_module("Fill Kernel", FILL_SHADER);

        let bind_group_layout = gpu.create_bind_group_layout(
            "Fill Kernel",
            &[
                wgpu::BindGroupLayoutEntry {
                    binding: SOURCE_BINDING,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: OUTPUT_BINDING,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: TEXTURE_FORMAT,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: COLOR_BINDING,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Color>() as u64),
                    },
                    count: None,
                },
            ],
        );

        let pipeline_layout = gpu.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Fill Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = gpu.device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Fill Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: FILL_ENTRY_POINT,
            compilation_options: Default::default(),
        });

        Self {
            bind_group_layout,
            pipeline,
        }
    }

    /// Record and submit one fill pass over `grid`.
    ///
    /// The grid must fit inside the target's output image. An empty grid
    /// submits nothing.
    pub fn dispatch(&self, gpu: &GpuContext, target: &FillTarget, grid: DispatchGrid) -> Result<()> {
        grid.validate_for(target.width, target.height)?;
        gpu.validate_grid(grid)?;
        if grid.is_empty() {
            log::warn!("Skipping fill dispatch with empty grid {}", grid);
            return Ok(());
        }

        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Fill"),
        });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Fill Pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &target.bind_group, &[]);
            compute_pass.dispatch_workgroups(grid.width, grid.height, 1);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        log::debug!("Dispatched fill over {} ({} invocations)", grid, grid.invocations());
        Ok(())
    }
}

/// GPU-resident images and color uniform bound to the fill kernel
pub struct FillTarget {
    pub width: u32,
    pub height: u32,
    pub source_texture: wgpu::Texture,
    pub output_texture: wgpu::Texture,
    pub color_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl FillTarget {
    /// Upload `source` and allocate an output image of the same size.
    ///
    /// When `initial_output` is given it becomes the output's pre-dispatch
    /// contents; otherwise the output starts transparent black. The color
    /// starts as [`Color::TRANSPARENT`].
    pub fn new(
        gpu: &GpuContext,
        kernel: &FillKernel,
        source: &Rgba8Image,
        initial_output: Option<&Rgba8Image>,
    ) -> Result<Self> {
        let (width, height) = source.dimensions();
        if let Some(initial) = initial_output {
            if initial.dimensions() != (width, height) {
                return Err(Error::InvalidData(format!(
                    "Initial output {}x{} does not match source {}x{}",
                    initial.width(),
                    initial.height(),
                    width,
                    height
                )));
            }
        }

        let source_texture = gpu.create_rgba8_texture(
            "Fill Source",
            width,
            height,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::COPY_SRC,
        )?;
        gpu.upload_rgba8(&source_texture, source)?;

        let output_texture = gpu.create_rgba8_texture(
            "Fill Output",
            width,
            height,
            wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::COPY_DST,
        )?;
        if let Some(initial) = initial_output {
            gpu.upload_rgba8(&output_texture, initial)?;
        }

        let color_buffer = gpu.create_buffer_init(
            "Fill Color",
            &[Color::TRANSPARENT],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        let source_view = source_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let output_view = output_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = gpu.create_bind_group(
            "Fill Kernel",
            &kernel.bind_group_layout,
            &[
                wgpu::BindGroupEntry {
                    binding: SOURCE_BINDING,
                    resource: wgpu::BindingResource::TextureView(&source_view),
                },
                wgpu::BindGroupEntry {
                    binding: OUTPUT_BINDING,
                    resource: wgpu::BindingResource::TextureView(&output_view),
                },
                wgpu::BindGroupEntry {
                    binding: COLOR_BINDING,
                    resource: color_buffer.as_entire_binding(),
                },
            ],
        );

        Ok(Self {
            width,
            height,
            source_texture,
            output_texture,
            color_buffer,
            bind_group,
        })
    }

    /// Target with a zeroed `width` x `height` source image
    pub fn blank(gpu: &GpuContext, kernel: &FillKernel, width: u32, height: u32) -> Result<Self> {
        Self::new(gpu, kernel, &Rgba8Image::new(width, height), None)
    }

    /// A grid covering the whole output image
    pub fn full_grid(&self) -> DispatchGrid {
        DispatchGrid::covering(self.width, self.height)
    }

    /// Replace the bound color for subsequent dispatches
    pub fn set_color(&self, gpu: &GpuContext, color: Color) {
        gpu.queue.write_buffer(&self.color_buffer, 0, bytemuck::bytes_of(&color));
    }

    /// Read the output image back
    pub async fn download(&self, gpu: &GpuContext) -> Result<Rgba8Image> {
        gpu.download_rgba8(&self.output_texture).await
    }

    /// Read the source image back
    pub async fn download_source(&self, gpu: &GpuContext) -> Result<Rgba8Image> {
        gpu.download_rgba8(&self.source_texture).await
    }
}

impl GpuContext {
    /// Fill an output image the size of `source` with `color`.
    ///
    /// `initial_output` seeds the output before the dispatch and `grid`
    /// defaults to the whole image.
    pub async fn fill_image(
        &self,
        source: &Rgba8Image,
        initial_output: Option<&Rgba8Image>,
        color: Color,
        grid: Option<DispatchGrid>,
    ) -> Result<Rgba8Image> {
        let kernel = FillKernel::new(self);
        let target = FillTarget::new(self, &kernel, source, initial_output)?;
        target.set_color(self, color);

        let grid = grid.unwrap_or_else(|| target.full_grid());
        kernel.dispatch(self, &target, grid)?;
        target.download(self).await
    }
}

/// GPU fill of a whole image the size of `source`
pub async fn gpu_fill_image(gpu_context: &GpuContext, source: &Rgba8Image, color: Color) -> Result<Rgba8Image> {
    gpu_context.fill_image(source, None, color, None).await
}
