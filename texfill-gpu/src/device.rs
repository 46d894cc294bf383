//! GPU device management

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use texfill_core::{DispatchGrid, Error, Result};
use wgpu::util::DeviceExt;

/// Which adapter to prefer when several are available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterPower {
    Low,
    #[default]
    High,
}

impl From<AdapterPower> for wgpu::PowerPreference {
    fn from(power: AdapterPower) -> Self {
        match power {
            AdapterPower::Low => wgpu::PowerPreference::LowPower,
            AdapterPower::High => wgpu::PowerPreference::HighPerformance,
        }
    }
}

impl FromStr for AdapterPower {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(AdapterPower::Low),
            "high" => Ok(AdapterPower::High),
            other => Err(Error::Config(format!("Unknown power preference '{}'", other))),
        }
    }
}

/// Graphics backends the instance may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    #[default]
    All,
    Primary,
    Vulkan,
    Metal,
    Dx12,
    Gl,
}

impl From<BackendChoice> for wgpu::Backends {
    fn from(choice: BackendChoice) -> Self {
        match choice {
            BackendChoice::All => wgpu::Backends::all(),
            BackendChoice::Primary => wgpu::Backends::PRIMARY,
            BackendChoice::Vulkan => wgpu::Backends::VULKAN,
            BackendChoice::Metal => wgpu::Backends::METAL,
            BackendChoice::Dx12 => wgpu::Backends::DX12,
            BackendChoice::Gl => wgpu::Backends::GL,
        }
    }
}

impl FromStr for BackendChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(BackendChoice::All),
            "primary" => Ok(BackendChoice::Primary),
            "vulkan" => Ok(BackendChoice::Vulkan),
            "metal" => Ok(BackendChoice::Metal),
            "dx12" => Ok(BackendChoice::Dx12),
            "gl" => Ok(BackendChoice::Gl),
            other => Err(Error::Config(format!("Unknown backend '{}'", other))),
        }
    }
}

/// Adapter selection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuConfig {
    pub power: AdapterPower,
    pub backend: BackendChoice,
    pub force_fallback_adapter: bool,
}

/// Device limits to request: downlevel defaults, with the adapter's own
/// texture size limits so large images stay usable where the hardware allows
pub fn required_limits(adapter_limits: &wgpu::Limits) -> wgpu::Limits {
    wgpu::Limits::downlevel_defaults().using_resolution(adapter_limits.clone())
}

/// GPU context for managing compute operations
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter: wgpu::Adapter,
}

impl GpuContext {
    /// Create a new GPU context with the default configuration
    pub async fn new() -> Result<Self> {
        Self::with_config(&GpuConfig::default()).await
    }

    /// Create a new GPU context with explicit adapter settings
    pub async fn with_config(config: &GpuConfig) -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: config.backend.into(),
            flags: wgpu::InstanceFlags::default(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power.into(),
                compatible_surface: None,
                force_fallback_adapter: config.force_fallback_adapter,
            })
            .await
            .ok_or_else(|| Error::Gpu("Failed to find suitable adapter".to_string()))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("texfill GPU Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: required_limits(&adapter.limits()),
                },
                None,
            )
            .await
            .map_err(|e| Error::Gpu(format!("Failed to create device: {}", e)))?;

        let context = Self {
            device,
            queue,
            adapter,
        };
        log::info!("Using adapter {}", context.adapter_summary());
        Ok(context)
    }

    /// Adapter name and backend, for logs
    pub fn adapter_summary(&self) -> String {
        let info = self.adapter.get_info();
        format!("{} ({:?}, {:?})", info.name, info.backend, info.device_type)
    }

    /// Check that a 2D texture of this size can be created on this device
    pub fn validate_extent(&self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidData(format!(
                "Texture extent {}x{} must be non-zero",
                width, height
            )));
        }
        let max = self.device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            return Err(Error::Gpu(format!(
                "Texture extent {}x{} exceeds device limit {}",
                width, height, max
            )));
        }
        Ok(())
    }

    /// Check that a dispatch of this grid stays within the device's workgroup count limit
    pub fn validate_grid(&self, grid: DispatchGrid) -> Result<()> {
        let max = self.device.limits().max_compute_workgroups_per_dimension;
        if grid.width > max || grid.height > max {
            return Err(Error::Gpu(format!(
                "Dispatch grid {} exceeds device limit of {} workgroups per dimension",
                grid, max
            )));
        }
        Ok(())
    }

    /// Create a buffer from data
    pub fn create_buffer_init<T: bytemuck::Pod>(&self, label: &str, data: &[T], usage: wgpu::BufferUsages) -> wgpu::Buffer {
        self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(data),
            usage,
        })
    }

    /// Create an empty buffer
    pub fn create_buffer(&self, label: &str, size: u64, usage: wgpu::BufferUsages) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage,
            mapped_at_creation: false,
        })
    }

    /// Create a shader module from WGSL source
    pub fn create_shader_module(&self, label: &str, source: &str) -> wgpu::ShaderModule {
        self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        })
    }

    /// Create a bind group layout
    pub fn create_bind_group_layout(&self, label: &str, entries: &[wgpu::BindGroupLayoutEntry]) -> wgpu::BindGroupLayout {
        self.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries,
        })
    }

    /// Create a bind group
    pub fn create_bind_group(&self, label: &str, layout: &wgpu::BindGroupLayout, entries: &[wgpu::BindGroupEntry]) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries,
        })
    }
}
