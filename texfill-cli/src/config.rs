//! Fill run configuration

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use texfill_core::{Color, DispatchGrid};
use texfill_gpu::GpuConfig;

/// Everything one fill run needs. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Source image, bound to the kernel but never read by it
    pub input: PathBuf,
    /// Where the filled image is written
    pub output: PathBuf,
    pub color: Color,
    /// Dispatch extent; `None` covers the whole image
    pub grid: Option<DispatchGrid>,
    /// Pre-dispatch contents of the output image
    pub initial: Option<PathBuf>,
    /// Run the CPU reference fill instead of the GPU kernel
    pub cpu: bool,
    pub gpu: GpuConfig,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/test.png"),
            output: PathBuf::from("data/out.png"),
            color: Color::RED,
            grid: None,
            initial: None,
            cpu: false,
            gpu: GpuConfig::default(),
        }
    }
}

impl FillConfig {
    /// Read a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texfill_gpu::{AdapterPower, BackendChoice};

    #[test]
    fn test_defaults_match_original_paths() {
        let config = FillConfig::default();
        assert_eq!(config.input, PathBuf::from("data/test.png"));
        assert_eq!(config.output, PathBuf::from("data/out.png"));
        assert_eq!(config.color, Color::RED);
        assert!(config.grid.is_none());
        assert!(!config.cpu);
    }

    #[test]
    fn test_partial_json() {
        let config: FillConfig = serde_json::from_str(
            r#"{
                "output": "result.png",
                "color": [0.0, 0.0, 0.0, 0.0],
                "grid": { "width": 8, "height": 4 },
                "gpu": { "power": "low", "backend": "gl" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.input, PathBuf::from("data/test.png"));
        assert_eq!(config.output, PathBuf::from("result.png"));
        assert_eq!(config.color, Color::TRANSPARENT);
        assert_eq!(config.grid, Some(DispatchGrid::new(8, 4)));
        assert_eq!(config.gpu.power, AdapterPower::Low);
        assert_eq!(config.gpu.backend, BackendChoice::Gl);
    }

    #[test]
    fn test_non_finite_color_reloads() {
        let config = FillConfig {
            color: Color::new(f32::INFINITY, 0.0, 0.0, 1.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let loaded: FillConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.color.to_rgba8(), [255, 0, 0, 255]);
    }
}
