//! Command line front end for texfill
//!
//! Loads the source picture, fills an output image of the same size with one
//! color (on the GPU, or with the CPU reference fill) and saves the result.

pub mod config;

pub use config::FillConfig;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use texfill_core::{fill_reference, Color, DispatchGrid, Rgba8Image};
use texfill_gpu::{AdapterPower, BackendChoice, GpuContext};

/// Fill an image with a uniform color using a GPU compute kernel
#[derive(Parser, Debug)]
#[command(name = "texfill", version, about)]
pub struct Args {
    /// JSON config file; flags given on the command line take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Source image whose size determines the output size
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output image path (format from extension, PNG when there is none)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fill color as `r,g,b[,a]` floats or `#RRGGBB[AA]`
    #[arg(short, long)]
    pub color: Option<Color>,

    /// Dispatch grid as `WIDTHxHEIGHT`; defaults to the whole image
    #[arg(short, long)]
    pub grid: Option<DispatchGrid>,

    /// Image used as the output's contents before the fill
    #[arg(long)]
    pub initial: Option<PathBuf>,

    /// Use the CPU reference fill instead of the GPU
    #[arg(long)]
    pub cpu: bool,

    /// Graphics backend: all, primary, vulkan, metal, dx12, gl
    #[arg(long)]
    pub backend: Option<BackendChoice>,

    /// Adapter power preference: low or high
    #[arg(long)]
    pub power: Option<AdapterPower>,
}

impl Args {
    /// Merge the config file (if any) with command line overrides
    pub fn resolve(&self) -> anyhow::Result<FillConfig> {
        let mut config = match &self.config {
            Some(path) => FillConfig::from_file(path)?,
            None => FillConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        if let Some(grid) = self.grid {
            config.grid = Some(grid);
        }
        if let Some(initial) = &self.initial {
            config.initial = Some(initial.clone());
        }
        if self.cpu {
            config.cpu = true;
        }
        if let Some(backend) = self.backend {
            config.gpu.backend = backend;
        }
        if let Some(power) = self.power {
            config.gpu.power = power;
        }
        Ok(config)
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub width: u32,
    pub height: u32,
    pub grid: DispatchGrid,
    pub device: String,
    pub elapsed: Duration,
}

/// Execute one fill run described by `config`
pub fn run(config: &FillConfig) -> anyhow::Result<RunSummary> {
    let source = texfill_io::load_image(&config.input)
        .with_context(|| format!("Failed to load input {}", config.input.display()))?;
    let (width, height) = source.dimensions();
    log::info!("Loaded {} ({}x{})", config.input.display(), width, height);

    let initial = config
        .initial
        .as_ref()
        .map(|path| {
            texfill_io::load_image(path)
                .with_context(|| format!("Failed to load initial output {}", path.display()))
        })
        .transpose()?;

    let grid = config.grid.unwrap_or_else(|| DispatchGrid::covering_image(&source));
    let start = Instant::now();

    let (output, device) = if config.cpu {
        let mut output = match initial {
            Some(image) => {
                anyhow::ensure!(
                    image.dimensions() == (width, height),
                    "Initial output {}x{} does not match input {}x{}",
                    image.width(),
                    image.height(),
                    width,
                    height
                );
                image
            }
            None => Rgba8Image::new(width, height),
        };
        fill_reference(&mut output, config.color, grid)?;
        (output, "cpu".to_string())
    } else {
        pollster::block_on(async {
            let gpu = GpuContext::with_config(&config.gpu).await?;
            let output = gpu
                .fill_image(&source, initial.as_ref(), config.color, Some(grid))
                .await?;
            Ok::<_, texfill_core::Error>((output, gpu.adapter_summary()))
        })
        .context("GPU fill failed")?
    };
    let elapsed = start.elapsed();

    texfill_io::save_image(&config.output, &output)
        .with_context(|| format!("Failed to save output {}", config.output.display()))?;
    log::info!(
        "Filled {} of {}x{} with {} on {} in {:?} -> {}",
        grid,
        width,
        height,
        config.color,
        device,
        elapsed,
        config.output.display()
    );

    Ok(RunSummary {
        width,
        height,
        grid,
        device,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "texfill",
            "--input",
            "in.png",
            "--color",
            "#00ff00",
            "--grid",
            "4x2",
            "--cpu",
            "--backend",
            "vulkan",
        ])
        .unwrap();

        let config = args.resolve().unwrap();
        assert_eq!(config.input, PathBuf::from("in.png"));
        assert_eq!(config.output, PathBuf::from("data/out.png"));
        assert_eq!(config.color, Color::GREEN);
        assert_eq!(config.grid, Some(DispatchGrid::new(4, 2)));
        assert!(config.cpu);
        assert_eq!(config.gpu.backend, BackendChoice::Vulkan);
        assert_eq!(config.gpu.power, AdapterPower::High);
    }

    #[test]
    fn test_args_reject_bad_values() {
        assert!(Args::try_parse_from(["texfill", "--color", "purple"]).is_err());
        assert!(Args::try_parse_from(["texfill", "--grid", "4by2"]).is_err());
        assert!(Args::try_parse_from(["texfill", "--power", "max"]).is_err());
    }
}
