//! End-to-end runs of the texfill pipeline: load, fill, save.
//!
//! The CPU path always runs; the GPU path skips when no adapter is available.

use std::path::Path;
use tempfile::tempdir;
use texfill_cli::{run, FillConfig};
use texfill_core::{Color, DispatchGrid, Rgba8Image};
use texfill_gpu::GpuContext;

/// Write a patterned source image and return its path
fn write_source(dir: &Path, width: u32, height: u32) -> std::path::PathBuf {
    let mut image = Rgba8Image::new(width, height);
    for y in 0..height {
        for x in 0..width {
            image.put_texel(x, y, [(x * 20) as u8, (y * 20) as u8, 90, 255]).unwrap();
        }
    }
    let path = dir.join("test.png");
    texfill_io::save_image(&path, &image).unwrap();
    path
}

fn gpu_available() -> bool {
    pollster::block_on(GpuContext::new()).is_ok()
}

#[test]
fn test_cpu_run_fills_whole_image() {
    let dir = tempdir().unwrap();
    let config = FillConfig {
        input: write_source(dir.path(), 6, 4),
        output: dir.path().join("out.png"),
        color: Color::RED,
        cpu: true,
        ..Default::default()
    };

    let summary = run(&config).unwrap();
    assert_eq!((summary.width, summary.height), (6, 4));
    assert_eq!(summary.grid, DispatchGrid::new(6, 4));
    assert_eq!(summary.device, "cpu");

    let output = texfill_io::load_image(&config.output).unwrap();
    assert_eq!(output.dimensions(), (6, 4));
    assert!(output.texels().all(|t| t == [255, 0, 0, 255]));
}

#[test]
fn test_cpu_run_partial_grid_over_initial() {
    let dir = tempdir().unwrap();
    let initial_path = dir.path().join("initial.png");
    texfill_io::save_image(&initial_path, &Rgba8Image::filled(6, 4, [0, 0, 255, 255])).unwrap();

    let config = FillConfig {
        input: write_source(dir.path(), 6, 4),
        output: dir.path().join("out.png"),
        color: Color::TRANSPARENT,
        grid: Some(DispatchGrid::new(2, 2)),
        initial: Some(initial_path),
        cpu: true,
        ..Default::default()
    };
    run(&config).unwrap();

    let output = texfill_io::load_image(&config.output).unwrap();
    for y in 0..4 {
        for x in 0..6 {
            let expected = if x < 2 && y < 2 { [0, 0, 0, 0] } else { [0, 0, 255, 255] };
            assert_eq!(output.texel(x, y), Some(expected));
        }
    }
}

#[test]
fn test_run_rejects_oversize_grid() {
    let dir = tempdir().unwrap();
    let config = FillConfig {
        input: write_source(dir.path(), 3, 3),
        output: dir.path().join("out.png"),
        grid: Some(DispatchGrid::new(4, 3)),
        cpu: true,
        ..Default::default()
    };

    assert!(run(&config).is_err());
    assert!(!config.output.exists());
}

#[test]
fn test_run_missing_input() {
    let dir = tempdir().unwrap();
    let config = FillConfig {
        input: dir.path().join("nope.png"),
        output: dir.path().join("out.png"),
        cpu: true,
        ..Default::default()
    };

    let err = run(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to load input"));
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempdir().unwrap();
    let config = FillConfig {
        input: write_source(dir.path(), 2, 2),
        output: dir.path().join("from_config.png"),
        color: Color::new(0.0, 1.0, 0.0, 1.0),
        cpu: true,
        ..Default::default()
    };
    let config_path = dir.path().join("fill.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = FillConfig::from_file(&config_path).unwrap();
    assert_eq!(loaded, config);

    run(&loaded).unwrap();
    let output = texfill_io::load_image(&loaded.output).unwrap();
    assert!(output.texels().all(|t| t == [0, 255, 0, 255]));
}

#[test]
fn test_gpu_run_matches_cpu_run() {
    if !gpu_available() {
        println!("GPU not available, skipping GPU-dependent test");
        return;
    }

    let dir = tempdir().unwrap();
    let input = write_source(dir.path(), 70, 5);
    let color = Color::from_rgba8([12, 34, 56, 78]);

    let gpu_config = FillConfig {
        input: input.clone(),
        output: dir.path().join("gpu.png"),
        color,
        grid: Some(DispatchGrid::new(40, 3)),
        ..Default::default()
    };
    let cpu_config = FillConfig {
        output: dir.path().join("cpu.png"),
        cpu: true,
        ..gpu_config.clone()
    };

    run(&gpu_config).unwrap();
    run(&cpu_config).unwrap();

    let gpu_output = texfill_io::load_image(&gpu_config.output).unwrap();
    let cpu_output = texfill_io::load_image(&cpu_config.output).unwrap();
    assert_eq!(gpu_output, cpu_output);
}
