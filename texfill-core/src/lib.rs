//! Core data structures for texfill
//!
//! This crate provides the host-side types shared by the GPU fill kernel and
//! its tooling: RGBA colors and their 8-bit unsigned-normalized storage form,
//! tightly packed RGBA8 images, dispatch grids, and a CPU reference fill that
//! states what the kernel does texel by texel.

pub mod color;
pub mod cpu;
pub mod dispatch;
pub mod error;
pub mod image;

pub use color::*;
pub use cpu::*;
pub use dispatch::*;
pub use error::*;
pub use image::*;

/// Common result type for texfill operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bytes per RGBA8 texel
pub const BYTES_PER_TEXEL: u32 = 4;
