//! # texfill GPU
//!
//! A wgpu compute kernel that stores one uniform color into every texel of an
//! output texture, plus the host code that binds its resources, dispatches it
//! and reads the result back.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use texfill_gpu::{GpuContext, FillKernel, FillTarget};
//! use texfill_core::{Color, DispatchGrid};
//!
//! async fn example() -> texfill_core::Result<()> {
//!     let gpu = GpuContext::new().await?;
//!     let kernel = FillKernel::new(&gpu);
//!     let target = FillTarget::blank(&gpu, &kernel, 256, 256)?;
//!
//!     target.set_color(&gpu, Color::RED);
//!     kernel.dispatch(&gpu, &target, DispatchGrid::covering(256, 256))?;
//!     let image = target.download(&gpu).await?;
//!     assert_eq!(image.texel(0, 0), Some([255, 0, 0, 255]));
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod fill;
pub mod texture;
pub mod utils;

// Re-export commonly used items
pub use device::{AdapterPower, BackendChoice, GpuConfig, GpuContext};
pub use fill::{gpu_fill_image, FillKernel, FillTarget, FILL_ENTRY_POINT};
pub use texture::TEXTURE_FORMAT;
pub use utils::*;
