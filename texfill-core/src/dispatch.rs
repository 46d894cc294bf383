//! Dispatch grids for the fill kernel
//!
//! The kernel runs one invocation per workgroup, so the grid extents are both
//! the workgroup counts and the invocation counts per axis. The z extent is
//! always 1.

use crate::{Error, Result, Rgba8Image};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The x and y extents of a fill dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchGrid {
    pub width: u32,
    pub height: u32,
}

impl DispatchGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A grid with one invocation per texel of a `width` x `height` image
    pub fn covering(width: u32, height: u32) -> Self {
        Self::new(width, height)
    }

    /// A grid covering every texel of `image`
    pub fn covering_image(image: &Rgba8Image) -> Self {
        Self::covering(image.width(), image.height())
    }

    /// Total number of invocations
    pub fn invocations(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// An empty grid dispatches nothing
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the invocation at (x, y) is part of this grid
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Reject grids that would address texels outside a `width` x `height` image
    pub fn validate_for(&self, width: u32, height: u32) -> Result<()> {
        if self.width > width || self.height > height {
            return Err(Error::Dispatch(format!(
                "grid {} exceeds image {}x{}",
                self, width, height
            )));
        }
        Ok(())
    }
}

impl fmt::Display for DispatchGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for DispatchGrid {
    type Err = Error;

    /// Parse `WIDTHxHEIGHT`, e.g. `64x32`
    fn from_str(s: &str) -> Result<Self> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| Error::InvalidData(format!("Expected WIDTHxHEIGHT, got '{}'", s)))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| Error::InvalidData(format!("Invalid grid extent '{}': {}", v, e)))
        };
        Ok(Self::new(parse(w)?, parse(h)?))
    }
}
