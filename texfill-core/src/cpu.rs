//! CPU reference implementation of the fill kernel

use crate::{Color, DispatchGrid, Result, Rgba8Image, BYTES_PER_TEXEL};
use rayon::prelude::*;

/// Store `color` into every texel of `output` covered by `grid`.
///
/// Texels outside the grid keep their current values. The color goes through
/// the same unsigned-normalized conversion an `rgba8unorm` storage texture
/// applies, so the result matches what the GPU kernel writes.
pub fn fill_reference(output: &mut Rgba8Image, color: Color, grid: DispatchGrid) -> Result<()> {
    grid.validate_for(output.width(), output.height())?;
    if grid.is_empty() {
        return Ok(());
    }

    let texel = color.to_rgba8();
    let row_bytes = output.bytes_per_row() as usize;
    let span = grid.width as usize * BYTES_PER_TEXEL as usize;

    output
        .as_bytes_mut()
        .par_chunks_mut(row_bytes)
        .take(grid.height as usize)
        .for_each(|row| {
            for dst in row[..span].chunks_exact_mut(BYTES_PER_TEXEL as usize) {
                dst.copy_from_slice(&texel);
            }
        });

    log::debug!("CPU fill of {} grid with {}", grid, color);
    Ok(())
}

/// Fill a fresh transparent image of the given size over its whole extent
pub fn fill_new_reference(width: u32, height: u32, color: Color) -> Result<Rgba8Image> {
    let mut output = Rgba8Image::new(width, height);
    fill_reference(&mut output, color, DispatchGrid::covering(width, height))?;
    Ok(output)
}
