//! GPU utilities

use texfill_core::BYTES_PER_TEXEL;

/// Round `num` up to a multiple of `align`, which must be a power of two
pub fn align_up(num: u32, align: u32) -> u32 {
    debug_assert!(align.is_power_of_two());
    (num + align - 1) & !(align - 1)
}

/// Row pitch required when copying an RGBA8 texture of `width` texels into a buffer
pub fn padded_bytes_per_row(width: u32) -> u32 {
    align_up(width * BYTES_PER_TEXEL, wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
}

/// Drop the per-row padding from a texture-to-buffer copy, keeping `height`
/// rows of `width * 4` bytes
pub fn strip_row_padding(data: &[u8], width: u32, height: u32, padded_row: u32) -> Vec<u8> {
    let row = (width * BYTES_PER_TEXEL) as usize;
    let padded_row = padded_row as usize;
    let mut output = Vec::with_capacity(row * height as usize);

    for chunk in data.chunks(padded_row).take(height as usize) {
        output.extend_from_slice(&chunk[..row]);
    }

    output
}
