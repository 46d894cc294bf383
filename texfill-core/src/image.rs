//! Tightly packed RGBA8 images

use crate::{Error, Result, BYTES_PER_TEXEL};

/// An RGBA8 image stored row-major with no row padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rgba8Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Rgba8Image {
    /// Create a transparent black image
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Create an image with every texel set to `texel`
    pub fn filled(width: u32, height: u32, texel: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * BYTES_PER_TEXEL as usize);
        for _ in 0..count {
            data.extend_from_slice(&texel);
        }
        Self { width, height, data }
    }

    /// Wrap raw RGBA8 bytes, checking the length against the dimensions
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * BYTES_PER_TEXEL as usize;
        if data.len() != expected {
            return Err(Error::InvalidData(format!(
                "RGBA8 image {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width and height
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the image has no texels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes in one unpadded row
    pub fn bytes_per_row(&self) -> u32 {
        self.width * BYTES_PER_TEXEL
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BYTES_PER_TEXEL as usize)
    }

    /// Texel at (x, y), or `None` when out of bounds
    pub fn texel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        let mut texel = [0u8; 4];
        texel.copy_from_slice(&self.data[i..i + 4]);
        Some(texel)
    }

    /// Overwrite the texel at (x, y)
    pub fn put_texel(&mut self, x: u32, y: u32, texel: [u8; 4]) -> Result<()> {
        let i = self.offset(x, y).ok_or_else(|| {
            Error::InvalidData(format!(
                "Texel ({}, {}) outside {}x{} image",
                x, y, self.width, self.height
            ))
        })?;
        self.data[i..i + 4].copy_from_slice(&texel);
        Ok(())
    }

    /// Iterate over texels in row-major order
    pub fn texels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(BYTES_PER_TEXEL as usize)
            .map(|c| [c[0], c[1], c[2], c[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent_black() {
        let image = Rgba8Image::new(3, 2);
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.as_bytes().len(), 24);
        assert!(image.texels().all(|t| t == [0, 0, 0, 0]));
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(Rgba8Image::from_raw(2, 2, vec![0; 16]).is_ok());
        assert!(Rgba8Image::from_raw(2, 2, vec![0; 15]).is_err());
        assert!(Rgba8Image::from_raw(0, 5, Vec::new()).is_ok());
    }

    #[test]
    fn test_texel_access() {
        let mut image = Rgba8Image::filled(4, 3, [1, 2, 3, 4]);
        image.put_texel(3, 2, [9, 8, 7, 6]).unwrap();

        assert_eq!(image.texel(0, 0), Some([1, 2, 3, 4]));
        assert_eq!(image.texel(3, 2), Some([9, 8, 7, 6]));
        assert_eq!(image.texel(4, 0), None);
        assert_eq!(image.texel(0, 3), None);
        assert!(image.put_texel(4, 2, [0; 4]).is_err());

        // last texel is the last four bytes
        assert_eq!(&image.as_bytes()[44..48], &[9, 8, 7, 6]);
    }

    #[test]
    fn test_is_empty() {
        assert!(Rgba8Image::new(0, 4).is_empty());
        assert!(Rgba8Image::new(4, 0).is_empty());
        assert!(!Rgba8Image::new(1, 1).is_empty());
        assert_eq!(Rgba8Image::new(5, 1).bytes_per_row(), 20);
    }
}
