//! PIX - The page image container
//!
//! The `Pix` structure is the image type passed between every stage of
//! the line segmentation pipeline.
//!
//! # Pixel layout
//!
//! - One 32-bit word per pixel, rows stored top to bottom
//! - Color order is RGBA (red in MSB, alpha in LSB)
//! - `spp` records whether the alpha sample is meaningful
//!   (3 = opaque RGB source, 4 = RGBA)
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// BMP format
    Bmp,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
    /// TIFF format
    Tiff,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Bmp => "bmp",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Tiff => "tif",
        }
    }

    /// Look up a format from a file extension (case-insensitive).
    ///
    /// Returns [`ImageFormat::Unknown`] for anything unrecognized.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "bmp" => Self::Bmp,
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "tif" | "tiff" => Self::Tiff,
            _ => Self::Unknown,
        }
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel (3 for RGB, 4 for RGBA)
    spp: u32,
    /// Input file format
    informat: ImageFormat,
    /// The image data, one packed RGBA word per pixel
    data: Vec<u32>,
}

impl PixData {
    fn with_data(width: u32, height: u32, data: Vec<u32>) -> Self {
        PixData {
            width,
            height,
            spp: 3,
            informat: ImageFormat::Unknown,
            data,
        }
    }

    fn duplicate(&self, data: Vec<u32>) -> Self {
        PixData {
            width: self.width,
            height: self.height,
            spp: self.spp,
            informat: self.informat,
            data,
        }
    }
}

/// PIX - RGBA page image
///
/// `Pix` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use inkline_core::Pix;
///
/// let pix = Pix::new(640, 480).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions.
    ///
    /// The image data is initialized to zero (transparent black).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or if
    /// the pixel count does not fit in memory.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, 0)
    }

    /// Create a new PIX with every pixel set to `pixel`.
    pub fn new_filled(width: u32, height: u32, pixel: u32) -> Result<Self> {
        let len = Self::pixel_count(width, height)?;
        Ok(Pix {
            inner: Arc::new(PixData::with_data(width, height, vec![pixel; len])),
        })
    }

    /// Build a PIX from packed RGBA words in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `data.len()` is not
    /// `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        let len = Self::pixel_count(width, height)?;
        if data.len() != len {
            return Err(Error::InvalidParameter(format!(
                "expected {} pixels for {}x{}, got {}",
                len,
                width,
                height,
                data.len()
            )));
        }
        Ok(Pix {
            inner: Arc::new(PixData::with_data(width, height, data)),
        })
    }

    /// Pixel count of a `width` x `height` buffer.
    ///
    /// The buffer's byte size must also fit in `isize`, the allocation
    /// limit of `Vec`.
    fn pixel_count(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .filter(|&len| {
                len.checked_mul(std::mem::size_of::<u32>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(Error::InvalidDimension { width, height })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the pixels of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = y as usize * self.inner.width as usize;
        &self.inner.data[start..start + self.inner.width as usize]
    }

    /// Create a new PIX with the same dimensions and metadata as the source.
    ///
    /// The image data is initialized to zero.
    pub fn create_template(&self) -> Self {
        let len = self.inner.data.len();
        Pix {
            inner: Arc::new(self.inner.duplicate(vec![0u32; len])),
        }
    }

    /// Check if two PIX have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(self.inner.duplicate(self.inner.data.clone())),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    /// If successful, returns a [`PixMut`] that allows modification.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: self.inner.duplicate(self.inner.data.clone()),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`. Exclusive access is enforced at compile time.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Set the samples per pixel (3 for RGB, 4 for RGBA).
    pub fn set_spp(&mut self, spp: u32) {
        self.inner.spp = spp;
    }

    /// Set the input format.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let width = self.inner.width as usize;
        let start = y as usize * width;
        &mut self.inner.data[start..start + width]
    }

    /// Set every pixel to `pixel`.
    pub fn fill(&mut self, pixel: u32) {
        self.inner.data.fill(pixel);
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}
