//! Ink maps
//!
//! An [`InkMap`] is the boolean ink/background grid of one page. It only
//! lives while components are being labeled.

use crate::error::{RegionError, RegionResult};
use inkline_color::is_ink;
use inkline_core::{Pix, Settings};

/// Width x height grid of ink flags, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InkMap {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl InkMap {
    /// Classify every pixel of a page with the ink classifier.
    ///
    /// `settings.ink_threshold` is used as given.
    pub fn from_pix(pix: &Pix, settings: &Settings) -> Self {
        let cells = pix.data().iter().map(|&p| is_ink(p, settings)).collect();
        Self {
            width: pix.width(),
            height: pix.height(),
            cells,
        }
    }

    /// Build a map from explicit flags.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if `cells.len()` is not
    /// `width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> RegionResult<Self> {
        if cells.len() != width as usize * height as usize {
            return Err(RegionError::InvalidParameters(format!(
                "expected {} cells for {}x{}, got {}",
                width as usize * height as usize,
                width,
                height,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Map width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Map height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ink flag at (x, y); `false` outside the map
    #[inline]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.cells[self.index(x, y)]
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Raw flags, row-major
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Number of ink cells
    pub fn ink_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkline_core::color;

    #[test]
    fn test_from_pix() {
        let mut pix = Pix::new_filled(3, 2, color::WHITE).unwrap().to_mut();
        pix.set_pixel(2, 1, color::BLACK).unwrap();
        let map = InkMap::from_pix(&pix.into(), &Settings::default());
        assert_eq!(map.ink_count(), 1);
        assert!(map.is_ink(2, 1));
        assert!(!map.is_ink(0, 0));
        assert!(!map.is_ink(3, 1));
    }

    #[test]
    fn test_from_cells_length() {
        assert!(InkMap::from_cells(2, 2, vec![false; 4]).is_ok());
        assert!(InkMap::from_cells(2, 2, vec![false; 5]).is_err());
    }
}
