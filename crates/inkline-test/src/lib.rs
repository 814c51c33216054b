//! inkline-test - Regression test framework for inkline
//!
//! Provides [`RegParams`] for indexed, logged checks and a handful of
//! builders for synthetic scanned pages, so regression tests do not need
//! binary fixtures.
//!
//! # Usage
//!
//! ```ignore
//! use inkline_test::{RegParams, blank_page, fill_rect};
//!
//! let mut rp = RegParams::new("textline");
//! let mut page = blank_page(100, 200).to_mut();
//! fill_rect(&mut page, 10, 40, 80, 20, inkline_core::color::BLACK);
//! rp.compare_values(1.0, lines.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to write intermediate pages to
//!   `tests/regout` at the workspace root

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use inkline_core::{Pix, PixMut, color};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // inkline-test is at crates/inkline-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Create an opaque white page.
///
/// # Panics
///
/// Panics if either dimension is zero.
pub fn blank_page(width: u32, height: u32) -> Pix {
    Pix::new_filled(width, height, color::WHITE).expect("page dimensions must be non-zero")
}

/// Fill a rectangle with `pixel`, clipped to the page.
pub fn fill_rect(pix: &mut PixMut, x: u32, y: u32, w: u32, h: u32, pixel: u32) {
    let x_end = x.saturating_add(w).min(pix.width());
    let y_end = y.saturating_add(h).min(pix.height());
    for yy in y.min(y_end)..y_end {
        let row = pix.row_data_mut(yy);
        for slot in &mut row[x.min(x_end) as usize..x_end as usize] {
            *slot = pixel;
        }
    }
}

/// Build a white page with solid horizontal bars.
///
/// Each bar is `(x, y, w, h)`, drawn in `pixel`.
pub fn page_with_bars(width: u32, height: u32, bars: &[(u32, u32, u32, u32)], pixel: u32) -> Pix {
    let mut page = blank_page(width, height).to_mut();
    for &(x, y, w, h) in bars {
        fill_rect(&mut page, x, y, w, h, pixel);
    }
    page.into()
}

/// Minimal linear congruential generator for reproducible noise.
#[derive(Debug, Clone)]
pub struct Lcg(u64);

impl Lcg {
    /// Create a generator from a seed
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next 32 pseudo-random bits
    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 32) as u32
    }

    /// Uniform value in `0..bound` (bound must be non-zero)
    pub fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

/// Set `count` pseudo-randomly placed pixels to `pixel`.
///
/// Returns the positions written, in order (duplicates possible).
pub fn scatter_noise(pix: &mut PixMut, count: usize, seed: u64, pixel: u32) -> Vec<(u32, u32)> {
    let mut rng = Lcg::new(seed);
    let (w, h) = (pix.width(), pix.height());
    (0..count)
        .map(|_| {
            let (x, y) = (rng.below(w), rng.below(h));
            pix.set_pixel_unchecked(x, y, pixel);
            (x, y)
        })
        .collect()
}

/// Count pixels equal to `pixel`.
pub fn count_pixels(pix: &Pix, pixel: u32) -> usize {
    pix.data().iter().filter(|&&p| p == pixel).count()
}
