//! Majority filtering
//!
//! Each output pixel takes the majority color of the square window of side
//! `2 * radius + 1` around it, clipped to the page. A pixel votes black
//! when its red channel is below 128. The output is black only when black
//! votes are strictly more than half (integer division) of the pixels
//! inside the clipped window.
//!
//! Vote counts come from a summed-area table, so the cost per pixel does
//! not depend on the radius.
//!
//! Isolated specks smaller than the window disappear, and so do strokes
//! thinner than about `radius` pixels.

use crate::{FilterError, FilterResult};
use inkline_core::settings::MAX_NOISE_RADIUS;
use inkline_core::{Pix, color};

/// Red level below which a pixel votes black
const BLACK_VOTE_LEVEL: u8 = 128;

/// Summed-area table of black votes.
///
/// The table has `(w + 1) * (h + 1)` entries with a zero first row and
/// column; entry `(x + 1, y + 1)` holds the number of black votes in the
/// rectangle `(0, 0)..=(x, y)`.
pub fn black_vote_accum(pix: &Pix) -> Vec<u32> {
    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let stride = w + 1;
    let mut acc = vec![0u32; stride * (h + 1)];

    for y in 0..h {
        let mut row_sum = 0u32;
        for (x, &pixel) in pix.row_data(y as u32).iter().enumerate() {
            row_sum += u32::from(color::red(pixel) < BLACK_VOTE_LEVEL);
            acc[(y + 1) * stride + x + 1] = acc[y * stride + x + 1] + row_sum;
        }
    }
    acc
}

/// Apply the majority filter.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `radius` is 0 or larger
/// than [`MAX_NOISE_RADIUS`].
pub fn majority_filter(pix: &Pix, radius: u32) -> FilterResult<Pix> {
    if radius == 0 || radius > MAX_NOISE_RADIUS {
        return Err(FilterError::InvalidParameters(format!(
            "radius must be between 1 and {}, got {}",
            MAX_NOISE_RADIUS, radius
        )));
    }

    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let r = radius as usize;
    let stride = w + 1;
    let acc = black_vote_accum(pix);

    let mut out = pix.create_template().to_mut();
    out.set_spp(3);

    let mut flipped = 0usize;
    for y in 0..h {
        let top = y.saturating_sub(r);
        let bottom = (y + r + 1).min(h);
        let row = out.row_data_mut(y as u32);
        for (x, slot) in row.iter_mut().enumerate() {
            let left = x.saturating_sub(r);
            let right = (x + r + 1).min(w);

            let votes = acc[bottom * stride + right] + acc[top * stride + left]
                - acc[top * stride + right]
                - acc[bottom * stride + left];
            let count = ((right - left) * (bottom - top)) as u32;

            *slot = if votes > count / 2 {
                color::BLACK
            } else {
                color::WHITE
            };
            let was_black = color::red(pix.data()[y * w + x]) < BLACK_VOTE_LEVEL;
            flipped += usize::from(was_black != (*slot == color::BLACK));
        }
    }

    log::debug!("majority filter (radius {}): {} pixels flipped", radius, flipped);
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Direct window scan, for comparison with the accumulator path.
    fn majority_naive(pix: &Pix, radius: i64) -> Vec<u32> {
        let (w, h) = (pix.width() as i64, pix.height() as i64);
        let mut out = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let (mut votes, mut count) = (0, 0);
                for dy in -radius..=radius {
                    for dx in -radius..=radius {
                        let (nx, ny) = (x + dx, y + dy);
                        if nx >= 0 && nx < w && ny >= 0 && ny < h {
                            count += 1;
                            let p = pix.get_pixel_unchecked(nx as u32, ny as u32);
                            if color::red(p) < 128 {
                                votes += 1;
                            }
                        }
                    }
                }
                out.push(if votes > count / 2 {
                    color::BLACK
                } else {
                    color::WHITE
                });
            }
        }
        out
    }

    fn checker_page() -> Pix {
        let mut pix = Pix::new_filled(9, 7, color::WHITE).unwrap().to_mut();
        for y in 0..7 {
            for x in 0..9 {
                if (x * 7 + y * 3) % 5 < 2 || (x < 4 && y > 2) {
                    pix.set_pixel(x, y, color::BLACK).unwrap();
                }
            }
        }
        pix.into()
    }

    #[test]
    fn test_accum_totals() {
        let page = checker_page();
        let acc = black_vote_accum(&page);
        let total = page.data().iter().filter(|&&p| p == color::BLACK).count() as u32;
        assert_eq!(*acc.last().unwrap(), total);
    }

    #[test]
    fn test_matches_naive_window_scan() {
        let page = checker_page();
        for radius in 1..=4 {
            let fast = majority_filter(&page, radius).unwrap();
            assert_eq!(fast.data(), majority_naive(&page, radius as i64).as_slice());
        }
    }

    #[test]
    fn test_isolated_speck_removed() {
        let mut pix = Pix::new_filled(11, 11, color::WHITE).unwrap().to_mut();
        pix.set_pixel(5, 5, color::BLACK).unwrap();
        let out = majority_filter(&pix.into(), 1).unwrap();
        assert!(out.data().iter().all(|&p| p == color::WHITE));
    }

    #[test]
    fn test_solid_block_survives() {
        let mut pix = Pix::new_filled(20, 20, color::WHITE).unwrap().to_mut();
        for y in 5..15 {
            for x in 5..15 {
                pix.set_pixel(x, y, color::BLACK).unwrap();
            }
        }
        let out = majority_filter(&pix.into(), 2).unwrap();
        assert_eq!(out.get_pixel(10, 10), Some(color::BLACK));
        assert_eq!(out.get_pixel(0, 0), Some(color::WHITE));
    }

    #[test]
    fn test_corner_uses_clipped_count() {
        let mut pix = Pix::new_filled(6, 6, color::WHITE).unwrap().to_mut();
        pix.set_pixel(0, 0, color::BLACK).unwrap();
        pix.set_pixel(1, 0, color::BLACK).unwrap();
        pix.set_pixel(0, 1, color::BLACK).unwrap();
        let out = majority_filter(&pix.into(), 1).unwrap();
        // Window clipped to 2x2: 3 votes of 4
        assert_eq!(out.get_pixel(0, 0), Some(color::BLACK));
    }

    #[test]
    fn test_radius_bounds() {
        let page = checker_page();
        assert!(majority_filter(&page, 0).is_err());
        assert!(majority_filter(&page, 11).is_err());
        assert!(majority_filter(&page, 10).is_ok());
    }
}
