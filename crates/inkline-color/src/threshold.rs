//! Global gray-level thresholding
//!
//! Otsu's method over the 256-bin histogram of `(r + g + b) / 3`.
//! The returned cut point `t` splits the page into a dark class `0..=t`
//! and a light class `t+1..=255`.

use inkline_core::{Pix, color};

/// Number of gray levels
const GRAY_LEVELS: usize = 256;

/// Build the gray-level histogram of a page.
///
/// Alpha is ignored; every pixel counts once.
pub fn gray_histogram(pix: &Pix) -> [u64; GRAY_LEVELS] {
    let mut histogram = [0u64; GRAY_LEVELS];
    for &pixel in pix.data() {
        histogram[color::gray_average(pixel) as usize] += 1;
    }
    histogram
}

/// Otsu cut point of a histogram.
///
/// Scans every cut point and keeps the one with the largest between-class
/// variance `wB * wF * (meanB - meanF)^2`; the first maximum wins. A
/// histogram with a single occupied bin never produces a positive
/// variance and yields 0.
pub fn otsu_threshold_from_histogram(histogram: &[u64; GRAY_LEVELS]) -> u8 {
    let total: u64 = histogram.iter().sum();
    let sum_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut weight_bg = 0u64;
    let mut sum_bg = 0.0f64;
    let mut max_variance = 0.0f64;
    let mut threshold = 0u8;

    for (t, &count) in histogram.iter().enumerate() {
        weight_bg += count;
        if weight_bg == 0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0 {
            break;
        }

        sum_bg += t as f64 * count as f64;
        let mean_bg = sum_bg / weight_bg as f64;
        let mean_fg = (sum_total - sum_bg) / weight_fg as f64;

        let diff = mean_bg - mean_fg;
        let variance = weight_bg as f64 * weight_fg as f64 * diff * diff;
        if variance > max_variance {
            max_variance = variance;
            threshold = t as u8;
        }
    }

    threshold
}

/// Compute the Otsu threshold of a page.
pub fn compute_otsu_threshold(pix: &Pix) -> u8 {
    otsu_threshold_from_histogram(&gray_histogram(pix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkline_core::color::compose_rgb;

    fn histogram_of(bins: &[(usize, u64)]) -> [u64; GRAY_LEVELS] {
        let mut h = [0u64; GRAY_LEVELS];
        for &(level, count) in bins {
            h[level] = count;
        }
        h
    }

    #[test]
    fn test_single_value_yields_zero() {
        assert_eq!(otsu_threshold_from_histogram(&histogram_of(&[(128, 500)])), 0);
        let page = Pix::new_filled(8, 8, color::WHITE).unwrap();
        assert_eq!(compute_otsu_threshold(&page), 0);
    }

    #[test]
    fn test_two_levels_split_at_lower() {
        assert_eq!(
            otsu_threshold_from_histogram(&histogram_of(&[(0, 10), (255, 90)])),
            0
        );
        assert_eq!(
            otsu_threshold_from_histogram(&histogram_of(&[(40, 50), (220, 50)])),
            40
        );
    }

    #[test]
    fn test_bimodal_threshold_between_modes() {
        let h = histogram_of(&[
            (30, 20),
            (35, 40),
            (40, 20),
            (200, 100),
            (210, 200),
            (220, 100),
        ]);
        let t = otsu_threshold_from_histogram(&h);
        assert!((40..200).contains(&t), "threshold {}", t);
    }

    #[test]
    fn test_gray_histogram_truncates() {
        let mut pix = Pix::new_filled(2, 1, color::WHITE).unwrap().to_mut();
        pix.set_pixel(0, 0, compose_rgb(10, 10, 12)).unwrap();
        let h = gray_histogram(&pix.into());
        assert_eq!(h[10], 1);
        assert_eq!(h[255], 1);
        assert_eq!(h.iter().sum::<u64>(), 2);
    }
}
