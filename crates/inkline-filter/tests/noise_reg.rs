//! Noise filter regression test
//!
//! Majority filtering of speckled pages: isolated specks vanish, solid
//! strokes survive with rounded corners, and hairlines thinner than the
//! window are removed.

use inkline_core::{ImageFormat, Pix, color};
use inkline_filter::majority_filter;
use inkline_test::{RegParams, blank_page, count_pixels, fill_rect, page_with_bars, scatter_noise};

const BAR: (u32, u32, u32, u32) = (20, 30, 80, 20);

fn in_rect(x: u32, y: u32, (rx, ry, rw, rh): (u32, u32, u32, u32)) -> bool {
    x >= rx && x < rx + rw && y >= ry && y < ry + rh
}

#[test]
fn noise_reg() {
    let mut rp = RegParams::new("noise");

    let clean = page_with_bars(120, 80, &[BAR], color::BLACK);
    let mut noisy = clean.to_mut();
    let specks = scatter_noise(&mut noisy, 40, 2024, color::BLACK);
    let noisy: Pix = noisy.into();
    eprintln!("  {} specks scattered", specks.len());

    // --- Test 1: Specks far from the bar disappear ---
    eprintln!("=== Speck removal ===");
    let filtered = majority_filter(&noisy, 2).expect("majority_filter r=2");
    rp.compare_values(3.0, filtered.spp() as f64, 0.0);
    let halo = (BAR.0 - 3, BAR.1 - 3, BAR.2 + 6, BAR.3 + 6);
    let stray = (0..filtered.height())
        .flat_map(|y| (0..filtered.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| !in_rect(x, y, halo))
        .filter(|&(x, y)| filtered.get_pixel(x, y) == Some(color::BLACK))
        .count();
    rp.compare_values(0.0, stray as f64, 0.0);
    let stray_before = specks.iter().filter(|&&(x, y)| !in_rect(x, y, halo)).count();
    eprintln!("  stray ink: {} before, {} after", stray_before, stray);

    // --- Test 2: The bar core survives ---
    eprintln!("=== Stroke preservation ===");
    let core = (BAR.0 + 2, BAR.1 + 2, BAR.2 - 4, BAR.3 - 4);
    let core_ink = (core.1..core.1 + core.3)
        .flat_map(|y| (core.0..core.0 + core.2).map(move |x| (x, y)))
        .filter(|&(x, y)| filtered.get_pixel(x, y) == Some(color::BLACK))
        .count();
    rp.compare_values((core.2 * core.3) as f64, core_ink as f64, 0.0);

    // --- Test 3: Corners round off, edges stay ---
    let clean_filtered = majority_filter(&clean, 2).expect("majority_filter clean");
    rp.check(
        clean_filtered.get_pixel(BAR.0, BAR.1) == Some(color::WHITE),
        "bar corner eroded",
    );
    rp.check(
        clean_filtered.get_pixel(60, BAR.1) == Some(color::BLACK),
        "bar edge kept",
    );
    rp.write_pix(&filtered, ImageFormat::Png).expect("write filtered");

    // --- Test 4: Hairlines vanish ---
    eprintln!("=== Hairline ===");
    let mut hair = blank_page(50, 20).to_mut();
    fill_rect(&mut hair, 5, 10, 40, 1, color::BLACK);
    let hair: Pix = hair.into();
    let hair_filtered = majority_filter(&hair, 1).expect("majority_filter hairline");
    rp.compare_values(0.0, count_pixels(&hair_filtered, color::BLACK) as f64, 0.0);

    // --- Test 5: Radius limits ---
    rp.check(majority_filter(&clean, 0).is_err(), "radius 0 rejected");
    rp.check(majority_filter(&clean, 11).is_err(), "radius 11 rejected");
    rp.check(majority_filter(&clean, 10).is_ok(), "radius 10 accepted");

    assert!(rp.cleanup(), "noise regression test failed");
}
