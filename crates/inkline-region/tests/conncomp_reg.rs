//! Connected component regression test
//!
//! 4-connected labeling of synthetic glyph shapes: bars, hollow rings,
//! diagonal pixel chains and colored strokes.

use inkline_core::{Box, Pix, Settings, color};
use inkline_region::{InkMap, find_components, find_page_components};
use inkline_test::{RegParams, blank_page, fill_rect};

#[test]
fn conncomp_reg() {
    let mut rp = RegParams::new("conncomp");
    let settings = Settings::new().with_automatic_threshold(false);

    let mut page = blank_page(120, 60).to_mut();
    // Solid bar
    fill_rect(&mut page, 5, 5, 30, 8, color::BLACK);
    // Hollow ring, one component
    fill_rect(&mut page, 50, 5, 20, 20, color::BLACK);
    fill_rect(&mut page, 53, 8, 14, 14, color::WHITE);
    // Diagonal chain: 8-connected only, so five components
    for i in 0..5 {
        page.set_pixel(90 + i, 5 + i, color::BLACK).expect("diagonal pixel");
    }
    // Blue stroke, inside the default 220..240 hue range
    fill_rect(&mut page, 5, 40, 40, 6, color::compose_rgb(40, 60, 220));
    // Pale yellow, not ink under the defaults
    fill_rect(&mut page, 60, 40, 40, 6, color::compose_rgb(250, 240, 150));
    let page: Pix = page.into();

    // --- Test 1: Component count ---
    eprintln!("=== Labeling ===");
    let comps = find_page_components(&page, &settings).expect("find_page_components");
    eprintln!("  {} components", comps.len());
    rp.compare_values(8.0, comps.len() as f64, 0.0);

    // --- Test 2: Bounding boxes ---
    let boxes: Vec<Box> = comps.iter().map(|c| c.to_box()).collect();
    rp.check(boxes.contains(&Box::new_unchecked(5, 5, 30, 8)), "bar box");
    rp.check(boxes.contains(&Box::new_unchecked(50, 5, 20, 20)), "ring box");
    rp.check(boxes.contains(&Box::new_unchecked(5, 40, 40, 6)), "blue stroke box");
    let singles = comps.iter().filter(|c| c.pixel_count == 1).count();
    rp.compare_values(5.0, singles as f64, 0.0);

    // --- Test 3: Pixel accounting ---
    let map = InkMap::from_pix(&page, &settings);
    let labeled: u32 = comps.iter().map(|c| c.pixel_count).sum();
    rp.compare_values(map.ink_count() as f64, labeled as f64, 0.0);
    let ring = comps
        .iter()
        .find(|c| c.min_x == 50)
        .map(|c| c.pixel_count)
        .unwrap_or(0);
    rp.compare_values((20 * 20 - 14 * 14) as f64, ring as f64, 0.0);

    // --- Test 4: No ink, no components ---
    let white = blank_page(64, 64);
    rp.compare_values(
        0.0,
        find_components(&InkMap::from_pix(&white, &settings)).len() as f64,
        0.0,
    );

    // --- Test 5: Page-sized component ---
    let black = Pix::new_filled(400, 300, color::BLACK).expect("black page");
    let all = find_components(&InkMap::from_pix(&black, &settings));
    rp.compare_values(1.0, all.len() as f64, 0.0);
    rp.compare_values(
        120_000.0,
        all.first().map_or(0, |c| c.pixel_count) as f64,
        0.0,
    );

    // --- Test 6: Invalid settings ---
    let bad = settings.clone().with_min_line_height(0);
    rp.check(find_page_components(&page, &bad).is_err(), "invalid settings rejected");

    assert!(rp.cleanup(), "conncomp regression test failed");
}
