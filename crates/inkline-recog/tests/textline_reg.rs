//! Text line regression test
//!
//! Line grouping and extraction on synthetic pages: single bars, blank
//! pages, the empty-row gap limit, transparency and color preservation.

use inkline_core::{ImageFormat, Pix, Settings, color};
use inkline_recog::{LINE_MARGIN, extract_lines, group_into_lines, segment_lines};
use inkline_region::find_page_components;
use inkline_test::{RegParams, blank_page, count_pixels, fill_rect, page_with_bars};

fn manual() -> Settings {
    Settings::new().with_automatic_threshold(false)
}

#[test]
fn textline_reg() {
    let mut rp = RegParams::new("textline");

    // --- Test 1: One bar, one line ---
    eprintln!("=== Single bar ===");
    let page = page_with_bars(100, 200, &[(10, 90, 80, 20)], color::BLACK);
    let lines = extract_lines(&page, &manual()).expect("extract single bar");
    rp.compare_values(1.0, lines.len() as f64, 0.0);
    if let Some(line) = lines.first() {
        rp.compare_values(20.0, line.pix.height() as f64, 0.0);
        rp.compare_values((80 + 2 * LINE_MARGIN) as f64, line.pix.width() as f64, 0.0);
        rp.compare_values(4.0, line.pix.spp() as f64, 0.0);
        rp.compare_values(1600.0, count_pixels(&line.pix, color::BLACK) as f64, 0.0);
        rp.write_pix(&line.pix, ImageFormat::Png).expect("write line");
    }

    // --- Test 2: Blank page ---
    let blank = blank_page(100, 200);
    let seg = segment_lines(&blank, &manual()).expect("segment blank page");
    rp.compare_values(0.0, seg.lines.len() as f64, 0.0);
    rp.compare_values(0.0, seg.component_count as f64, 0.0);

    // --- Test 3: Gap limit ---
    eprintln!("=== Empty-row gap ===");
    let settings = manual().with_max_empty_rows(3);
    let at_limit = page_with_bars(100, 200, &[(10, 20, 80, 10), (10, 33, 80, 10)], color::BLACK);
    let merged = extract_lines(&at_limit, &settings).expect("extract at limit");
    rp.compare_values(1.0, merged.len() as f64, 0.0);
    rp.compare_values(23.0, merged.first().map_or(0, |l| l.pix.height()) as f64, 0.0);

    let past_limit =
        page_with_bars(100, 200, &[(10, 20, 80, 20), (10, 44, 80, 20)], color::BLACK);
    let split = extract_lines(&past_limit, &settings).expect("extract past limit");
    rp.compare_values(2.0, split.len() as f64, 0.0);
    let indices: Vec<usize> = split.iter().map(|l| l.index).collect();
    rp.check(indices == vec![1, 2], "indices are 1-based in page order");

    // --- Test 4: Short groups are dropped ---
    let mixed = page_with_bars(100, 200, &[(10, 20, 80, 20), (10, 100, 80, 5)], color::BLACK);
    let seg = segment_lines(&mixed, &manual()).expect("segment mixed page");
    rp.compare_values(2.0, seg.group_count as f64, 0.0);
    rp.compare_values(1.0, seg.lines.len() as f64, 0.0);

    // --- Test 5: Transparent background ---
    eprintln!("=== Transparency ===");
    let clear = extract_lines(&page, &manual().with_save_transparent(true))
        .expect("extract transparent");
    if let Some(line) = clear.first() {
        let transparent = count_pixels(&line.pix, color::TRANSPARENT);
        let black = count_pixels(&line.pix, color::BLACK);
        rp.compare_values(1600.0, black as f64, 0.0);
        rp.compare_values(
            (line.pix.width() * line.pix.height()) as f64 - 1600.0,
            transparent as f64,
            0.0,
        );
    } else {
        rp.check(false, "transparent line missing");
    }

    // --- Test 6: Original colors survive ---
    let red = color::compose_rgb(200, 20, 20);
    let mut colored = blank_page(100, 60).to_mut();
    fill_rect(&mut colored, 20, 20, 50, 18, red);
    let colored: Pix = colored.into();
    // Gray level of the bar is 80, so a threshold of 50 leaves only the hue gate
    let settings = manual()
        .with_ink_threshold(50)
        .with_preserve_original_colors(true)
        .with_save_transparent(true);
    let lines = extract_lines(&colored, &settings).expect("extract colored");
    rp.compare_values(1.0, lines.len() as f64, 0.0);
    rp.compare_values(
        900.0,
        lines.first().map_or(0, |l| count_pixels(&l.pix, red)) as f64,
        0.0,
    );

    // Closing the saturation gate leaves the red bar unrecognized
    let gated = settings.clone().with_min_saturation(0.9);
    let lines = extract_lines(&colored, &gated).expect("extract gated");
    rp.compare_values(0.0, lines.len() as f64, 0.0);

    // --- Test 7: Grouping agrees with extraction ---
    let comps = find_page_components(&past_limit, &manual()).expect("components");
    let groups = group_into_lines(comps, &manual());
    rp.compare_values(2.0, groups.len() as f64, 0.0);

    assert!(rp.cleanup(), "textline regression test failed");
}
