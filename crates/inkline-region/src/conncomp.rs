//! Connected component analysis
//!
//! Finds maximal 4-connected regions of ink in an [`InkMap`] with an
//! explicit-stack flood fill, so deep regions (page borders, long
//! strokes) never grow the call stack. Each fill reports one
//! [`Component`] bounding box.

use crate::error::RegionResult;
use crate::inkmap::InkMap;
use inkline_core::{Box, Pix, Settings};

/// Bounding box of one connected ink region
///
/// All coordinates are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Component {
    /// Leftmost column
    pub min_x: u32,
    /// Topmost row
    pub min_y: u32,
    /// Rightmost column
    pub max_x: u32,
    /// Bottom row
    pub max_y: u32,
    /// Number of ink pixels in the region
    pub pixel_count: u32,
}

impl Component {
    /// Single-pixel component at (x, y)
    pub fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
            pixel_count: 1,
        }
    }

    /// Component spanning the given inclusive edges
    pub fn from_edges(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            pixel_count: (max_x - min_x + 1) * (max_y - min_y + 1),
        }
    }

    /// Top edge (inclusive)
    #[inline]
    pub fn top(&self) -> u32 {
        self.min_y
    }

    /// Bottom edge (inclusive)
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.max_y
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Bounding box as a [`Box`]
    pub fn to_box(&self) -> Box {
        Box::new_unchecked(
            self.min_x as i32,
            self.min_y as i32,
            self.width() as i32,
            self.height() as i32,
        )
    }

    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.pixel_count += 1;
    }
}

/// Find all 4-connected ink components.
///
/// Components are returned in discovery order of a row-major scan (the
/// order carries no meaning for line grouping). A map without ink yields
/// no components.
pub fn find_components(map: &InkMap) -> Vec<Component> {
    let width = map.width();
    let height = map.height();
    let mut visited = vec![false; map.cells().len()];
    let mut components = Vec::new();
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let seed = map.index(x, y);
            if visited[seed] || !map.is_ink(x, y) {
                continue;
            }

            let mut component: Option<Component> = None;
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                if !map.is_ink(cx, cy) {
                    continue;
                }
                let idx = map.index(cx, cy);
                if visited[idx] {
                    continue;
                }
                visited[idx] = true;

                match component.as_mut() {
                    Some(c) => c.include(cx, cy),
                    None => component = Some(Component::at(cx, cy)),
                }

                if cx > 0 {
                    stack.push((cx - 1, cy));
                }
                if cx + 1 < width {
                    stack.push((cx + 1, cy));
                }
                if cy > 0 {
                    stack.push((cx, cy - 1));
                }
                if cy + 1 < height {
                    stack.push((cx, cy + 1));
                }
            }

            components.extend(component);
        }
    }

    components
}

/// Classify a page and find its ink components.
///
/// # Errors
///
/// Returns an error if `settings` fails validation.
pub fn find_page_components(pix: &Pix, settings: &Settings) -> RegionResult<Vec<Component>> {
    settings.validate()?;
    let map = InkMap::from_pix(pix, settings);
    let components = find_components(&map);
    log::debug!(
        "{} ink pixels in {} components",
        map.ink_count(),
        components.len()
    );
    Ok(components)
}
