//! Line grouping
//!
//! Components are sorted by top edge and swept once. A component joins the
//! open group when the number of empty rows between it and the lowest
//! bottom edge reached by any member so far is at most `max_empty_rows`;
//! otherwise the group is closed and a new one starts.
//!
//! Because the gap is measured against the group's lowest reach, one tall
//! component (a long descender, a marginal ornament) keeps the group open
//! and can bridge two visual lines into one group.

use inkline_core::Settings;
use inkline_region::Component;

/// Components assigned to one text line, sorted by top edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGroup {
    components: Vec<Component>,
    top: u32,
    bottom: u32,
}

impl LineGroup {
    /// Start a group with one component
    pub fn new(first: Component) -> Self {
        Self {
            top: first.top(),
            bottom: first.bottom(),
            components: vec![first],
        }
    }

    /// Add a component to the group
    pub fn push(&mut self, component: Component) {
        self.top = self.top.min(component.top());
        self.bottom = self.bottom.max(component.bottom());
        self.components.push(component);
    }

    /// Highest row reached by any member (inclusive)
    #[inline]
    pub fn top(&self) -> u32 {
        self.top
    }

    /// Lowest row reached by any member (inclusive)
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.bottom
    }

    /// Group height in rows
    #[inline]
    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }

    /// Member components
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Number of member components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the group has no members (never true for built groups)
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Empty rows between the group's lowest reach and `component`.
    ///
    /// Touching rows give 0; overlapping rows give a negative gap.
    pub fn gap_to(&self, component: &Component) -> i64 {
        component.top() as i64 - (self.bottom as i64 + 1)
    }
}

/// Group components into text lines, top to bottom.
///
/// Every input component lands in exactly one group.
pub fn group_into_lines(mut components: Vec<Component>, settings: &Settings) -> Vec<LineGroup> {
    // Stable sort keeps discovery order among equal tops
    components.sort_by_key(|c| c.top());

    let tolerance = settings.max_empty_rows as i64;
    let mut groups = Vec::new();
    let mut open: Option<LineGroup> = None;

    for component in components {
        open = Some(match open.take() {
            None => LineGroup::new(component),
            Some(mut group) if group.gap_to(&component) <= tolerance => {
                group.push(component);
                group
            }
            Some(group) => {
                groups.push(group);
                LineGroup::new(component)
            }
        });
    }
    groups.extend(open);

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(top: u32, bottom: u32) -> Component {
        Component::from_edges(10, top, 50, bottom)
    }

    fn settings(max_empty_rows: u32) -> Settings {
        Settings::new().with_max_empty_rows(max_empty_rows)
    }

    #[test]
    fn test_empty_input() {
        assert!(group_into_lines(Vec::new(), &settings(3)).is_empty());
    }

    #[test]
    fn test_gap_threshold() {
        // Bar ends at row 19; 3 empty rows (20..=22) then a bar at 23
        let merged = group_into_lines(vec![bar(0, 19), bar(23, 40)], &settings(3));
        assert_eq!(merged.len(), 1);

        // 4 empty rows (20..=23)
        let split = group_into_lines(vec![bar(0, 19), bar(24, 40)], &settings(3));
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].bottom(), 19);
        assert_eq!(split[1].top(), 24);
    }

    #[test]
    fn test_sorts_by_top() {
        let groups = group_into_lines(vec![bar(100, 110), bar(0, 10), bar(50, 60)], &settings(3));
        let tops: Vec<u32> = groups.iter().map(|g| g.top()).collect();
        assert_eq!(tops, vec![0, 50, 100]);
    }

    #[test]
    fn test_overlap_merges() {
        let groups = group_into_lines(vec![bar(0, 20), bar(5, 12), bar(18, 30)], &settings(0));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[0].height(), 31);
    }

    #[test]
    fn test_tall_member_bridges_lines() {
        // Small glyphs end by row 10 but one stroke reaches row 30. The glyph
        // at row 33 is 22 rows below the small glyphs, yet only 2 below the
        // stroke, so it joins the same group.
        let components = vec![bar(0, 10), bar(2, 30), bar(4, 9), bar(33, 45)];
        let groups = group_into_lines(components, &settings(3));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 4);
        assert_eq!((groups[0].top(), groups[0].bottom()), (0, 45));
    }

    #[test]
    fn test_no_component_lost() {
        let components: Vec<Component> = (0..20).map(|i| bar(i * 7 % 90, i * 7 % 90 + 4)).collect();
        let groups = group_into_lines(components.clone(), &settings(1));

        let total: usize = groups.iter().map(|g| g.len()).sum();
        assert_eq!(total, components.len());
        for group in &groups {
            let tops: Vec<u32> = group.components().iter().map(|c| c.top()).collect();
            assert!(tops.windows(2).all(|w| w[0] <= w[1]));
        }
        for pair in groups.windows(2) {
            assert!(pair[0].gap_to(&pair[1].components()[0]) > 1);
        }
    }
}
