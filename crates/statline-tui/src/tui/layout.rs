// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Filter Bar (3 rows)                               |
// +--------------------------------------------------+
// | Stats Table (fill)                                |
// |                                                   |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: load status and row counts.
    pub status_bar: Rect,
    /// Current team/year/sort/term selections.
    pub filter_bar: Rect,
    pub table: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // filter bar
            Constraint::Min(5),    // table
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        filter_bar: vertical[1],
        table: vertical[2],
        help_bar: vertical[3],
    }
}

/// Rows of table body that fit in `table_area` (borders and header excluded).
pub fn table_body_rows(table_area: Rect) -> usize {
    usize::from(table_area.height.saturating_sub(3))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    fn all_rects(layout: &AppLayout) -> [(&'static str, Rect); 4] {
        [
            ("status_bar", layout.status_bar),
            ("filter_bar", layout.filter_bar),
            ("table", layout.table),
            ("help_bar", layout.help_bar),
        ]
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        for (name, rect) in all_rects(&layout) {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn layout_fixed_heights() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.filter_bar.height, 3);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.table.height, 35);
    }

    #[test]
    fn layout_zones_stack_in_order() {
        let layout = build_layout(test_area());
        assert!(layout.status_bar.y < layout.filter_bar.y);
        assert!(layout.filter_bar.y < layout.table.y);
        assert!(layout.table.y < layout.help_bar.y);
    }

    #[test]
    fn layout_small_terminal_still_valid() {
        let layout = build_layout(Rect::new(0, 0, 40, 10));
        for (name, rect) in all_rects(&layout) {
            assert!(
                rect.width > 0 && rect.height > 0,
                "Small terminal: {} has zero area",
                name
            );
        }
    }

    #[test]
    fn body_rows_exclude_chrome() {
        assert_eq!(table_body_rows(Rect::new(0, 0, 80, 35)), 32);
        assert_eq!(table_body_rows(Rect::new(0, 0, 80, 2)), 0);
    }
}
