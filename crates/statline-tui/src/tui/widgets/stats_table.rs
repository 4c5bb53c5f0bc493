// Stats table widget: the paged, sorted rows produced by the pipeline.
//
// Headers come from the column labels; the active sort column carries an
// arrow (up for ascending text, down for descending numbers). Numeric cells
// are right-aligned.

use ratatui::layout::{Constraint, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{
    Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
};
use ratatui::Frame;

use statline_core::format::{Align, Column};
use statline_core::pipeline::TableView;
use statline_core::sort::{FieldKind, SortField};

use crate::tui::layout::table_body_rows;

/// Render the table, skipping the first `scroll_offset` rows (clamped so the
/// last row stays on screen).
pub fn render(frame: &mut Frame, area: Rect, table: &TableView, scroll_offset: usize) {
    let title = build_title(table);

    if table.rows.is_empty() {
        let paragraph = Paragraph::new("  No matching rows.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_rows = table_body_rows(area);
    let scroll_offset = clamp_scroll(scroll_offset, table.rows.len(), visible_rows);

    let header = Row::new(
        table
            .columns
            .iter()
            .map(|&col| Cell::from(aligned(header_label(col, table.sort), col.align()))),
    )
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = table
        .rows
        .iter()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .map(|row| {
            Row::new(row.cells.iter().map(|cell| {
                let style = if cell.column.sort_field() == table.sort {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                Cell::from(aligned(cell.text.clone(), cell.align)).style(style)
            }))
        })
        .collect();

    let widths: Vec<Constraint> = table.columns.iter().map(|&c| column_width(c)).collect();

    let widget = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(widget, area);

    if table.rows.len() > visible_rows {
        let mut scrollbar_state = ScrollbarState::new(table.rows.len().saturating_sub(visible_rows))
            .position(scroll_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin { vertical: 1, horizontal: 0 }),
            &mut scrollbar_state,
        );
    }
}

/// Largest offset that still fills the visible area.
pub fn clamp_scroll(offset: usize, total: usize, visible: usize) -> usize {
    offset.min(total.saturating_sub(visible))
}

/// Header text, with a direction arrow on the sorted column.
pub fn header_label(column: Column, sort: SortField) -> String {
    let field = column.sort_field();
    if field != sort {
        return column.header().to_string();
    }
    let arrow = match field.kind() {
        FieldKind::Text => "▲",
        FieldKind::Numeric => "▼",
    };
    format!("{}{}", column.header(), arrow)
}

fn aligned(text: String, align: Align) -> Line<'static> {
    match align {
        Align::Left => Line::from(text),
        Align::Right => Line::from(text).right_aligned(),
    }
}

fn column_width(column: Column) -> Constraint {
    match column {
        Column::LastName | Column::FirstName => Constraint::Min(12),
        Column::Team => Constraint::Length(10),
        Column::Year => Constraint::Length(6),
        Column::Games => Constraint::Length(4),
        Column::Average => Constraint::Length(6),
        _ => Constraint::Length(5),
    }
}

/// "Career stats (showing 25 of 40, l: more)".
fn build_title(table: &TableView) -> Line<'static> {
    let mut title = format!(
        "{} stats (showing {} of {}",
        capitalize(table.term.label()),
        table.rows.len(),
        table.total_rows
    );
    if table.has_more {
        title.push_str(", l: more");
    }
    title.push(')');
    Line::from(title)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use statline_core::page::Pager;
    use statline_core::pipeline::{StatsSession, Term, ViewQuery};
    use statline_core::record::PlayerGameRecord;

    fn view(term: Term, sort: SortField, page_size: usize) -> TableView {
        let session = StatsSession::new(vec![
            PlayerGameRecord::new("Doe", "Jane").with_team("Owls").with_year(2024).with_line(3, 1),
            PlayerGameRecord::new("Doe", "Jane").with_team("Owls").with_year(2024).with_line(4, 2),
            PlayerGameRecord::new("Roe", "Rick").with_team("Hawks").with_year(2024).with_line(0, 0),
        ]);
        session.run(&ViewQuery::new(sort, term), &Pager::new(page_size))
    }

    fn render_text(table: &TableView, width: u16, height: u16, scroll: usize) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), table, scroll))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn header_arrow_follows_sort_direction() {
        assert_eq!(header_label(Column::Hits, SortField::Hits), "Hits▼");
        assert_eq!(header_label(Column::LastName, SortField::LastName), "LAST NAME▲");
        assert_eq!(header_label(Column::Runs, SortField::Hits), "Runs");
    }

    #[test]
    fn clamp_scroll_keeps_last_page_full() {
        assert_eq!(clamp_scroll(0, 50, 10), 0);
        assert_eq!(clamp_scroll(45, 50, 10), 40);
        assert_eq!(clamp_scroll(5, 3, 10), 0);
    }

    #[test]
    fn renders_aggregated_rows() {
        let table = view(Term::Career, SortField::Hits, 25);
        let text = render_text(&table, 120, 10, 0);
        assert!(text.contains("Career stats (showing 2 of 2)"));
        assert!(text.contains("Hits▼"));
        assert!(text.contains("Doe"));
        assert!(text.contains("0.429"));
        assert!(text.contains("0.000"));
    }

    #[test]
    fn title_hints_more_rows() {
        let table = view(Term::Game, SortField::AtBats, 2);
        assert!(table.has_more);
        let text = render_text(&table, 120, 10, 0);
        assert!(text.contains("Game stats (showing 2 of 3, l: more)"));
    }

    #[test]
    fn scrolled_rows_are_hidden() {
        let table = view(Term::Game, SortField::AtBats, 25);
        // Height 5 leaves room for a two-row body; Roe has the fewest ABs.
        let text = render_text(&table, 120, 5, 0);
        assert!(!text.contains("Rick"));
        let text = render_text(&table, 120, 5, 1);
        assert!(text.contains("Rick"));
        // Offsets past the end are clamped.
        let text = render_text(&table, 120, 5, 99);
        assert!(text.contains("Rick"));
    }

    #[test]
    fn empty_table_shows_placeholder() {
        let table = TableView::empty(Term::Season, SortField::Average);
        let text = render_text(&table, 80, 6, 0);
        assert!(text.contains("No matching rows."));
        assert!(text.contains("Season stats (showing 0 of 0)"));
    }
}
