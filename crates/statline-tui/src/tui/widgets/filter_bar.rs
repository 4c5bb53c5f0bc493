// Filter bar widget: the current team, year, sort and term selections.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use statline_core::filter::YearFilter;
use statline_core::pipeline::ViewQuery;
use statline_core::sort::{FieldKind, SortField};

/// Render the selections into the given area.
pub fn render(frame: &mut Frame, area: Rect, query: &ViewQuery) {
    let paragraph = Paragraph::new(selection_line(query))
        .block(Block::default().borders(Borders::ALL).title("Filters"));
    frame.render_widget(paragraph, area);
}

/// `Team: All | Year: 2024 | Sort: Hits (desc) | Term: career`
pub fn selection_line(query: &ViewQuery) -> Line<'static> {
    let mut spans = Vec::new();
    push_selection(&mut spans, "Team", team_label(query.team.as_deref()));
    push_separator(&mut spans);
    push_selection(&mut spans, "Year", year_label(&query.year));
    push_separator(&mut spans);
    push_selection(&mut spans, "Sort", sort_label(query.sort));
    push_separator(&mut spans);
    push_selection(&mut spans, "Term", query.term.label().to_string());
    Line::from(spans)
}

pub fn team_label(team: Option<&str>) -> String {
    team.map_or_else(|| "All".to_string(), str::to_string)
}

pub fn year_label(year: &YearFilter) -> String {
    match year {
        YearFilter::Any => "All".to_string(),
        YearFilter::Exact(y) => y.to_string(),
        YearFilter::Unparseable => "invalid".to_string(),
    }
}

pub fn sort_label(sort: SortField) -> String {
    let dir = match sort.kind() {
        FieldKind::Text => "asc",
        FieldKind::Numeric => "desc",
    };
    format!("{} ({})", sort.column_name(), dir)
}

fn push_selection(spans: &mut Vec<Span<'static>>, name: &'static str, value: String) {
    spans.push(Span::styled(
        format!(" {}: ", name),
        Style::default().fg(Color::Gray),
    ));
    spans.push(Span::styled(
        value,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
}

fn push_separator(spans: &mut Vec<Span<'static>>) {
    spans.push(Span::styled(" |", Style::default().fg(Color::DarkGray)));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use statline_core::pipeline::Term;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn default_query_shows_all() {
        let query = ViewQuery::new(SortField::Hits, Term::Career);
        assert_eq!(
            line_text(&selection_line(&query)),
            " Team: All | Year: All | Sort: Hits (desc) | Term: career"
        );
    }

    #[test]
    fn selected_filters_are_shown() {
        let mut query = ViewQuery::new(SortField::LastName, Term::Season);
        query.team = Some("Owls".into());
        query.year = YearFilter::Exact(2024);
        let text = line_text(&selection_line(&query));
        assert!(text.contains("Team: Owls"));
        assert!(text.contains("Year: 2024"));
        assert!(text.contains("Sort: LAST NAME (asc)"));
        assert!(text.contains("Term: season"));
    }

    #[test]
    fn unparseable_year_label() {
        assert_eq!(year_label(&YearFilter::Unparseable), "invalid");
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(80, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let query = ViewQuery::new(SortField::Average, Term::Game);
        terminal
            .draw(|frame| render(frame, frame.area(), &query))
            .unwrap();
    }
}
