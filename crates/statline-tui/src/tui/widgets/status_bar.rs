// Status bar widget: load outcome and row counts.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::protocol::LoadStatus;

/// Render the status bar into the given area.
///
/// Layout: [load indicator] [source] | [rows shown]
pub fn render(frame: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = load_spans(&app.load_status);

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        format!("{} of {} rows", app.table.rows.len(), app.table.total_rows),
        Style::default().fg(Color::White),
    ));

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the status dot character and its color.
pub fn load_indicator(status: &LoadStatus) -> (&'static str, Color) {
    match status {
        LoadStatus::Loaded { .. } => ("●", Color::Green),
        LoadStatus::Failed { .. } => ("●", Color::Red),
    }
}

fn load_spans(status: &LoadStatus) -> Vec<Span<'static>> {
    let (dot, dot_color) = load_indicator(status);
    let mut spans = vec![Span::styled(format!(" {} ", dot), Style::default().fg(dot_color))];
    match status {
        LoadStatus::Loaded { path, rows } => {
            spans.push(Span::styled(
                format!("{} ({} games)", path, rows),
                Style::default().fg(Color::White),
            ));
        }
        LoadStatus::Failed { message, .. } => {
            spans.push(Span::styled(
                format!("load failed: {}", message),
                Style::default().fg(Color::Red),
            ));
        }
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn load_indicator_loaded() {
        let (dot, color) = load_indicator(&LoadStatus::Loaded {
            path: "a.csv".into(),
            rows: 3,
        });
        assert_eq!(dot, "●");
        assert_eq!(color, Color::Green);
    }

    #[test]
    fn load_indicator_failed() {
        let (_, color) = load_indicator(&LoadStatus::Failed {
            path: "a.csv".into(),
            message: "nope".into(),
        });
        assert_eq!(color, Color::Red);
    }

    #[test]
    fn loaded_spans_name_source_and_count() {
        let spans = load_spans(&LoadStatus::Loaded {
            path: "data/games.csv".into(),
            rows: 14,
        });
        assert_eq!(text(&spans), " ● data/games.csv (14 games)");
    }

    #[test]
    fn failed_spans_show_message_in_red() {
        let spans = load_spans(&LoadStatus::Failed {
            path: "x.csv".into(),
            message: "file not found".into(),
        });
        assert_eq!(text(&spans), " ● load failed: file not found");
        assert_eq!(spans[1].style.fg, Some(Color::Red));
    }
}
