// Terminal UI: layout, input handling, and widget rendering.
//
// The TUI owns the `AppState` for the lifetime of the session. Key presses
// become `UserCommand`s applied directly to it; the frame is redrawn at
// ~30 fps from whatever the last command produced.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::{debug, warn};

use crate::app::AppState;
use crate::protocol::UserCommand;

use layout::{build_layout, table_body_rows, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// UI-only state that never reaches the pipeline.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Rows scrolled past at the top of the table.
    pub scroll_offset: usize,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

/// Apply a command from the keyboard. Returns `false` when the loop should
/// exit.
pub fn dispatch(app: &mut AppState, view_state: &mut ViewState, cmd: UserCommand) -> bool {
    debug!("Command: {:?}", cmd);
    if cmd == UserCommand::Quit {
        return false;
    }
    app.apply_command(cmd);
    // Loaded rows are appended below, so keep the current position.
    if cmd != UserCommand::LoadMore {
        view_state.scroll_offset = 0;
    }
    true
}

/// Pull `scroll_offset` back so the last row sits at the bottom of the table
/// drawn in `screen`.
pub fn settle_scroll(app: &AppState, view_state: &mut ViewState, screen: Rect) {
    let visible = table_body_rows(build_layout(screen).table);
    view_state.scroll_offset =
        widgets::stats_table::clamp_scroll(view_state.scroll_offset, app.table.rows.len(), visible);
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_frame(frame: &mut Frame, app: &AppState, view_state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, app);
    widgets::filter_bar::render(frame, layout.filter_bar, &app.query);
    widgets::stats_table::render(frame, layout.table, &app.table, view_state.scroll_offset);
    render_help_bar(frame, &layout);

    if view_state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " t/T:Team | y/Y:Year | s/S:Sort | m:Term | l:More | Esc:Clear | q:Quit";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop over keyboard input and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(mut app: AppState) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            if !dispatch(&mut app, &mut view_state, cmd) {
                                break Ok(());
                            }
                        }
                        settle_scroll(&app, &mut view_state, terminal.get_frame().area());
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events: the next tick redraws.
                    }
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break Err(e.into());
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &app, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
