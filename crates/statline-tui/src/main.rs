// Statline entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the game stats sheet (a failed load leaves the table empty)
// 4. Run the TUI until the user quits

use statline_core::config;
use statline_core::loader::CsvFileSource;
use statline_tui::app::{self, AppState};
use statline_tui::tui;

use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Statline starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: stats_csv={}, page_size={}, sort={}, term={}",
        config.stats_csv,
        config.display.page_size,
        config.display.default_sort.column_name(),
        config.display.default_term
    );

    let source = CsvFileSource::new(&config.stats_csv);
    let (session, load_status) = app::load_session(&source, &config.stats_csv).await;
    let app = AppState::new(session, &config.display, load_status);

    tui::run(app).await?;

    info!("Statline shut down");
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("statline.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("statline_core=info,statline_tui=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
