// War room entry point.
//
// Startup sequence:
// 1. Load config (seeds config/ from defaults/ on first run)
// 2. Initialize tracing (log to file, not terminal)
// 3. Load the player catalog from the configured source
// 4. Build the draft engine
// 5. Run the TUI until the user quits

use warroom_core::catalog::Catalog;
use warroom_core::config::{self, Config};
use warroom_core::draft::DraftEngine;
use warroom_tui::app::App;
use warroom_tui::tui;

use anyhow::Context;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    // 1. Config first: it decides where logs go.
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config)?;
    info!("War room starting up");
    info!(
        "Config loaded: data={}, {} allowed positions",
        config.data_path().display(),
        config.positions.allowed.len()
    );

    // 3. Load the catalog
    let source = config
        .catalog_source()
        .context("failed to build catalog source")?;
    let catalog = Catalog::load_allowed(&*source, &config.allowed_positions())
        .with_context(|| format!("failed to load players from {}", config.data_path().display()))?;

    // 4. Draft engine
    let engine = DraftEngine::new(catalog);
    let mut app = App::new(engine);

    // 5. TUI (blocks until quit)
    if let Err(e) = tui::run(&mut app) {
        error!("TUI error: {}", e);
        return Err(e);
    }

    info!(
        "War room shut down after {} picks, {} players left",
        app.engine.pick_count(),
        app.engine.available_ids().len()
    );
    Ok(())
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("warroom.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
