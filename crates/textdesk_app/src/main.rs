mod app;
mod effects;
mod logging;
mod ui;

fn main() -> anyhow::Result<()> {
    // The terminal belongs to the TUI; logs go to ./desk.log only.
    logging::initialize(logging::LogDestination::File);
    app::run_app()
}
