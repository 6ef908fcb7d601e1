mod app;
mod cli;
mod constants;
mod domain;
mod logging;
mod persistence;
mod reducer;
mod storage;
mod store;
mod summary;

fn main() {
    if std::env::args_os().len() > 1 {
        logging::init_cli();
        cli::run_cli();
        return;
    }

    logging::init_ui();
    if let Err(e) = app::run_ui() {
        tracing::error!(error = %e, "terminal ui failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
