use std::{fs::OpenOptions, io, sync::Mutex};

use tracing_subscriber::EnvFilter;

use crate::storage;

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

pub fn init_cli() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("caloria=warn"))
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// The terminal belongs to the UI, so log lines go to a file in the state directory.
pub fn init_ui() {
    let path = storage::get_log_path();
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: could not open log file {}: {}", path.display(), e);
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("caloria=info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
