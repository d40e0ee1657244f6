//! `tuneset` binary: logging setup and exit status around [`tuneset_cli::run`].

use std::io::Write;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    let matches = tuneset_cli::command().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let mut stdout = std::io::stdout().lock();
    let passed = tuneset_cli::run(&matches, &mut stdout)?;
    stdout.flush()?;

    std::process::exit(if passed { 0 } else { 1 });
}
