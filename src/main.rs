use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "taskit",
    about = concat!("taskit v", env!("CARGO_PKG_VERSION"), " - a to-do list for your terminal"),
    version
)]
struct Cli {
    /// Use an alternate config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable desktop notifications for this session
    #[arg(long)]
    no_notify: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = taskit::tui::run(cli.config.as_deref(), cli.no_notify) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
