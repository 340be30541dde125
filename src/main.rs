use anyhow::Result;
use clap::Parser;
use shortcut_relay::cli::{self, Cli};

fn main() -> Result<()> {
    // Parse arguments first so --log-level is known before logging starts.
    let cli = Cli::parse();
    shortcut_relay::debug::init_log_bridge(cli.log_level);

    log::info!("Starting shortcut-relay");
    for line in cli::run(&cli)? {
        println!("{}", line);
    }
    Ok(())
}
