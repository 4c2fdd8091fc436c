//! helix CLI tool
//!
//! Usage:
//!   helix smart-rate <height> <tx_count> <active_nodes> <current_time> [genesis_time]
//!   helix hash <hex32> [level]
//!   helix block-hash <data>
//!   helix coord <node_id>
//!   helix path <from> <to> <a-b,b-c,...>
//!   helix reward <height>

use helix_cli::{usage, CliConfig, Command};

fn main() {
    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    helix_logging::init(&config.log_filter);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cmd = match Command::parse(&args) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("{}", usage());
            std::process::exit(1);
        }
    };

    if cmd == Command::Help {
        println!("{}", usage());
        return;
    }

    match cmd.run(&config).and_then(|out| Ok(serde_json::to_string_pretty(&out)?)) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
