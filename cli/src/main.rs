mod config;
mod runner;

use clap::Parser;

use vanishing_ttt::logger::init_logger;

use config::{CliConfig, parse_mode};

#[derive(Parser, Debug)]
#[command(name = "vanishing_ttt", about = "Vanishing tic-tac-toe in the terminal")]
struct Args {
    /// Path to the YAML config file.
    #[arg(long, default_value = "vanishing_ttt.yaml")]
    config: String,

    /// Start directly in a mode ("single" or "two-player"), overriding the
    /// config.
    #[arg(long)]
    mode: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logger(Some("cli".to_string()));

    let config = match CliConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let mode_name = args.mode.or_else(|| config.default_mode.clone());
    let initial_mode = match mode_name {
        Some(name) => match parse_mode(&name) {
            Some(mode) => Some(mode),
            None => {
                eprintln!("Unknown mode \"{}\", expected \"single\" or \"two-player\"", name);
                std::process::exit(1);
            }
        },
        None => None,
    };

    runner::run(config, initial_mode).await;
}
