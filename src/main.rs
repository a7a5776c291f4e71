mod api;
mod app;
mod config;
mod error;
mod events;
mod logger;
mod session;
mod state;
mod ui;
mod utils;

use anyhow::Result;
use app::App;
use clap::{crate_version, App as Cli, Arg};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new("schemes-tui")
        .version(crate_version!())
        .about("Browse government welfare schemes from the terminal")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Use a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("api-url")
                .long("api-url")
                .value_name("URL")
                .help("Override the schemes API base URL for this run")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("log-level")
                .short("l")
                .long("log-level")
                .value_name("LEVEL")
                .help("Override the log level (error, warn, info, debug, trace)")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(url) = matches.value_of("api-url") {
        config.api_base_url = url.to_owned();
    }
    if let Some(level) = matches.value_of("log-level") {
        config.log_level = level.to_owned();
    }

    App::start(config).await
}
