//! help-plus - A help listing add-on for chat bots.
//!
//! This is the main entry point of the help-plus bot, which lists the help
//! strings registered by the bot modules in chat and on a web page.
//!
//! # Overview
//!
//! Help strings are short lines of the form `hubot <args> - <description>`.
//! help-plus hides the configured commands, rewrites the `hubot` prefix to
//! the name the bot answers to, sorts the list, and serves it.
//!
//! # Features
//!
//! - **Chat Help**: `<bot> help` lists every command
//! - **Search**: `<bot> help <query>` lists the commands matching a pattern
//! - **Pagination**: `<bot> help <page>` lists ten commands at a time
//! - **Private Replies**: Help can be sent privately to the asking user
//! - **Hidden Commands**: Configured commands never show up
//! - **Web Page**: `GET /<bot>/help` serves the list as HTML
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! bot:
//!   name: "marvin"
//!
//! help:
//!   hidden_commands: "adapter"
//!
//! commands:
//!   - "hubot ping - Reply with pong"
//!   - "hubot adapter - Reply with the adapter"
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export HUBOT_HELP_REPLY_IN_PRIVATE=1
//! export HUBOT_HELP_DISABLE_HTTP=1
//! export HUBOT_HELP_HIDDEN_COMMANDS="ping,adapter"
//! export HELP_PLUS_HTTP__ADDRESS="127.0.0.1:8080"
//! ```
//!
//! # Usage
//!
//! ```bash
//! help-plus --config config.yaml
//! ```
//!
//! # Architecture
//!
//! - [`adapter`] - Chat platform integration and the shell adapter
//! - [`bot`] - Wiring of the adapter, the help service and the web server
//! - [`config`] - YAML configuration with environment variable overrides
//! - [`help`] - Help listing: building, chat answers and the web page
//! - [`utils`] - Pattern helpers
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{adapter::ShellAdapter, bot::Bot, config::Config};

mod adapter;
mod bot;
mod config;
mod help;
mod utils;

/// Command-line arguments for the help-plus bot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// The file holds the bot identity, the help settings and the registered
    /// help strings. See the [`config`] module for the expected format.
    #[arg(short, long)]
    config: String,
}

/// Main entry point for the help-plus bot.
///
/// 1. **Logging Setup**: `info` level by default, overridable with `RUST_LOG`
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Reads the YAML file and environment overrides
/// 4. **Bot Initialization**: Builds the help service over the shell adapter
/// 5. **Bot Execution**: Serves the web page and answers chat messages until
///    standard input is closed
///
/// Errors are logged and end the process without panicking.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting help-plus {}...", env!("CARGO_PKG_VERSION"));

    // Parse command line arguments
    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config, ShellAdapter::new()) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("Bot stopped: {}", e);
    }
}
