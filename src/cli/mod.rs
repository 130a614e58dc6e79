//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the
//! appropriate commands.

use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::api::{CompletionClient, RelayClient};
use crate::core::config::Config;
use crate::core::constants::DEFAULT_RELAY_BASE_URL;
use crate::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "healthassist")]
#[command(about = "A terminal chat client for the HealthAssist relay")]
#[command(
    long_about = "HealthAssist is a full-screen terminal chat client that talks to the \
HealthAssist health-assistant relay. Replies come from the relay's language-model \
provider; the transcript and the theme preference are kept locally.\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message (Alt+Enter for a new line)\n\
  F1-F4             Ask a preset quick question\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Ctrl+T            Toggle between light and dark mode\n\
  Ctrl+L            Clear the chat history (asks for confirmation)\n\
  Ctrl+S            Export the transcript as HTML\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Relay base URL; the fixed chat path is appended
    #[arg(short, long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Set configuration values
    Set {
        /// Configuration key to set (theme, endpoint)
        key: String,
        /// Value to set for the key; omit to print the current configuration
        value: Option<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset (theme, endpoint)
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = Args::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = Config::load()?;
            let endpoint = args
                .endpoint
                .or(config.endpoint)
                .unwrap_or_else(|| DEFAULT_RELAY_BASE_URL.to_string());
            let client: Arc<dyn CompletionClient> = Arc::new(RelayClient::new(&endpoint));
            run_chat(endpoint, client).await
        }
        Commands::Set { key, value } => set_config_value(&key, value),
        Commands::Unset { key } => unset_config_value(&key),
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("healthassist=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn set_config_value(key: &str, value: Option<String>) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    match key {
        "theme" => match value.as_deref() {
            Some(v @ ("light" | "dark")) => {
                config.theme = Some(v.to_string());
                config.save()?;
                println!("✅ Set theme to: {v}");
            }
            Some(other) => {
                eprintln!("⚠️  Unknown theme '{other}'. Valid themes: light, dark");
            }
            None => config.print_all(),
        },
        "endpoint" => match value {
            Some(v) => {
                config.endpoint = Some(v.clone());
                config.save()?;
                println!("✅ Set endpoint to: {v}");
            }
            None => config.print_all(),
        },
        _ => {
            eprintln!("⚠️  Unknown configuration key: {key}");
            eprintln!("Valid keys: theme, endpoint");
        }
    }
    Ok(())
}

fn unset_config_value(key: &str) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    match key {
        "theme" => {
            config.theme = None;
            config.save()?;
            println!("✅ Unset theme");
        }
        "endpoint" => {
            config.endpoint = None;
            config.save()?;
            println!("✅ Unset endpoint");
        }
        _ => {
            eprintln!("⚠️  Unknown configuration key: {key}");
            eprintln!("Valid keys: theme, endpoint");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_chat() {
        let args = Args::try_parse_from(["healthassist"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.endpoint.is_none());
    }

    #[test]
    fn endpoint_flag_is_parsed() {
        let args =
            Args::try_parse_from(["healthassist", "--endpoint", "http://10.0.0.5:8080"]).unwrap();
        assert_eq!(args.endpoint.as_deref(), Some("http://10.0.0.5:8080"));
    }

    #[test]
    fn set_subcommand_takes_key_and_optional_value() {
        let args = Args::try_parse_from(["healthassist", "set", "theme", "dark"]).unwrap();
        match args.command {
            Some(Commands::Set { key, value }) => {
                assert_eq!(key, "theme");
                assert_eq!(value.as_deref(), Some("dark"));
            }
            _ => panic!("expected set subcommand"),
        }

        let args = Args::try_parse_from(["healthassist", "set", "theme"]).unwrap();
        match args.command {
            Some(Commands::Set { key, value }) => {
                assert_eq!(key, "theme");
                assert!(value.is_none());
            }
            _ => panic!("expected set subcommand"),
        }
    }

    #[test]
    fn unset_subcommand_requires_a_key() {
        assert!(Args::try_parse_from(["healthassist", "unset"]).is_err());
        let args = Args::try_parse_from(["healthassist", "unset", "endpoint"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Unset { .. })));
    }
}
