use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use url::Url;
use vulkan_client::ClientConfig;
use vulkan_client::config::DEFAULT_READ_RETRIES;

#[derive(Parser, Debug)]
#[command(
    name = "vulkan_console",
    version,
    about = "Administer mail domains and mailbox accounts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Talk to a served backend instead of the built-in simulated one.
    #[arg(long, global = true, env = "VULKAN_BACKEND_URL")]
    pub backend_url: Option<Url>,

    /// Delay before the simulated backend answers, in milliseconds.
    #[arg(long, global = true, env = "VULKAN_LATENCY_MS", default_value_t = 800)]
    pub latency_ms: u64,

    /// File holding the session token (default: <config dir>/vulkan/vulkan_token).
    #[arg(long, global = true, env = "VULKAN_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Address for `serve` to listen on (default: 127.0.0.1:3000).
    #[arg(long, global = true, env = "VULKAN_BIND_ADDR")]
    pub bind: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive console (default)
    Console,
    /// Serve the simulated backend over HTTP
    Serve,
    /// Print version information
    Version,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            backend_url: self.backend_url.clone(),
            latency: Duration::from_millis(self.latency_ms),
            read_retries: DEFAULT_READ_RETRIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_is_the_default_command() {
        let cli = Cli::parse_from(["vulkan_console", "--latency-ms", "0"]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.client_config().latency, Duration::ZERO);
        assert_eq!(cli.client_config().backend_url, None);
    }

    #[test]
    fn parses_global_options_after_subcommand() {
        let cli = Cli::parse_from([
            "vulkan_console",
            "serve",
            "--bind",
            "0.0.0.0:4000",
            "--backend-url",
            "http://127.0.0.1:4000",
        ]);
        assert_eq!(cli.command, Some(Commands::Serve));
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0:4000"));
        assert_eq!(
            cli.client_config().backend_url.map(String::from),
            Some("http://127.0.0.1:4000/".to_string())
        );
    }
}
