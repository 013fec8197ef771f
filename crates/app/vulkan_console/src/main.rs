pub use vulkan_console::{Error, Result};

use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use vulkan_api::AppState;
use vulkan_api::config::BackendConfig;
use vulkan_client::Client;
use vulkan_console::context::AppContext;
use vulkan_console::prompt::LinePrompter;
use vulkan_console::shell::Shell;
use vulkan_core::session::{FileTokenStore, Session, TokenStore};

mod cli;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    match args.command.unwrap_or(Commands::Console) {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Serve => {
            logging::init_tracing()?;
            serve(&args)?;
        }
        Commands::Console => {
            logging::init()?;
            console(&args)?;
        }
    }

    Ok(())
}

fn console(args: &Cli) -> Result<()> {
    let store: Arc<dyn TokenStore> = match &args.token_file {
        Some(path) => Arc::new(FileTokenStore::new(path)),
        None => Arc::new(FileTokenStore::default_location()?),
    };
    let session = Session::restore(store)?;
    let client = Client::new(&args.client_config(), session);

    let runtime = tokio::runtime::Runtime::new()?;
    let prompter = LinePrompter::new(std::io::stdin().lock(), std::io::stdout());
    let mut shell = Shell::new(AppContext::new(client), prompter);
    runtime.block_on(shell.run())
}

fn serve(args: &Cli) -> Result<()> {
    let mut config = BackendConfig::from_env();
    if let Some(bind) = &args.bind {
        config.bind_addr = bind.clone();
    }
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(vulkan_api::serve(AppState::new(config)))?;
    Ok(())
}
