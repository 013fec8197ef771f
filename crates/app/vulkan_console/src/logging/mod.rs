pub mod formats;

use flexi_logger::Logger;

use crate::Error;

/// Logger for the interactive console. Writes to stderr so the console's own
/// output on stdout stays readable.
pub fn init() -> Result<(), Error> {
    Logger::try_with_env_or_str("warn")?
        .format(formats::cli_format)
        .log_to_stderr()
        .start()?;

    Ok(())
}

/// Subscriber for `serve`: env filter, stderr.
pub fn init_tracing() -> Result<(), Error> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,vulkan_api=debug"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| Error::Custom(format!("failed to initialize tracing: {e}")))
}
