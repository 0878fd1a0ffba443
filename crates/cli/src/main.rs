use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_kernel::settings::Settings;

/// Author and book catalogue service
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the resolved settings as JSON
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load Shelf settings")?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            shelf_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "shelf serve starting");

            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime.block_on(shelf_app::run(&settings))
        }
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
    }
}
