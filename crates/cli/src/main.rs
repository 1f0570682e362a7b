use anyhow::Context;
use bookshelf_db::Database;
use bookshelf_kernel::settings::Settings;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bookshelf-cli", version, about = "Operate the Bookshelf service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service until Ctrl-C or SIGTERM
    Serve,
    /// Connect to the configured database and ping it
    Check,
    /// Print the effective configuration with credentials masked
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load Bookshelf settings")?;

    match cli.command {
        Command::Serve => {
            bookshelf_telemetry::init(&settings.telemetry)?;
            bookshelf::run(settings).await
        }
        Command::Check => {
            let database = Database::connect(&settings.database).await?;
            let reachable = database.ping().await;
            database.shutdown().await;
            reachable?;

            println!(
                "database '{}' reachable at {}",
                settings.database.database,
                settings.database.redacted_uri()
            );
            Ok(())
        }
        Command::Config => {
            println!("environment   = {:?}", settings.environment);
            println!(
                "listen        = {}:{}",
                settings.server.host, settings.server.port
            );
            println!("timeout_ms    = {}", settings.server.request_timeout_ms);
            println!("database_uri  = {}", settings.database.redacted_uri());
            println!("database      = {}", settings.database.database);
            println!("collection    = {}", settings.database.collection);
            println!("log_format    = {:?}", settings.telemetry.log_format);
            Ok(())
        }
    }
}
