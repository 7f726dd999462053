use clap::Parser;
use docuchat::cli::Cli;

fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (ignore errors if missing)
    dotenvy::dotenv().ok();

    let _log_guard = docuchat::logging::init_from_env()?;

    let cli = Cli::parse();
    cli.run()
}
