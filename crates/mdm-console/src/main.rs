//! MDM console binary entrypoint.
//!
//! This is the main entry point for the `mdm` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdm_client::HttpApi;
use mdm_console::cli::{Cli, Commands};
use mdm_console::commands::{
    AttributeCommand, CatalogCommand, Console, DashboardCommand, EntityCommand, HealthCommand,
};
use mdm_console::confirm::{AssumeYes, Confirm, PromptConfirm};
use mdm_console::output::OutputFormat;
use mdm_console::shell::Shell;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), mdm_console::CliError> {
    let format = OutputFormat::new(cli.format);
    let api = HttpApi::new(&cli.client_config())?;

    if matches!(cli.command, Commands::Console) {
        let shell = Shell::open(api).await;
        let mut console = Console::new(shell, io::stdin().lock(), io::stdout(), format)
            .with_assume_yes(cli.yes);
        return console.run().await;
    }

    let mut stdout = io::stdout().lock();
    let mut yes = AssumeYes;
    let mut prompt = PromptConfirm::new(io::stdin().lock(), io::stderr());
    let confirm: &mut dyn Confirm = if cli.yes { &mut yes } else { &mut prompt };

    match &cli.command {
        Commands::Dashboard => {
            let cmd = DashboardCommand::new(&api);
            cmd.execute(&mut stdout, &format).await?;
        }
        Commands::Health => {
            let cmd = HealthCommand::new(&api);
            cmd.execute(&mut stdout, &format).await?;
        }
        Commands::Entity { command } => {
            let cmd = EntityCommand::new(&api);
            cmd.execute(&mut stdout, &format, command, confirm).await?;
        }
        Commands::Attribute { command } => {
            let cmd = AttributeCommand::new(&api);
            cmd.execute(&mut stdout, &format, command, confirm).await?;
        }
        Commands::Catalog { command } => {
            let cmd = CatalogCommand::new(&api);
            cmd.execute(&mut stdout, &format, command, confirm).await?;
        }
        Commands::Console => {}
    }

    Ok(())
}
