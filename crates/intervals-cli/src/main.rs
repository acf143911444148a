use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod prompt;
mod view;

#[derive(Parser)]
#[command(name = "intervals", version, about = "Work/rest interval timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interval timer
    Run(commands::run::RunArgs),
    /// Print the work/rest plan for a set of settings
    Plan(commands::plan::PlanArgs),
    /// Interactive settings form, then run
    Form(commands::form::FormArgs),
    /// Click counter
    Counter(commands::counter::CounterArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("INTERVALS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Form(args) => commands::form::run(args),
        Commands::Counter(args) => commands::counter::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "intervals", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_are_bounded() {
        assert!(Cli::try_parse_from(["intervals", "run", "--work", "0"]).is_err());
        assert!(Cli::try_parse_from(["intervals", "run", "--rest", "301"]).is_err());
        assert!(Cli::try_parse_from(["intervals", "run", "--repeat", "11"]).is_err());
        assert!(Cli::try_parse_from(["intervals", "run", "--work", "1", "--rest", "0", "--repeat", "10"]).is_ok());
    }
}
