//! Clap CLI definitions for the `numform` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// numform -- digit-group formula engine.
///
/// Normalizes a digit string and runs it through guarded generators and
/// filters.
#[derive(Parser, Debug)]
#[command(
    name = "numform",
    about = "Digit-group formula engine",
    long_about = "Normalizes a digit string and runs it through guarded generators and filters. \
                  Requests whose output would be too large are blocked before anything is generated.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Configuration directory (default: auto-discover .numform/).
    #[arg(long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one compute module over a digit string.
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Run a pipeline recipe over a digit string.
    Run(RunArgs),

    /// Show the guardrail estimate for a request without generating.
    Estimate(EstimateArgs),

    /// Resolve the capabilities of a formula version.
    Caps(CapsArgs),

    /// List the registered compute modules.
    Modules,

    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

/// Module selection shared by `generate` and `estimate`.
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Raw digit text; non-digits and duplicates are ignored.
    pub digits: String,

    /// Compute module key.
    #[arg(short, long, default_value = "digit-groups")]
    pub module: String,

    /// Module parameter as key=value (value parsed as JSON when possible).
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Keep the module's output order instead of sorting.
    #[arg(long)]
    pub no_sort: bool,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Recipe name or file path.
    pub recipe: String,

    /// Raw digit text; non-digits and duplicates are ignored.
    pub digits: String,

    /// Keep the pipeline's output order instead of sorting.
    #[arg(long)]
    pub no_sort: bool,
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

#[derive(Args, Debug)]
pub struct CapsArgs {
    /// Lifecycle status (draft, active, deprecated, archived, ...).
    pub status: String,

    /// The version is locked.
    #[arg(long)]
    pub locked: bool,
}

#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate bash completions.
    Bash,
    /// Generate zsh completions.
    Zsh,
    /// Generate fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_collects_params() {
        let cli = Cli::parse_from([
            "numform", "generate", "1234", "-p", "groupSize=3", "--param", "mode=permutation",
        ]);
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(args.request.digits, "1234");
                assert_eq!(args.request.module, "digit-groups");
                assert_eq!(args.request.params, vec!["groupSize=3", "mode=permutation"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["numform", "modules", "--json", "-v"]);
        assert!(cli.global.json);
        assert!(cli.global.verbose);
    }
}
