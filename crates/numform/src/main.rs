//! `numform` -- digit-group formula engine CLI.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers. Exit codes: 0 success, 1 error,
//! 2 request blocked by guardrails or invalid parameters.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("numform=debug,numform_engine=debug,numform_config=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        // Commands that need no configuration.
        Some(Commands::Completion(ref args)) => commands::completion::run(args),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
        Some(ref command) => {
            RuntimeContext::from_global_args(&cli.global).and_then(|ctx| dispatch(&ctx, command))
        }
    };

    if let Err(e) = result {
        if e.downcast_ref::<commands::Blocked>().is_some() {
            std::process::exit(2);
        }
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn dispatch(ctx: &RuntimeContext, command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate(args) => commands::generate::run(ctx, args),
        Commands::Run(args) => commands::run::run(ctx, args),
        Commands::Estimate(args) => commands::estimate::run(ctx, args),
        Commands::Caps(args) => commands::caps::run(ctx, args),
        Commands::Modules => commands::modules::run(ctx),
        Commands::Version => commands::version::run(ctx),
        Commands::Completion(args) => commands::completion::run(args),
    }
}
