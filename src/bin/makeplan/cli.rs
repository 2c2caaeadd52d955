//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use makeplan::util::shell::ColorChoice;

/// makeplan - Compile declarative build plans into Makefiles
#[derive(Parser)]
#[command(name = "makeplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<ColorChoice>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a plan file and write the Makefile
    Generate(GenerateArgs),

    /// List the rules a plan step can use
    Rules(RulesArgs),

    /// Create a starter makeplan.toml
    Init(InitArgs),
}

/// Format of status messages.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageFormat {
    #[default]
    Human,
    Json,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Plan file to read (default: makeplan.toml)
    #[arg(long, value_name = "PATH")]
    pub plan: Option<PathBuf>,

    /// Output file (default: the plan's [output] path)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the result to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Write the build plan as JSON instead of a Makefile
    #[arg(long)]
    pub json: bool,

    /// Format of status messages
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,
}

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create the plan in (default: current directory)
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_defaults() {
        let cli = Cli::parse_from(["makeplan", "generate"]);
        match cli.command {
            Commands::Generate(args) => {
                assert!(args.plan.is_none());
                assert!(args.output.is_none());
                assert!(!args.stdout);
                assert!(!args.json);
                assert_eq!(args.message_format, MessageFormat::Human);
            }
            _ => panic!("expected generate"),
        }
        assert!(!cli.global.verbose);
        assert!(cli.global.color.is_none());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["makeplan", "rules", "--json", "-v", "--color", "never"]);
        assert!(cli.global.verbose);
        assert_eq!(cli.global.color, Some(ColorChoice::Never));
        assert!(matches!(cli.command, Commands::Rules(RulesArgs { json: true })));
    }

    #[test]
    fn test_stdout_conflicts_with_output() {
        let result =
            Cli::try_parse_from(["makeplan", "generate", "--stdout", "--output", "x.mk"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["makeplan", "init", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_invalid_color() {
        assert!(Cli::try_parse_from(["makeplan", "rules", "--color", "sometimes"]).is_err());
    }
}
