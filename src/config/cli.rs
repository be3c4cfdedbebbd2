use crate::config::ReplayConfig;
use crate::domain::model::{InputFormat, OutputFormat};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "health-scan")]
#[command(about = "Normalize vision-model food health analyses")]
pub struct Cli {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Normalize a single response read from a file or stdin
    Normalize(NormalizeArgs),
    /// Normalize every captured response in a directory
    Replay(ReplayArgs),
    /// Run a replay described by a TOML config file
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
pub struct NormalizeArgs {
    /// Response file; reads stdin when omitted or "-"
    pub file: Option<String>,

    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    #[arg(long, help = "Pretty-print the analysis")]
    pub pretty: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    #[arg(long, default_value = "./captures")]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output: String,

    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [OutputFormat::Json, OutputFormat::Csv])]
    pub formats: Vec<OutputFormat>,

    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    #[arg(long)]
    pub max_records: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "health-scan.toml")]
    pub config: String,

    /// Show what would be processed without writing reports
    #[arg(long)]
    pub dry_run: bool,
}

impl From<ReplayArgs> for ReplayConfig {
    fn from(args: ReplayArgs) -> Self {
        Self {
            input_path: args.input,
            output_path: args.output,
            input_format: args.format,
            output_formats: args.formats,
            max_records: args.max_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalize_from_stdin() {
        let cli = Cli::try_parse_from(["health-scan", "normalize", "--format", "raw"]).unwrap();
        match cli.command {
            Command::Normalize(args) => {
                assert_eq!(args.file, None);
                assert_eq!(args.format, InputFormat::Raw);
                assert!(!args.pretty);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_replay_into_config() {
        let cli = Cli::try_parse_from([
            "health-scan",
            "--verbose",
            "replay",
            "--input",
            "frames",
            "--formats",
            "csv",
            "--max-records",
            "3",
        ])
        .unwrap();
        assert!(cli.verbose);

        let Command::Replay(args) = cli.command else {
            panic!("expected replay command");
        };
        let config = ReplayConfig::from(args);
        assert_eq!(config.input_path, "frames");
        assert_eq!(config.output_path, "./output");
        assert_eq!(config.output_formats, vec![OutputFormat::Csv]);
        assert_eq!(config.max_records, Some(3));
    }

    #[test]
    fn test_replay_defaults_to_both_formats() {
        let cli = Cli::try_parse_from(["health-scan", "replay"]).unwrap();
        let Command::Replay(args) = cli.command else {
            panic!("expected replay command");
        };
        assert_eq!(args.formats, vec![OutputFormat::Json, OutputFormat::Csv]);
        assert_eq!(cli.log_format, LogFormat::Compact);
    }
}
