use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Import dispatcher documents into JSON.
///
/// Reads a Word or spreadsheet file and prints the rebuilt schedule or unit
/// report. Skipped lines and rows are listed on stderr.
#[derive(Debug, Parser)]
#[command(author, version, bin_name = "guardia")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write the JSON to this file instead of stdout.
    #[arg(long, short = 'o', global = true)]
    pub output: Option<PathBuf>,

    /// Print single-line JSON regardless of the config.
    #[arg(long, global = true, default_value_t = false)]
    pub compact: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import a duty schedule (.docx, .xlsx, .xls, .ods).
    Schedule {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Import one station's unit-status sheet (.xlsx, .xls, .ods).
    Units {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Command {
    pub fn file(&self) -> &Path {
        match self {
            Command::Schedule { file } | Command::Units { file } => file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schedule_command() {
        let cli = Cli::try_parse_from(["guardia", "schedule", "guardia.docx", "--compact"]).unwrap();
        assert!(cli.compact);
        assert!(cli.output.is_none());
        assert!(matches!(cli.command, Command::Schedule { .. }));
        assert_eq!(cli.command.file(), Path::new("guardia.docx"));
    }

    #[test]
    fn test_parse_units_command_with_output() {
        let cli = Cli::try_parse_from(["guardia", "--output", "out.json", "units", "estado.xlsx"]).unwrap();
        assert_eq!(cli.output.as_deref(), Some(Path::new("out.json")));
        assert!(!cli.compact);
        assert!(matches!(cli.command, Command::Units { .. }));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        assert!(Cli::try_parse_from(["guardia", "schedule"]).is_err());
        assert!(Cli::try_parse_from(["guardia"]).is_err());
    }
}
