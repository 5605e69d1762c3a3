use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "essay")]
#[command(about = "Timed writing practice for exam-style essay tasks")]
#[command(long_about = "essay - timed writing practice

Pick a task type, set the question, start the countdown and write your
answer. Once you finish, the elapsed time and word count are recorded.

QUICK START:
  essay new --question \"Some people think...\"   Create a session
  essay start 1 --yes                           Start the countdown
  essay answer 1 --file draft.txt               Save your answer
  essay finish 1 --yes                          Lock the answer
  essay tui                                     Write in the terminal UI

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log debug details to stderr (or to essay.log in the TUI)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new writing session
    ///
    /// The session starts with the first task type of the catalog unless
    /// --task is given. The countdown does not run until `essay start`.
    ///
    /// # Examples
    ///
    ///   essay new
    ///   essay new --task 2 --question "Some people believe..."
    ///   essay new --task "IELTS Academic Task 1" --time 15m
    New(NewArgs),

    /// List sessions, newest first
    #[command(alias = "ls")]
    List,

    /// Show a session with its timer and word count
    Show {
        /// Session ID
        id: i64,
    },

    /// List the task types from the catalog
    Types,

    /// Set the question of a session that has not started
    Question(TextArgs),

    /// Change the task type of a session that has not started
    Task {
        /// Session ID
        id: i64,

        /// Task type position (1-based) or name
        task: String,
    },

    /// Start the countdown
    ///
    /// Locks the question and task type and opens the answer for writing.
    Start(ConfirmArgs),

    /// Replace the answer of a session in progress
    Answer(TextArgs),

    /// Finish a session, locking the answer
    Finish(ConfirmArgs),

    /// Delete a session permanently
    #[command(alias = "rm")]
    Delete(ConfirmArgs),

    /// Open the terminal UI
    Tui,

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct NewArgs {
    /// Task type position (1-based) or name
    #[arg(short, long)]
    pub task: Option<String>,

    /// Question text
    #[arg(short, long)]
    pub question: Option<String>,

    /// Override the allotted time (e.g. 15m, 1h, 45)
    #[arg(long, value_parser = parse_minutes_arg)]
    pub time: Option<u32>,

    /// Override the minimum word count
    #[arg(long)]
    pub words: Option<u32>,
}

#[derive(Args)]
pub struct TextArgs {
    /// Session ID
    pub id: i64,

    /// The text; use "-" to read from stdin
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConfirmArgs {
    /// Session ID
    pub id: i64,

    /// Confirm the step; nothing changes without it
    #[arg(short, long)]
    pub yes: bool,
}

fn parse_minutes_arg(s: &str) -> Result<u32, String> {
    crate::core::parse_minutes(s).ok_or_else(|| format!("invalid duration: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_new_defaults() {
        let cli = Cli::try_parse_from(["essay", "new"]).unwrap();
        if let Commands::New(args) = cli.command {
            assert!(args.task.is_none());
            assert!(args.question.is_none());
            assert!(args.time.is_none());
        } else {
            panic!("Expected New command");
        }
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_new_with_overrides() {
        let cli = Cli::try_parse_from([
            "essay", "new", "--task", "2", "--time", "1h", "--words", "300",
        ])
        .unwrap();
        if let Commands::New(args) = cli.command {
            assert_eq!(args.task.as_deref(), Some("2"));
            assert_eq!(args.time, Some(60));
            assert_eq!(args.words, Some(300));
        } else {
            panic!("Expected New command");
        }
    }

    #[test]
    fn test_cli_new_rejects_bad_time() {
        assert!(Cli::try_parse_from(["essay", "new", "--time", "soon"]).is_err());
    }

    #[test]
    fn test_cli_start_requires_id() {
        assert!(Cli::try_parse_from(["essay", "start"]).is_err());

        let cli = Cli::try_parse_from(["essay", "start", "3", "--yes"]).unwrap();
        if let Commands::Start(args) = cli.command {
            assert_eq!(args.id, 3);
            assert!(args.yes);
        } else {
            panic!("Expected Start command");
        }
    }

    #[test]
    fn test_cli_answer_text_or_file() {
        let cli = Cli::try_parse_from(["essay", "answer", "1", "one two"]).unwrap();
        if let Commands::Answer(args) = cli.command {
            assert_eq!(args.text.as_deref(), Some("one two"));
            assert!(args.file.is_none());
        } else {
            panic!("Expected Answer command");
        }

        assert!(Cli::try_parse_from(["essay", "answer", "1"]).is_err());
        assert!(Cli::try_parse_from(["essay", "answer", "1", "x", "--file", "a.txt"]).is_err());
    }

    #[test]
    fn test_cli_global_output() {
        let cli = Cli::try_parse_from(["essay", "list", "--output", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_cli_aliases() {
        assert!(matches!(
            Cli::try_parse_from(["essay", "ls"]).unwrap().command,
            Commands::List
        ));
        assert!(matches!(
            Cli::try_parse_from(["essay", "rm", "4"]).unwrap().command,
            Commands::Delete(_)
        ));
    }
}
