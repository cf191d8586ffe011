// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, io, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use lunacal_core::{APP_NAME, Calendar};
use tracing_subscriber::EnvFilter;

use crate::cmd_day::{CmdDay, CmdMonth};
use crate::cmd_event::{CmdEventDelete, CmdEventEdit, CmdEventList, CmdEventNew};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_remind::CmdRemind;
use crate::config::parse_config;

/// Run the lunacal command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    match Cli::parse() {
        Ok(cli) => {
            init_tracing(cli.verbose);
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Enable debug logging
    pub verbose: bool,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("A Chinese lunar calendar with holidays, solar terms and event reminders.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to today
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $LUNACAL_CONFIG, then \
$XDG_CONFIG_HOME/lunacal/config.toml on Linux and MacOS, %LOCALAPPDATA%/lunacal/config.toml on \
Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg!(-v --verbose "Enable debug logging, unless RUST_LOG is set"))
            .subcommand(CmdDay::command())
            .subcommand(CmdMonth::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage your events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventDelete::command())
                    .subcommand(CmdEventList::command()),
            )
            .subcommand(CmdRemind::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdDay::NAME, matches)) => Day(CmdDay::from(matches)),
            Some((CmdMonth::NAME, matches)) => Month(CmdMonth::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventNew::NAME, matches)) => EventNew(CmdEventNew::from(matches)),
                Some((CmdEventEdit::NAME, matches)) => EventEdit(CmdEventEdit::from(matches)),
                Some((CmdEventDelete::NAME, matches)) => {
                    EventDelete(CmdEventDelete::from(matches))
                }
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                _ => return Err("Unknown event command".into()),
            },
            Some((CmdRemind::NAME, matches)) => Remind(CmdRemind::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Day(CmdDay::default()),
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
        };

        let config = matches.get_one("config").cloned();
        let verbose = matches.get_flag("verbose");
        Ok(Cli {
            config,
            verbose,
            command,
        })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show a day
    Day(CmdDay),

    /// Show a month
    Month(CmdMonth),

    /// Add a new event
    EventNew(CmdEventNew),

    /// Edit an event
    EventEdit(CmdEventEdit),

    /// Delete events
    EventDelete(CmdEventDelete),

    /// List events
    EventList(CmdEventList),

    /// Show due reminders
    Remind(CmdRemind),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Day(a)         => Self::run_with(config, |x| a.run(x).boxed()).await,
            Month(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventNew(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventEdit(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventDelete(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventList(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            Remind(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut Calendar) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let mut calendar = Calendar::new(config).await?;

        f(&mut calendar).await?;

        calendar.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cmd_generate_completion::Shell, util::OutputFormat};
    use lunacal_core::LeadTime;

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(vec!["test", "-c", "/tmp/config.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(matches!(cli.command, Commands::Day(_)));
    }

    #[test]
    fn test_parse_default_today() {
        let cli = Cli::try_parse_from(vec!["test"]).unwrap();
        match cli.command {
            Commands::Day(cmd) => assert_eq!(cmd.date, None),
            _ => panic!("Expected Day command"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_verbose() {
        let cli = Cli::try_parse_from(vec!["test", "-v", "month"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Month(_)));
    }

    #[test]
    fn test_parse_day() {
        let cli = Cli::try_parse_from(vec!["test", "day", "tomorrow"]).unwrap();
        match cli.command {
            Commands::Day(cmd) => assert_eq!(cmd.date, Some("tomorrow".to_string())),
            _ => panic!("Expected Day command"),
        }
    }

    #[test]
    fn test_parse_month() {
        let cli = Cli::try_parse_from(vec!["test", "month", "2024-02"]).unwrap();
        match cli.command {
            Commands::Month(cmd) => assert_eq!(cmd.month, Some("2024-02".to_string())),
            _ => panic!("Expected Month command"),
        }
    }

    #[test]
    fn test_parse_event_new() {
        let args = vec!["test", "event", "add", "Temple fair", "--start", "14:00", "-r", "15"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::EventNew(cmd) => {
                assert_eq!(cmd.title, "Temple fair");
                assert_eq!(cmd.start, Some("14:00".to_string()));
                assert_eq!(cmd.reminder, Some(LeadTime::Before(15)));
            }
            _ => panic!("Expected EventNew command"),
        }
    }

    #[test]
    fn test_parse_event_edit() {
        let cli = Cli::try_parse_from(vec!["test", "e", "edit", "3", "-t", "Fair"]).unwrap();
        match cli.command {
            Commands::EventEdit(cmd) => {
                assert_eq!(cmd.id, 3);
                assert_eq!(cmd.title, Some("Fair".to_string()));
            }
            _ => panic!("Expected EventEdit command"),
        }
    }

    #[test]
    fn test_parse_event_delete() {
        let cli = Cli::try_parse_from(vec!["test", "event", "delete", "3", "4"]).unwrap();
        match cli.command {
            Commands::EventDelete(cmd) => assert_eq!(cmd.ids, vec![3, 4]),
            _ => panic!("Expected EventDelete command"),
        }
    }

    #[test]
    fn test_parse_event_list() {
        let args = vec!["test", "event", "list", "--output-format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::EventList(cmd) => assert_eq!(cmd.output_format, OutputFormat::Json),
            _ => panic!("Expected EventList command"),
        }
    }

    #[test]
    fn test_parse_event_requires_subcommand() {
        assert!(Cli::try_parse_from(vec!["test", "event"]).is_err());
    }

    #[test]
    fn test_parse_remind() {
        let cli = Cli::try_parse_from(vec!["test", "remind"]).unwrap();
        match cli.command {
            Commands::Remind(cmd) => assert!(!cmd.peek),
            _ => panic!("Expected Remind command"),
        }
    }

    #[test]
    fn test_parse_generate_completions() {
        let args = vec!["test", "generate-completion", "zsh"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::GenerateCompletion(cmd) => assert_eq!(cmd.shell, Shell::Zsh),
            _ => panic!("Expected GenerateCompletion command"),
        }
    }
}
