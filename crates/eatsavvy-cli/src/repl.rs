//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The REPL holds one [`DirectorySession`] for its lifetime, so the query,
//! the selection and the loaded records carry over between commands.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::commands::{self, hours::render_hours, parse_ids, render_listing};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use eatsavvy_domain::RestaurantId;
use eatsavvy_sdk::{DirectoryService, DirectorySession, LocalInstant};
use eatsavvy_store::SelectAllOutcome;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

/// Run the interactive REPL.
pub async fn run_repl<S: DirectoryService>(
    session: &mut DirectorySession<S>,
    config: &mut Config,
    utc_offset_minutes: i32,
    formatter: &Formatter,
) -> Result<()> {
    println!("{}", formatter.info("EatSavvy REPL - Type 'help' for commands, 'exit' to quit"));

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to initialize editor: {}", e),
        ))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    match execute_repl_command(ReplCommand::Reload, session, config, utc_offset_minutes, formatter).await {
        Ok(output) => println!("{}", output),
        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
    }
    println!();

    loop {
        let selected = session.store().selection().len();
        let prompt = if selected > 0 {
            format!("eatsavvy ({} selected)> ", selected)
        } else {
            "eatsavvy> ".to_string()
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        match execute_repl_command(cmd, session, config, utc_offset_minutes, formatter).await {
                            Ok(output) => println!("{}", output),
                            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
pub enum ReplCommand {
    /// Leave the REPL
    Exit,
    /// Print the command list
    Help,
    /// Set the local filter text
    Filter(String),
    /// Server-side search; blank reloads everything
    Search(String),
    /// Fetch the full list
    Reload,
    /// Add ids to the selection
    Select(Vec<RestaurantId>),
    /// Remove ids from the selection
    Deselect(Vec<RestaurantId>),
    /// Flip one id
    Toggle(RestaurantId),
    /// Select-all checkbox
    All,
    /// Enrich the selection
    Enrich,
    /// Show the listing, or one record in detail
    Show(Option<RestaurantId>),
    /// Show one record's hours
    Hours(RestaurantId),
    /// Inspect profiles
    Profile(ProfileArgs),
}

/// Parse a REPL command line.
pub fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let Some((&head, args)) = parts.split_first() else {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    };

    match head {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "filter" | "f" => Ok(ReplCommand::Filter(args.join(" "))),
        "search" | "s" => Ok(ReplCommand::Search(args.join(" "))),
        "reload" | "r" => Ok(ReplCommand::Reload),
        "select" => Ok(ReplCommand::Select(required_ids(args, "select <id> [id2] ...")?)),
        "deselect" => Ok(ReplCommand::Deselect(required_ids(args, "deselect <id> [id2] ...")?)),
        "toggle" | "t" => match args {
            [id] => Ok(ReplCommand::Toggle(single_id(id)?)),
            _ => Err(CliError::InvalidInput("Usage: toggle <id>".to_string())),
        },
        "all" | "a" => Ok(ReplCommand::All),
        "enrich" | "e" => Ok(ReplCommand::Enrich),
        "show" | "ls" => match args {
            [] => Ok(ReplCommand::Show(None)),
            [id] => Ok(ReplCommand::Show(Some(single_id(id)?))),
            _ => Err(CliError::InvalidInput("Usage: show [id]".to_string())),
        },
        "hours" | "h" => match args {
            [id] => Ok(ReplCommand::Hours(single_id(id)?)),
            _ => Err(CliError::InvalidInput("Usage: hours <id>".to_string())),
        },
        "profile" => parse_profile_command(args),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            head
        ))),
    }
}

/// Execute a REPL command against the session.
pub async fn execute_repl_command<S: DirectoryService>(
    cmd: ReplCommand,
    session: &mut DirectorySession<S>,
    config: &mut Config,
    utc_offset_minutes: i32,
    formatter: &Formatter,
) -> Result<String> {
    debug!(?cmd, "Executing REPL command");

    match cmd {
        ReplCommand::Exit | ReplCommand::Help => Ok(String::new()),
        ReplCommand::Filter(text) => {
            session.store_mut().set_query(text);
            render_listing(session.store_mut(), utc_offset_minutes, formatter)
        }
        ReplCommand::Search(text) => {
            session.submit_search(&text).await?;
            render_listing(session.store_mut(), utc_offset_minutes, formatter)
        }
        ReplCommand::Reload => {
            session.reload().await?;
            render_listing(session.store_mut(), utc_offset_minutes, formatter)
        }
        ReplCommand::Select(ids) => {
            let store = session.store_mut();
            for id in ids {
                store.select(id);
            }
            Ok(formatter.summary(&store.summary()))
        }
        ReplCommand::Deselect(ids) => {
            let store = session.store_mut();
            for id in &ids {
                store.deselect(id);
            }
            Ok(formatter.summary(&store.summary()))
        }
        ReplCommand::Toggle(id) => {
            let now_selected = session.store_mut().toggle_select(id.clone());
            let verb = if now_selected { "Selected" } else { "Deselected" };
            Ok(formatter.success(&format!("{} {}", verb, id)))
        }
        ReplCommand::All => {
            let outcome = session.store_mut().select_all_visible();
            let summary = formatter.summary(&session.store().summary());
            Ok(match outcome {
                SelectAllOutcome::Cleared => format!("{}\n{}", formatter.info("Selection cleared"), summary),
                SelectAllOutcome::SelectedVisible => {
                    format!("{}\n{}", formatter.success("Selected all visible"), summary)
                }
                SelectAllOutcome::Unchanged => formatter.warning("Nothing visible to select"),
            })
        }
        ReplCommand::Enrich => match session.enrich_selected().await? {
            Some(report) => Ok(formatter.merge_report(&report)),
            None => Ok(formatter.warning("Nothing selected to enrich")),
        },
        ReplCommand::Show(None) => render_listing(session.store_mut(), utc_offset_minutes, formatter),
        ReplCommand::Show(Some(id)) => {
            let record = session
                .store()
                .get(&id)
                .ok_or_else(|| CliError::NotLoaded(id.to_string()))?;
            formatter.format_detail(record)
        }
        ReplCommand::Hours(id) => render_hours(
            session,
            &id,
            utc_offset_minutes,
            LocalInstant::now(utc_offset_minutes),
            formatter,
        ),
        ReplCommand::Profile(args) => commands::execute_profile(args, config, formatter),
    }
}

fn single_id(raw: &str) -> Result<RestaurantId> {
    RestaurantId::new(raw).map_err(CliError::InvalidInput)
}

fn required_ids(args: &[&str], usage: &str) -> Result<Vec<RestaurantId>> {
    if args.is_empty() {
        return Err(CliError::InvalidInput(format!("Usage: {}", usage)));
    }
    parse_ids(args.iter().copied())
}

fn parse_profile_command(args: &[&str]) -> Result<ReplCommand> {
    let action = match args {
        [] | ["show"] => ProfileAction::Show,
        ["list"] => ProfileAction::List,
        [other, ..] => {
            return Err(CliError::InvalidInput(format!(
                "Unknown profile action: {}. Profiles are switched outside the REPL.",
                other
            )))
        }
    };

    Ok(ReplCommand::Profile(ProfileArgs { action }))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::home_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  filter [text]          - Narrow the list locally (name, phone, address)");
    println!("  search [text]          - Search the directory; blank reloads everything");
    println!("  reload                 - Fetch the full list again");
    println!("  select <id> [id2] ...  - Add restaurants to the selection");
    println!("  deselect <id> [id2]    - Remove restaurants from the selection");
    println!("  toggle <id>            - Flip one restaurant's selection");
    println!("  all                    - Select every visible restaurant, or clear");
    println!("  enrich                 - Enrich the selected restaurants");
    println!("  show [id]              - Show the list, or one restaurant in detail");
    println!("  hours <id>             - Opening hours in local time");
    println!("  profile [list|show]    - Inspect profiles");
    println!("  help, ?                - Show this help");
    println!("  exit, quit, q          - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RestaurantId {
        RestaurantId::new(s).unwrap()
    }

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_repl_command("exit").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_repl_command("all").unwrap(), ReplCommand::All);
        assert_eq!(parse_repl_command("enrich").unwrap(), ReplCommand::Enrich);
        assert_eq!(parse_repl_command("show").unwrap(), ReplCommand::Show(None));
    }

    #[test]
    fn test_parse_text_arguments() {
        assert_eq!(
            parse_repl_command("filter golden  wok").unwrap(),
            ReplCommand::Filter("golden wok".to_string())
        );
        assert_eq!(parse_repl_command("search").unwrap(), ReplCommand::Search(String::new()));
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(
            parse_repl_command("select 5 9").unwrap(),
            ReplCommand::Select(vec![id("5"), id("9")])
        );
        assert_eq!(parse_repl_command("toggle 5").unwrap(), ReplCommand::Toggle(id("5")));
        assert_eq!(parse_repl_command("hours 5").unwrap(), ReplCommand::Hours(id("5")));
    }

    #[test]
    fn test_parse_usage_errors() {
        assert!(parse_repl_command("select").is_err());
        assert!(parse_repl_command("toggle").is_err());
        assert!(parse_repl_command("toggle 1 2").is_err());
        assert!(parse_repl_command("hours").is_err());
        assert!(parse_repl_command("profile switch other").is_err());
        assert!(parse_repl_command("dance").is_err());
    }
}
