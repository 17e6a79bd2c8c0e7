//! Gunathon CLI - weapon unlock progress tracker.

mod app;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gunathon_overlay::{HotkeyAction, KeyChord};
use gunathon_storage::FileStorage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::app::{milestone_lines, App, SessionReply};

#[derive(Parser)]
#[command(name = "gunathon")]
#[command(about = "Hunt: Showdown gunathon progress tracker", long_about = None)]
struct Cli {
    /// Directory holding items.csv and preferences.toml
    #[arg(long, global = true, env = "GUNATHON_DIR", default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show kills and the active weapon
    Status {
        /// Print a JSON progress snapshot
        #[arg(long)]
        json: bool,
    },
    /// Add (or remove) kills
    Adjust {
        /// Kills to add; negative to subtract
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Add one kill
    Inc,
    /// Remove one kill
    Dec,
    /// Restart the gunathon from the first weapon
    Reset,
    /// Append a weapon to the sequence
    Add {
        /// Weapon name
        #[arg(value_parser = clap::builder::NonEmptyStringValueParser::new())]
        name: String,
        /// First kill count of the range
        #[arg(long, allow_negative_numbers = true)]
        start: i64,
        /// Kill count where the range ends (exclusive)
        #[arg(long, allow_negative_numbers = true)]
        end: i64,
    },
    /// List every weapon with its range and status
    List,
    /// Export the weapon list to a file
    Export {
        /// Destination file
        path: PathBuf,
    },
    /// Replace the weapon list with one read from a file
    Import {
        /// Source file
        path: PathBuf,
    },
    /// Render the overlay
    Overlay {
        /// Print the frame as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change display preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsCommand,
    },
    /// Show or change hotkeys
    Keybinds {
        #[command(subcommand)]
        action: KeybindsCommand,
    },
    /// Toggle compact mode
    Compact,
    /// Trigger the action bound to a key chord
    Press {
        /// Key chord, e.g. `<Up>` or `ctrl+o`
        chord: String,
    },
    /// Interactive session: one chord or command per line
    Session,
}

#[derive(Subcommand)]
enum PrefsCommand {
    /// Print every preference
    Show,
    /// Set one preference
    Set {
        /// Preference key
        key: String,
        /// New value
        value: String,
    },
}

#[derive(Subcommand)]
enum KeybindsCommand {
    /// Print the hotkey table
    Show,
    /// Bind a chord to an action (increase, decrease, toggle-overlay)
    Set {
        /// Action name
        action: String,
        /// Key chord
        chord: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Open storage
    let storage = FileStorage::new(&cli.data_dir)
        .await
        .with_context(|| format!("Failed to open data directory {}", cli.data_dir.display()))?;
    debug!(path = %storage.root().display(), "storage opened");
    let mut app = App::open(storage).await?;

    match cli.command {
        Commands::Status { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&app.tracker().snapshot())?);
            } else {
                print_lines(app.status());
            }
            return Ok(());
        }
        Commands::Adjust { delta } => {
            app.tracker_mut().adjust(delta);
            print_lines(app.status());
        }
        Commands::Inc => {
            app.tracker_mut().adjust(1);
            print_lines(app.status());
        }
        Commands::Dec => {
            app.tracker_mut().adjust(-1);
            print_lines(app.status());
        }
        Commands::Reset => {
            app.tracker_mut().reset();
            print_lines(app.status());
        }
        Commands::Add { name, start, end } => {
            let added = app
                .tracker_mut()
                .add_milestone(name, start, end)
                .context("Invalid input")?;
            println!("Added weapon: {} (Range: {}-{})", added.name, added.range_start, added.range_end);
        }
        Commands::List => {
            println!("Weapons ({})", app.tracker().len());
            print_lines(milestone_lines(app.tracker()));
            return Ok(());
        }
        Commands::Export { path } => {
            app.storage()
                .export_state(&app.tracker().state(), &path)
                .await
                .with_context(|| format!("Failed to export weapons list to {}", path.display()))?;
            println!("Weapons list exported to {}", path.display());
            return Ok(());
        }
        Commands::Import { path } => {
            let state = app
                .storage()
                .import_state(&path)
                .await
                .with_context(|| format!("Failed to import weapons list from {}", path.display()))?;
            app.replace_state(state);
            println!("Weapons list imported ({} weapons)", app.tracker().len());
            print_lines(app.status());
        }
        Commands::Overlay { json } => {
            if json {
                // `null` while the overlay is hidden.
                let frame = app.overlay().render(app.tracker(), app.prefs());
                println!("{}", serde_json::to_string_pretty(&frame)?);
            } else {
                print_lines(app.overlay_lines());
            }
            return Ok(());
        }
        Commands::Prefs { action } => match action {
            PrefsCommand::Show => {
                for (key, value) in app.prefs().entries() {
                    println!("{key} = {value}");
                }
                return Ok(());
            }
            PrefsCommand::Set { key, value } => {
                app.set_preference(&key, &value)?;
                println!("{key} = {value}");
            }
        },
        Commands::Keybinds { action } => match action {
            KeybindsCommand::Show => {
                for action in HotkeyAction::ALL {
                    let chord = app
                        .hotkeys()
                        .chord_for(action)
                        .map_or_else(|| "(unbound)".to_string(), ToString::to_string);
                    println!("{:<16} {}", action.pref_key(), chord);
                }
                return Ok(());
            }
            KeybindsCommand::Set { action, chord } => {
                let action: HotkeyAction = action.parse()?;
                app.set_keybind(action, &chord)?;
                println!("{} = {}", action.pref_key(), chord.trim());
            }
        },
        Commands::Compact => {
            let compact = app.toggle_compact();
            println!("Compact mode {}", if compact { "on" } else { "off" });
            print_lines(app.status());
        }
        Commands::Press { chord } => {
            let chord = KeyChord::parse(&chord)?;
            match app.press(&chord) {
                Some(HotkeyAction::ToggleOverlay) => print_lines(app.overlay_lines()),
                Some(_) => print_lines(app.status()),
                None => println!("No action bound to {chord}"),
            }
        }
        Commands::Session => run_session(&mut app).await?,
    }

    app.save().await?;
    info!("state saved");
    Ok(())
}

/// Read lines from stdin until `quit` or end of input.
async fn run_session(app: &mut App<FileStorage>) -> Result<()> {
    print_lines(app.status());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match app.handle_line(&line) {
            SessionReply::Output(output) => print_lines(output),
            SessionReply::Quit => break,
        }
    }

    info!(counter = app.tracker().counter(), "session ended");
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
