use bevy::prelude::*;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use cardview3d::card3d::{
    CardSession, CardViewerPlugin, CharacterCatalog, CharacterId, FlipPolicy, ViewerSettings,
};

/// Card Viewer - interactive 3D trading card viewer
#[derive(Parser)]
#[command(name = "cardview3d")]
#[command(
    author,
    version,
    about = "Card Viewer - pick a character and turn their card over in 3D"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a viewer settings JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Open this character's card straight away (e.g. "Bitter_Reprisalv2.jpg")
    #[arg(long)]
    character: Option<String>,

    /// How a flip is detected: "threshold" or "double-click"
    #[arg(long, value_parser = parse_flip_policy)]
    flip_policy: Option<FlipPolicy>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the characters in the bundled catalog
    Characters,

    /// Print the default viewer settings as JSON
    DefaultConfig,
}

fn parse_flip_policy(s: &str) -> Result<FlipPolicy, String> {
    FlipPolicy::parse(s).ok_or_else(|| {
        format!(
            "unknown flip policy '{}' (expected 'threshold' or 'double-click')",
            s
        )
    })
}

fn main() {
    let cli = Cli::parse();

    let catalog = match CharacterCatalog::bundled() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!(
                "{} Failed to read the character catalog: {}",
                "Error:".red().bold(),
                e
            );
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Characters) => print_characters(&catalog),
        Some(Commands::DefaultConfig) => print_default_config(),
        None => run_viewer(&cli, catalog),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn print_characters(catalog: &CharacterCatalog) {
    println!("{}", "Characters".cyan().bold());
    for entry in &catalog.characters {
        println!(
            "  {} {}",
            entry.name.bold(),
            format!("({})", entry.id).dimmed()
        );
        println!("      front: {}", entry.front);
    }
    println!("{} {}", "Card back:".cyan(), catalog.card_back);
}

fn print_default_config() {
    match ViewerSettings::default().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

// ============================================================================
// Viewer
// ============================================================================

/// Settings from `--config`, falling back to defaults when the file is
/// missing or invalid, with `--flip-policy` applied on top.
fn load_settings(cli: &Cli) -> ViewerSettings {
    let mut settings = match &cli.config {
        Some(path) => ViewerSettings::load_from_file(path).unwrap_or_else(|e| {
            eprintln!(
                "{} Could not load settings from '{}': {}. Using defaults.",
                "Warning:".yellow().bold(),
                path.display(),
                e
            );
            ViewerSettings::default()
        }),
        None => ViewerSettings::default(),
    };

    if let Some(policy) = cli.flip_policy {
        settings.interaction.flip_policy = policy;
    }
    settings
}

fn initial_session(cli: &Cli, catalog: &CharacterCatalog) -> CardSession {
    let Some(character) = &cli.character else {
        return CardSession::default();
    };

    let id = CharacterId::new(character.as_str());
    if catalog.contains(&id) {
        CardSession::with_selection(id)
    } else {
        eprintln!(
            "{} Unknown character '{}'; run `cardview3d characters` for the list",
            "Warning:".yellow().bold(),
            character
        );
        CardSession::default()
    }
}

fn run_viewer(cli: &Cli, catalog: CharacterCatalog) {
    let settings = load_settings(cli);
    let session = initial_session(cli, &catalog);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Card Viewer".to_string(),
                        resolution: (1280u32, 720u32).into(),
                        // Web builds draw into the page's canvas
                        canvas: Some("#card-canvas".to_string()),
                        fit_canvas_to_parent: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "info,wgpu=error,naga=warn".to_string(),
                    ..default()
                }),
        )
        .insert_resource(settings)
        .insert_resource(catalog)
        .insert_resource(session)
        .add_plugins(CardViewerPlugin)
        .run();
}
