//! Grid-world text RPG
//!
//! Main entry point for the game.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rpg_cli::{App, Console, Theme};
use rpg_core::player::ClassKind;
use rpg_core::world::GameOptions;
use rpg_save::default_save_dir;

const CONFIG_FILE: &str = "textrpgrc";

/// Melon Man's Text RPG
#[derive(Parser, Debug)]
#[command(name = "textrpg")]
#[command(author, version, about = "A text RPG on a grid of zones", long_about = None)]
struct Args {
    /// Player name
    #[arg(short = 'u', long = "name")]
    name: Option<String>,

    /// Class (warrior, mage, rogue)
    #[arg(short = 'c', long = "class")]
    class: Option<ClassKind>,

    /// World seed
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Options file (default: <config dir>/textrpg/textrpgrc)
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Grid width in zones
    #[arg(long = "width")]
    width: Option<u8>,

    /// Grid height in zones
    #[arg(long = "height")]
    height: Option<u8>,

    /// Directory for save slots
    #[arg(long = "save-dir")]
    save_dir: Option<PathBuf>,

    /// Write the effective options to the options file and exit
    #[arg(long = "write-config")]
    write_config: bool,

    /// Print text instantly
    #[arg(long = "no-typewriter")]
    no_typewriter: bool,

    /// Debug logging to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("textrpg").join(CONFIG_FILE))
}

/// Options from the explicit file, else the default one if it exists
fn load_options(explicit: Option<&Path>) -> Result<GameOptions> {
    if let Some(path) = explicit {
        return GameOptions::load_from_file(path)
            .with_context(|| format!("reading options from {}", path.display()));
    }
    match default_config_path() {
        Some(path) if path.exists() => GameOptions::load_from_file(&path)
            .with_context(|| format!("reading options from {}", path.display())),
        _ => Ok(GameOptions::default()),
    }
}

fn apply_args(options: &mut GameOptions, args: &Args) {
    if let Some(name) = &args.name {
        options.name = name.clone();
    }
    if args.class.is_some() {
        options.class = args.class;
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    if let Some(width) = args.width {
        options.grid_width = width;
    }
    if let Some(height) = args.height {
        options.grid_height = height;
    }
    if let Some(dir) = &args.save_dir {
        options.save_dir = Some(dir.display().to_string());
    }
    if args.no_typewriter {
        options.typewriter = false;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // --write-config may name a file that does not exist yet
    let fresh = args.write_config && args.config.as_deref().is_some_and(|p| !p.exists());
    let mut options = if fresh {
        GameOptions::default()
    } else {
        load_options(args.config.as_deref())?
    };
    apply_args(&mut options, &args);

    if args.write_config {
        let Some(path) = args.config.clone().or_else(default_config_path) else {
            anyhow::bail!("no config directory; pass --config");
        };
        options
            .save_to_file(&path)
            .with_context(|| format!("writing options to {}", path.display()))?;
        println!("Options written to {}", path.display());
        return Ok(());
    }

    let save_dir = options
        .save_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(default_save_dir);
    tracing::debug!(?options, save_dir = %save_dir.display(), "starting");

    let stdout = io::stdout();
    let interactive = stdout.is_terminal();
    let theme = if interactive { Theme::detect() } else { Theme::plain() };
    let console = Console::new(io::stdin().lock(), stdout.lock(), theme)
        .with_typewriter(options.typewriter && interactive, options.text_delay)
        .with_clear_screen(interactive);

    let mut app = App::new(console, options, save_dir);
    app.run()
}
