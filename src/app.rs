//! Glue shared by the bundled games: CLI flags, logging, terminal session.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use tdtbge_core::{World, WorldConfig};
use tdtbge_input::TerminalKeys;
use tdtbge_term::{TerminalAudio, TerminalRenderer};

/// Command-line flags understood by every bundled game.
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about = "Top-down text-based game engine demo")]
pub struct Cli {
    /// Print diagnostics under each frame and keep old frames on screen.
    #[arg(long)]
    pub debug: bool,

    /// Background music clip to loop.
    #[arg(long, value_name = "CLIP")]
    pub bgm: Option<String>,

    /// Never open the audio device.
    #[arg(long)]
    pub no_audio: bool,

    /// JSON file with a world configuration; flags override it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where log records go.
    #[arg(long, value_name = "PATH", default_value = "world.log")]
    pub log_file: PathBuf,
}

impl Cli {
    /// World configuration from `--config`, with flags applied on top.
    pub fn world_config(&self, default_bgm: Option<&str>) -> Result<WorldConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => WorldConfig::default(),
        };
        if self.debug {
            config.debug = true;
        }
        if let Some(bgm) = self.bgm.as_deref().or(default_bgm) {
            config.background_music = Some(bgm.to_string());
        }
        Ok(config)
    }
}

pub fn load_config(path: &Path) -> Result<WorldConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Send log records to `path` so they never interleave with frames.
pub fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

/// Attach terminal collaborators to `world` and run it until quit.
pub fn play(world: World, cli: &Cli) -> Result<()> {
    let debug = world.debug();
    let audio = if cli.no_audio {
        TerminalAudio::silent()
    } else {
        TerminalAudio::open()
    };

    let mut term = TerminalRenderer::new(debug);
    term.enter()?;

    let mut world = world
        .with_input(TerminalKeys::new())
        .with_output(TerminalRenderer::new(debug))
        .with_audio(audio);
    let result = world.run();

    // Always try to restore terminal state.
    let _ = term.exit();
    log::info!("world {} stopped after {} frames", world.title(), world.render_cycle());
    result.context("world loop failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from(["top-down", "--debug", "--bgm", "theme.wav"]);
        let config = cli.world_config(None).unwrap();
        assert!(config.debug);
        assert_eq!(config.background_music.as_deref(), Some("theme.wav"));
    }

    #[test]
    fn default_bgm_applies_without_flag() {
        let cli = Cli::parse_from(["top-down"]);
        let config = cli.world_config(Some("audio/adventure_theme.wav")).unwrap();
        assert!(!config.debug);
        assert_eq!(
            config.background_music.as_deref(),
            Some("audio/adventure_theme.wav")
        );
        assert_eq!(cli.log_file, PathBuf::from("world.log"));
    }
}
