use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use star_catcher::webgpu_guard::{webgpu_available, WEBGPU_REQUIRED};
use star_catcher::{primary_window, ConfigDiagnostics, GameConfig, GamePlugin};

#[derive(Parser, Debug, Default)]
#[command(name = "star_catcher", about = "Collect the stars, dodge the bombs")]
struct Args {
    /// Extra RON config layers, applied after the default ones.
    #[arg(long = "config", value_name = "PATH")]
    config: Vec<PathBuf>,
    /// Fixed RNG seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// Exit after this many seconds (0 disables).
    #[arg(long = "auto-close", value_name = "SECS")]
    auto_close: Option<f32>,
}

// ---------------- Config Loading ----------------

#[cfg(any(target_arch = "wasm32", feature = "embedded_config"))]
fn load_config(_extra: &[PathBuf]) -> (GameConfig, ConfigDiagnostics) {
    let (cfg, err) = GameConfig::embedded();
    let diag = ConfigDiagnostics {
        used: vec!["<embedded>".into()],
        errors: err.into_iter().collect(),
        warnings: Vec::new(),
    };
    (cfg, diag)
}

#[cfg(not(any(target_arch = "wasm32", feature = "embedded_config")))]
fn load_config(extra: &[PathBuf]) -> (GameConfig, ConfigDiagnostics) {
    use star_catcher::core::config::DEFAULT_CONFIG_PATHS;

    let layers = DEFAULT_CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .chain(extra.iter().cloned());
    let (cfg, used, mut errors) = GameConfig::load_layered(layers);
    // The local override layer is optional.
    errors.retain(|e| !(e.contains(DEFAULT_CONFIG_PATHS[1]) && e.contains("read error")));
    let diag = ConfigDiagnostics {
        used,
        errors,
        warnings: Vec::new(),
    };
    (cfg, diag)
}

// ---------------- Main ----------------

fn main() -> anyhow::Result<()> {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
    }
    if !webgpu_available() {
        anyhow::bail!(WEBGPU_REQUIRED);
    }

    #[cfg(target_arch = "wasm32")]
    let args = Args::default();
    #[cfg(not(target_arch = "wasm32"))]
    let args = Args::parse();

    let (mut cfg, mut diag) = load_config(&args.config);
    if let Some(seed) = args.seed {
        cfg.rng_seed = Some(seed);
    }
    if let Some(secs) = args.auto_close {
        cfg.window.auto_close = secs;
    }
    diag.warnings = cfg.validate();

    let window = primary_window(&cfg.window);

    let mut app = App::new();
    app.insert_resource(cfg)
        .insert_resource(diag)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..default()
        }))
        .add_plugins(GamePlugin);
    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("app exited with code {code}"),
    }
}
