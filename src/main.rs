//! Glade: a top-down tile action game
//!
//! The player explores a scrolling tile map, bumps into trees and rocks,
//! swings one of five weapons and casts two spells. Everything under
//! `game/` is pure simulation; this file wires it to the window.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod asset;
mod config;
mod game;
mod input;
mod ui;
mod world;

use std::fmt;
use macroquad::prelude::*;
use asset::{AssetError, GameSprites, ImageBank};
use config::{ConfigError, GameSettings};
use game::{Camera, FpsLimit, FrameClock, Level, Renderer};
use input::InputState;
use ui::Hud;
use world::{standard_layers, LayerError};

/// Anything that stops the game from starting
#[derive(Debug)]
enum StartupError {
    Config(ConfigError),
    Asset(AssetError),
    Layer(LayerError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "[config] {}", e),
            StartupError::Asset(e) => write!(f, "[assets] {}", e),
            StartupError::Layer(e) => write!(f, "[map] {}", e),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<ConfigError> for StartupError {
    fn from(e: ConfigError) -> Self {
        StartupError::Config(e)
    }
}

impl From<AssetError> for StartupError {
    fn from(e: AssetError) -> Self {
        StartupError::Asset(e)
    }
}

impl From<LayerError> for StartupError {
    fn from(e: LayerError) -> Self {
        StartupError::Layer(e)
    }
}

/// Load every image and map layer and build the level
fn load_level(settings: &GameSettings) -> Result<(Level, ImageBank), StartupError> {
    let mut bank = ImageBank::new();
    let sprites = GameSprites::load(&mut bank, &settings.graphics_dir())?;
    let layers = standard_layers(&settings.map_dir(), &sprites)?;

    let camera = Camera::new(settings.window_width as f32, settings.window_height as f32);
    let spawn = Vec2::new(settings.player_spawn.0, settings.player_spawn.1);
    let mut level = Level::new(sprites, camera, spawn, settings.rng_seed);
    level.create_map(&layers)?;
    Ok((level, bank))
}

fn window_conf(settings: &GameSettings) -> Conf {
    Conf {
        window_title: settings.window_title.clone(),
        window_width: settings.window_width,
        window_height: settings.window_height,
        window_resizable: false,
        ..Default::default()
    }
}

fn fatal(e: StartupError) -> ! {
    eprintln!("{}", e);
    std::process::exit(1);
}

fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let settings = GameSettings::load().unwrap_or_else(|e| fatal(e.into()));

    if std::env::args().skip(1).any(|arg| arg == "--check-assets") {
        check_assets(&settings);
        return;
    }

    macroquad::Window::from_config(window_conf(&settings), run(settings));
}

/// Load everything, report, exit. Used by `cargo xtask check-assets`.
fn check_assets(settings: &GameSettings) {
    let (level, bank) = load_level(settings).unwrap_or_else(|e| fatal(e));
    println!(
        "[check] ok: {} images, {} entities, {} obstacles",
        bank.len(),
        level.world().len(),
        level.world().obstacles().count()
    );
}

async fn run(settings: GameSettings) {
    println!("=== Glade v{} ===", VERSION);

    let (mut level, bank) = load_level(&settings).unwrap_or_else(|e| fatal(e));
    let mut renderer = Renderer::new(bank);

    let font_path = settings.graphics_dir().join(ui::FONT_PATH);
    let font = match load_ttf_font(&font_path.to_string_lossy()).await {
        Ok(font) => {
            println!("[ui] loaded font {}", font_path.display());
            Some(font)
        }
        Err(e) => {
            println!("[ui] failed to load font: {}, using default", e);
            None
        }
    };
    let hud = Hud::new(font);

    let mut input = InputState::new();
    if input.has_gamepad() {
        println!("[input] gamepad connected");
    }

    let limit = FpsLimit::from_fps(settings.fps);
    println!("[runtime] fps limit: {}", limit.label());
    let mut clock = FrameClock::new();

    loop {
        let frame_start = get_time();
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        input.poll();
        let calls = level.run(clock.now_ms(), &input.held());

        clear_background(BLACK);
        renderer.draw(&calls);
        if let Some(combat) = level.player_combat() {
            hud.draw(&mut renderer, level.sprites(), combat);
        }

        limit.wait(frame_start);
        next_frame().await;
    }
}
