mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::{thread_rng, Rng};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use gravity_runner::{
    Action, Column, GameConfig, GameError, HeadlessFactory, KeyMap, PlayDuration, Player,
    Projectile, SoundQueue, SoundSink, Tile, TileMap,
};

use crate::display::Frame;

// ── Input constants ───────────────────────────────────────────────────────────

/// A key counts as held if its last press/repeat event arrived within this
/// many frames. Terminals with keyboard enhancement report releases directly;
/// for the rest a key expires after this much silence.
const HOLD_WINDOW: u64 = 8;

const AMBIENT_SOUND: &str = "wind";

fn action_for(code: &KeyCode) -> Option<Action> {
    match code {
        KeyCode::Enter => Some(Action::FlipGravity),
        KeyCode::Char(' ') => Some(Action::Fire),
        KeyCode::Right => Some(Action::NextWeapon),
        KeyCode::Left => Some(Action::PreviousWeapon),
        _ => None,
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn log_path() -> PathBuf {
    std::env::var_os("GRAVITY_RUNNER_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("gravity_runner.log"))
}

/// Logs go to a file: the terminal is in raw mode on the alternate screen.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match File::create(log_path()) {
        Ok(file) => file,
        Err(_) => return, // no writable log location; run silent
    };
    let writer = Mutex::new(file);

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        error!(%info, ?backtrace, "panic");
    }));
}

// ── Collaborators ─────────────────────────────────────────────────────────────

/// Sprite sizes in world pixels for the stock assets.
fn sprite_factory() -> HeadlessFactory {
    HeadlessFactory::new(16.0, 16.0)
        .with_size("player.png", 32.0, 32.0)
        .with_size("playerBullet.png", 16.0, 4.0)
        .with_size("playerCannonball.png", 24.0, 24.0)
        .with_size("playerRocket.png", 32.0, 12.0)
}

/// No audio backend: played sounds are logged and shown in the HUD.
#[derive(Default)]
struct HudSink {
    last: Option<&'static str>,
}

impl SoundSink<&'static str> for HudSink {
    fn play(&mut self, sound: &&'static str, volume: f32, duration: PlayDuration) {
        debug!(sound = *sound, volume, ?duration, "play sound");
        if *sound != AMBIENT_SOUND {
            self.last = Some(*sound);
        }
    }
}

/// Fill every absent column from the left edge to one screen ahead with a
/// random floor and ceiling.
fn generate_columns(tile_map: &mut TileMap, rows: usize, rng: &mut impl Rng) {
    let visible = tile_map.visible_columns();
    let span = visible.end() - visible.start();
    for index in *visible.start()..=visible.end() + span {
        if tile_map.column(index).is_some() {
            continue;
        }
        let floor = rng.gen_range(0..=2usize);
        let ceiling = rng.gen_range(0..=2usize);
        let tiles = (0..rows)
            .map(|row| {
                if row < floor || row + ceiling >= rows {
                    Tile::Solid
                } else {
                    Tile::Empty
                }
            })
            .collect();
        tile_map.insert_column(index, Column::new(tiles));
    }
    tile_map.discard_passed_columns();
}

// ── Session ───────────────────────────────────────────────────────────────────

struct Session {
    player: Player<HeadlessFactory>,
    tile_map: TileMap,
    sounds: SoundQueue<&'static str>,
    sink: HudSink,
    rows: usize,
}

impl Session {
    fn new(config: &GameConfig) -> Result<Self, GameError> {
        let player = Player::from_config(sprite_factory(), config)?;
        let tile_map = TileMap::new(config.window, config.tile_map)?;
        let mut sounds = SoundQueue::new();
        sounds.add_sound_with(AMBIENT_SOUND, 0.0, 0.2, PlayDuration::UntilEnd, true);
        let rows = (config.window.height / config.tile_map.tile_size).ceil() as usize;
        Ok(Self {
            player,
            tile_map,
            sounds,
            sink: HudSink::default(),
            rows,
        })
    }

    fn step(&mut self, dt: f32, keys: &KeyMap, rng: &mut impl Rng) {
        let shots = self.player.shots_fired();
        let gravity = self.player.gravity();

        self.player.update(dt, keys);
        self.tile_map.update(dt);
        generate_columns(&mut self.tile_map, self.rows, rng);

        if self.player.shots_fired() > shots {
            // Name the weapon that fired; a same-frame switch runs after fire
            if let Some(weapon) = self.player.projectiles().last().and_then(Projectile::weapon) {
                self.sounds.add_sound(weapon.name(), 0.0, 1.0);
            }
        }
        if self.player.gravity() != gravity {
            // Whoosh lands a beat after the flip
            self.sounds.add_sound("flip", 0.1, 0.6);
        }
        self.sounds.update(dt, &mut self.sink);
    }

    fn shutdown(&mut self) {
        self.player.despawn();
        if let Err(err) = self.sounds.delete_sound(&AMBIENT_SOUND) {
            warn!(%err, "ambient sound already gone");
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → restart.
///
/// Input model: `key_frame` records the frame of the last press/repeat event
/// for every key. Each frame the still-fresh keys become the `KeyMap` the
/// player samples; the player's edge triggers turn held keys into one-shot
/// actions.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    frame_interval: Duration,
) -> io::Result<bool> {
    let mut rng = thread_rng();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => return Ok(false),
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        key_frame.retain(|_, last| frame.saturating_sub(*last) <= HOLD_WINDOW);
        let mut keys = KeyMap::new();
        for code in key_frame.keys() {
            if let Some(action) = action_for(code) {
                keys.press(action);
            }
        }

        let dt = last_tick.elapsed().as_secs_f32();
        last_tick = Instant::now();
        session.step(dt, &keys, &mut rng);

        let (width, height) = terminal::size()?;
        display::render(
            out,
            &Frame {
                player: &session.player,
                tile_map: &session.tile_map,
                last_sound: session.sink.last,
                width,
                height,
            },
        )?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_interval {
            thread::sleep(frame_interval - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    init_tracing();

    let config = GameConfig::load_or_default()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    info!(
        width = config.window.width,
        height = config.window.height,
        weapons = ?config.player.weapons,
        "starting"
    );

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events; unsupported terminals fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the game loop never blocks.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        error!(%err, "exiting with error");
    }
    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: &GameConfig) -> io::Result<()> {
    let frame_interval = Duration::from_millis(config.frame_ms);
    loop {
        let mut session = Session::new(config)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        let quit = game_loop(out, &mut session, rx, frame_interval)?;
        session.shutdown();
        if quit {
            info!("quit");
            break;
        }
        info!("restart");
    }
    Ok(())
}
