#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

use colorfall::Time;
use colorfall::app::{App, AppResult};
use colorfall::components::{Arena, GameState, Gesture, Input, Position};
use colorfall::config;
use colorfall::menu_types::{MenuOption, MenuState, OptionsOption};
use colorfall::sound::AudioState;
use colorfall::{systems, ui};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it so the TUI stays clean
    let log_path = "colorfall.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .expect("Failed to create log file");

    let stderr_handle = std::io::stderr();
    let stderr_fd = stderr_handle.as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Colorfall");

    // Initialize configuration system
    match config::loader::load_config_from_file() {
        Ok(loaded) => {
            let mut cfg = config::CONFIG.write().unwrap();
            *cfg = loaded;
            info!("Configuration loaded successfully");
        }
        Err(e) => {
            error!("Failed to load configuration: {e:?}");
            // Continue with default configuration
        }
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(33); // ~30 FPS rendering
    let game_tick_rate = Duration::from_millis(50); // Game logic updates less often

    let app = App::new();
    let res = run_app(&mut terminal, app, tick_rate, game_tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
    game_tick_rate: Duration,
) -> AppResult<()> {
    let mut last_render = Instant::now();
    let mut last_game_tick = Instant::now();

    // Flush any pending input events that might be in the buffer
    while crossterm::event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    // Warn about a missing audio device once, then stay quiet
    let mut audio_error_logged = false;

    loop {
        if last_render.elapsed() >= tick_rate {
            terminal.draw(|f| ui::render(f, &mut app))?;
            last_render = Instant::now();
        }

        if last_game_tick.elapsed() >= game_tick_rate {
            let delta_seconds = last_game_tick.elapsed().as_secs_f32();
            last_game_tick = Instant::now();

            {
                let mut time = app.world.resource_mut::<Time>();
                time.update();
            }

            let audio_unavailable = {
                let audio_state = app.world.resource::<AudioState>();
                !audio_state.is_audio_available()
            };
            if audio_unavailable && !audio_error_logged {
                error!("Audio device is unavailable. Continuing without sound.");
                audio_error_logged = true;
            }

            if app.should_quit {
                return Ok(());
            }

            // Gameplay only runs on the game screen; the swipe is resolved
            // to completion before the tick advances motion
            if app.menu.state == MenuState::Game {
                systems::swipe_system(&mut app.world);
                systems::game_tick_system(&mut app.world, delta_seconds);
            }
        }

        if crossterm::event::poll(Duration::from_millis(5))? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, &mouse),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == event::KeyEventKind::Release {
        return;
    }

    debug!("Key event: {key:?}");

    // Audio controls work on every screen
    match key.code {
        KeyCode::Char('m') => {
            app.world.resource_mut::<AudioState>().toggle_music();
            return;
        }
        KeyCode::Char('+' | '=') => {
            let mut audio = app.world.resource_mut::<AudioState>();
            let volume = audio.get_volume();
            audio.set_volume((volume + 0.1).min(1.0));
            return;
        }
        KeyCode::Char('-' | '_') => {
            let mut audio = app.world.resource_mut::<AudioState>();
            let volume = audio.get_volume();
            audio.set_volume((volume - 0.1).max(0.0));
            return;
        }
        _ => {}
    }

    if app.menu.state == MenuState::Game {
        handle_game_key(app, key);
    } else {
        handle_menu_key(app, key);
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('w') => {
            app.menu_renderer.prev_option(&mut app.menu);
        }
        KeyCode::Down | KeyCode::Char('s') => {
            app.menu_renderer.next_option(&mut app.menu);
        }
        KeyCode::Enter | KeyCode::Char(' ') => match app.menu.state {
            MenuState::MainMenu => match app.menu.selected_option {
                MenuOption::NewGame => {
                    app.menu.state = MenuState::Game;
                    app.reset();
                }
                MenuOption::Options => app.menu.state = MenuState::Options,
                MenuOption::Quit => app.should_quit = true,
            },
            MenuState::Options => match app.menu.options_selected {
                OptionsOption::MusicToggle => {
                    app.world.resource_mut::<AudioState>().toggle_music();
                }
                OptionsOption::SoundToggle => {
                    app.world.resource_mut::<AudioState>().toggle_sound();
                }
                OptionsOption::VolumeUp => {
                    let mut audio = app.world.resource_mut::<AudioState>();
                    let volume = audio.get_volume();
                    audio.set_volume((volume + 0.1).min(1.0));
                }
                OptionsOption::VolumeDown => {
                    let mut audio = app.world.resource_mut::<AudioState>();
                    let volume = audio.get_volume();
                    audio.set_volume((volume - 0.1).max(0.0));
                }
                OptionsOption::Back => app.menu.state = MenuState::MainMenu,
            },
            MenuState::Game => {}
        },
        KeyCode::Esc => {
            if app.menu.state == MenuState::Options {
                app.menu.state = MenuState::MainMenu;
            }
        }
        _ => {}
    }
}

fn handle_game_key(app: &mut App, key: KeyEvent) {
    let is_game_over = app.world.resource::<GameState>().game_over;

    match key.code {
        KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Esc => app.menu.state = MenuState::MainMenu,
        KeyCode::Enter if is_game_over => app.reset(),
        // Direction keys synthesize a center-origin gesture so the same
        // interpreter path handles pointer and keyboard input
        KeyCode::Char(c @ ('q' | 'e' | 'z' | 'c' | 'a' | 'd')) if !is_game_over => {
            let (dx, dy) = match c {
                'e' => (1.0, 1.0),
                'q' => (-1.0, 1.0),
                'z' => (-1.0, -1.0),
                'c' => (1.0, -1.0),
                'd' => (1.0, 0.0),
                _ => (-1.0, 0.0),
            };
            let center = app.world.resource::<Arena>().center();
            let end = Position {
                x: center.x + dx * 2.0,
                y: center.y + dy * 2.0,
            };
            app.world.resource_mut::<Input>().gesture = Some(Gesture { start: center, end });
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: &MouseEvent) {
    if app.menu.state != MenuState::Game {
        return;
    }
    let Some(play_area) = app.play_area else {
        return;
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let arena = app.world.resource::<Arena>().clone();
            let press = ui::cell_to_world(&arena, play_area, mouse.column, mouse.row);
            app.world.resource_mut::<Input>().press = press;
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let arena = app.world.resource::<Arena>().clone();
            let start = { app.world.resource_mut::<Input>().press.take() };
            if let Some(start) = start {
                let end = ui::cell_to_world_unbounded(&arena, play_area, mouse.column, mouse.row);
                app.world.resource_mut::<Input>().gesture = Some(Gesture { start, end });
            }
        }
        _ => {}
    }
}
