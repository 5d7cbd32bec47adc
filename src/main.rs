//! XTETRS - turn-based terminal Tetris
//!
//! Every piece comes from a finite pool: pick it, turn it, drop it.

mod board;
mod game;
mod input;
mod menu;
mod mode;
mod piece;
mod placement;
mod pool;
mod score;
mod settings;
mod shape;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use game::{Game, GameResult, GameState, TurnOutcome};
use input::{Input, InputHandler};
use menu::{Menu, MenuAction, MenuScreen};
use mode::GameMode;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

/// Input delay after game over to prevent accidental menu return
const GAME_OVER_INPUT_DELAY: Duration = Duration::from_millis(800);

/// Application state
enum AppState {
    Menu(Menu),
    Playing(Game, InputHandler),
}

/// State change decided while the current state is borrowed
enum Transition {
    Stay,
    Start(GameMode),
    ToMenu,
    Quit,
}

/// Get the xtetrs temp directory, creating it if needed
fn xtetrs_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("xtetrs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = xtetrs_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // The terminal belongs to the UI, so logs go to a file
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("xtetrs=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "XTETRS starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let mut settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = settings.save() {
        tracing::warn!(error = %e, "settings not saved");
        eprintln!("Warning: Could not save settings: {}", e);
    }

    match &result {
        Ok(Some(game)) => {
            println!("\nThanks for playing XTETRS!");
            println!("Mode: {}", game.mode().name());
            for player in &game.players {
                println!(
                    "{}: {} points | {} lines | {} pieces",
                    player.name, player.score.points, player.score.lines, player.score.pieces
                );
            }
            if let GameState::Over(result) = game.state {
                println!("Result: {}", describe_result(game, result));
            }
        }
        Ok(None) => println!("\nThanks for playing XTETRS!"),
        Err(_) => {}
    }

    tracing::info!("XTETRS shutting down");
    result.map(|_| ())
}

fn describe_result(game: &Game, result: GameResult) -> String {
    match result {
        GameResult::Cleared => "pool cleared".to_string(),
        GameResult::ToppedOut => "topped out".to_string(),
        GameResult::Winner(idx) => format!("{} wins", game.players[idx].name),
        GameResult::Draw => "draw".to_string(),
        GameResult::Abandoned(idx) => format!("abandoned by {}", game.players[idx].name),
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &mut Settings,
) -> io::Result<Option<Game>> {
    let mut state = AppState::Menu(Menu::new());
    let mut last_game: Option<Game> = None;
    let mut game_over_time: Option<Instant> = None;

    loop {
        terminal.draw(|frame| match &state {
            AppState::Menu(menu) => ui::render_menu(frame, menu),
            AppState::Playing(game, _) => ui::render_game(frame, game, settings),
        })?;

        // Turn-based: nothing changes until a key arrives
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let transition = match &mut state {
            AppState::Menu(menu) => handle_menu_key(menu, key, settings),
            AppState::Playing(game, input) => {
                if game.is_over() {
                    let since = *game_over_time.get_or_insert_with(Instant::now);
                    if since.elapsed() >= GAME_OVER_INPUT_DELAY {
                        Transition::ToMenu
                    } else {
                        Transition::Stay
                    }
                } else {
                    match input.key_down(key) {
                        Some(Input::Quit) => Transition::Quit,
                        Some(Input::Action(action)) => {
                            let outcome = game.handle_action(action);
                            tracing::trace!(?action, ?outcome, "turn input");
                            if game.is_over() {
                                game_over_time = Some(Instant::now());
                            }
                            if outcome == TurnOutcome::BackToMenu {
                                Transition::ToMenu
                            } else {
                                Transition::Stay
                            }
                        }
                        None => Transition::Stay,
                    }
                }
            }
        };

        match transition {
            Transition::Stay => {}
            Transition::Start(mode) => {
                let quantity = settings.gameplay.base_quantity;
                let game = match settings.gameplay.computer_seed {
                    Some(seed) => Game::with_seed(mode, quantity, seed),
                    None => Game::new(mode, quantity),
                };
                let input = InputHandler::from_settings(settings);
                game_over_time = None;
                state = AppState::Playing(game, input);
            }
            Transition::ToMenu => {
                if let AppState::Playing(game, _) =
                    std::mem::replace(&mut state, AppState::Menu(Menu::new()))
                {
                    last_game = Some(game);
                }
                game_over_time = None;
            }
            Transition::Quit => {
                if let AppState::Playing(game, _) =
                    std::mem::replace(&mut state, AppState::Menu(Menu::new()))
                {
                    last_game = Some(game);
                }
                return Ok(last_game);
            }
        }
    }
}

fn handle_menu_key(menu: &mut Menu, key: event::KeyEvent, settings: &mut Settings) -> Transition {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Transition::Quit;
    }

    // Handle key rebinding mode
    if menu.rebinding.is_some() {
        match key.code {
            KeyCode::Esc => menu.cancel_rebind(),
            KeyCode::Enter => menu.finish_rebind(),
            code => {
                if let Some(key_str) = key_to_string(code) {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        // Shift+Key adds to existing bindings (keeps rebind mode)
                        menu.add_key(key_str, settings);
                    } else {
                        menu.set_key(key_str, settings);
                    }
                }
            }
        }
        return Transition::Stay;
    }

    match key.code {
        KeyCode::Up => menu.move_up(),
        KeyCode::Down => menu.move_down(),
        KeyCode::Left => menu.adjust_left(settings),
        KeyCode::Right => menu.adjust_right(settings),
        KeyCode::Enter => {
            if menu.on_key_bind() {
                menu.start_rebind();
                return Transition::Stay;
            }
            match menu.select().cloned() {
                Some(MenuAction::StartGame(mode)) => return Transition::Start(mode),
                Some(MenuAction::GoToScreen(screen)) => menu.go_to(screen, settings),
                Some(MenuAction::Back) => menu.go_back(settings),
                Some(MenuAction::Quit) => return Transition::Quit,
                None => {}
            }
        }
        KeyCode::Delete | KeyCode::Backspace => menu.clear_keys(settings),
        KeyCode::Char('q') | KeyCode::Esc => {
            if menu.screen == MenuScreen::Main {
                return Transition::Quit;
            }
            menu.go_back(settings);
        }
        _ => {}
    }
    Transition::Stay
}

/// Name of a key as stored in the settings file, None for keys we do not bind
fn key_to_string(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_ascii_lowercase().to_string(),
        _ => return None,
    };
    Some(name)
}
