//! Terminal UI rendering with ratatui

use crate::board::{Board, EMPTY as EMPTY_CELL, PENALTY_CODE, PREVIEW_CODE};
use crate::game::{Game, GameResult, GameState, TurnPhase};
use crate::menu::{Menu, MenuAction, MenuItem, MenuItemType, MenuScreen};
use crate::piece::Piece;
use crate::settings::Settings;
use crate::tetromino::TetrominoType;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const EMPTY: &str = "  ";

/// Side panel: selected piece + pool inventory
const PANEL_WIDTH: u16 = 24;
/// Board: 10 cells * 2 chars + 2 for borders
const BOARD_WIDTH: u16 = 22;
/// Board: 15 visible rows + danger row + 2 for borders
const BOARD_HEIGHT: u16 = 18;
/// Turn, warning and event text below the boards
const INFO_HEIGHT: u16 = 5;

/// Render the main menu
pub fn render_menu(frame: &mut Frame, menu: &Menu) {
    let area = frame.area();

    let (menu_width, menu_height) = match menu.screen {
        MenuScreen::Main => (48u16, 20u16),
        MenuScreen::Settings => (44u16, 16u16),
        MenuScreen::SettingsKeys => (52u16, 24u16),
        MenuScreen::SettingsVisual | MenuScreen::SettingsGameplay => (52u16, 14u16),
    };

    let menu_area = center_rect(area, menu_width, menu_height);

    let show_big_title = menu.screen == MenuScreen::Main;
    let title_height = if show_big_title { 4u16 } else { 3u16 };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(title_height), Constraint::Min(8)])
        .split(menu_area);

    if show_big_title {
        let title_lines = vec![
            Line::styled("▀▄▀ ▀█▀ █▀▀ ▀█▀ █▀█ █▀", Style::default().fg(Color::Cyan)),
            Line::styled("█ █  █  ██▄  █  █▀▄ ▄█", Style::default().fg(Color::Cyan)),
            Line::styled("every piece is your call", Style::default().fg(Color::DarkGray)),
        ];
        let title = Paragraph::new(title_lines).alignment(Alignment::Center);
        frame.render_widget(title, layout[0]);
    } else {
        let screen_title = match menu.screen {
            MenuScreen::Settings => "SETTINGS",
            MenuScreen::SettingsKeys => "KEY BINDINGS",
            MenuScreen::SettingsVisual => "VISUAL SETTINGS",
            MenuScreen::SettingsGameplay => "GAMEPLAY SETTINGS",
            MenuScreen::Main => "XTETRS",
        };
        let title_lines = vec![
            Line::raw(""),
            Line::styled(screen_title, Style::default().fg(Color::Cyan).bold()),
        ];
        let title = Paragraph::new(title_lines).alignment(Alignment::Center);
        frame.render_widget(title, layout[0]);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);

    let mut lines = vec![Line::raw("")];
    for (i, item) in menu.items.iter().enumerate() {
        let is_selected = i == menu.selected;
        let is_rebinding = menu.rebinding == Some(i);
        lines.push(render_menu_item(item, is_selected, is_rebinding));
        lines.push(Line::raw(""));
    }

    lines.push(Line::styled(
        get_controls_hint(menu),
        Style::default().fg(Color::DarkGray),
    ));

    let menu_text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(menu_text, inner);
}

/// Render a single menu item based on its type
fn render_menu_item(item: &MenuItem, is_selected: bool, is_rebinding: bool) -> Line<'static> {
    let prefix = if is_selected { "▶ " } else { "  " };

    let base_style = if is_selected {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::White)
    };
    let label = Span::styled(format!("{}{}: ", prefix, item.label), base_style);

    match &item.item_type {
        MenuItemType::Button(_) => Line::styled(format!("{}{}", prefix, item.label), base_style),
        MenuItemType::Toggle { value, .. } => {
            let value_str = if *value { "ON" } else { "OFF" };
            let value_color = if *value { Color::Green } else { Color::Red };
            Line::from(vec![
                label,
                Span::styled(
                    format!("< {} >", value_str),
                    Style::default().fg(value_color).bold(),
                ),
            ])
        }
        MenuItemType::Cycle {
            options, current, ..
        } => Line::from(vec![
            label,
            Span::styled(
                format!("< {} >", options[*current]),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        MenuItemType::Number { value, .. } => Line::from(vec![
            label,
            Span::styled(format!("< {} >", value), Style::default().fg(Color::Cyan)),
        ]),
        MenuItemType::KeyBind { keys, .. } => {
            if is_rebinding {
                Line::from(vec![
                    label,
                    Span::styled("Press a key...", Style::default().fg(Color::Yellow).bold()),
                ])
            } else {
                let keys_str = if keys.is_empty() {
                    "None".to_string()
                } else {
                    keys.join(", ")
                };
                Line::from(vec![
                    label,
                    Span::styled(format!("[{}]", keys_str), Style::default().fg(Color::Magenta)),
                ])
            }
        }
    }
}

/// Get the controls hint based on current menu state
fn get_controls_hint(menu: &Menu) -> String {
    if menu.rebinding.is_some() {
        return "Key=Set | Shift+Key=Add more | Enter=Done | Esc=Cancel".to_string();
    }

    match menu.items.get(menu.selected).map(|item| &item.item_type) {
        Some(MenuItemType::Button(MenuAction::StartGame(mode))) => mode.description().to_string(),
        Some(MenuItemType::Toggle { .. } | MenuItemType::Cycle { .. } | MenuItemType::Number { .. }) => {
            "↑↓ Select  ←→ Adjust  Esc Back".to_string()
        }
        Some(MenuItemType::KeyBind { .. }) => "↑↓ Select  Enter Rebind  Del Clear  Esc Back".to_string(),
        _ => "↑↓ Select  Enter Confirm  Esc Back".to_string(),
    }
}

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();
    let board_count = game.mode().player_count() as u16;
    let game_width = PANEL_WIDTH + BOARD_WIDTH * board_count;
    let game_area = center_rect(area, game_width, BOARD_HEIGHT + INFO_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(BOARD_HEIGHT), Constraint::Length(INFO_HEIGHT)])
        .split(game_area);

    let mut columns = vec![Constraint::Length(PANEL_WIDTH)];
    columns.extend(std::iter::repeat_n(Constraint::Length(BOARD_WIDTH), game.players.len()));
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns)
        .split(rows[0]);

    let panel = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(6)])
        .split(main_layout[0]);
    render_selector(frame, panel[0], game, settings);
    render_pool(frame, panel[1], game, settings);

    let preview = if settings.visual.show_preview {
        game.preview()
    } else {
        None
    };
    for (idx, player) in game.players.iter().enumerate() {
        let is_current = idx == game.current_player() && !game.is_over();
        let board = match &preview {
            Some(preview) if is_current => &preview.board,
            _ => &player.board,
        };
        let title = format!(" {} ", player.name);
        let footer = format!(" {} pts · {} lines ", player.score.points, player.score.lines);
        let piece_color = game.selected_piece().map_or(Color::White, |p| p.kind.color());
        render_board(
            frame,
            main_layout[idx + 1],
            board,
            BoardStyle {
                title: &title,
                footer: &footer,
                highlighted: is_current,
                lost: player.lost,
                preview_color: piece_color,
            },
            settings,
        );
    }

    render_info(frame, rows[1], game);

    if let GameState::Over(result) = game.state {
        let (title, subtitle) = result_text(game, result);
        render_overlay(frame, area, &title, &subtitle);
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Color of an occupant code
fn cell_color(value: u8) -> Color {
    match value {
        PENALTY_CODE => Color::DarkGray,
        v => TetrominoType::from_value(v).map_or(Color::White, |kind| kind.color()),
    }
}

/// Render the highlighted piece in its current orientation
fn render_selector(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let (block_char, _) = settings.visual.block_chars();
    let block = Block::default()
        .title(" PIECE ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(piece) = game.selected_piece() else {
        return;
    };
    let mut lines = mini_piece_lines(piece, block_char);
    if matches!(game.phase(), TurnPhase::ChooseRotation | TurnPhase::ChooseColumn) {
        lines.push(Line::styled(
            format!(
                "rot {}/{}  col {}",
                game.rotation() + 1,
                piece.rotation_count(),
                game.column()
            ),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Lines for a piece's working shape, skipping empty rows
fn mini_piece_lines(piece: &Piece, block_char: &'static str) -> Vec<Line<'static>> {
    let color = piece.kind.color();
    piece
        .shape()
        .rows()
        .filter(|row| row.iter().any(|&cell| cell != EMPTY_CELL))
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&cell| {
                    if cell != EMPTY_CELL {
                        Span::styled(block_char, Style::default().fg(color))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Render the remaining quantity of every kind
fn render_pool(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let (block_char, _) = settings.visual.block_chars();
    let block = Block::default()
        .title(" POOL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let choosing = game.phase() == TurnPhase::ChoosePiece;
    let mut lines: Vec<Line> = game
        .pool()
        .iter()
        .enumerate()
        .map(|(idx, piece)| {
            let is_selected = idx == game.selected();
            let marker = if is_selected && choosing { "▶ " } else { "  " };
            let style = if !piece.is_available() {
                Style::default().fg(Color::DarkGray)
            } else if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(marker, style),
                Span::styled(block_char, Style::default().fg(piece.kind.color())),
                Span::styled(format!(" {}  x{:>3}", piece.kind.name(), piece.quantity), style),
            ])
        })
        .collect();

    lines.push(Line::styled(
        format!("  left: {}", game.pool().remaining()),
        Style::default().fg(Color::Gray),
    ));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Decorations for one field
struct BoardStyle<'a> {
    title: &'a str,
    footer: &'a str,
    /// Whose turn it is
    highlighted: bool,
    lost: bool,
    preview_color: Color,
}

/// Render a field: the lowest hidden row as a danger line, then the visible rows
fn render_board(frame: &mut Frame, area: Rect, board: &Board, style: BoardStyle, settings: &Settings) {
    let (block_char, ghost_char) = settings.visual.block_chars();

    let border_color = if style.lost {
        Color::Red
    } else if style.highlighted {
        Color::Yellow
    } else {
        Color::Gray
    };
    let block = Block::default()
        .title(style.title.to_string())
        .title_alignment(Alignment::Center)
        .title_bottom(Line::from(style.footer.to_string()).centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let danger_row = board.hidden_rows() - 1;
    let mut lines: Vec<Line> = Vec::new();
    for row in danger_row..board.rows() {
        let is_danger = row == danger_row;
        let spans: Vec<Span> = (0..board.cols())
            .map(|col| match board.get(row, col) {
                Some(PREVIEW_CODE) => {
                    Span::styled(ghost_char, Style::default().fg(style.preview_color).dim())
                }
                Some(value) if value != EMPTY_CELL => {
                    Span::styled(block_char, Style::default().fg(cell_color(value)))
                }
                _ if is_danger => Span::styled("··", Style::default().fg(Color::Red).dim()),
                _ => Span::raw(EMPTY),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Turn indicator, controls for the current phase and the last event
fn render_info(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let player = &game.players[game.current_player()].name;
    let prompt = match game.phase() {
        TurnPhase::ChoosePiece => "choose a piece (↑↓, confirm)",
        TurnPhase::ChooseRotation => "rotate (↑↓), confirm or back",
        TurnPhase::ChooseColumn => "choose a column (←→), confirm or back",
        TurnPhase::ConfirmExit => "back again to leave, anything else to stay",
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{}: ", player), Style::default().fg(Color::Yellow).bold()),
        Span::styled(prompt, Style::default().fg(Color::Gray)),
    ])];
    if game.preview().is_some_and(|preview| preview.placement.is_lost()) {
        lines.push(Line::styled(
            "this move loses the game",
            Style::default().fg(Color::Red).bold(),
        ));
    }
    if let Some(action) = &game.last_action {
        lines.push(Line::styled(
            action.clone(),
            Style::default().fg(Color::Magenta).bold(),
        ));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Overlay title and subtitle for a finished session
fn result_text(game: &Game, result: GameResult) -> (String, String) {
    let scores = game
        .players
        .iter()
        .map(|p| p.score.points.to_string())
        .collect::<Vec<_>>()
        .join(" - ");
    match result {
        GameResult::Cleared => ("POOL CLEARED".to_string(), format!("Score: {}", scores)),
        GameResult::ToppedOut => ("GAME OVER".to_string(), format!("Score: {}", scores)),
        GameResult::Winner(idx) => (format!("{} WINS", game.players[idx].name), scores),
        GameResult::Draw => ("DRAW".to_string(), scores),
        GameResult::Abandoned(idx) => (format!("{} LEFT", game.players[idx].name), scores),
    }
}

/// Render an overlay (for game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_area = center_rect(area, 30, 7);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle.to_string(), Style::default().fg(Color::Gray)),
        Line::styled("Press any key", Style::default().fg(Color::DarkGray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
