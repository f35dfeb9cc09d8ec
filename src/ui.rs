#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting world coordinates to cells since the arena always fits a terminal
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since offsets are clamped first
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use crate::app::App;
use crate::components::{Arena, Ball, GameState, Particle, Position, ScreenShake, TargetMode};
use crate::config::GameplayConfig;
use crate::menu::centered_rect;
use crate::menu_types::MenuState;
use crate::sound::AudioState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

const BALL_GLYPH: char = '●';
const TARGET_GLYPH: char = '◆';
const CENTER_GLYPH: char = '+';

pub fn render(f: &mut Frame, app: &mut App) {
    let App {
        world,
        menu,
        menu_renderer,
        play_area,
        ..
    } = app;

    if menu.state != MenuState::Game {
        *play_area = None;
        let audio = world.resource::<AudioState>();
        menu_renderer.render(f, menu, audio);
        return;
    }

    let arena = world.resource::<Arena>().clone();
    let state = world.resource::<GameState>().clone();
    let config = world.resource::<GameplayConfig>().clone();

    // Required sizes: one cell per arena unit plus borders, info panel right
    let board_width = arena.width as u16 + 2;
    let board_height = arena.height as u16 + 2;
    let min_info_width = 24u16;
    let min_total_width = board_width + min_info_width;
    let min_total_height = board_height + 3;

    if f.area().width < min_total_width || f.area().height < min_total_height {
        *play_area = None;
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Colorfall - Paused"),
        );
        let warning_area = centered_rect(50, 30, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    // Apply screen shake to the whole frame
    let (shake_x, shake_y) = {
        let screen_shake = world.resource::<ScreenShake>();
        screen_shake.current_offset
    };
    let original_area = f.area();
    let shake_area = Rect {
        x: (i32::from(original_area.x) + i32::from(shake_x)).max(0) as u16,
        y: (i32::from(original_area.y) + i32::from(shake_y)).max(0) as u16,
        width: original_area.width,
        height: original_area.height,
    };

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(min_info_width)])
        .split(shake_area);

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Title
            Constraint::Length(board_height),  // Play area
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let title = Paragraph::new("COLORFALL")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    let board_block = Block::default().borders(Borders::ALL);
    let inner = board_block.inner(game_layout[1]);
    f.render_widget(board_block, game_layout[1]);
    *play_area = Some(inner);

    render_play_area(f, world, &arena, &state, &config, inner);
    render_info_panel(f, &state, &config, main_layout[1]);

    if state.game_over {
        render_game_over(f, &state, original_area);
    }
}

fn render_play_area(
    f: &mut Frame,
    world: &mut bevy_ecs::world::World,
    arena: &Arena,
    state: &GameState,
    config: &GameplayConfig,
    area: Rect,
) {
    let width = arena.width as usize;
    let height = arena.height as usize;
    let mut grid = vec![vec![(' ', Color::Reset); width]; height];

    let put = |pos: Position, glyph: char, color: Color, grid: &mut Vec<Vec<(char, Color)>>| {
        let col = pos.x.round();
        let row = arena.height - 1.0 - pos.y.round();
        if col >= 0.0 && col < arena.width && row >= 0.0 && row < arena.height {
            grid[row as usize][col as usize] = (glyph, color);
        }
    };

    // Center zone marker
    put(arena.center(), CENTER_GLYPH, Color::DarkGray, &mut grid);

    // Active targets in their expected colors
    let mode = config.target_mode(state.score);
    for &target in mode.targets() {
        put(
            arena.anchor(target),
            TARGET_GLYPH,
            target.expected_color().style_color(),
            &mut grid,
        );
    }

    // Particles under the ball so a fresh ball stays visible
    {
        let mut query = world.query::<&Particle>();
        for particle in query.iter(world) {
            let glyph = if particle.size >= 0.6 { '•' } else { '·' };
            put(particle.position, glyph, particle.color, &mut grid);
        }
    }

    {
        let mut query = world.query::<(&Ball, &Position)>();
        for (ball, position) in query.iter(world) {
            put(*position, BALL_GLYPH, ball.color.style_color(), &mut grid);
        }
    }

    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(glyph, color)| {
                        Span::styled(glyph.to_string(), Style::default().fg(color))
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

fn render_info_panel(f: &mut Frame, state: &GameState, config: &GameplayConfig, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(8), // Session stats
            Constraint::Min(5),    // Controls
        ])
        .split(area);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, layout[0]);

    let lives = state.lives_remaining(config.max_misses);
    let mut hearts = "♥ ".repeat(lives as usize);
    if hearts.is_empty() {
        hearts = "-".to_string();
    }

    let mode_label = match config.target_mode(state.score) {
        TargetMode::FourWay => "4-way",
        TargetMode::SixWay => "6-way",
    };

    let stats = Paragraph::new(vec![
        Line::from(format!("Score: {}", state.score)),
        Line::from(vec![
            Span::raw("Lives: "),
            Span::styled(hearts, Style::default().fg(Color::Red)),
        ]),
        Line::from(format!(
            "Colors: {}",
            config.unlocked_color_count(state.score)
        )),
        Line::from(format!("Mode: {mode_label}")),
    ])
    .block(Block::default().borders(Borders::ALL).title("Session"));
    f.render_widget(stats, layout[1]);

    let controls = Paragraph::new(vec![
        Line::from("Drag from the center"),
        Line::from("toward a target."),
        Line::from(""),
        Line::from("q/e/z/c: corners"),
        Line::from("a/d: sides (unlocked)"),
        Line::from("m: music  +/-: volume"),
        Line::from("Esc: menu  Q: quit"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Controls"));
    f.render_widget(controls, layout[2]);
}

fn render_game_over(f: &mut Frame, state: &GameState, area: Rect) {
    let panel = centered_rect(40, 30, area);
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Final score: {}", state.score)),
        Line::from(""),
        Line::from("Press Enter to restart"),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(ratatui::widgets::Clear, panel);
    f.render_widget(text, panel);
}

/// Maps a terminal cell inside the play area back to world coordinates.
/// Returns `None` for clicks outside the play area.
#[must_use]
pub fn cell_to_world(arena: &Arena, play_area: Rect, column: u16, row: u16) -> Option<Position> {
    if column < play_area.x
        || column >= play_area.x + play_area.width
        || row < play_area.y
        || row >= play_area.y + play_area.height
    {
        return None;
    }

    let x = f32::from(column - play_area.x);
    let y = arena.height - 1.0 - f32::from(row - play_area.y);
    Some(Position { x, y })
}

/// Like [`cell_to_world`] but without the bounds check, for gesture release
/// points that may land outside the play area.
#[must_use]
pub fn cell_to_world_unbounded(
    arena: &Arena,
    play_area: Rect,
    column: u16,
    row: u16,
) -> Position {
    let x = (i32::from(column) - i32::from(play_area.x)) as f32;
    let y = arena.height - 1.0 - (i32::from(row) - i32::from(play_area.y)) as f32;
    Position { x, y }
}
