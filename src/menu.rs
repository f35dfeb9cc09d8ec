#![warn(clippy::all, clippy::pedantic)]

use crate::menu_types::{Menu, MenuOption, MenuState, OptionsOption};
use crate::sound::AudioState;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const TITLE: &str = r"
  ___  ___  _     ___  ___  ___  _   _    _
 / __|/ _ \| |   / _ \| _ \| __|/_\ | |  | |
| (__| (_) | |__| (_) |   /| _|/ _ \| |__| |__
 \___|\___/|____|\___/|_|_\|_|/_/ \_\____|____|
";

// Colors cycling through the title, one per ball color family
const TITLE_COLORS: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

pub struct MenuRenderer {
    title_frame: usize,
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self { title_frame: 0 }
    }
}

impl MenuRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_option(&mut self, menu: &mut Menu) {
        match menu.state {
            MenuState::MainMenu => {
                menu.selected_option = match menu.selected_option {
                    MenuOption::NewGame => MenuOption::Options,
                    MenuOption::Options => MenuOption::Quit,
                    MenuOption::Quit => MenuOption::NewGame,
                };
            }
            MenuState::Options => {
                menu.options_selected = match menu.options_selected {
                    OptionsOption::MusicToggle => OptionsOption::SoundToggle,
                    OptionsOption::SoundToggle => OptionsOption::VolumeUp,
                    OptionsOption::VolumeUp => OptionsOption::VolumeDown,
                    OptionsOption::VolumeDown => OptionsOption::Back,
                    OptionsOption::Back => OptionsOption::MusicToggle,
                };
            }
            MenuState::Game => {}
        }
    }

    pub fn prev_option(&mut self, menu: &mut Menu) {
        match menu.state {
            MenuState::MainMenu => {
                menu.selected_option = match menu.selected_option {
                    MenuOption::NewGame => MenuOption::Quit,
                    MenuOption::Options => MenuOption::NewGame,
                    MenuOption::Quit => MenuOption::Options,
                };
            }
            MenuState::Options => {
                menu.options_selected = match menu.options_selected {
                    OptionsOption::MusicToggle => OptionsOption::Back,
                    OptionsOption::SoundToggle => OptionsOption::MusicToggle,
                    OptionsOption::VolumeUp => OptionsOption::SoundToggle,
                    OptionsOption::VolumeDown => OptionsOption::VolumeUp,
                    OptionsOption::Back => OptionsOption::VolumeDown,
                };
            }
            MenuState::Game => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame, menu: &Menu, audio: &AudioState) {
        self.title_frame = self.title_frame.wrapping_add(1);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Min(8),
                Constraint::Length(2),
            ])
            .split(f.area());

        self.render_title(f, layout[0]);

        match menu.state {
            MenuState::MainMenu => Self::render_main_menu(f, menu, layout[1]),
            MenuState::Options => Self::render_options(f, menu, audio, layout[1]),
            MenuState::Game => {}
        }

        let help = Paragraph::new("↑/↓ select · Enter confirm · q quit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(help, layout[2]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let color = TITLE_COLORS[(self.title_frame / 16) % TITLE_COLORS.len()];
        let title = Paragraph::new(TITLE)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        f.render_widget(title, area);
    }

    fn render_main_menu(f: &mut Frame, menu: &Menu, area: Rect) {
        let entries = [
            ("New Game", matches!(menu.selected_option, MenuOption::NewGame)),
            ("Options", matches!(menu.selected_option, MenuOption::Options)),
            ("Quit", matches!(menu.selected_option, MenuOption::Quit)),
        ];

        let lines: Vec<Line> = entries
            .iter()
            .map(|(label, selected)| Self::menu_line(label, *selected))
            .collect();

        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Main Menu"));
        f.render_widget(body, centered_rect(40, 60, area));
    }

    fn render_options(f: &mut Frame, menu: &Menu, audio: &AudioState, area: Rect) {
        let music_label = if audio.is_music_enabled() {
            "Music: On"
        } else {
            "Music: Off"
        };
        let sound_label = if audio.is_sound_enabled() {
            "Sound: On"
        } else {
            "Sound: Off"
        };
        let volume = format!("Volume: {:.0}%", audio.get_volume() * 100.0);

        let entries = [
            (
                music_label.to_string(),
                matches!(menu.options_selected, OptionsOption::MusicToggle),
            ),
            (
                sound_label.to_string(),
                matches!(menu.options_selected, OptionsOption::SoundToggle),
            ),
            (
                format!("{volume} (+)"),
                matches!(menu.options_selected, OptionsOption::VolumeUp),
            ),
            (
                format!("{volume} (-)"),
                matches!(menu.options_selected, OptionsOption::VolumeDown),
            ),
            (
                "Back".to_string(),
                matches!(menu.options_selected, OptionsOption::Back),
            ),
        ];

        let lines: Vec<Line> = entries
            .iter()
            .map(|(label, selected)| Self::menu_line(label, *selected))
            .collect();

        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Options"));
        f.render_widget(body, centered_rect(40, 70, area));
    }

    fn menu_line(label: &str, selected: bool) -> Line<'static> {
        if selected {
            Line::from(Span::styled(
                format!("> {label} <"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::raw(label.to_string()))
        }
    }
}

/// Helper to center a rect of the given percentage size inside `r`.
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
