#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting between numeric types since exact precision isn't critical in this game
    clippy::cast_precision_loss
)]

use bevy_ecs::prelude::*;

use crate::game;

/// Ball colors in their fixed unlock order. The first four are always
/// available; `Orange` and `Cyan` join the draw once the score crosses the
/// unlock threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallColor {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Cyan,
}

impl BallColor {
    pub const ORDERED: [BallColor; 6] = [
        BallColor::Red,
        BallColor::Green,
        BallColor::Blue,
        BallColor::Yellow,
        BallColor::Orange,
        BallColor::Cyan,
    ];

    /// Draws a color uniformly from the first `unlocked` entries of the
    /// fixed ordering.
    #[must_use]
    pub fn random(unlocked: usize) -> Self {
        let count = unlocked.clamp(1, Self::ORDERED.len());
        Self::ORDERED[fastrand::usize(0..count)]
    }

    #[must_use]
    pub fn style_color(self) -> ratatui::style::Color {
        match self {
            BallColor::Red => ratatui::style::Color::Red,
            BallColor::Green => ratatui::style::Color::Green,
            BallColor::Blue => ratatui::style::Color::Blue,
            BallColor::Yellow => ratatui::style::Color::Yellow,
            BallColor::Orange => ratatui::style::Color::LightRed,
            BallColor::Cyan => ratatui::style::Color::Cyan,
        }
    }
}

/// Corner and edge zones a ball can be flicked toward. The two middle
/// targets only take part in `SixWay` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
    MiddleRight,
    MiddleLeft,
}

impl Target {
    pub const ALL: [Target; 6] = [
        Target::TopRight,
        Target::TopLeft,
        Target::BottomLeft,
        Target::BottomRight,
        Target::MiddleRight,
        Target::MiddleLeft,
    ];

    /// The one color this target accepts. Total over the enum, no runtime
    /// mutation.
    #[must_use]
    pub fn expected_color(self) -> BallColor {
        match self {
            Target::TopRight => BallColor::Red,
            Target::TopLeft => BallColor::Blue,
            Target::BottomLeft => BallColor::Green,
            Target::BottomRight => BallColor::Yellow,
            Target::MiddleRight => BallColor::Orange,
            Target::MiddleLeft => BallColor::Cyan,
        }
    }
}

/// Swipe discretization mode, derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    FourWay,
    SixWay,
}

impl TargetMode {
    /// Targets active in this mode, in the fixed catalog order.
    #[must_use]
    pub fn targets(self) -> &'static [Target] {
        match self {
            TargetMode::FourWay => &Target::ALL[..4],
            TargetMode::SixWay => &Target::ALL[..],
        }
    }
}

/// World-space position in arena units, y up.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub fn distance_squared(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[must_use]
    pub fn distance(self, other: Position) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// One tick of free fall. Pure; the caller owns the write-back.
    #[must_use]
    pub fn fall_step(self, speed: f32, delta_seconds: f32) -> Position {
        Position {
            x: self.x,
            y: self.y - speed * delta_seconds,
        }
    }

    /// Moves at most `max_step` toward `goal` without overshooting.
    #[must_use]
    pub fn move_towards(self, goal: Position, max_step: f32) -> Position {
        let dx = goal.x - self.x;
        let dy = goal.y - self.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist <= max_step || dist == 0.0 {
            return goal;
        }
        Position {
            x: self.x + dx / dist * max_step,
            y: self.y + dy / dist * max_step,
        }
    }
}

/// A ball either falls freely or travels toward the target a swipe resolved.
/// The transition happens at most once per ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionMode {
    Falling,
    Travelling(Target),
}

/// The single live ball. Fall speed is fixed at spawn time from the
/// difficulty curve and never re-evaluated mid-flight.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ball {
    pub color: BallColor,
    pub fall_speed: f32,
    pub motion: MotionMode,
}

impl Ball {
    #[must_use]
    pub fn new(color: BallColor, fall_speed: f32) -> Self {
        Self {
            color,
            fall_speed,
            motion: MotionMode::Falling,
        }
    }

    #[must_use]
    pub fn is_falling(&self) -> bool {
        matches!(self.motion, MotionMode::Falling)
    }
}

/// Read-only world anchors: target positions, center zone, spawn point.
#[derive(Resource, Debug, Clone)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: game::ARENA_WIDTH,
            height: game::ARENA_HEIGHT,
        }
    }
}

impl Arena {
    #[must_use]
    pub fn center(&self) -> Position {
        Position {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }

    /// Balls enter at the top center.
    #[must_use]
    pub fn spawn_point(&self) -> Position {
        Position {
            x: self.width / 2.0,
            y: self.height - 1.0,
        }
    }

    /// A falling ball below this line counts as missed.
    #[must_use]
    pub fn bottom_limit(&self) -> f32 {
        -game::BOTTOM_MARGIN
    }

    #[must_use]
    pub fn anchor(&self, target: Target) -> Position {
        let m = game::TARGET_MARGIN;
        match target {
            Target::TopRight => Position {
                x: self.width - m,
                y: self.height - m,
            },
            Target::TopLeft => Position {
                x: m,
                y: self.height - m,
            },
            Target::BottomLeft => Position { x: m, y: m },
            Target::BottomRight => Position {
                x: self.width - m,
                y: m,
            },
            Target::MiddleRight => Position {
                x: self.width - m,
                y: self.height / 2.0,
            },
            Target::MiddleLeft => Position {
                x: m,
                y: self.height / 2.0,
            },
        }
    }
}

/// Score, miss count and the game-over flag for the whole play session.
/// Reset only by an explicit restart.
#[derive(Resource, Debug, Clone)]
pub struct GameState {
    pub score: u32,
    pub misses: u32,
    pub game_over: bool,
    /// Seconds since the session started, advanced once per game tick.
    pub clock: f32,
    /// Clock value of the most recent spawn.
    pub last_spawn: f32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            misses: 0,
            game_over: false,
            clock: 0.0,
            last_spawn: 0.0,
        }
    }
}

impl GameState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn lives_remaining(&self, max_misses: u32) -> u32 {
        max_misses.saturating_sub(self.misses)
    }
}

/// A completed two-point gesture in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub start: Position,
    pub end: Position,
}

impl Gesture {
    #[must_use]
    pub fn delta(self) -> (f32, f32) {
        (self.end.x - self.start.x, self.end.y - self.start.y)
    }

    #[must_use]
    pub fn magnitude(self) -> f32 {
        self.start.distance(self.end)
    }
}

// Input state gathered by the event loop for the next tick
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    /// Press-down point of a gesture still in progress.
    pub press: Option<Position>,
    /// Completed gesture waiting to be interpreted this tick.
    pub gesture: Option<Gesture>,
}

// Screen shake effect, fed by misses
#[derive(Debug, Clone, Resource, Default)]
pub struct ScreenShake {
    pub intensity: f32,
    pub duration: f32,
    pub current_offset: (i16, i16),
    pub is_active: bool,
}

// Particle system for match feedback
#[derive(Debug, Clone, Component)]
pub struct Particle {
    pub position: Position,
    pub velocity: (f32, f32),
    pub color: ratatui::style::Color,
    pub lifetime: f32,
    pub size: f32,
}
