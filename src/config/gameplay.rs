#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when converting scores to curve positions since the curves saturate long before precision matters
    clippy::cast_precision_loss
)]

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::components::TargetMode;
use crate::game;

/// Gameplay tuning. Defaults come from the named constants in `game`; the
/// config file can override any field. The struct doubles as the difficulty
/// curve: every method is a deterministic function of the score.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub base_fall_speed: f32,
    pub max_fall_speed: f32,
    pub speed_saturation_score: u32,
    pub base_spawn_interval: f32,
    pub min_spawn_interval: f32,
    pub color_unlock_threshold: u32,
    pub max_misses: u32,
    pub travel_speed: f32,
    pub min_swipe_distance: f32,
    pub center_radius: f32,
    /// Strict variant of the swipe gate: also require the ball itself to be
    /// inside the center zone when the gesture completes.
    pub require_ball_near_center: bool,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            base_fall_speed: game::BASE_FALL_SPEED,
            max_fall_speed: game::MAX_FALL_SPEED,
            speed_saturation_score: game::SPEED_SATURATION_SCORE,
            base_spawn_interval: game::BASE_SPAWN_INTERVAL,
            min_spawn_interval: game::MIN_SPAWN_INTERVAL,
            color_unlock_threshold: game::COLOR_UNLOCK_THRESHOLD,
            max_misses: game::MAX_MISSES,
            travel_speed: game::TRAVEL_SPEED,
            min_swipe_distance: game::MIN_SWIPE_DISTANCE,
            center_radius: game::CENTER_RADIUS,
            require_ball_near_center: true,
        }
    }
}

impl GameplayConfig {
    /// Where along the saturation ramp a score sits, in `[0, 1]`.
    fn curve_position(&self, score: u32) -> f32 {
        if self.speed_saturation_score == 0 {
            return 1.0;
        }
        game::clamp01(score as f32 / self.speed_saturation_score as f32)
    }

    /// Fall speed for a ball spawned at `score`. Clamped to
    /// `[base_fall_speed, max_fall_speed]` for every score.
    #[must_use]
    pub fn fall_speed(&self, score: u32) -> f32 {
        game::lerp(
            self.base_fall_speed,
            self.max_fall_speed,
            self.curve_position(score),
        )
    }

    /// Delay before the next spawn, shrinking toward `min_spawn_interval`.
    #[must_use]
    pub fn spawn_interval(&self, score: u32) -> f32 {
        game::lerp(
            self.base_spawn_interval,
            self.min_spawn_interval,
            self.curve_position(score),
        )
    }

    /// Step function: four colors below the unlock threshold, six at or
    /// above it.
    #[must_use]
    pub fn unlocked_color_count(&self, score: u32) -> usize {
        if score >= self.color_unlock_threshold {
            game::FULL_COLOR_COUNT
        } else {
            game::BASE_COLOR_COUNT
        }
    }

    /// The middle targets activate together with the extra colors.
    #[must_use]
    pub fn target_mode(&self, score: u32) -> TargetMode {
        if score >= self.color_unlock_threshold {
            TargetMode::SixWay
        } else {
            TargetMode::FourWay
        }
    }
}
