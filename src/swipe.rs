#![warn(clippy::all, clippy::pedantic)]

use log::trace;

use crate::components::{Gesture, Position, Target, TargetMode};
use crate::config::GameplayConfig;

/// Discretizes a gesture direction into a target. Total over `(dx, dy)` for
/// both modes; y grows upward.
///
/// In `SixWay` mode the middle targets dominate whenever the horizontal
/// component exceeds the vertical one, regardless of diagonal sign.
#[must_use]
pub fn resolve_direction(mode: TargetMode, dx: f32, dy: f32) -> Target {
    if mode == TargetMode::SixWay && dx.abs() > dy.abs() {
        return if dx > 0.0 {
            Target::MiddleRight
        } else {
            Target::MiddleLeft
        };
    }

    if dx >= 0.0 && dy >= 0.0 {
        Target::TopRight
    } else if dx < 0.0 && dy >= 0.0 {
        Target::TopLeft
    } else if dx < 0.0 && dy < 0.0 {
        Target::BottomLeft
    } else {
        Target::BottomRight
    }
}

/// Applies the gating rules to a completed gesture and resolves it. `None`
/// means the gesture is rejected, which is not an error; nothing happens this
/// tick.
///
/// A gesture is rejected when it is shorter than the minimum swipe distance,
/// when it does not start inside the center zone, or (strict variant) when
/// the ball itself is outside the center zone at gesture end.
#[must_use]
pub fn interpret(
    gesture: Gesture,
    mode: TargetMode,
    center: Position,
    ball_position: Position,
    config: &GameplayConfig,
) -> Option<Target> {
    if gesture.magnitude() < config.min_swipe_distance {
        trace!("swipe rejected: below minimum distance");
        return None;
    }

    if gesture.start.distance(center) > config.center_radius {
        trace!("swipe rejected: started outside the center zone");
        return None;
    }

    if config.require_ball_near_center && ball_position.distance(center) > config.center_radius {
        trace!("swipe rejected: ball outside the center zone");
        return None;
    }

    let (dx, dy) = gesture.delta();
    Some(resolve_direction(mode, dx, dy))
}
