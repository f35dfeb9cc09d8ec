#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info, trace, warn};

use crate::components::{Arena, Ball, BallColor, GameState, Input, MotionMode, Position, Target};
use crate::config::GameplayConfig;
use crate::game;
use crate::particles;
use crate::screenshake;
use crate::sound::{AudioState, SoundEffect};
use crate::swipe;

/// The single live ball, if any. Copies the data out so callers keep full
/// access to the world.
pub fn current_ball(world: &mut World) -> Option<(Entity, Ball, Position)> {
    let mut query = world.query::<(Entity, &Ball, &Position)>();
    query
        .iter(world)
        .next()
        .map(|(entity, ball, position)| (entity, *ball, *position))
}

/// Creates the next ball at the spawn anchor, with color and fall speed
/// drawn from the difficulty curve at the current score.
///
/// Spawning while a ball is still live is a contract violation by the
/// caller; the request is rejected and logged, never honored with a second
/// ball.
pub fn spawn_ball(world: &mut World) {
    let already_live = {
        let mut query = world.query::<&Ball>();
        query.iter(world).next().is_some()
    };
    if already_live {
        warn!("spawn requested while a ball is still live; rejecting");
        return;
    }

    let (color, fall_speed, spawn_point) = {
        let state = world.resource::<GameState>();
        let config = world.resource::<GameplayConfig>();
        let arena = world.resource::<Arena>();
        (
            BallColor::random(config.unlocked_color_count(state.score)),
            config.fall_speed(state.score),
            arena.spawn_point(),
        )
    };

    world.spawn((Ball::new(color, fall_speed), spawn_point));

    let mut state = world.resource_mut::<GameState>();
    state.last_spawn = state.clock;
    debug!("Spawned {color:?} ball, fall speed {fall_speed:.2}");
}

/// Spawns the next ball once no ball is live and the spawn interval for the
/// current score has elapsed. No-op while the session is over.
pub fn try_spawn(world: &mut World) {
    let has_ball = {
        let mut query = world.query::<&Ball>();
        query.iter(world).next().is_some()
    };
    if has_ball {
        return;
    }

    let due = {
        let state = world.resource::<GameState>();
        let config = world.resource::<GameplayConfig>();
        !state.game_over && state.clock - state.last_spawn >= config.spawn_interval(state.score)
    };

    if due {
        spawn_ball(world);
    }
}

/// Consumes the pending gesture, if any, and redirects the falling ball
/// toward the resolved target. A rejected gesture changes nothing.
pub fn swipe_system(world: &mut World) {
    let gesture = { world.resource_mut::<Input>().gesture.take() };
    let Some(gesture) = gesture else {
        return;
    };

    if world.resource::<GameState>().game_over {
        return;
    }

    let Some((entity, ball, position)) = current_ball(world) else {
        return;
    };

    // A travelling ball cannot be redirected or recalled
    if !ball.is_falling() {
        return;
    }

    let target = {
        let state = world.resource::<GameState>();
        let config = world.resource::<GameplayConfig>();
        let arena = world.resource::<Arena>();
        swipe::interpret(
            gesture,
            config.target_mode(state.score),
            arena.center(),
            position,
            config,
        )
    };
    let Some(target) = target else {
        return;
    };

    if let Some(mut live) = world.get_mut::<Ball>(entity) {
        live.motion = MotionMode::Travelling(target);
    }
    world.resource::<AudioState>().play_sound(SoundEffect::Swipe);
    debug!("Ball redirected toward {target:?}");
}

/// One fixed tick of the session: advance effects and the clock, step the
/// ball, judge whichever destruction path fires, then give the spawn
/// controller a chance to produce the next ball.
pub fn game_tick_system(world: &mut World, delta_seconds: f32) {
    trace!("game tick, delta {delta_seconds}");

    // Effects keep animating even on the game-over screen
    particles::update_particles(world, delta_seconds);
    screenshake::update_screen_shake(world, delta_seconds);

    if world.resource::<GameState>().game_over {
        return;
    }

    world.resource_mut::<GameState>().clock += delta_seconds;

    // A ball is in exactly one motion mode, so only one destruction path can
    // fire per tick
    if let Some((entity, ball, position)) = current_ball(world) {
        match ball.motion {
            MotionMode::Falling => {
                let next = position.fall_step(ball.fall_speed, delta_seconds);
                let bottom = world.resource::<Arena>().bottom_limit();
                if next.y < bottom {
                    world.despawn(entity);
                    debug!("Ball left the play area while falling");
                    handle_miss(world, next);
                } else {
                    world.entity_mut(entity).insert(next);
                }
            }
            MotionMode::Travelling(target) => {
                let (goal, max_step) = {
                    let arena = world.resource::<Arena>();
                    let config = world.resource::<GameplayConfig>();
                    (arena.anchor(target), config.travel_speed * delta_seconds)
                };
                let next = position.move_towards(goal, max_step);
                if next.distance_squared(goal) < game::ARRIVAL_EPSILON_SQ {
                    world.despawn(entity);
                    handle_arrival(world, ball.color, target);
                } else {
                    world.entity_mut(entity).insert(next);
                }
            }
        }
    }

    try_spawn(world);
}

/// Judges a ball that reached `target`: a color match scores, anything else
/// counts as a miss.
pub fn handle_arrival(world: &mut World, color: BallColor, target: Target) {
    // Terminal state: arrivals are not judged after game over
    if world.resource::<GameState>().game_over {
        return;
    }

    let anchor = world.resource::<Arena>().anchor(target);

    if color == target.expected_color() {
        let threshold = world.resource::<GameplayConfig>().color_unlock_threshold;
        let score = {
            let mut state = world.resource_mut::<GameState>();
            state.score += 1;
            state.score
        };
        info!("Matched {color:?} at {target:?}, score {score}");

        {
            let audio = world.resource::<AudioState>();
            audio.play_sound(SoundEffect::CorrectMatch);
            if score == threshold {
                info!("Two more colors unlocked at score {score}");
                audio.play_sound(SoundEffect::ColorUnlock);
            }
        }

        particles::spawn_match_burst(world, anchor, color);
    } else {
        info!("Wrong: {color:?} sent to {target:?}");
        handle_miss(world, anchor);
    }
}

/// Books a miss (wrong target or ball lost at the bottom) and flips the
/// session to game over once the budget is spent. Terminal: after that only
/// a restart is accepted.
pub fn handle_miss(world: &mut World, at: Position) {
    if world.resource::<GameState>().game_over {
        return;
    }

    let max_misses = world.resource::<GameplayConfig>().max_misses;
    let misses = {
        let mut state = world.resource_mut::<GameState>();
        state.misses += 1;
        state.misses
    };
    info!("Miss {misses}/{max_misses}");

    world.resource::<AudioState>().play_sound(SoundEffect::WrongMatch);
    particles::spawn_miss_puff(world, at);

    if misses >= max_misses {
        screenshake::trigger_screen_shake(world, 2.4, 0.5);
        world.resource_mut::<GameState>().game_over = true;
        info!("Game over");

        let audio = world.resource::<AudioState>();
        audio.stop_music();
        audio.play_sound(SoundEffect::GameOver);
    } else {
        screenshake::trigger_screen_shake(world, 1.2, 0.3);
    }
}
