#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, trace};
use ratatui::style::Color;

use crate::components::{BallColor, Particle, Position};

// Downward pull applied to every particle, world units per second squared
const PARTICLE_GRAVITY: f32 = 9.0;

/// Burst of particles in the ball's color at the target a correct match
/// arrived at.
pub fn spawn_match_burst(world: &mut World, at: Position, color: BallColor) {
    debug!("Match burst at ({:.1}, {:.1})", at.x, at.y);

    const BURST_PARTICLES: usize = 14;
    let color = color.style_color();

    for _ in 0..BURST_PARTICLES {
        // Radial scatter with a slight upward bias
        let vx = (fastrand::f32() - 0.5) * 8.0;
        let vy = (fastrand::f32() - 0.3) * 8.0;

        spawn_particle(
            world,
            at,
            (vx, vy),
            color,
            fastrand::f32() * 0.6 + 0.2,
            fastrand::f32() * 0.8 + 0.2,
        );
    }
}

/// Small gray puff where a ball was lost.
pub fn spawn_miss_puff(world: &mut World, at: Position) {
    trace!("Miss puff at ({:.1}, {:.1})", at.x, at.y);

    const PUFF_PARTICLES: usize = 6;

    for _ in 0..PUFF_PARTICLES {
        let vx = (fastrand::f32() - 0.5) * 3.0;
        let vy = fastrand::f32() * 2.0;

        spawn_particle(
            world,
            at,
            (vx, vy),
            Color::DarkGray,
            fastrand::f32() * 0.4 + 0.1,
            fastrand::f32() * 0.5 + 0.2,
        );
    }
}

fn spawn_particle(
    world: &mut World,
    position: Position,
    velocity: (f32, f32),
    color: Color,
    lifetime: f32,
    size: f32,
) {
    world.spawn(Particle {
        position,
        velocity,
        color,
        lifetime,
        size,
    });
}

/// Advances every particle by one tick and despawns the expired ones.
pub fn update_particles(world: &mut World, delta_seconds: f32) {
    let mut expired = Vec::new();

    {
        let mut query = world.query::<(Entity, &mut Particle)>();
        for (entity, mut particle) in query.iter_mut(world) {
            particle.lifetime -= delta_seconds;
            if particle.lifetime <= 0.0 {
                expired.push(entity);
                continue;
            }

            particle.position.x += particle.velocity.0 * delta_seconds;
            particle.position.y += particle.velocity.1 * delta_seconds;
            particle.velocity.1 -= PARTICLE_GRAVITY * delta_seconds;
        }
    }

    for entity in expired {
        world.despawn(entity);
    }
}

/// Removes every particle, used on restart.
pub fn clear_particles(world: &mut World) {
    let all: Vec<Entity> = {
        let mut query = world.query::<(Entity, &Particle)>();
        query.iter(world).map(|(entity, _)| entity).collect()
    };

    for entity in all {
        world.despawn(entity);
    }
}
