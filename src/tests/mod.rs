#![warn(clippy::all, clippy::pedantic)]

pub mod config_tests;
pub mod integration_tests;
pub mod systems_tests;

// Import test utilities
#[cfg(test)]
pub mod test_utils {
    use bevy_ecs::prelude::*;

    use crate::components::{
        Arena, Ball, BallColor, GameState, Input, MotionMode, Position, ScreenShake,
    };
    use crate::config::GameplayConfig;
    use crate::sound::AudioState;

    // Helper function to create a test world with standard game resources
    #[must_use]
    pub fn create_test_world() -> World {
        let mut world = World::new();
        world.insert_resource(GameState::default());
        world.insert_resource(Input::default());
        world.insert_resource(ScreenShake::default());
        world.insert_resource(Arena::default());
        world.insert_resource(GameplayConfig::default());
        world.insert_resource(AudioState::disconnected());
        world.insert_resource(crate::Time::new());
        world
    }

    // Helper to count live balls
    #[must_use]
    pub fn ball_count(world: &mut World) -> usize {
        world.query::<&Ball>().iter(world).count()
    }

    // Helper to place a ball directly, bypassing the spawn controller
    pub fn place_ball(
        world: &mut World,
        color: BallColor,
        motion: MotionMode,
        position: Position,
    ) -> Entity {
        let mut ball = Ball::new(color, 3.0);
        ball.motion = motion;
        world.spawn((ball, position)).id()
    }
}
