#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::components::*;
    use crate::config::GameplayConfig;
    use crate::systems::*;
    use crate::tests::test_utils::{ball_count, create_test_world};

    fn target_for(color: BallColor) -> Target {
        match color {
            BallColor::Red => Target::TopRight,
            BallColor::Blue => Target::TopLeft,
            BallColor::Green => Target::BottomLeft,
            BallColor::Yellow => Target::BottomRight,
            BallColor::Orange => Target::MiddleRight,
            BallColor::Cyan => Target::MiddleLeft,
        }
    }

    /// Plays like a perfect player: wait for the ball to reach the center
    /// zone, swipe toward its matching target, repeat.
    #[test]
    fn test_perfect_play_only_scores() {
        fastrand::seed(11);
        let mut world = create_test_world();
        spawn_ball(&mut world);

        let arena = world.resource::<Arena>().clone();
        let center = arena.center();
        let center_radius = world.resource::<GameplayConfig>().center_radius;

        let mut safety = 0;
        while world.resource::<GameState>().score < 5 {
            safety += 1;
            assert!(safety < 10_000, "session did not progress");

            if let Some((_, ball, position)) = current_ball(&mut world) {
                if ball.is_falling() && position.distance(center) <= center_radius {
                    // Swipe along the direction of the matching target
                    let anchor = arena.anchor(target_for(ball.color));
                    let end = Position {
                        x: center.x + (anchor.x - center.x) / 8.0,
                        y: center.y + (anchor.y - center.y) / 8.0,
                    };
                    world.resource_mut::<Input>().gesture =
                        Some(Gesture { start: center, end });
                    swipe_system(&mut world);
                }
            }

            game_tick_system(&mut world, 0.05);
        }

        let state = world.resource::<GameState>();
        assert_eq!(state.score, 5);
        assert_eq!(state.misses, 0);
        assert!(!state.game_over);
    }

    /// A player who never swipes loses exactly `max_misses` balls, then the
    /// session freezes until restart.
    #[test]
    fn test_ignored_balls_end_the_session() {
        fastrand::seed(3);
        let mut world = create_test_world();
        spawn_ball(&mut world);

        let max_misses = world.resource::<GameplayConfig>().max_misses;

        let mut safety = 0;
        while !world.resource::<GameState>().game_over {
            safety += 1;
            assert!(safety < 10_000, "session never ended");
            game_tick_system(&mut world, 0.1);
        }

        let state = world.resource::<GameState>().clone();
        assert_eq!(state.score, 0);
        assert_eq!(state.misses, max_misses);

        // Frozen: more ticks change nothing and spawn nothing
        for _ in 0..50 {
            game_tick_system(&mut world, 0.1);
        }
        assert_eq!(ball_count(&mut world), 0);
        assert_eq!(world.resource::<GameState>().misses, max_misses);
    }

    #[test]
    fn test_restart_recovers_from_game_over() {
        let mut app = App::new_silent();

        {
            let mut state = app.world.resource_mut::<GameState>();
            state.score = 12;
            state.misses = 3;
            state.game_over = true;
        }

        app.reset();

        let state = app.world.resource::<GameState>().clone();
        assert_eq!(state.score, 0);
        assert_eq!(state.misses, 0);
        assert!(!state.game_over);

        // A fresh ball is already waiting
        assert_eq!(ball_count(&mut app.world), 1);
    }

    #[test]
    fn test_crossing_the_unlock_threshold() {
        let mut world = create_test_world();
        let threshold = world.resource::<GameplayConfig>().color_unlock_threshold;
        world.resource_mut::<GameState>().score = threshold - 1;

        handle_arrival(&mut world, BallColor::Red, Target::TopRight);

        let score = world.resource::<GameState>().score;
        assert_eq!(score, threshold);

        let config = world.resource::<GameplayConfig>();
        assert_eq!(config.unlocked_color_count(score), 6);
        assert_eq!(config.target_mode(score), TargetMode::SixWay);
    }
}
