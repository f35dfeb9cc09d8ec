#[cfg(test)]
mod tests {
    use crate::components::*;
    use crate::config::GameplayConfig;
    use crate::systems::*;
    use crate::tests::test_utils::{ball_count, create_test_world, place_ball};

    #[test]
    fn test_spawn_ball_creates_exactly_one() {
        let mut world = create_test_world();

        spawn_ball(&mut world);

        assert_eq!(ball_count(&mut world), 1);

        let (_, ball, position) = current_ball(&mut world).expect("ball spawned");
        assert!(ball.is_falling());

        let arena = world.resource::<Arena>().clone();
        assert_eq!(position, arena.spawn_point());
    }

    #[test]
    fn test_spawn_ball_uses_curve_speed_at_spawn_time() {
        let mut world = create_test_world();
        world.resource_mut::<GameState>().score = 50;

        spawn_ball(&mut world);

        let expected = world.resource::<GameplayConfig>().fall_speed(50);
        let (_, ball, _) = current_ball(&mut world).expect("ball spawned");
        assert_eq!(ball.fall_speed, expected);
    }

    #[test]
    fn test_spawn_while_live_is_rejected() {
        let mut world = create_test_world();

        spawn_ball(&mut world);
        let (first, _, _) = current_ball(&mut world).expect("ball spawned");

        // The contract violation is rejected, never a second ball
        spawn_ball(&mut world);

        assert_eq!(ball_count(&mut world), 1);
        let (still_first, _, _) = current_ball(&mut world).expect("ball kept");
        assert_eq!(first, still_first);
    }

    #[test]
    fn test_try_spawn_waits_for_interval() {
        let mut world = create_test_world();

        // Interval has not elapsed yet
        try_spawn(&mut world);
        assert_eq!(ball_count(&mut world), 0);

        // Advance the clock past the base interval
        world.resource_mut::<GameState>().clock = 2.0;
        try_spawn(&mut world);
        assert_eq!(ball_count(&mut world), 1);
    }

    #[test]
    fn test_try_spawn_is_inert_after_game_over() {
        let mut world = create_test_world();
        {
            let mut state = world.resource_mut::<GameState>();
            state.clock = 10.0;
            state.game_over = true;
        }

        try_spawn(&mut world);
        assert_eq!(ball_count(&mut world), 0);
    }

    #[test]
    fn test_swipe_redirects_falling_ball() {
        let mut world = create_test_world();
        let center = world.resource::<Arena>().center();
        let entity = place_ball(&mut world, BallColor::Red, MotionMode::Falling, center);

        world.resource_mut::<Input>().gesture = Some(Gesture {
            start: center,
            end: Position {
                x: center.x + 3.0,
                y: center.y + 3.0,
            },
        });

        swipe_system(&mut world);

        let ball = world.get::<Ball>(entity).expect("ball alive");
        assert_eq!(ball.motion, MotionMode::Travelling(Target::TopRight));

        // The gesture is consumed
        assert!(world.resource::<Input>().gesture.is_none());
    }

    #[test]
    fn test_swipe_cannot_redirect_travelling_ball() {
        let mut world = create_test_world();
        let center = world.resource::<Arena>().center();
        let entity = place_ball(
            &mut world,
            BallColor::Red,
            MotionMode::Travelling(Target::TopRight),
            center,
        );

        world.resource_mut::<Input>().gesture = Some(Gesture {
            start: center,
            end: Position {
                x: center.x - 3.0,
                y: center.y - 3.0,
            },
        });

        swipe_system(&mut world);

        let ball = world.get::<Ball>(entity).expect("ball alive");
        assert_eq!(ball.motion, MotionMode::Travelling(Target::TopRight));
    }

    #[test]
    fn test_swipe_ignored_after_game_over() {
        let mut world = create_test_world();
        world.resource_mut::<GameState>().game_over = true;

        let center = world.resource::<Arena>().center();
        let entity = place_ball(&mut world, BallColor::Red, MotionMode::Falling, center);

        world.resource_mut::<Input>().gesture = Some(Gesture {
            start: center,
            end: Position {
                x: center.x + 3.0,
                y: center.y + 3.0,
            },
        });

        swipe_system(&mut world);

        let ball = world.get::<Ball>(entity).expect("ball alive");
        assert_eq!(ball.motion, MotionMode::Falling);
    }

    #[test]
    fn test_matching_arrival_scores() {
        let mut world = create_test_world();

        handle_arrival(&mut world, BallColor::Red, Target::TopRight);

        let state = world.resource::<GameState>();
        assert_eq!(state.score, 1);
        assert_eq!(state.misses, 0);
        assert!(!state.game_over);
    }

    #[test]
    fn test_mismatched_arrival_costs_a_life() {
        let mut world = create_test_world();

        handle_arrival(&mut world, BallColor::Blue, Target::TopRight);

        let state = world.resource::<GameState>();
        assert_eq!(state.score, 0);
        assert_eq!(state.misses, 1);
        assert!(!state.game_over);
    }

    #[test]
    fn test_game_over_after_max_misses() {
        let mut world = create_test_world();
        let max_misses = world.resource::<GameplayConfig>().max_misses;

        for _ in 0..max_misses {
            handle_arrival(&mut world, BallColor::Blue, Target::TopRight);
        }

        let state = world.resource::<GameState>();
        assert_eq!(state.misses, max_misses);
        assert!(state.game_over);
    }

    #[test]
    fn test_game_over_is_terminal_for_the_judge() {
        let mut world = create_test_world();
        let max_misses = world.resource::<GameplayConfig>().max_misses;

        for _ in 0..max_misses {
            handle_arrival(&mut world, BallColor::Blue, Target::TopRight);
        }

        // Injecting further arrivals mutates nothing
        handle_arrival(&mut world, BallColor::Red, Target::TopRight);
        handle_arrival(&mut world, BallColor::Blue, Target::TopRight);
        handle_miss(
            &mut world,
            Position { x: 0.0, y: 0.0 },
        );

        let state = world.resource::<GameState>();
        assert_eq!(state.score, 0);
        assert_eq!(state.misses, max_misses);
        assert!(state.game_over);
    }

    #[test]
    fn test_tick_moves_falling_ball_down() {
        let mut world = create_test_world();
        let start = Position { x: 30.0, y: 15.0 };
        let entity = place_ball(&mut world, BallColor::Red, MotionMode::Falling, start);

        game_tick_system(&mut world, 0.5);

        let position = world.get::<Position>(entity).expect("ball alive");
        assert_eq!(position.x, start.x);
        assert!((position.y - (start.y - 3.0 * 0.5)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ball_lost_at_the_bottom_is_a_miss() {
        let mut world = create_test_world();
        place_ball(
            &mut world,
            BallColor::Red,
            MotionMode::Falling,
            Position { x: 30.0, y: 0.0 },
        );

        // One long tick carries the ball past the bottom limit
        game_tick_system(&mut world, 1.0);

        let state = world.resource::<GameState>().clone();
        assert_eq!(state.misses, 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_travelling_ball_arrives_and_is_judged() {
        let mut world = create_test_world();
        let arena = world.resource::<Arena>().clone();
        let anchor = arena.anchor(Target::TopRight);

        // Start close to the anchor so one tick completes the trip
        place_ball(
            &mut world,
            BallColor::Red,
            MotionMode::Travelling(Target::TopRight),
            Position {
                x: anchor.x - 0.1,
                y: anchor.y,
            },
        );

        game_tick_system(&mut world, 0.05);

        let state = world.resource::<GameState>().clone();
        assert_eq!(state.score, 1);
        assert_eq!(state.misses, 0);
    }

    #[test]
    fn test_tick_is_inert_after_game_over() {
        let mut world = create_test_world();
        world.resource_mut::<GameState>().game_over = true;

        let start = Position { x: 30.0, y: 15.0 };
        let entity = place_ball(&mut world, BallColor::Red, MotionMode::Falling, start);

        game_tick_system(&mut world, 1.0);

        // The ball neither moved nor despawned, and the clock stood still
        let position = world.get::<Position>(entity).expect("ball alive");
        assert_eq!(*position, start);
        assert_eq!(world.resource::<GameState>().clock, 0.0);
    }

    #[test]
    fn test_at_most_one_ball_at_every_tick_boundary() {
        let mut world = create_test_world();
        world.resource_mut::<GameState>().clock = 5.0;

        for _ in 0..200 {
            game_tick_system(&mut world, 0.1);
            assert!(ball_count(&mut world) <= 1);
        }
    }
}
