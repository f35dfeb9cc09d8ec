#[cfg(test)]
mod tests {
    use crate::components::TargetMode;
    use crate::config::{Config, GameplayConfig};
    use crate::game;

    #[test]
    fn test_defaults_match_named_constants() {
        let config = GameplayConfig::default();
        assert_eq!(config.base_fall_speed, game::BASE_FALL_SPEED);
        assert_eq!(config.max_fall_speed, game::MAX_FALL_SPEED);
        assert_eq!(config.speed_saturation_score, game::SPEED_SATURATION_SCORE);
        assert_eq!(config.color_unlock_threshold, game::COLOR_UNLOCK_THRESHOLD);
        assert_eq!(config.max_misses, game::MAX_MISSES);
        assert!(config.require_ball_near_center);
    }

    #[test]
    fn test_fall_speed_is_monotonic() {
        let config = GameplayConfig::default();
        let mut previous = config.fall_speed(0);
        for score in 1..200 {
            let speed = config.fall_speed(score);
            assert!(
                speed >= previous,
                "fall speed dropped between score {} and {score}",
                score - 1
            );
            previous = speed;
        }
    }

    #[test]
    fn test_spawn_interval_is_monotonic() {
        let config = GameplayConfig::default();
        let mut previous = config.spawn_interval(0);
        for score in 1..200 {
            let interval = config.spawn_interval(score);
            assert!(
                interval <= previous,
                "spawn interval grew between score {} and {score}",
                score - 1
            );
            previous = interval;
        }
    }

    #[test]
    fn test_fall_speed_is_clamped() {
        let config = GameplayConfig::default();
        assert_eq!(config.fall_speed(0), config.base_fall_speed);
        // Far beyond the saturation score the curve stays flat
        for score in [
            config.speed_saturation_score,
            config.speed_saturation_score * 10,
            u32::MAX,
        ] {
            let speed = config.fall_speed(score);
            assert!(speed >= config.base_fall_speed);
            assert!(speed <= config.max_fall_speed);
            assert_eq!(speed, config.max_fall_speed);
        }
    }

    #[test]
    fn test_spawn_interval_is_clamped() {
        let config = GameplayConfig::default();
        assert_eq!(config.spawn_interval(0), config.base_spawn_interval);
        assert_eq!(config.spawn_interval(u32::MAX), config.min_spawn_interval);
    }

    #[test]
    fn test_unlocked_color_count_is_a_step_function() {
        let config = GameplayConfig::default();
        let threshold = config.color_unlock_threshold;

        for score in 0..threshold {
            assert_eq!(config.unlocked_color_count(score), 4);
        }
        for score in threshold..threshold + 50 {
            assert_eq!(config.unlocked_color_count(score), 6);
        }
    }

    #[test]
    fn test_target_mode_switches_with_colors() {
        let config = GameplayConfig::default();
        let threshold = config.color_unlock_threshold;

        assert_eq!(config.target_mode(0), TargetMode::FourWay);
        assert_eq!(config.target_mode(threshold - 1), TargetMode::FourWay);
        assert_eq!(config.target_mode(threshold), TargetMode::SixWay);
        assert_eq!(config.target_mode(threshold + 100), TargetMode::SixWay);
    }

    #[test]
    fn test_zero_saturation_score_saturates_immediately() {
        let config = GameplayConfig {
            speed_saturation_score: 0,
            ..GameplayConfig::default()
        };
        assert_eq!(config.fall_speed(0), config.max_fall_speed);
        assert_eq!(config.spawn_interval(0), config.min_spawn_interval);
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).expect("serialize");
        let parsed: Config = toml::from_str(&serialized).expect("parse");
        assert_eq!(parsed.gameplay, config.gameplay);
    }

    #[test]
    fn test_loader_reads_overrides_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r"
            [gameplay]
            color_unlock_threshold = 40
            require_ball_near_center = false
            ",
        )
        .expect("write config");

        // Safety: the only test touching this environment variable
        unsafe {
            std::env::set_var("COLORFALL_CONFIG", &path);
        }
        let loaded = crate::config::loader::load_config_from_file().expect("load");
        unsafe {
            std::env::remove_var("COLORFALL_CONFIG");
        }

        assert_eq!(loaded.gameplay.color_unlock_threshold, 40);
        assert!(!loaded.gameplay.require_ball_near_center);
        assert_eq!(loaded.gameplay.max_misses, game::MAX_MISSES);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: Config = toml::from_str(
            r"
            [gameplay]
            color_unlock_threshold = 40
            max_misses = 5
            ",
        )
        .expect("parse");

        assert_eq!(parsed.gameplay.color_unlock_threshold, 40);
        assert_eq!(parsed.gameplay.max_misses, 5);
        // Untouched fields keep their defaults
        assert_eq!(parsed.gameplay.base_fall_speed, game::BASE_FALL_SPEED);
        assert!(parsed.gameplay.require_ball_near_center);
    }
}
