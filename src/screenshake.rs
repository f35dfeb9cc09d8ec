#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from f32 to i16 since shake offsets are always a handful of cells
    clippy::cast_possible_truncation
)]

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::ScreenShake;

/// Triggers a screen shake effect with the specified intensity and duration
pub fn trigger_screen_shake(world: &mut World, intensity: f32, duration: f32) {
    let mut screen_shake = world.resource_mut::<ScreenShake>();
    screen_shake.intensity = intensity;
    screen_shake.duration = duration;
    screen_shake.is_active = true;
    trace!("Screen shake triggered with intensity {intensity}");
}

/// Updates the screen shake state based on elapsed time
pub fn update_screen_shake(world: &mut World, delta_seconds: f32) {
    let mut screen_shake = world.resource_mut::<ScreenShake>();
    if screen_shake.duration > 0.0 {
        screen_shake.duration -= delta_seconds;

        if screen_shake.duration <= 0.0 {
            // Reset shake when duration expires
            screen_shake.intensity = 0.0;
            screen_shake.current_offset = (0, 0);
            screen_shake.is_active = false;
        } else {
            // Random offset, fading out with the remaining duration
            let intensity = screen_shake.intensity * (screen_shake.duration / 0.3);
            let max_offset = ((intensity * 2.0) as i16).max(1);

            screen_shake.current_offset = (
                fastrand::i16(0..=max_offset) - max_offset / 2,
                fastrand::i16(0..=max_offset) - max_offset / 2,
            );
        }
    }
}
