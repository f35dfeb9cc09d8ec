#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use ratatui::layout::Rect;
use std::error;

use crate::Time;
use crate::components::{Arena, Ball, GameState, Input, ScreenShake};
use crate::config::CONFIG;
use crate::menu::MenuRenderer;
use crate::menu_types::Menu;
use crate::particles;
use crate::sound::AudioState;
use crate::systems::spawn_ball;

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
    pub menu_renderer: MenuRenderer,
    /// Inner rect of the play area, refreshed on every draw, used to map
    /// mouse cells back to world coordinates.
    pub play_area: Option<Rect>,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self::with_audio(AudioState::new())
    }

    /// Same as `new` but without an audio thread, for tests.
    #[must_use]
    pub fn new_silent() -> Self {
        Self::with_audio(AudioState::disconnected())
    }

    fn with_audio(audio: AudioState) -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(audio);
        world.insert_resource(Input::default());
        world.insert_resource(GameState::default());
        world.insert_resource(ScreenShake::default());
        world.insert_resource(Arena::default());
        world.insert_resource(CONFIG.read().unwrap().gameplay.clone());

        let mut app = Self {
            world,
            should_quit: false,
            menu: Menu::new(),
            menu_renderer: MenuRenderer::new(),
            play_area: None,
        };

        // First ball is ready the moment the player enters the game
        spawn_ball(&mut app.world);

        app
    }

    /// Restarts the session: score, misses and the game-over flag return to
    /// their initial values, the live ball is destroyed unconditionally, and
    /// a fresh ball spawns. Valid from any state.
    pub fn reset(&mut self) {
        let balls: Vec<Entity> = {
            let mut query = self.world.query_filtered::<Entity, With<Ball>>();
            query.iter(&self.world).collect()
        };
        for entity in balls {
            self.world.despawn(entity);
        }
        particles::clear_particles(&mut self.world);

        self.world.resource_mut::<GameState>().reset();
        self.world.insert_resource(Input::default());
        self.world.insert_resource(ScreenShake::default());

        // Pick up config edits made between sessions
        self.world
            .insert_resource(CONFIG.read().unwrap().gameplay.clone());

        self.world.resource::<AudioState>().resume_music();

        spawn_ball(&mut self.world);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
