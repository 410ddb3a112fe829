//! Update/render loop and key dispatch.
//!
//! One iteration of [`World::render`]:
//!
//! 1. start background music if configured and not already playing
//! 2. [`World::update`]: advance live entities, purge dead ones, rebuild
//!    grid and display
//! 3. hand the display to the output collaborator
//! 4. bump the render cycle
//! 5. read one key and dispatch it
//!
//! [`World::wait`] runs steps 1-4 only.

use tdtbge_types::QUIT_KEY;

use crate::error::Result;
use crate::world::World;

/// Outcome of one interactive iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    /// The quit key was pressed; no controller ran.
    Quit,
}

impl World {
    /// Render one frame, then block for a key and dispatch it.
    pub fn render(&mut self) -> Result<Tick> {
        self.render_frame()?;
        self.listen()
    }

    /// Render one frame without reading input.
    pub fn render_frame(&mut self) -> Result<()> {
        if let Some(clip) = self.config().background_music.clone() {
            if !self.audio.is_playing(&clip) {
                log::info!("starting background music {}", clip);
                self.audio.play_music(&clip);
            }
        }

        self.update()?;
        self.output.present(&self.display)?;
        self.render_cycle += 1;
        Ok(())
    }

    /// Render `frames` frames back to back without consuming input.
    pub fn wait(&mut self, frames: u32) -> Result<()> {
        for _ in 0..frames {
            self.render_frame()?;
        }
        Ok(())
    }

    /// Block for one key from the input collaborator and act on it.
    pub fn listen(&mut self) -> Result<Tick> {
        let key = self.input.read_key()?;
        self.press(key)
    }

    /// Act on `key` as if it had just been read.
    pub fn press(&mut self, key: char) -> Result<Tick> {
        self.note(&format!("key pressed: {}", key.escape_default()))?;
        if key == QUIT_KEY {
            log::info!("quit key pressed in world {}", self.title());
            return Ok(Tick::Quit);
        }
        self.dispatch(key)?;
        Ok(Tick::Continue)
    }

    /// Run every controller bound to `key`.
    ///
    /// The world-level controller runs first, then each entity's controller in
    /// insertion order. An entity is skipped if it is dead or gone by the time
    /// its turn comes. Every matching controller runs; none can stop the rest.
    pub fn dispatch(&mut self, key: char) -> Result<()> {
        if let Some(controller) = self.controllers.get(&key).cloned() {
            log::trace!("world controller '{}'", key);
            controller(self)?;
        }

        for id in self.ids() {
            let controller = match self.get(id) {
                Some(entity) if entity.is_alive() => entity.controller(key),
                _ => None,
            };
            if let Some(controller) = controller {
                log::trace!("entity {} controller '{}'", id, key);
                controller(id, self)?;
            }
        }
        Ok(())
    }

    /// Render and dispatch until the quit key is pressed.
    pub fn run(&mut self) -> Result<()> {
        while self.render()? == Tick::Continue {}
        Ok(())
    }
}
