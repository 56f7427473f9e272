//! Player movement, the key, the exit, and the countdown

use crate::camera::Camera;
use crate::grid::{Classification, Grid, IntLocation};
use crate::settings::SessionSettings;
use anyhow::{anyhow, Error};
use log::info;
use serde::{Deserialize, Serialize};

/// Whether a session is still running, and how it ended
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// The player is still looking for the exit
    #[default]
    Playing,
    /// The player reached an exit cell
    Won,
    /// The countdown ran out first
    TimedOut,
}

/// Held controls for one update
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Move along the facing direction
    pub forward: bool,
    /// Move against the facing direction
    pub backward: bool,
    /// Rotate towards negative angles
    pub turn_left: bool,
    /// Rotate towards positive angles
    pub turn_right: bool,
}

/// One run through a maze
#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    camera: Camera,
    settings: SessionSettings,

    has_key: bool,
    time_remaining: f32,
    state: SessionState,
}

impl Session {
    /// Start a session with the camera at its spawn pose.
    ///
    /// Fails if the camera starts inside a cell it could not walk into.
    pub fn new(grid: Grid, camera: Camera, settings: SessionSettings) -> Result<Self, Error> {
        let cell = camera.cell();
        if grid.is_blocking(cell.x, cell.y, false) {
            return Err(anyhow!(
                "Camera spawns inside a blocking cell at ({}, {})",
                cell.x,
                cell.y
            ));
        }

        let mut session = Self {
            time_remaining: settings.time_limit,
            grid,
            camera,
            settings,
            has_key: false,
            state: SessionState::Playing,
        };
        session.enter_cell();
        Ok(session)
    }

    /// The maze; never changes during a session
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// A snapshot of the current camera
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Whether the key has been picked up
    pub fn has_key(&self) -> bool {
        self.has_key
    }

    /// Seconds left on the countdown
    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Whether the session is over, and how
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Advance the session by `dt` seconds with the given controls held.
    ///
    /// Movement is applied one axis at a time, so walking into a wall at an angle slides along
    /// it. Reaching the exit takes priority over the countdown expiring in the same update. Once
    /// the session has ended this does nothing.
    pub fn update(&mut self, intent: Intent, dt: f32) -> SessionState {
        if self.state != SessionState::Playing {
            return self.state;
        }

        let turn = intent.turn_right as i32 - intent.turn_left as i32;
        self.camera.angle += turn as f32 * self.settings.rotation_speed * dt;

        let forward = intent.forward as i32 - intent.backward as i32;
        if forward != 0 {
            let delta = self.camera.direction() * (forward as f32 * self.settings.move_speed * dt);
            let position = &mut self.camera.position;

            let next_x = position.x + delta.x;
            let cell = IntLocation::containing(next_x, position.y);
            if !self.grid.is_blocking(cell.x, cell.y, self.has_key) {
                position.x = next_x;
            }

            let next_y = position.y + delta.y;
            let cell = IntLocation::containing(position.x, next_y);
            if !self.grid.is_blocking(cell.x, cell.y, self.has_key) {
                position.y = next_y;
            }
        }

        self.enter_cell();

        if self.state == SessionState::Playing {
            self.time_remaining -= dt;
            if self.time_remaining <= 0.0 {
                self.time_remaining = 0.0;
                self.state = SessionState::TimedOut;
                info!("Time ran out");
            }
        }

        self.state
    }

    /// React to whatever is in the camera's current cell
    fn enter_cell(&mut self) {
        let cell = self.camera.cell();
        match self.grid.classify(cell.x, cell.y) {
            Classification::Key if !self.has_key => {
                self.has_key = true;
                info!("Picked up the key at ({}, {})", cell.x, cell.y);
            }
            Classification::Exit => {
                self.state = SessionState::Won;
                info!(
                    "Reached the exit at ({}, {}) with {:.1}s left",
                    cell.x, cell.y, self.time_remaining
                );
            }
            _ => {}
        }
    }
}
