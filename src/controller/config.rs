//! Movement tunables, loaded from an external RON file.
//!
//! Read once when a character is created and never mutated afterwards.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::{ConfigError, ControllerError};

/// Default location of the movement config file.
pub const MOVEMENT_CONFIG_PATH: &str = "assets/data/player/movement.ron";

/// Shortest crouch transition allowed. Keeps the interpolation fraction finite.
pub const MIN_CROUCH_DURATION: f32 = 1.0e-4;

/// Per-character movement configuration.
///
/// Angles are in degrees. Vectors are `(x, y, z)` tuples so the RON file stays readable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // Feature toggles
    pub can_sprint: bool,
    pub can_jump: bool,
    pub can_crouch: bool,
    pub can_headbob: bool,
    // Speeds
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,
    // Field of view
    pub fov_default: f32,
    pub fov_sprint: f32,
    /// Degrees per second the FOV moves toward its target.
    pub fov_increment: f32,
    // Look
    pub look_speed_x: f32,
    pub look_speed_y: f32,
    /// Maximum upward pitch, as a positive magnitude.
    pub upper_look_limit: f32,
    /// Maximum downward pitch.
    pub lower_look_limit: f32,
    // Jumping
    pub jump_force: f32,
    pub gravity: f32,
    // Crouching
    pub crouching_height: f32,
    pub standing_height: f32,
    pub time_to_crouch: f32,
    pub crouching_center: (f32, f32, f32),
    pub standing_center: (f32, f32, f32),
    /// Length of the upward ray that must be clear before standing up.
    pub headroom_distance: f32,
    // Head bob
    pub walk_bob_speed: f32,
    pub walk_bob_amount: f32,
    pub sprint_bob_speed: f32,
    pub sprint_bob_amount: f32,
    pub crouch_bob_speed: f32,
    pub crouch_bob_amount: f32,
    /// Horizontal velocity component below which the bob does not advance.
    pub bob_deadzone: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            can_sprint: true,
            can_jump: true,
            can_crouch: true,
            can_headbob: true,
            walk_speed: 3.0,
            sprint_speed: 6.0,
            crouch_speed: 1.5,
            fov_default: 60.0,
            fov_sprint: 70.0,
            fov_increment: 5.0,
            look_speed_x: 2.0,
            look_speed_y: 2.0,
            upper_look_limit: 80.0,
            lower_look_limit: 80.0,
            jump_force: 8.0,
            gravity: 30.0,
            crouching_height: 0.5,
            standing_height: 2.0,
            time_to_crouch: 0.25,
            crouching_center: (0.0, 0.5, 0.0),
            standing_center: (0.0, 0.0, 0.0),
            headroom_distance: 1.0,
            walk_bob_speed: 14.0,
            walk_bob_amount: 0.05,
            sprint_bob_speed: 18.0,
            sprint_bob_amount: 0.1,
            crouch_bob_speed: 8.0,
            crouch_bob_amount: 0.025,
            bob_deadzone: 0.1,
        }
    }
}

impl MovementConfig {
    /// Load the movement config from the default path, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from(MOVEMENT_CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded movement config from {}", MOVEMENT_CONFIG_PATH);
                config
            }
            Err(e @ ConfigError::ParseError { .. }) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load a movement config from a specific file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron(&contents).map_err(|details| ConfigError::ParseError {
            path: path.display().to_string(),
            details,
        })
    }

    /// Parse a movement config from RON text.
    pub fn from_ron(contents: &str) -> Result<Self, String> {
        ron::from_str(contents).map_err(|e| e.to_string())
    }

    /// Check the config and repair the values that can be repaired.
    ///
    /// Asymmetric look limits are accepted as-is.
    pub fn validated(mut self) -> Result<Self, ControllerError> {
        let scalars = [
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("crouch_speed", self.crouch_speed),
            ("fov_default", self.fov_default),
            ("fov_sprint", self.fov_sprint),
            ("fov_increment", self.fov_increment),
            ("look_speed_x", self.look_speed_x),
            ("look_speed_y", self.look_speed_y),
            ("upper_look_limit", self.upper_look_limit),
            ("lower_look_limit", self.lower_look_limit),
            ("jump_force", self.jump_force),
            ("gravity", self.gravity),
            ("crouching_height", self.crouching_height),
            ("standing_height", self.standing_height),
            ("time_to_crouch", self.time_to_crouch),
            ("headroom_distance", self.headroom_distance),
            ("walk_bob_speed", self.walk_bob_speed),
            ("walk_bob_amount", self.walk_bob_amount),
            ("sprint_bob_speed", self.sprint_bob_speed),
            ("sprint_bob_amount", self.sprint_bob_amount),
            ("crouch_bob_speed", self.crouch_bob_speed),
            ("crouch_bob_amount", self.crouch_bob_amount),
            ("bob_deadzone", self.bob_deadzone),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ControllerError::NonFinite { field, value });
            }
        }

        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("crouch_speed", self.crouch_speed),
            ("fov_increment", self.fov_increment),
            ("gravity", self.gravity),
            ("crouching_height", self.crouching_height),
            ("standing_height", self.standing_height),
            ("headroom_distance", self.headroom_distance),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ControllerError::Negative { field, value });
            }
        }

        for (field, (x, y, z)) in [
            ("crouching_center", self.crouching_center),
            ("standing_center", self.standing_center),
        ] {
            for value in [x, y, z] {
                if !value.is_finite() {
                    return Err(ControllerError::NonFinite { field, value });
                }
            }
        }

        if self.upper_look_limit < 0.0 || self.lower_look_limit < 0.0 {
            warn!(
                "Negative look limit (upper {}, lower {}); pitch range may be empty",
                self.upper_look_limit, self.lower_look_limit
            );
        }

        if self.time_to_crouch < MIN_CROUCH_DURATION {
            warn!(
                "time_to_crouch {} is too short, clamping to {}",
                self.time_to_crouch, MIN_CROUCH_DURATION
            );
            self.time_to_crouch = MIN_CROUCH_DURATION;
        }

        Ok(self)
    }

    pub fn crouching_center(&self) -> Vec3 {
        let (x, y, z) = self.crouching_center;
        Vec3::new(x, y, z)
    }

    pub fn standing_center(&self) -> Vec3 {
        let (x, y, z) = self.standing_center;
        Vec3::new(x, y, z)
    }
}
