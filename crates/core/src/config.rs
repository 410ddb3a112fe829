//! World configuration.
//!
//! ```
//! use tdtbge_core::WorldConfig;
//!
//! let config: WorldConfig = serde_json::from_str(r#"{ "debug": true }"#).unwrap();
//! assert!(config.debug);
//! assert_eq!(config.background_music, None);
//! ```

use serde::{Deserialize, Serialize};

/// Options recognised by [`World::new`](crate::World::new).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Mirror diagnostics to the output's side channel and keep old frames
    /// on screen.
    pub debug: bool,
    /// Clip played in a loop while nothing else holds the music channel.
    pub background_music: Option<String>,
}

impl WorldConfig {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_background_music(mut self, clip: impl Into<String>) -> Self {
        self.background_music = Some(clip.into());
        self
    }
}
