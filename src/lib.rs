// Side-scrolling terminal platformer.
//
// - `entities`: world model data (entities, session state, commands)
// - `config`: session configuration and validation
// - `compute`: initialisation, input commands, and the per-tick update
// - `view`: projection of the world into a character grid

pub mod compute;
pub mod config;
pub mod entities;
pub mod view;

pub use config::{Config, ConfigError, Scoring};
