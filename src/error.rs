//! Crate error type
//!
//! The simulation itself has no failure paths; only asset loading through the
//! host can fail, and that happens while a level is being built.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load image `{path}`: {reason}")]
    ImageLoad { path: String, reason: String },

    #[error("failed to load sound `{path}`: {reason}")]
    SoundLoad { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
