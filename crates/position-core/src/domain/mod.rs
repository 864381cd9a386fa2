//! Domain Layer
//!
//! Position entities as exchanged with the backend.
//! This layer has NO external dependencies (except serde for serialization).

mod position;
mod wire;

pub use position::{Position, PositionDraft};
