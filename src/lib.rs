//! chatview — presentation core of a chat client.
//!
//! Resolves the one-line reply preview for a message and gates crash and
//! analytics reporting behind the user's preferences and the build variant.
//! Rendering and OS integration stay with the host app.
//!
//! See `DESIGN.md` for how the pieces fit together.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;
pub mod state;
pub mod types;

pub mod preview;
pub mod settings;
pub mod telemetry;
