//! Overlay systems.
//!
//! Submodules overview
//! - [`geometry`] – build beam and label geometry for stale records
//! - [`input`] – map Raylib keyboard state to viewer movement (feature `viewer`)
//! - [`notice`] – rotate the offline notice queue and keep the on-screen log
//! - [`reconcile`] – rate-limited record maintenance
//! - [`snapshot`] – read-only view of visible players and the local viewer
//! - [`render`] – present frame geometry and notices with Raylib (feature `viewer`)
//! - [`time`] – advance the session clock

pub mod geometry;
#[cfg(feature = "viewer")]
pub mod input;
pub mod notice;
pub mod reconcile;
#[cfg(feature = "viewer")]
pub mod render;
pub mod snapshot;
pub mod time;
