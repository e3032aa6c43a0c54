//! Event types and observers used by the overlay.
//!
//! Submodules:
//! - [`notice`] – offline notices delivered to the viewer
//! - [`switchdebug`] – toggle the viewer's debug overlay on/off
//! - [`wentstale`] – active -> stale transitions and the notice observer
pub mod notice;
pub mod switchdebug;
pub mod wentstale;
