//! Last-seen overlay library.
//!
//! Tracks other players' last known positions, notices when they vanish from
//! the world, and builds per-frame beam and label geometry at the spot where
//! they were last seen until the record expires.
//!
//! The crate is organised as ECS pieces run by a `bevy_ecs` schedule:
//! components describe the host world, resources hold tracking state, systems
//! and observers do the work. [`session`] wires them together.

pub mod components;
pub mod demo;
pub mod events;
pub mod resources;
pub mod session;
pub mod systems;
