//! ECS components describing the host world.
//!
//! The host mirrors each visible player into one entity carrying all three
//! components; the local player additionally carries
//! [`LocalViewer`](player::LocalViewer).
//!
//! Submodules overview:
//! - [`dimension`] – world/dimension identifier of an entity
//! - [`player`] – stable player id, display name, local viewer marker
//! - [`worldposition`] – double-precision world position

pub mod dimension;
pub mod player;
pub mod worldposition;
