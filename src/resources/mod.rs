//! ECS resources made available to systems.
//!
//! Overview
//! - `debugmode` – presence toggles the viewer's debug overlay
//! - `framegeometry` – beam vertices and label requests built this frame
//! - `input` – per-frame movement intent of the local viewer
//! - `noticelog` – offline notices currently shown by the viewer
//! - `reconcileclock` – rate limit state of the reconciler
//! - `recordstore` – active and stale tracking records
//! - `trackerconfig` – fixed radius, timing and appearance settings
//! - `viewcamera` – camera position and orientation
//! - `worldtime` – monotonic session clock in milliseconds
pub mod debugmode;
pub mod framegeometry;
pub mod input;
pub mod noticelog;
pub mod reconcileclock;
pub mod recordstore;
pub mod trackerconfig;
pub mod viewcamera;
pub mod worldtime;
