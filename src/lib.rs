//! Roadmap planning board.
//!
//! Projects are laid out on a single-year timeline, packed into rows so bars never
//! overlap, and can be moved by drag gestures. Boards round-trip through CSV and
//! can be reordered by an external AI planning service.

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod sequencing;
pub mod timeline;
pub mod view;
