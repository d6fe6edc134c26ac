#![forbid(unsafe_code)]

//! Core: pixel geometry, grid configuration, and canonical input types.

pub mod config;
pub mod event;
pub mod geometry;

pub use config::{ConfigError, GridConfig, GridGeometry, HoverBehavior, LayoutMode};
pub use event::{ActionCodeError, Direction, GridEvent, ScrollKeyAction, ScrollState};
pub use geometry::{Rect, Size};
