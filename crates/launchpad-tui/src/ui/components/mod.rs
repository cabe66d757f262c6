//! Reusable UI components

pub mod toast;
pub mod progress;
pub mod tile;
