//! Built-in game content.

pub mod standard;
