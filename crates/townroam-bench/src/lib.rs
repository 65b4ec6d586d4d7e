//! Headless benchmark harness: walks a player through a streamed town and
//! times each world tick.

pub mod report;
pub mod runner;
pub mod scenes;
