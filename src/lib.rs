#![allow(clippy::collapsible_if)]

pub mod board;
pub mod config;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod events;
pub mod logging;
pub mod players;
pub mod report;
pub mod state;
pub mod strategy;
pub mod view;
pub mod wire;
