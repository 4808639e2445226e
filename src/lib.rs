//! Turn-stepped Snake: a deterministic game-state core plus a ratatui front-end.
//!
//! The core ([`game`], [`snake`], [`food`], [`input::Direction`]) has no I/O.
//! [`session`] drives it from input and autoplay timing, and the remaining
//! modules draw it in a terminal.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
