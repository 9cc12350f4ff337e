//! # Connect Four
//!
//! A Connect Four rules engine with two front ends: a terminal UI built with
//! Ratatui and a plain line-based mode for scripting.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, engine state machine
//! - [`ui`] — Front ends that call into the engine
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
