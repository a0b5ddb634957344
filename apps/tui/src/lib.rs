//! Cmdboard terminal board.
//!
//! A 4×4 grid of command slots over the `cmdboard-core` controller, paged
//! five times. Commands are edited in place and run with Enter or F1–F12.

pub mod app;
pub mod board_view;
pub mod keys;
pub mod theme;
pub mod ui;
