//! Clickoz animated background and site tools.
//!
//! A pooled particle field that bursts from a point near the top of the
//! window, settles into a slow swirling drift and is tinted by the current
//! theme accent.  The [`tools`] and [`catalog`] modules hold the text
//! utilities behind the `clickoz-tools` binary, whose argument parsing
//! and dispatch live in [`cli`].

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod frame;
pub mod graphics;
pub mod particles;
pub mod rendering;
pub mod scheduler;
pub mod theme;
pub mod tools;
pub mod viewport;
