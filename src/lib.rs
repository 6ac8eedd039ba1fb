// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod capture;
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod file;
pub mod params;
pub mod progress;
pub mod runner;
pub mod store;
pub mod ui;
