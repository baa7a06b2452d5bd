// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod app;
pub mod board;
pub mod config;
pub mod db;
pub mod protocol;
pub mod roster;
pub mod scrape;
pub mod tui;
