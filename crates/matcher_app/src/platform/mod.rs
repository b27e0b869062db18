pub mod config;
pub mod controller;
pub mod document;
pub mod effects;
pub mod file_source;
pub mod logging;
pub mod ui;
