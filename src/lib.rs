pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod layout;
pub mod logging;
pub mod perf;
pub mod system;
pub mod ui;
