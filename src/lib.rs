pub mod config;
pub mod errors;
pub mod generator;
pub mod model;
pub mod roster;
pub mod session;
pub mod ui;
