pub mod app;
pub mod config;
pub mod error;
pub mod generation;
pub mod photos;
pub mod state;
pub mod storage;
pub mod users;
pub mod wizard;
