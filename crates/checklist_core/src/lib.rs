pub mod config;
pub mod error;
pub mod model;
pub mod reducer;
pub mod session;
pub mod storage;
