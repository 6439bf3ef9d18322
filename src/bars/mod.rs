pub mod bins;
pub mod config;
pub mod context;
pub mod error;
pub mod layout;
pub mod scale;
pub mod shared;
pub mod update;
