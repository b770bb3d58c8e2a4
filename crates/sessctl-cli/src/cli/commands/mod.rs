pub mod auth;
pub mod config;
pub mod google;
pub mod probe;
pub mod status;
