//! Core library for sessctl: session lifecycle, durable session storage,
//! the auth API client, and the state-to-view reconciliation.

pub mod api;
pub mod callback;
pub mod config;
pub mod probe;
pub mod session;
pub mod store;
pub mod view;
