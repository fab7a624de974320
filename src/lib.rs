pub mod catalog;
pub mod config;
pub mod error;
pub mod metrics;
pub mod player;
pub mod round;
pub mod routes;
pub mod session;
pub mod session_registry;
pub mod startup;
pub mod websocket;
