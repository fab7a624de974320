pub mod actor;
pub mod actor_client;
pub mod countdown;
