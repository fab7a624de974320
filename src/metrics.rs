use lazy_static::lazy_static;
use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_SESSIONS: IntGauge =
        IntGauge::new("wordrush_active_sessions", "Active sessions").expect("metric cannot be created");
    pub static ref CONNECTED_PLAYERS: IntGauge =
        IntGauge::new("wordrush_connected_players", "Amount of players connected")
            .expect("metric cannot be created");
    pub static ref WORDS_MATCHED: IntCounter =
        IntCounter::new("wordrush_words_matched_total", "Words typed correctly")
            .expect("metric cannot be created");
    pub static ref ROUNDS_FINISHED: IntCounter =
        IntCounter::new("wordrush_rounds_finished_total", "Rounds that ran out of time")
            .expect("metric cannot be created");
}

pub fn register_metrics() {
    REGISTRY
        .register(Box::new(ACTIVE_SESSIONS.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(CONNECTED_PLAYERS.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(WORDS_MATCHED.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(ROUNDS_FINISHED.clone()))
        .expect("collector cannot be registered");
}
