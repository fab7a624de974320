use serde::{Deserialize, Serialize};

use crate::round::RoundSnapshot;

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum WsMessageIn {
    InputChanged { text: String },
    ResetRequested,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum WsMessageOut {
    #[serde(rename_all = "camelCase")]
    RoundState {
        state: String,
        score: u32,
        remaining_seconds: u8,
        term: String,
        translation: String,
        input: String,
        is_missed: bool,
        rank_message: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Error {
        error_type: String,
        title: String,
        detail: String,
    },
}

impl From<RoundSnapshot> for WsMessageOut {
    fn from(snapshot: RoundSnapshot) -> Self {
        WsMessageOut::RoundState {
            state: snapshot.state.to_string(),
            score: snapshot.score,
            remaining_seconds: snapshot.remaining_seconds,
            term: snapshot.word.term().to_string(),
            translation: snapshot.word.translation().to_string(),
            rank_message: snapshot.rank().map(|rank| rank.message().to_string()),
            input: snapshot.input,
            is_missed: snapshot.is_missed,
        }
    }
}
