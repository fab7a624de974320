use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

// Each input is answered right away, only countdown ticks can come in between
const MAX_SKIPPED_MESSAGES: usize = 120;

pub struct TestPlayer {
    pub tx: SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>,
    pub rx: SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl TestPlayer {
    pub fn new(websocket: WebSocketStream<MaybeTlsStream<TcpStream>>) -> Self {
        let (tx, rx) = websocket.split();
        TestPlayer { tx, rx }
    }

    pub async fn receive_round_state(&mut self) -> Result<RoundState, String> {
        match self.rx.next().await {
            Some(Ok(message)) => {
                match serde_json::from_str(message.to_text().expect("Message was not a text")) {
                    Ok(WsMessageIn::RoundState(state)) => Ok(state),
                    Ok(WsMessageIn::Error {
                        error_type,
                        title,
                        detail,
                    }) => {
                        assert!(!title.is_empty());
                        assert!(!detail.is_empty());
                        Err(error_type)
                    }
                    Err(error) => Err(format!("Could not parse the message. Error: '{error}'.")),
                }
            }
            Some(Err(error)) => Err(format!("Websocket returned an error {error}")),
            None => Err("Websocket closed before expected.".to_string()),
        }
    }

    /// Skips countdown updates until a state satisfying the predicate arrives.
    pub async fn receive_round_state_where<F>(&mut self, predicate: F) -> RoundState
    where
        F: Fn(&RoundState) -> bool,
    {
        for _ in 0..MAX_SKIPPED_MESSAGES {
            let state = self
                .receive_round_state()
                .await
                .expect("Expected a round state.");
            if predicate(&state) {
                return state;
            }
        }
        panic!("The expected round state never arrived.");
    }

    pub async fn send_input(&mut self, text: &str) {
        self.send_text_message(WsMessageOut::InputChanged {
            text: text.to_string(),
        })
        .await;
    }

    pub async fn type_text(&mut self, text: &str) -> RoundState {
        self.send_input(text).await;
        self.receive_round_state_where(|state| state.input == text)
            .await
    }

    pub async fn request_reset(&mut self) -> RoundState {
        self.send_text_message(WsMessageOut::ResetRequested).await;
        self.receive_round_state_where(|state| state.state == "Idle")
            .await
    }

    pub async fn send_raw_text(&mut self, text: &str) {
        self.tx
            .send(Message::Text(text.to_string()))
            .await
            .expect("Could not send the message.");
    }

    pub async fn close(mut self) {
        let _ = self.tx.close().await;
    }

    async fn send_text_message(&mut self, message: WsMessageOut) {
        let message = serde_json::to_string(&message).expect("Could not serialize the message.");
        self.send_raw_text(&message).await;
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RoundState {
    pub state: String,
    pub score: u32,
    pub remaining_seconds: u8,
    pub term: String,
    pub translation: String,
    pub input: String,
    pub is_missed: bool,
    pub rank_message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
enum WsMessageIn {
    RoundState(RoundState),
    #[serde(rename_all = "camelCase")]
    Error {
        error_type: String,
        title: String,
        detail: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
enum WsMessageOut {
    InputChanged { text: String },
    ResetRequested,
}
