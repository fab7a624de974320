use axum::extract::ws::{Message, WebSocket};
use tokio::select;

use crate::error::Error;
use crate::metrics::CONNECTED_PLAYERS;
use crate::round::RoundSnapshot;
use crate::session::actor_client::{RoundStateReceiver, SessionClient};
use crate::websocket::message::{WsMessageIn, WsMessageOut};
use crate::websocket::{close, parse_message, send_error, send_message};

/// Bridges one player WebSocket with its Session actor.
pub struct PlayerActor {
    session: SessionClient,
    round_state_receiver: RoundStateReceiver,
    websocket: WebSocket,
}

impl PlayerActor {
    pub async fn create(session: SessionClient, mut websocket: WebSocket) {
        match session.connect_player().await {
            Ok(round_state_receiver) => {
                PlayerActor {
                    session,
                    round_state_receiver,
                    websocket,
                }
                .start()
                .await
            }
            Err(error) => {
                send_error(&mut websocket, &error).await;
                close(websocket).await;
            }
        }
    }

    async fn start(mut self) {
        CONNECTED_PLAYERS.inc();

        loop {
            select! {
                round_state = self.round_state_receiver.next() => {
                    if let Err(error) = self.receive_round_state(round_state).await {
                        send_error(&mut self.websocket, &error).await;
                        if error.is_fatal_error_and_should_finalize_flow() {
                            break;
                        }
                    }
                },
                websocket_message = self.websocket.recv() => {
                    if let Err(error) = self.receive_websocket_message(websocket_message).await {
                        send_error(&mut self.websocket, &error).await;
                        if error.is_fatal_error_and_should_finalize_flow() {
                            break;
                        }
                    }
                },
            }
        }

        let _ = self.session.disconnect_player().await;
        close(self.websocket).await;
        CONNECTED_PLAYERS.dec();
    }

    async fn receive_round_state(
        &mut self,
        round_state: Result<RoundSnapshot, Error>,
    ) -> Result<(), Error> {
        let message: WsMessageOut = round_state?.into();
        send_message(&mut self.websocket, &message).await
    }

    async fn receive_websocket_message(
        &mut self,
        websocket_message: Option<Result<Message, axum::Error>>,
    ) -> Result<(), Error> {
        match websocket_message {
            Some(Ok(Message::Text(text))) => match parse_message(&text)? {
                WsMessageIn::InputChanged { text } => self.session.change_input(&text).await,
                WsMessageIn::ResetRequested => self.session.request_reset().await,
            },
            Some(Ok(Message::Close(_))) | None => Err(Error::WebsocketClosed(
                "The player closed the connection.".to_string(),
            )),
            Some(Ok(_)) => Ok(()),
            Some(Err(error)) => Err(Error::WebsocketClosed(error.to_string())),
        }
    }
}
