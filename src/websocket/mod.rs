pub mod message;

use axum::extract::ws::{Message, WebSocket};
use serde::Serialize;

use crate::error::Error;
use message::{WsMessageIn, WsMessageOut};

pub async fn send_error(websocket: &mut WebSocket, error: &Error) {
    // Errors are reported best effort, the caller decides whether the socket stays open
    if let Err(send_failure) = send_message(websocket, &error_to_ws_error(error)).await {
        log::warn!("Could not send an error to the player. Error: '{error}', SendError: '{send_failure}'.");
    }
}

pub async fn close(websocket: WebSocket) {
    if let Err(error) = websocket.close().await {
        log::error!("Could not close WebSocket. Error: '{error}'.")
    }
}

pub fn parse_message(message: &str) -> Result<WsMessageIn, Error> {
    serde_json::from_str(message)
        .map_err(|error| Error::UnprocessableMessage(error.to_string(), message.to_string()))
}

pub async fn send_message<T>(websocket: &mut WebSocket, value: &T) -> Result<(), Error>
where
    T: ?Sized + Serialize,
{
    let message = serde_json::to_string(value).map_err(|error| {
        Error::log_and_create_internal(&format!(
            "Could not serialize the message. Error: '{error}'."
        ))
    })?;

    websocket
        .send(Message::Text(message))
        .await
        .map_err(|error| Error::WebsocketClosed(error.to_string()))
}

fn error_to_ws_error(error: &Error) -> WsMessageOut {
    let (error_type, title) = match error {
        Error::SessionDoesNotExist(_) => ("SESSION_DOES_NOT_EXIST", "The session does not exist"),
        Error::PlayerAlreadyConnected(_) => (
            "PLAYER_ALREADY_CONNECTED",
            "A player is already connected to the session",
        ),
        Error::UnprocessableMessage(_, _) => {
            ("UNPROCESSABLE_MESSAGE", "The message could not be processed")
        }
        Error::WebsocketClosed(_) => ("WEBSOCKET_CLOSED", "The player websocket is closed"),
        Error::EmptyCatalog
        | Error::MalformedCatalogLine(_, _)
        | Error::UnreadableCatalog(_, _)
        | Error::Internal(_) => ("INTERNAL_SERVER", "Internal Server error"),
    };

    WsMessageOut::Error {
        error_type: error_type.to_string(),
        title: title.to_string(),
        detail: error.to_string(),
    }
}
