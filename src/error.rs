use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("The session does not exist. SessionId: '{0}'.")]
    SessionDoesNotExist(String),
    #[error("A player is already connected to the session. SessionId: '{0}'.")]
    PlayerAlreadyConnected(String),
    #[error("The word catalog does not contain any word pair.")]
    EmptyCatalog,
    #[error("Malformed word catalog line, expected 'term<TAB>translation'. Line: '{0}', Content: '{1}'.")]
    MalformedCatalogLine(usize, String),
    #[error("Could not read the word catalog. File: '{0}', Error: '{1}'.")]
    UnreadableCatalog(String, String),
    #[error("Internal Error. Error: '{0}'.")]
    Internal(String),
    #[error("The websocket with the player is closed. Reason: '{0}'.")]
    WebsocketClosed(String),
    #[error("Received a bad formatted message. Message: '{1}', Error: '{0}'.")]
    UnprocessableMessage(String, String),
}

impl Error {
    pub fn is_fatal_error_and_should_finalize_flow(&self) -> bool {
        match self {
            Error::UnprocessableMessage(_, _) => false,
            Error::SessionDoesNotExist(_)
            | Error::PlayerAlreadyConnected(_)
            | Error::EmptyCatalog
            | Error::MalformedCatalogLine(_, _)
            | Error::UnreadableCatalog(_, _)
            | Error::Internal(_)
            | Error::WebsocketClosed(_) => true,
        }
    }

    pub fn log_and_create_internal(message: &str) -> Error {
        log::error!("{message}");
        Error::Internal(message.to_string())
    }
}
