use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::round::RoundSnapshot;
use crate::session::actor::{SessionCommand, SessionEvent};

#[derive(Clone, Debug)]
pub struct SessionClient {
    pub(super) session_tx: Sender<SessionCommand>,
}

impl SessionClient {
    pub async fn connect_player(&self) -> Result<RoundStateReceiver, Error> {
        let (tx, rx): (OneshotSender<SessionEvent>, OneshotReceiver<SessionEvent>) =
            oneshot::channel();

        self.session_tx
            .send(SessionCommand::ConnectPlayer { response_tx: tx })
            .await
            // The session is still registered in the SessionRegistry but its actor already stopped
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "The Session is not alive. Can't connect the Player. Error: '{error}'"
                ))
            })?;

        match rx.await {
            Ok(SessionEvent::PlayerConnected { broadcast_rx }) => {
                Ok(RoundStateReceiver { broadcast_rx })
            }
            Ok(SessionEvent::Error { error }) => Err(error),
            Err(_) => Err(Error::log_and_create_internal(
                "Player sent a SessionCommand::ConnectPlayer to Session, but Session channel died.",
            )),
        }
    }

    pub async fn disconnect_player(&self) -> Result<(), Error> {
        self.send_command(SessionCommand::DisconnectPlayer, "DisconnectPlayer")
            .await
    }

    pub async fn change_input(&self, text: &str) -> Result<(), Error> {
        self.send_command(
            SessionCommand::ChangeInput {
                text: text.to_string(),
            },
            "ChangeInput",
        )
        .await
    }

    pub async fn request_reset(&self) -> Result<(), Error> {
        self.send_command(SessionCommand::RequestReset, "RequestReset")
            .await
    }

    async fn send_command(&self, command: SessionCommand, name: &str) -> Result<(), Error> {
        self.session_tx.send(command).await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Tried to send SessionCommand::{name} but SessionActor is not listening. Error: {error}."
            ))
        })
    }
}

pub struct RoundStateReceiver {
    broadcast_rx: broadcast::Receiver<RoundSnapshot>,
}

impl RoundStateReceiver {
    /// Returns the next round state. A receiver that fell behind skips to the newest one.
    pub async fn next(&mut self) -> Result<RoundSnapshot, Error> {
        loop {
            match self.broadcast_rx.recv().await {
                Ok(snapshot) => return Ok(snapshot),
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Player fell behind the Session and skipped {skipped} round states.");
                    if let Some(snapshot) = self.newest_buffered() {
                        return Ok(snapshot);
                    }
                }
                Err(RecvError::Closed) => {
                    return Err(Error::log_and_create_internal(
                        "The broadcast channel with the Session has been closed.",
                    ))
                }
            }
        }
    }

    fn newest_buffered(&mut self) -> Option<RoundSnapshot> {
        let mut newest = None;
        loop {
            match self.broadcast_rx.try_recv() {
                Ok(snapshot) => newest = Some(snapshot),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty | TryRecvError::Closed) => return newest,
            }
        }
    }

    #[cfg(test)]
    pub fn try_next(&mut self) -> Option<RoundSnapshot> {
        self.broadcast_rx.try_recv().ok()
    }
}
