use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::SendError;
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::sync::{
    broadcast, mpsc,
    mpsc::{Receiver, Sender},
};
use tokio::time::{self, Instant};
use tokio::select;

use crate::catalog::Catalog;
use crate::config::GameSettings;
use crate::error::Error;
use crate::metrics::{ROUNDS_FINISHED, WORDS_MATCHED};
use crate::round::round_fsm::RoundFsmState;
use crate::round::{Round, RoundEvent, RoundSnapshot};
use crate::session::actor_client::SessionClient;
use crate::session::countdown::{self, Countdown};
use crate::session_registry::actor::SessionRegistryClient;
use crate::session_registry::CloseReason;

pub struct SessionActor {
    id: String,
    round: Round,
    countdown: Option<Countdown>,
    is_player_connected: bool,
    session_rx: Receiver<SessionCommand>,
    broadcast_tx: broadcast::Sender<RoundSnapshot>,
    registry: SessionRegistryClient,
    inactivity_timeout: Duration,
    inactive_at: Instant,
}

impl SessionActor {
    /// Runs the Session Actor in background and returns a Client to communicate with it
    pub fn spawn(
        id: &str,
        settings: &GameSettings,
        catalog: Arc<Catalog>,
        registry: SessionRegistryClient,
    ) -> SessionClient {
        let (session_tx, session_rx): (Sender<SessionCommand>, Receiver<SessionCommand>) =
            mpsc::channel(128);
        let (broadcast_tx, _): (
            broadcast::Sender<RoundSnapshot>,
            broadcast::Receiver<RoundSnapshot>,
        ) = broadcast::channel(32);
        let inactivity_timeout = settings.inactivity_timeout();

        tokio::spawn(
            SessionActor {
                id: id.to_string(),
                round: Round::new(catalog, settings.round_duration_seconds),
                countdown: None,
                is_player_connected: false,
                session_rx,
                broadcast_tx,
                registry,
                inactivity_timeout,
                inactive_at: Instant::now() + inactivity_timeout,
            }
            .start(),
        );

        SessionClient { session_tx }
    }

    async fn start(mut self) {
        log::info!(
            "Session started. SessionId: '{}', Word: '{}'.",
            self.id,
            self.round.current_word()
        );

        // Only commands count as activity, countdown ticks do not
        let reason = loop {
            select! {
                command = self.session_rx.recv() => match command {
                    Some(command) => {
                        self.inactive_at = Instant::now() + self.inactivity_timeout;
                        self.handle_command(command);
                    }
                    None => {
                        log::info!("Session channel has been dropped. Stopping session actor.");
                        break CloseReason::ChannelClosed;
                    }
                },
                _ = time::sleep_until(self.inactive_at) => {
                    if !self.is_player_connected {
                        log::info!(
                            "No activity detected in session {} after {} seconds. Stopping session actor.",
                            self.id, self.inactivity_timeout.as_secs()
                        );
                        break CloseReason::Inactive;
                    }
                    self.inactive_at = Instant::now() + self.inactivity_timeout;
                },
                _ = countdown::next_tick(&mut self.countdown) => self.apply(RoundEvent::Tick),
            }
        };

        self.stop_session(reason).await;
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::ConnectPlayer { response_tx } => {
                if self.is_player_connected {
                    let event = SessionEvent::Error {
                        error: Error::PlayerAlreadyConnected(self.id.clone()),
                    };
                    if let Err(event) = response_tx.send(event) {
                        log::warn!("Rejected a second Player but the response channel is closed. SessionId: '{}', Event: '{event}'.", self.id);
                    }
                    return;
                }

                let event = SessionEvent::PlayerConnected {
                    broadcast_rx: self.broadcast_tx.subscribe(),
                };
                match response_tx.send(event) {
                    Ok(()) => {
                        self.is_player_connected = true;
                        let _ = self.send_round_state();
                    }
                    Err(event) => log::error!("Sent SessionEvent to the Player but the response channel is closed. SessionId: '{}', Event: '{event}'.", self.id),
                }
            }
            SessionCommand::DisconnectPlayer => {
                log::info!("Player disconnected. SessionId: '{}'.", self.id);
                self.is_player_connected = false;
            }
            SessionCommand::ChangeInput { text } => self.apply(RoundEvent::InputChanged(text)),
            SessionCommand::RequestReset => self.apply(RoundEvent::ResetRequested),
        }
    }

    fn apply(&mut self, event: RoundEvent) {
        let score_before = self.round.score();
        let was_running = self.round.is_running();

        // Impossible transitions are already logged when the internal error is created
        let _ = self.round.evaluate(event);

        if self.round.score() > score_before {
            WORDS_MATCHED.inc_by(u64::from(self.round.score() - score_before));
        }
        if was_running && self.round.state() == &RoundFsmState::Ended {
            ROUNDS_FINISHED.inc();
            log::info!(
                "Round finished. SessionId: '{}', Score: '{}'.",
                self.id,
                self.round.score()
            );
        }

        self.sync_countdown();
        let _ = self.send_round_state();
    }

    /// The countdown only exists while the round is running.
    fn sync_countdown(&mut self) {
        match (self.round.is_running(), self.countdown.is_some()) {
            (true, false) => self.countdown = Some(Countdown::start(Countdown::PERIOD)),
            (false, true) => self.countdown = None,
            _ => {}
        }
    }

    fn send_round_state(&self) -> Result<usize, SendError<RoundSnapshot>> {
        self.broadcast_tx.send(self.round.snapshot())
    }

    async fn stop_session(self, reason: CloseReason) {
        if let Err(error) = self.registry.report_closed(&self.id, reason).await {
            log::error!("Could not report the closed Session to the SessionRegistry. SessionId: '{}', Error: '{error}'.", self.id);
        }
    }
}

pub(crate) enum SessionCommand {
    ConnectPlayer {
        response_tx: OneshotSender<SessionEvent>,
    },
    DisconnectPlayer,
    ChangeInput {
        text: String,
    },
    RequestReset,
}

#[derive(Debug)]
pub(crate) enum SessionEvent {
    PlayerConnected {
        broadcast_rx: broadcast::Receiver<RoundSnapshot>,
    },
    Error {
        error: Error,
    },
}

impl Display for SessionEvent {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                SessionEvent::PlayerConnected { .. } => "SessionEvent::PlayerConnected".to_string(),
                SessionEvent::Error { error } => format!("Error '{error}'"),
            }
        )
    }
}
