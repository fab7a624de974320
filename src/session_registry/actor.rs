use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::oneshot;

use crate::catalog::Catalog;
use crate::config::GameSettings;
use crate::error::Error;
use crate::session::actor_client::SessionClient;
use crate::session_registry::{CloseReason, SessionRegistry};

pub(crate) enum RegistryCommand {
    Open {
        reply: oneshot::Sender<String>,
    },
    Lookup {
        session_id: String,
        reply: oneshot::Sender<Result<SessionClient, Error>>,
    },
    Closed {
        session_id: String,
        reason: CloseReason,
    },
}

/// Owns the SessionRegistry; every access goes through its command channel.
pub struct SessionRegistryActor {
    registry: SessionRegistry,
    registry_rx: Receiver<RegistryCommand>,
    registry_tx: Sender<RegistryCommand>,
}

impl SessionRegistryActor {
    pub fn spawn(settings: GameSettings, catalog: Catalog) -> SessionRegistryClient {
        let (registry_tx, registry_rx) = mpsc::channel(512);

        tokio::spawn(
            SessionRegistryActor {
                registry: SessionRegistry::new(settings, catalog),
                registry_rx,
                registry_tx: registry_tx.clone(),
            }
            .run(),
        );

        SessionRegistryClient { registry_tx }
    }

    async fn run(mut self) {
        while let Some(command) = self.registry_rx.recv().await {
            match command {
                RegistryCommand::Open { reply } => {
                    let session_id = self.registry.open(SessionRegistryClient {
                        registry_tx: self.registry_tx.clone(),
                    });
                    answer(reply, session_id);
                }
                RegistryCommand::Lookup { session_id, reply } => {
                    answer(reply, self.registry.lookup(&session_id));
                }
                RegistryCommand::Closed { session_id, reason } => {
                    self.registry.close(&session_id, reason);
                }
            }
        }
    }
}

fn answer<T>(reply: oneshot::Sender<T>, value: T) {
    if reply.send(value).is_err() {
        log::warn!("The requester stopped waiting before the SessionRegistry answered.");
    }
}

#[derive(Clone)]
pub struct SessionRegistryClient {
    pub(crate) registry_tx: Sender<RegistryCommand>,
}

impl SessionRegistryClient {
    pub async fn open_session(&self) -> Result<String, Error> {
        self.request(|reply| RegistryCommand::Open { reply }).await
    }

    pub async fn lookup_session(&self, session_id: &str) -> Result<SessionClient, Error> {
        self.request(|reply| RegistryCommand::Lookup {
            session_id: session_id.to_string(),
            reply,
        })
        .await?
    }

    pub async fn report_closed(&self, session_id: &str, reason: CloseReason) -> Result<(), Error> {
        self.send(RegistryCommand::Closed {
            session_id: session_id.to_string(),
            reason,
        })
        .await
    }

    async fn request<T, F>(&self, command: F) -> Result<T, Error>
    where
        F: FnOnce(oneshot::Sender<T>) -> RegistryCommand,
    {
        let (reply, response) = oneshot::channel();
        self.send(command(reply)).await?;
        response.await.map_err(|_| {
            Error::log_and_create_internal("The SessionRegistry dropped a request without answering.")
        })
    }

    async fn send(&self, command: RegistryCommand) -> Result<(), Error> {
        self.registry_tx.send(command).await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "The SessionRegistry is not alive. Error: '{error}'."
            ))
        })
    }
}
