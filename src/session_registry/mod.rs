pub mod actor;

use rand::distributions::{Alphanumeric, DistString};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::GameSettings;
use crate::error::Error;
use crate::metrics::ACTIVE_SESSIONS;
use crate::session::actor::SessionActor;
use crate::session::actor_client::SessionClient;
use crate::session_registry::actor::SessionRegistryClient;

/// Why a session actor stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Inactive,
    ChannelClosed,
}

impl Display for CloseReason {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CloseReason::Inactive => write!(formatter, "inactive"),
            CloseReason::ChannelClosed => write!(formatter, "channel closed"),
        }
    }
}

/// Live sessions by id, plus the catalog and settings every new session starts from.
pub struct SessionRegistry {
    sessions: HashMap<String, SessionClient>,
    settings: GameSettings,
    catalog: Arc<Catalog>,
}

impl SessionRegistry {
    const SESSION_ID_LENGTH: usize = 5;

    pub fn new(settings: GameSettings, catalog: Catalog) -> Self {
        SessionRegistry {
            sessions: HashMap::default(),
            settings,
            catalog: Arc::new(catalog),
        }
    }

    pub fn open(&mut self, registry: SessionRegistryClient) -> String {
        let id = self.unused_session_id();
        let session = SessionActor::spawn(&id, &self.settings, Arc::clone(&self.catalog), registry);
        self.sessions.insert(id.clone(), session);
        self.publish_size();

        log::info!(
            "Session opened. SessionId: '{id}', LiveSessions: '{}'.",
            self.sessions.len()
        );
        id
    }

    pub fn lookup(&self, session_id: &str) -> Result<SessionClient, Error> {
        self.sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| Error::SessionDoesNotExist(session_id.to_string()))
    }

    /// Forgets a stopped session. Returns false when the id was not registered.
    pub fn close(&mut self, session_id: &str, reason: CloseReason) -> bool {
        let was_registered = self.sessions.remove(session_id).is_some();
        self.publish_size();

        if was_registered {
            log::info!(
                "Session closed. SessionId: '{session_id}', Reason: '{reason}', LiveSessions: '{}'.",
                self.sessions.len()
            );
        } else {
            log::warn!(
                "A session reported it closed but it was not registered. SessionId: '{session_id}', Reason: '{reason}'."
            );
        }
        was_registered
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn publish_size(&self) {
        ACTIVE_SESSIONS.set(i64::try_from(self.sessions.len()).unwrap_or(i64::MAX));
    }

    fn unused_session_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            // Characters that read alike on screen are swapped for unambiguous ones
            let id: String = Alphanumeric
                .sample_string(&mut rng, SessionRegistry::SESSION_ID_LENGTH)
                .chars()
                .map(|char| match char {
                    'O' => 'P',
                    '0' => '1',
                    'I' => 'J',
                    'l' => 'm',
                    other => other,
                })
                .collect();
            if !self.sessions.contains_key(&id) {
                return id;
            }
        }
    }
}
