pub mod matcher;
pub mod rank;
pub mod round_fsm;

use rust_fsm::StateMachine;
use std::sync::Arc;

use crate::catalog::{Catalog, WordPair};
use crate::error::Error;
use crate::round::matcher::MatchOutcome;
use crate::round::rank::ScoreRank;
use crate::round::round_fsm::{RoundFsm, RoundFsmInput, RoundFsmState};

#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    InputChanged(String),
    Tick,
    ResetRequested,
}

/// Observable part of a round, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub state: RoundFsmState,
    pub score: u32,
    pub remaining_seconds: u8,
    pub word: WordPair,
    pub input: String,
    pub is_missed: bool,
}

impl RoundSnapshot {
    pub fn rank(&self) -> Option<ScoreRank> {
        match self.state {
            RoundFsmState::Ended => Some(ScoreRank::from_score(self.score)),
            RoundFsmState::Idle | RoundFsmState::Running => None,
        }
    }
}

pub struct Round {
    catalog: Arc<Catalog>,
    duration_seconds: u8,
    fsm: StateMachine<RoundFsm>,
    score: u32,
    remaining_seconds: u8,
    current_word: WordPair,
    input: String,
    is_missed: bool,
}

impl Round {
    pub fn new(catalog: Arc<Catalog>, duration_seconds: u8) -> Self {
        let current_word = catalog.pick_random();
        Round {
            catalog,
            duration_seconds,
            fsm: StateMachine::new(),
            score: 0,
            remaining_seconds: duration_seconds,
            current_word,
            input: String::default(),
            is_missed: false,
        }
    }

    pub fn state(&self) -> &RoundFsmState {
        self.fsm.state()
    }

    pub fn is_running(&self) -> bool {
        self.state() == &RoundFsmState::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_seconds(&self) -> u8 {
        self.remaining_seconds
    }

    pub fn current_word(&self) -> &WordPair {
        &self.current_word
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_missed(&self) -> bool {
        self.is_missed
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            state: self.state().clone(),
            score: self.score,
            remaining_seconds: self.remaining_seconds,
            word: self.current_word.clone(),
            input: self.input.clone(),
            is_missed: self.is_missed,
        }
    }

    /// Applies exactly one event. Every mutation of the round goes through here.
    pub fn evaluate(&mut self, event: RoundEvent) -> Result<(), Error> {
        match event {
            RoundEvent::InputChanged(text) => self.change_input(text),
            RoundEvent::Tick => self.tick(),
            RoundEvent::ResetRequested => self.reset(),
        }
    }

    fn change_input(&mut self, text: String) -> Result<(), Error> {
        match self.state() {
            RoundFsmState::Ended => {
                log::debug!("Ignoring input received after the round ended. Input: '{text}'.");
                return Ok(());
            }
            RoundFsmState::Idle => self.process_event(&RoundFsmInput::Start)?,
            RoundFsmState::Running => {}
        }

        self.input = text;
        self.match_input();
        Ok(())
    }

    fn match_input(&mut self) {
        match matcher::evaluate(&self.input, self.current_word.translation()) {
            MatchOutcome::Exact => {
                self.score += 1;
                self.input.clear();
                self.current_word = self.catalog.pick_random();
                // Re-evaluating against the new word always lands on the empty input case
                self.is_missed = false;
            }
            MatchOutcome::Partial | MatchOutcome::Empty => self.is_missed = false,
            MatchOutcome::Miss => self.is_missed = true,
        }
    }

    fn tick(&mut self) -> Result<(), Error> {
        if !self.is_running() {
            return Ok(());
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.process_event(&RoundFsmInput::Expire)?;
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<(), Error> {
        self.process_event(&RoundFsmInput::Reset)?;
        self.score = 0;
        self.remaining_seconds = self.duration_seconds;
        self.input.clear();
        self.is_missed = false;
        self.current_word = self.catalog.pick_random();
        Ok(())
    }

    fn process_event(&mut self, event: &RoundFsmInput) -> Result<(), Error> {
        self.fsm.consume(event).map(|_| ()).map_err(|error| {
            Error::log_and_create_internal(&format!(
                "The fsm in state {:?} can't transition with an event {:?}. Error: '{error}'.",
                self.fsm.state(),
                event
            ))
        })
    }
}
