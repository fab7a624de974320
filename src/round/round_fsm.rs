use std::fmt;

use rust_fsm::state_machine;

/*
 * Idle: waiting for the first keystroke
 * Running: the countdown is ticking
 * Ended: the countdown reached zero, the score is kept for display
 * Reset goes back to Idle from anywhere
 */
state_machine! {
    derive(Debug, Clone, PartialEq)
    pub RoundFsm(Idle)

    Idle => {
        Start => Running,
        Reset => Idle,
    },
    Running => {
        Expire => Ended,
        Reset => Idle,
    },
    Ended => {
        Reset => Idle,
    }
}

impl fmt::Display for RoundFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
