use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::Side;

/// State-reverting actions that need both sides to agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmedAction {
    Undo,
    Reset,
}

impl fmt::Display for ConfirmedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmedAction::Undo => f.write_str("undo"),
            ConfirmedAction::Reset => f.write_str("reset"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Confirmation {
    #[default]
    Idle,
    AwaitingOther { requested_by: Side },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Pending,
    Agreed,
}

impl Confirmation {
    /// Records `side`'s agreement. Asking twice from the same side keeps the
    /// request pending; the opposite side completes it and returns to idle.
    pub fn confirm(&mut self, side: Side) -> ConfirmOutcome {
        match *self {
            Confirmation::AwaitingOther { requested_by } if requested_by != side => {
                *self = Confirmation::Idle;
                ConfirmOutcome::Agreed
            }
            Confirmation::AwaitingOther { .. } => ConfirmOutcome::Pending,
            Confirmation::Idle => {
                *self = Confirmation::AwaitingOther { requested_by: side };
                ConfirmOutcome::Pending
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Confirmation::AwaitingOther { .. })
    }

    pub fn requested_by(&self) -> Option<Side> {
        match self {
            Confirmation::Idle => None,
            Confirmation::AwaitingOther { requested_by } => Some(*requested_by),
        }
    }

    pub fn cancel(&mut self) {
        *self = Confirmation::Idle;
    }
}

/// One independent state machine per action kind, so a pending undo can
/// never complete a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Confirmations {
    pub undo: Confirmation,
    pub reset: Confirmation,
}

impl Confirmations {
    pub fn confirm(&mut self, action: ConfirmedAction, side: Side) -> ConfirmOutcome {
        self.get_mut(action).confirm(side)
    }

    pub fn get(&self, action: ConfirmedAction) -> Confirmation {
        match action {
            ConfirmedAction::Undo => self.undo,
            ConfirmedAction::Reset => self.reset,
        }
    }

    fn get_mut(&mut self, action: ConfirmedAction) -> &mut Confirmation {
        match action {
            ConfirmedAction::Undo => &mut self.undo,
            ConfirmedAction::Reset => &mut self.reset,
        }
    }

    pub fn clear(&mut self) {
        self.undo.cancel();
        self.reset.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_confirmation_is_pending() {
        let mut confirmation = Confirmation::default();
        assert_eq!(confirmation.confirm(Side::Player1), ConfirmOutcome::Pending);
        assert_eq!(confirmation.requested_by(), Some(Side::Player1));
    }

    #[test]
    fn test_same_side_twice_stays_pending() {
        let mut confirmation = Confirmation::default();
        confirmation.confirm(Side::Player2);
        assert_eq!(confirmation.confirm(Side::Player2), ConfirmOutcome::Pending);
        assert_eq!(
            confirmation,
            Confirmation::AwaitingOther { requested_by: Side::Player2 }
        );
    }

    #[test]
    fn test_other_side_completes_and_returns_to_idle() {
        let mut confirmation = Confirmation::default();
        confirmation.confirm(Side::Player1);
        assert_eq!(confirmation.confirm(Side::Player2), ConfirmOutcome::Agreed);
        assert!(!confirmation.is_pending());
    }

    #[test]
    fn test_undo_and_reset_do_not_cross_complete() {
        let mut confirmations = Confirmations::default();
        confirmations.confirm(ConfirmedAction::Undo, Side::Player1);
        assert_eq!(
            confirmations.confirm(ConfirmedAction::Reset, Side::Player2),
            ConfirmOutcome::Pending
        );
        assert!(confirmations.get(ConfirmedAction::Undo).is_pending());
        assert!(confirmations.get(ConfirmedAction::Reset).is_pending());

        confirmations.clear();
        assert_eq!(confirmations, Confirmations::default());
    }
}
