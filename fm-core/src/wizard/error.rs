use crate::wizard::WizardStep;
use std::fmt;
use thiserror::Error;

/// Transition requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Advance,
    Retreat,
    Submit,
    Finish,
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardAction::Advance => f.write_str("advance"),
            WizardAction::Retreat => f.write_str("go back"),
            WizardAction::Submit => f.write_str("submit"),
            WizardAction::Finish => f.write_str("finish"),
        }
    }
}

/// Errors from the release wizard. A rejected call leaves the wizard unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Cannot {action} from the {} step", .step.label())]
    InvalidTransition {
        action: WizardAction,
        step: WizardStep,
    },
    #[error("A release must keep at least one track")]
    MinimumTracksViolation,
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),
    #[error("Distribution service is not available")]
    DistributionUnavailable,
}
