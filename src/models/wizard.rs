use serde::Serialize;

use super::BookingConfirmation;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Service,
    Schedule,
    Contact,
    Review,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Service => 1,
            WizardStep::Schedule => 2,
            WizardStep::Contact => 3,
            WizardStep::Review => 4,
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            WizardStep::Service => Some(WizardStep::Schedule),
            WizardStep::Schedule => Some(WizardStep::Contact),
            WizardStep::Contact => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    pub fn prev(&self) -> Option<Self> {
        match self {
            WizardStep::Service => None,
            WizardStep::Schedule => Some(WizardStep::Service),
            WizardStep::Contact => Some(WizardStep::Schedule),
            WizardStep::Review => Some(WizardStep::Contact),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WizardPhase {
    Editing,
    Submitting,
    Succeeded { confirmation: BookingConfirmation },
    Failed { reason: String },
}

impl WizardPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardPhase::Editing => "editing",
            WizardPhase::Submitting => "submitting",
            WizardPhase::Succeeded { .. } => "succeeded",
            WizardPhase::Failed { .. } => "failed",
        }
    }
}
