/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WizardStep {
    #[default]
    Metadata,
    CoverArt,
    Tracks,
    Review,
}

impl WizardStep {
    pub const ALL: [Self; 4] = [Self::Metadata, Self::CoverArt, Self::Tracks, Self::Review];

    /// 1-based step number
    pub const fn number(self) -> u8 {
        match self {
            Self::Metadata => 1,
            Self::CoverArt => 2,
            Self::Tracks => 3,
            Self::Review => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub const fn is_last(self) -> bool {
        matches!(self, Self::Review)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Metadata => "Metadata",
            Self::CoverArt => "Cover Art",
            Self::Tracks => "Tracks",
            Self::Review => "Review",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// One entry of the progress stepper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepIndicator {
    pub step: WizardStep,
    pub status: StepStatus,
}

pub fn progress(current: WizardStep) -> Vec<StepIndicator> {
    WizardStep::ALL
        .iter()
        .map(|&step| StepIndicator {
            step,
            status: if step < current {
                StepStatus::Completed
            } else if step == current {
                StepStatus::Current
            } else {
                StepStatus::Upcoming
            },
        })
        .collect()
}
