use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Canonical admission workflow stages, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdmissionStage {
    ApplicationSubmitted,
    DocumentVerification,
    InterviewScheduled,
    Admitted,
    Rejected,
}

impl AdmissionStage {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::ApplicationSubmitted,
            Self::DocumentVerification,
            Self::InterviewScheduled,
            Self::Admitted,
            Self::Rejected,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::ApplicationSubmitted => "application-submitted",
            Self::DocumentVerification => "document-verification",
            Self::InterviewScheduled => "interview-scheduled",
            Self::Admitted => "admitted",
            Self::Rejected => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        self.definition().label
    }

    /// Forward completion, not elapsed steps: `rejected` sits at zero.
    pub fn canonical_progress(self) -> u8 {
        self.definition().canonical_progress
    }

    pub fn definition(self) -> &'static StageDefinition {
        let index = match self {
            Self::ApplicationSubmitted => 0,
            Self::DocumentVerification => 1,
            Self::InterviewScheduled => 2,
            Self::Admitted => 3,
            Self::Rejected => 4,
        };
        &STAGE_DEFINITIONS[index]
    }

    /// By convention only; no transition out of these is blocked by [`super::AnyToAnyTransition`].
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Admitted | Self::Rejected)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|stage| stage.key() == key)
    }
}

impl fmt::Display for AdmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Presentation hints for badges and progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageDisplay {
    pub color: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageDefinition {
    pub stage: AdmissionStage,
    pub key: &'static str,
    pub label: &'static str,
    pub display: StageDisplay,
    pub canonical_progress: u8,
}

static STAGE_DEFINITIONS: [StageDefinition; 5] = [
    StageDefinition {
        stage: AdmissionStage::ApplicationSubmitted,
        key: "application-submitted",
        label: "Application Submitted",
        display: StageDisplay {
            color: "bg-gradient-secondary",
            icon: "clock",
        },
        canonical_progress: 25,
    },
    StageDefinition {
        stage: AdmissionStage::DocumentVerification,
        key: "document-verification",
        label: "Document Verification",
        display: StageDisplay {
            color: "bg-warning",
            icon: "eye",
        },
        canonical_progress: 50,
    },
    StageDefinition {
        stage: AdmissionStage::InterviewScheduled,
        key: "interview-scheduled",
        label: "Interview Scheduled",
        display: StageDisplay {
            color: "bg-gradient-primary",
            icon: "alert-circle",
        },
        canonical_progress: 75,
    },
    StageDefinition {
        stage: AdmissionStage::Admitted,
        key: "admitted",
        label: "Admitted",
        display: StageDisplay {
            color: "bg-gradient-success",
            icon: "check-circle",
        },
        canonical_progress: 100,
    },
    StageDefinition {
        stage: AdmissionStage::Rejected,
        key: "rejected",
        label: "Rejected",
        display: StageDisplay {
            color: "bg-destructive",
            icon: "x-circle",
        },
        canonical_progress: 0,
    },
];

/// What to do with a stage key the registry does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownStagePolicy {
    #[default]
    Reject,
    /// Resolve to the first stage, as the dashboard historically did.
    FallbackToFirst,
}

impl UnknownStagePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" | "strict" => Some(Self::Reject),
            "fallback" | "first" => Some(Self::FallbackToFirst),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("unknown admission stage '{0}'")]
    UnknownStage(String),
}

/// Static, ordered catalog of stage definitions.
#[derive(Debug, Clone, Copy)]
pub struct StageRegistry {
    definitions: &'static [StageDefinition],
}

impl Default for StageRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl StageRegistry {
    pub fn standard() -> Self {
        Self {
            definitions: &STAGE_DEFINITIONS,
        }
    }

    pub fn definitions(&self) -> &'static [StageDefinition] {
        self.definitions
    }

    pub fn first(&self) -> &'static StageDefinition {
        &self.definitions[0]
    }

    pub fn lookup(&self, key: &str) -> Result<&'static StageDefinition, StageError> {
        self.definitions
            .iter()
            .find(|definition| definition.key == key)
            .ok_or_else(|| StageError::UnknownStage(key.to_string()))
    }

    pub fn resolve(
        &self,
        key: &str,
        policy: UnknownStagePolicy,
    ) -> Result<&'static StageDefinition, StageError> {
        match (self.lookup(key), policy) {
            (Ok(definition), _) => Ok(definition),
            (Err(_), UnknownStagePolicy::FallbackToFirst) => {
                let fallback = self.first();
                warn!(stage = key, fallback = fallback.key, "unknown stage key resolved to first stage");
                Ok(fallback)
            }
            (Err(err), UnknownStagePolicy::Reject) => Err(err),
        }
    }
}
