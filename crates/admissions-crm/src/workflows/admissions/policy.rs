//! Transition policies: which stage changes an operator may confirm.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::stages::AdmissionStage;

pub trait TransitionPolicy: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    fn permits(&self, from: AdmissionStage, to: AdmissionStage) -> bool;

    /// Stages an operator may pick next, in display order, excluding the current one.
    fn allowed_targets(&self, from: AdmissionStage) -> Vec<AdmissionStage> {
        AdmissionStage::ordered()
            .into_iter()
            .filter(|to| *to != from && self.permits(from, *to))
            .collect()
    }
}

/// Any stage may move to any other, so operators can correct mistakes freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyToAnyTransition;

impl TransitionPolicy for AnyToAnyTransition {
    fn name(&self) -> &'static str {
        "any-to-any"
    }

    fn permits(&self, _from: AdmissionStage, _to: AdmissionStage) -> bool {
        true
    }
}

/// Adjacency table keyed by current stage.
#[derive(Debug, Clone)]
pub struct AdjacencyTransition {
    name: &'static str,
    table: BTreeMap<AdmissionStage, Vec<AdmissionStage>>,
}

impl AdjacencyTransition {
    pub fn new(
        name: &'static str,
        table: impl IntoIterator<Item = (AdmissionStage, Vec<AdmissionStage>)>,
    ) -> Self {
        Self {
            name,
            table: table.into_iter().collect(),
        }
    }

    /// One step forward at a time, rejection from any open stage, nothing out of a terminal stage.
    pub fn forward() -> Self {
        use AdmissionStage::*;
        Self::new(
            "forward",
            [
                (ApplicationSubmitted, vec![DocumentVerification, Rejected]),
                (DocumentVerification, vec![InterviewScheduled, Rejected]),
                (InterviewScheduled, vec![Admitted, Rejected]),
                (Admitted, Vec::new()),
                (Rejected, Vec::new()),
            ],
        )
    }
}

impl TransitionPolicy for AdjacencyTransition {
    fn name(&self) -> &'static str {
        self.name
    }

    fn permits(&self, from: AdmissionStage, to: AdmissionStage) -> bool {
        self.table
            .get(&from)
            .is_some_and(|targets| targets.contains(&to))
    }
}

/// Configurable selector for the built-in policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicyKind {
    #[default]
    AnyToAny,
    Forward,
}

impl TransitionPolicyKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" | "any-to-any" => Some(Self::AnyToAny),
            "forward" | "adjacent" => Some(Self::Forward),
            _ => None,
        }
    }

    pub fn build(self) -> Arc<dyn TransitionPolicy> {
        match self {
            Self::AnyToAny => Arc::new(AnyToAnyTransition),
            Self::Forward => Arc::new(AdjacencyTransition::forward()),
        }
    }
}
