// src/pipeline/stage.rs

use std::fmt;

/// Where a single request is in the two-stage pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Validating,
    Featurizing,
    Classifying,
    MetallicScoring,
    Regressing,
    InsulatorScoring,
    Done,
    Failed,
}

impl Stage {
    /// Whether `next` may follow `self`. `Failed` is reachable from any
    /// non-terminal stage.
    pub fn can_advance_to(self, next: Stage) -> bool {
        use Stage::*;
        match (self, next) {
            (Done | Failed, _) => false,
            (_, Failed) => true,
            (Idle, Validating)
            | (Validating, Featurizing)
            | (Featurizing, Classifying)
            | (Classifying, MetallicScoring)
            | (Classifying, Regressing)
            | (Regressing, InsulatorScoring)
            | (MetallicScoring, Done)
            | (InsulatorScoring, Done) => true,
            _ => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Validating => "validating",
            Stage::Featurizing => "featurizing",
            Stage::Classifying => "classifying",
            Stage::MetallicScoring => "metallic scoring",
            Stage::Regressing => "regressing",
            Stage::InsulatorScoring => "insulator scoring",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Per-request stage tracker; logs every transition at trace level.
#[derive(Debug)]
pub(crate) struct Tracker<'a> {
    formula: &'a str,
    stage: Stage,
}

impl<'a> Tracker<'a> {
    pub(crate) fn new(formula: &'a str) -> Self {
        Self {
            formula,
            stage: Stage::Idle,
        }
    }

    pub(crate) fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) fn advance(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "illegal transition {} -> {}",
            self.stage,
            next
        );
        log::trace!("{:?}: {} -> {}", self.formula, self.stage, next);
        self.stage = next;
    }
}
