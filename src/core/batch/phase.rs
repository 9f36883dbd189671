//! Batch phase machine

use crate::utils::error::{IssuerError, Result};
use serde::Serialize;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Where a batch run is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum BatchPhase {
    Validating,
    Preparing,
    Running { index: usize, total: usize },
    Completed,
}

impl BatchPhase {
    /// Whether `next` may follow this phase
    pub fn can_advance_to(&self, next: &BatchPhase) -> bool {
        match (self, next) {
            (BatchPhase::Validating, BatchPhase::Preparing) => true,
            (BatchPhase::Preparing, BatchPhase::Running { index: 0, total }) => *total > 0,
            (
                BatchPhase::Running { index, total },
                BatchPhase::Running {
                    index: next_index,
                    total: next_total,
                },
            ) => total == next_total && *next_index == index + 1 && *next_index < *total,
            (BatchPhase::Running { index, total }, BatchPhase::Completed) => index + 1 == *total,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchPhase::Completed)
    }
}

impl fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchPhase::Validating => f.write_str("validating"),
            BatchPhase::Preparing => f.write_str("preparing"),
            BatchPhase::Running { index, total } => write!(f, "running {}/{}", index + 1, total),
            BatchPhase::Completed => f.write_str("completed"),
        }
    }
}

/// Phase of one batch, advanced only along legal transitions
#[derive(Debug)]
pub struct PhaseTracker {
    batch_id: Uuid,
    phase: BatchPhase,
}

impl PhaseTracker {
    pub fn new(batch_id: Uuid) -> Self {
        Self {
            batch_id,
            phase: BatchPhase::Validating,
        }
    }

    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    pub fn advance(&mut self, next: BatchPhase) -> Result<()> {
        if !self.phase.can_advance_to(&next) {
            return Err(IssuerError::Internal(format!(
                "batch {} cannot move from {} to {}",
                self.batch_id, self.phase, next
            )));
        }
        debug!(batch_id = %self.batch_id, from = %self.phase, to = %next, "Batch phase change");
        self.phase = next;
        Ok(())
    }
}
