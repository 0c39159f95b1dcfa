//! Explicit state for an open review-and-sign flow.
//!
//! Every asynchronous build is tagged with the generation returned by
//! [`TxFlowController::begin`]; results carrying an older generation are
//! dropped instead of overwriting newer state.

use crate::domain::PendingSafeTx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxFlowKind {
    AddOwner,
    ReplaceOwner,
    RecoverySetup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowError {
    pub message: String,
}

impl FlowError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct TxFlowController {
    generation: u64,
    pending: bool,
    tx: Option<PendingSafeTx>,
    error: Option<FlowError>,
    active: Option<TxFlowKind>,
}

impl TxFlowController {
    /// Starts a new build request, invalidating every outstanding one.
    pub fn begin(&mut self) -> Generation {
        self.generation += 1;
        self.pending = true;
        self.error = None;
        Generation(self.generation)
    }

    pub fn resolve(&mut self, generation: Generation, tx: PendingSafeTx) -> Applied {
        if !self.is_current(generation) {
            tracing::debug!(
                generation = generation.0,
                latest = self.generation,
                "dropping stale build"
            );
            return Applied::Stale;
        }
        self.pending = false;
        self.tx = Some(tx);
        self.error = None;
        Applied::Current
    }

    pub fn fail(&mut self, generation: Generation, error: FlowError) -> Applied {
        if !self.is_current(generation) {
            tracing::debug!(
                generation = generation.0,
                latest = self.generation,
                "dropping stale failure"
            );
            return Applied::Stale;
        }
        self.pending = false;
        self.tx = None;
        self.error = Some(error);
        Applied::Current
    }

    /// Clears the transaction and error; outstanding builds become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = false;
        self.tx = None;
        self.error = None;
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn tx(&self) -> Option<&PendingSafeTx> {
        self.tx.as_ref()
    }

    pub fn error(&self) -> Option<&FlowError> {
        self.error.as_ref()
    }

    pub fn open(&mut self, kind: TxFlowKind) {
        self.reset();
        self.active = Some(kind);
    }

    pub fn close(&mut self) {
        self.reset();
        self.active = None;
    }

    pub fn active(&self) -> Option<TxFlowKind> {
        self.active
    }
}
