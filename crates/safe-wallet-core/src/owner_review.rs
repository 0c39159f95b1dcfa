//! Review step of the add/replace owner flows.

use crate::analytics::{self, settings};
use crate::domain::{
    AddressBookEntry, ChainId, NamedAddress, OwnerChangeKind, PendingSafeTx, SafeInfo,
};
use crate::errors::{log_error, ErrorCode};
use crate::flow::{Applied, FlowError, Generation, TxFlowController};
use crate::ports::{AddressBookPort, AnalyticsPort, PortError, TxBuilderPort};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerChangeParams {
    pub new_owner: NamedAddress,
    pub removed_owner: Option<NamedAddress>,
    pub threshold: u64,
}

impl OwnerChangeParams {
    pub fn kind(&self) -> OwnerChangeKind {
        if self.removed_owner.is_some() {
            OwnerChangeKind::SwapOwner
        } else {
            OwnerChangeKind::AddOwner
        }
    }
}

/// A build request captured at the moment the inputs changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTicket {
    pub generation: Generation,
    pub params: OwnerChangeParams,
}

#[derive(Debug, Clone)]
pub struct OwnerChangeReview {
    params: OwnerChangeParams,
}

impl OwnerChangeReview {
    pub fn new(params: OwnerChangeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &OwnerChangeParams {
        &self.params
    }

    /// Replaces the inputs; returns true when a rebuild is needed.
    pub fn update_params(&mut self, params: OwnerChangeParams) -> bool {
        if self.params == params {
            return false;
        }
        self.params = params;
        true
    }

    pub fn request_build(&self, flow: &mut TxFlowController) -> BuildTicket {
        BuildTicket {
            generation: flow.begin(),
            params: self.params.clone(),
        }
    }

    pub fn complete_build(
        flow: &mut TxFlowController,
        ticket: &BuildTicket,
        result: Result<PendingSafeTx, PortError>,
    ) -> Applied {
        match result {
            Ok(tx) => flow.resolve(ticket.generation, tx),
            Err(e) => {
                let applied = flow.fail(ticket.generation, FlowError::new(e.to_string()));
                if applied == Applied::Current {
                    log_error(ErrorCode::BuildTransaction, &e);
                }
                applied
            }
        }
    }

    /// Builds the swap or add transaction for a ticket.
    pub fn build(
        ticket: &BuildTicket,
        builder: &dyn TxBuilderPort,
        safe: &SafeInfo,
    ) -> Result<PendingSafeTx, PortError> {
        let params = &ticket.params;
        match &params.removed_owner {
            Some(removed) => {
                builder.create_swap_owner_tx(safe, params.new_owner.address, removed.address)
            }
            None => builder.create_add_owner_tx(safe, params.new_owner.address, params.threshold),
        }
    }

    pub fn rebuild(
        &self,
        flow: &mut TxFlowController,
        builder: &dyn TxBuilderPort,
        safe: &SafeInfo,
    ) -> Applied {
        let ticket = self.request_build(flow);
        let result = Self::build(&ticket, builder, safe);
        Self::complete_build(flow, &ticket, result)
    }

    /// Records the new owner's name and emits the flow's analytics.
    /// Signing is left to the sign form.
    pub fn confirm(
        &self,
        chain_id: ChainId,
        safe_owner_count: usize,
        address_book: &dyn AddressBookPort,
        sink: &dyn AnalyticsPort,
    ) -> OwnerChangeKind {
        if let Some(name) = self.params.new_owner.display_name() {
            let entry = AddressBookEntry::new(self.params.new_owner.address, name);
            if let Err(e) = address_book.upsert_entry(chain_id, entry) {
                log_error(ErrorCode::AddressBookWrite, &e);
            }
        }

        analytics::track(sink, settings::OWNERS.labeled(safe_owner_count));
        analytics::track(sink, settings::THRESHOLD.labeled(self.params.threshold));

        let kind = self.params.kind();
        let creation = match kind {
            OwnerChangeKind::AddOwner => settings::ADD_OWNER,
            OwnerChangeKind::SwapOwner => settings::REPLACE_OWNER,
        };
        analytics::track(sink, creation.event());
        kind
    }
}
