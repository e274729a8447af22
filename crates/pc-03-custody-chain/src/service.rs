//! Custody Chain Service - Core business logic
//!
//! Every mutation runs as one synchronous critical section that validates
//! all preconditions before touching state and returns the events it
//! produced. The async API publishes those events only after the section
//! has committed and every lock has been released.

use crate::algorithms::{authorize_creation, authorize_owner, authorize_step};
use crate::config::CustodyConfig;
use crate::domain::{
    check_record, invariant_dense_ids, invariant_exclusive_holding, invariant_step_bound,
    ChainRecord, Consumer, ConsumerView, CustodyEntry, CustodyError, CustodyResult,
    LedgerSnapshot, OwnershipTransfer, StepKind,
};
use crate::metrics;
use crate::ports::inbound::{CustodyChainApi, OwnershipApi};
use crate::ports::outbound::{ItemCatalogGateway, RoleRegistryGateway};
use crate::state::LedgerState;
use async_trait::async_trait;
use shared_bus::{CustodyEvent, EventPublisher};
use shared_types::{format_address, Address, ChainId, ContactProfile, ItemId, Timestamp};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Custody Chain Service implementation
pub struct CustodyChainService<C, R, P>
where
    C: ItemCatalogGateway,
    R: RoleRegistryGateway,
    P: EventPublisher,
{
    config: CustodyConfig,
    state: LedgerState,
    catalog: Arc<C>,
    roles: Arc<R>,
    publisher: Arc<P>,
}

impl<C, R, P> CustodyChainService<C, R, P>
where
    C: ItemCatalogGateway,
    R: RoleRegistryGateway,
    P: EventPublisher,
{
    /// Create an empty ledger.
    pub fn new(
        config: CustodyConfig,
        catalog: Arc<C>,
        roles: Arc<R>,
        publisher: Arc<P>,
    ) -> CustodyResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: LedgerState::new(),
            catalog,
            roles,
            publisher,
        })
    }

    /// Rebuild a ledger from a snapshot, rejecting any snapshot that breaks a
    /// ledger invariant under `config`.
    pub fn restore(
        config: CustodyConfig,
        snapshot: LedgerSnapshot,
        catalog: Arc<C>,
        roles: Arc<R>,
        publisher: Arc<P>,
    ) -> CustodyResult<Self> {
        config.validate()?;
        invariant_dense_ids(&snapshot.chains)?;
        let steps = config.role_sequence.len();
        for record in &snapshot.chains {
            check_record(record)?;
            invariant_step_bound(record, steps)?;
        }

        let mut seen = HashSet::new();
        for consumer in &snapshot.consumers {
            if !seen.insert(consumer.identity) {
                return Err(CustodyError::InvariantViolation(format!(
                    "consumer {} appears twice",
                    format_address(&consumer.identity)
                )));
            }
        }
        invariant_exclusive_holding(&snapshot.chains, &snapshot.consumers)?;

        info!(
            chains = snapshot.chains.len(),
            consumers = snapshot.consumers.len(),
            "[pc-03] Ledger restored from snapshot"
        );
        Ok(Self {
            config,
            state: LedgerState::from_snapshot(snapshot),
            catalog,
            roles,
            publisher,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &CustodyConfig {
        &self.config
    }

    /// Consistent copy of every chain and consumer.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.snapshot()
    }

    fn open_chain(
        &self,
        item_id: ItemId,
        created_by: Address,
        received_at: Timestamp,
        intended_recipient: Address,
        handoff_at: Timestamp,
    ) -> CustodyResult<(ChainId, CustodyEvent)> {
        let _gate = self.state.begin_mutation();

        if !self.catalog.item_exists(item_id) {
            return Err(CustodyError::UnknownItem(item_id));
        }
        authorize_creation(
            self.roles.as_ref(),
            &created_by,
            self.config.opening_role(),
        )?;

        let first = CustodyEntry::handoff(created_by, received_at, intended_recipient, handoff_at);
        let mut version = 0;
        let chain_id = self.state.insert_chain(|chain_id| {
            let record = ChainRecord::open(chain_id, item_id, first);
            version = record.version();
            record
        });

        Ok((
            chain_id,
            CustodyEvent::ChainCreated {
                chain_id,
                version,
                item_id,
                manufacturer: created_by,
                intended_recipient: Some(intended_recipient),
                received_at,
            },
        ))
    }

    fn append_custody(
        &self,
        caller: Address,
        chain_id: ChainId,
        received_at: Timestamp,
        next_recipient: Address,
        handoff_at: Timestamp,
    ) -> CustodyResult<CustodyEvent> {
        let _gate = self.state.begin_mutation();
        let cell = self
            .state
            .chain(chain_id)
            .ok_or(CustodyError::NoSuchChain(chain_id))?;
        let mut record = cell.lock();

        if !record.status.accepts_custody() {
            return Err(CustodyError::ChainClosed {
                chain_id,
                status: record.status,
            });
        }
        let sequence = &self.config.role_sequence;
        authorize_step(
            &record,
            &caller,
            StepKind::Extend,
            sequence,
            self.roles.as_ref(),
        )
        .into_result()?;

        // Authorized positions always index into the sequence.
        let position = record.next_position();
        let role = sequence[position];
        record.append(CustodyEntry::handoff(
            caller,
            received_at,
            next_recipient,
            handoff_at,
        ));

        Ok(CustodyEvent::CustodyExtended {
            chain_id,
            version: record.version(),
            position,
            custodian: caller,
            role,
            intended_recipient: Some(next_recipient),
            received_at,
        })
    }

    fn deliver(
        &self,
        caller: Address,
        chain_id: ChainId,
        consumer: Address,
        delivered_at: Timestamp,
    ) -> CustodyResult<CustodyEvent> {
        let _gate = self.state.begin_mutation();
        let cell = self
            .state
            .chain(chain_id)
            .ok_or(CustodyError::NoSuchChain(chain_id))?;
        let mut record = cell.lock();

        if !record.status.accepts_custody() {
            return Err(CustodyError::ChainClosed {
                chain_id,
                status: record.status,
            });
        }
        authorize_step(
            &record,
            &caller,
            StepKind::Close,
            &self.config.role_sequence,
            self.roles.as_ref(),
        )
        .into_result()?;

        let holder_cell = self
            .state
            .consumer(&consumer)
            .ok_or(CustodyError::UnknownConsumer(consumer))?;
        let mut holder = holder_cell.lock();

        record.deliver(CustodyEntry::terminal(caller, delivered_at), consumer);
        holder.record_delivery(chain_id);

        Ok(CustodyEvent::ChainDelivered {
            chain_id,
            version: record.version(),
            retailer: caller,
            consumer,
            delivered_at,
        })
    }

    fn register(&self, identity: Address, profile: ContactProfile) -> CustodyResult<CustodyEvent> {
        let _gate = self.state.begin_mutation();
        if !self.state.insert_consumer(Consumer::new(identity, profile)) {
            return Err(CustodyError::AlreadyRegistered(identity));
        }
        Ok(CustodyEvent::ConsumerRegistered { consumer: identity })
    }

    fn reassign(
        &self,
        caller: Address,
        chain_id: ChainId,
        from: Address,
        to: Address,
        at: Timestamp,
    ) -> CustodyResult<Vec<CustodyEvent>> {
        let _gate = self.state.begin_mutation();
        let cell = self
            .state
            .chain(chain_id)
            .ok_or(CustodyError::NoSuchChain(chain_id))?;
        let mut record = cell.lock();

        if !record.status.is_consumer_owned() {
            return Err(CustodyError::ChainClosed {
                chain_id,
                status: record.status,
            });
        }
        if record.current_owner != Some(from) {
            return Err(CustodyError::NotOwner { chain_id });
        }
        authorize_owner(&from, &caller).into_result()?;
        if from == to {
            return Err(CustodyError::SelfTransfer { chain_id });
        }

        let sender = self
            .state
            .consumer(&from)
            .ok_or(CustodyError::UnknownConsumer(from))?;

        let mut events = Vec::with_capacity(2);
        let recipient = match self.state.consumer(&to) {
            Some(recipient) => recipient,
            None if self.config.auto_register_transfer_recipient => {
                if self
                    .state
                    .insert_consumer(Consumer::new(to, ContactProfile::default()))
                {
                    events.push(CustodyEvent::ConsumerRegistered { consumer: to });
                }
                self.state
                    .consumer(&to)
                    .ok_or(CustodyError::UnknownConsumer(to))?
            }
            None => return Err(CustodyError::UnknownConsumer(to)),
        };

        let (mut giver, mut taker) = LedgerState::lock_pair((&from, &sender), (&to, &recipient));
        giver.release(chain_id);
        taker.record_delivery(chain_id);
        record.reassign(OwnershipTransfer { from, to, at });

        events.push(CustodyEvent::OwnershipTransferred {
            chain_id,
            version: record.version(),
            from,
            to,
            at,
        });
        Ok(events)
    }

    async fn publish(&self, events: Vec<CustodyEvent>) {
        for event in events {
            let receivers = self.publisher.publish(event).await;
            debug!(receivers, "[pc-03] Event published");
        }
    }
}

fn rejected(operation: &'static str, err: CustodyError) -> CustodyError {
    warn!(
        operation,
        reason = err.kind(),
        error = %err,
        "[pc-03] Call rejected"
    );
    metrics::record_rejection(err.kind());
    err
}

#[async_trait]
impl<C, R, P> CustodyChainApi for CustodyChainService<C, R, P>
where
    C: ItemCatalogGateway + 'static,
    R: RoleRegistryGateway + 'static,
    P: EventPublisher + 'static,
{
    async fn create_chain(
        &self,
        item_id: ItemId,
        created_by: Address,
        received_at: Timestamp,
        intended_recipient: Address,
        handoff_at: Timestamp,
    ) -> CustodyResult<ChainId> {
        let (chain_id, event) = self
            .open_chain(item_id, created_by, received_at, intended_recipient, handoff_at)
            .map_err(|e| rejected("create_chain", e))?;

        metrics::record_chain_created();
        info!(
            chain_id,
            item_id,
            manufacturer = %format_address(&created_by),
            "[pc-03] Custody chain created"
        );
        self.publish(vec![event]).await;
        Ok(chain_id)
    }

    async fn extend_chain(
        &self,
        caller: Address,
        chain_id: ChainId,
        received_at: Timestamp,
        next_recipient: Address,
        handoff_at: Timestamp,
    ) -> CustodyResult<()> {
        let event = self
            .append_custody(caller, chain_id, received_at, next_recipient, handoff_at)
            .map_err(|e| rejected("extend_chain", e))?;

        metrics::record_entry_appended();
        info!(
            chain_id,
            custodian = %format_address(&caller),
            next = %format_address(&next_recipient),
            "[pc-03] Custody extended"
        );
        self.publish(vec![event]).await;
        Ok(())
    }

    async fn close_to_consumer(
        &self,
        caller: Address,
        chain_id: ChainId,
        consumer: Address,
        delivered_at: Timestamp,
    ) -> CustodyResult<()> {
        let event = self
            .deliver(caller, chain_id, consumer, delivered_at)
            .map_err(|e| rejected("close_to_consumer", e))?;

        metrics::record_delivery();
        info!(
            chain_id,
            retailer = %format_address(&caller),
            consumer = %format_address(&consumer),
            "[pc-03] Chain delivered to consumer"
        );
        self.publish(vec![event]).await;
        Ok(())
    }

    fn get_chain(&self, chain_id: ChainId) -> CustodyResult<ChainRecord> {
        self.state
            .chain(chain_id)
            .map(|cell| cell.lock().clone())
            .ok_or(CustodyError::NoSuchChain(chain_id))
    }

    fn chains_for_item(&self, item_id: ItemId) -> Vec<ChainId> {
        self.state.chains_for_item(item_id)
    }

    fn chain_count(&self) -> u64 {
        self.state.chain_count()
    }

    fn audit_chain(&self, chain_id: ChainId) -> CustodyResult<()> {
        let snapshot = self.state.snapshot();
        let record = snapshot
            .chains
            .iter()
            .find(|record| record.chain_id == chain_id)
            .ok_or(CustodyError::NoSuchChain(chain_id))?;

        check_record(record)?;
        invariant_step_bound(record, self.config.role_sequence.len())?;

        let holders: Vec<Consumer> = snapshot
            .consumers
            .iter()
            .filter(|consumer| consumer.holds(chain_id))
            .map(|consumer| Consumer {
                held_items: vec![chain_id],
                ..consumer.clone()
            })
            .collect();
        invariant_exclusive_holding(std::slice::from_ref(record), &holders)
    }
}

#[async_trait]
impl<C, R, P> OwnershipApi for CustodyChainService<C, R, P>
where
    C: ItemCatalogGateway + 'static,
    R: RoleRegistryGateway + 'static,
    P: EventPublisher + 'static,
{
    async fn register_consumer(
        &self,
        identity: Address,
        profile: ContactProfile,
    ) -> CustodyResult<()> {
        let event = self
            .register(identity, profile)
            .map_err(|e| rejected("register_consumer", e))?;

        info!(consumer = %format_address(&identity), "[pc-03] Consumer registered");
        self.publish(vec![event]).await;
        Ok(())
    }

    fn get_consumer(&self, identity: &Address) -> CustodyResult<ConsumerView> {
        self.state
            .consumer(identity)
            .map(|cell| cell.lock().view())
            .ok_or(CustodyError::UnknownConsumer(*identity))
    }

    async fn transfer_ownership(
        &self,
        caller: Address,
        chain_id: ChainId,
        from: Address,
        to: Address,
        at: Timestamp,
    ) -> CustodyResult<()> {
        let events = self
            .reassign(caller, chain_id, from, to, at)
            .map_err(|e| rejected("transfer_ownership", e))?;

        metrics::record_transfer();
        info!(
            chain_id,
            from = %format_address(&from),
            to = %format_address(&to),
            "[pc-03] Ownership transferred"
        );
        self.publish(events).await;
        Ok(())
    }
}
