//! Ledger state and its locks.
//!
//! Lock order, always acquired in this sequence and never held across an
//! await:
//!
//! 1. `commit_gate` (read for mutations, write for whole-ledger reads)
//! 2. one chain record mutex
//! 3. consumer mutexes, ascending by identity
//!
//! Map locks (`chains`, `chains_by_item`, `consumers`) are only held long
//! enough to look up or insert an `Arc`; no record mutex is ever awaited
//! while one is held.

use crate::domain::{ChainRecord, Consumer, LedgerSnapshot};
use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use shared_types::{Address, ChainId, ItemId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

pub(crate) type ChainCell = Arc<Mutex<ChainRecord>>;
pub(crate) type ConsumerCell = Arc<Mutex<Consumer>>;

pub(crate) struct LedgerState {
    commit_gate: RwLock<()>,
    chains: RwLock<BTreeMap<ChainId, ChainCell>>,
    chains_by_item: RwLock<HashMap<ItemId, Vec<ChainId>>>,
    consumers: RwLock<HashMap<Address, ConsumerCell>>,
}

impl LedgerState {
    pub(crate) fn new() -> Self {
        Self {
            commit_gate: RwLock::new(()),
            chains: RwLock::new(BTreeMap::new()),
            chains_by_item: RwLock::new(HashMap::new()),
            consumers: RwLock::new(HashMap::new()),
        }
    }

    /// Rebuild from a snapshot that has already been checked.
    pub(crate) fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let state = Self::new();
        {
            let mut chains = state.chains.write();
            let mut by_item = state.chains_by_item.write();
            for record in snapshot.chains {
                by_item.entry(record.item_id).or_default().push(record.chain_id);
                chains.insert(record.chain_id, Arc::new(Mutex::new(record)));
            }
        }
        {
            let mut consumers = state.consumers.write();
            for consumer in snapshot.consumers {
                consumers.insert(consumer.identity, Arc::new(Mutex::new(consumer)));
            }
        }
        state
    }

    /// Held by every mutation for its whole critical section.
    pub(crate) fn begin_mutation(&self) -> RwLockReadGuard<'_, ()> {
        self.commit_gate.read()
    }

    /// Excludes all mutations.
    fn quiesce(&self) -> RwLockWriteGuard<'_, ()> {
        self.commit_gate.write()
    }

    /// Allocate the next dense id and store the record built for it.
    pub(crate) fn insert_chain<F>(&self, build: F) -> ChainId
    where
        F: FnOnce(ChainId) -> ChainRecord,
    {
        let mut chains = self.chains.write();
        let mut by_item = self.chains_by_item.write();
        let chain_id = chains.len() as ChainId + 1;
        let record = build(chain_id);
        by_item.entry(record.item_id).or_default().push(chain_id);
        chains.insert(chain_id, Arc::new(Mutex::new(record)));
        chain_id
    }

    pub(crate) fn chain(&self, chain_id: ChainId) -> Option<ChainCell> {
        self.chains.read().get(&chain_id).cloned()
    }

    pub(crate) fn chain_count(&self) -> u64 {
        self.chains.read().len() as u64
    }

    pub(crate) fn chains_for_item(&self, item_id: ItemId) -> Vec<ChainId> {
        self.chains_by_item
            .read()
            .get(&item_id)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn consumer(&self, identity: &Address) -> Option<ConsumerCell> {
        self.consumers.read().get(identity).cloned()
    }

    /// Insert a new consumer. Returns `false` if the identity is taken.
    pub(crate) fn insert_consumer(&self, consumer: Consumer) -> bool {
        let mut consumers = self.consumers.write();
        if consumers.contains_key(&consumer.identity) {
            return false;
        }
        consumers.insert(consumer.identity, Arc::new(Mutex::new(consumer)));
        true
    }

    /// Lock two distinct consumers in address order and return the guards
    /// in argument order.
    pub(crate) fn lock_pair<'a>(
        first: (&Address, &'a ConsumerCell),
        second: (&Address, &'a ConsumerCell),
    ) -> (MutexGuard<'a, Consumer>, MutexGuard<'a, Consumer>) {
        if first.0 <= second.0 {
            let a = first.1.lock();
            let b = second.1.lock();
            (a, b)
        } else {
            let b = second.1.lock();
            let a = first.1.lock();
            (a, b)
        }
    }

    /// Copy every record while no mutation is in flight.
    pub(crate) fn snapshot(&self) -> LedgerSnapshot {
        let _gate = self.quiesce();
        let chains = self
            .chains
            .read()
            .values()
            .map(|cell| cell.lock().clone())
            .collect();
        let mut consumers: Vec<Consumer> = self
            .consumers
            .read()
            .values()
            .map(|cell| cell.lock().clone())
            .collect();
        consumers.sort_by(|a, b| a.identity.cmp(&b.identity));
        LedgerSnapshot { chains, consumers }
    }
}
