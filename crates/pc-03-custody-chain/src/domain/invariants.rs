//! # Domain Invariants
//!
//! Ledger-wide rules. The service upholds them on every mutation; these
//! checks run on `restore` and `audit_chain`.

use super::entities::{ChainRecord, Consumer};
use super::errors::{CustodyError, CustodyResult};
use shared_types::{format_address, Address, ChainId};
use std::collections::HashMap;

fn violation(message: String) -> CustodyError {
    CustodyError::InvariantViolation(message)
}

/// Invariant: custody continuity.
///
/// Every entry names the custodian of the next one. Only the terminal entry
/// of a delivered chain may leave the recipient unset.
pub fn invariant_custody_continuity(record: &ChainRecord) -> CustodyResult<()> {
    let entries = &record.custody_entries;
    if entries.is_empty() {
        return Err(violation(format!(
            "chain {} has no custody entries",
            record.chain_id
        )));
    }

    for (position, pair) in entries.windows(2).enumerate() {
        if pair[0].intended_recipient != Some(pair[1].custodian) {
            return Err(violation(format!(
                "chain {} breaks continuity between positions {} and {}",
                record.chain_id,
                position,
                position + 1
            )));
        }
    }

    let terminal = entries
        .last()
        .is_some_and(|entry| entry.intended_recipient.is_none());
    if terminal != record.status.is_consumer_owned() {
        return Err(violation(format!(
            "chain {} terminal entry does not match status {}",
            record.chain_id,
            record.status.as_str()
        )));
    }
    Ok(())
}

/// Invariant: owner presence follows status.
///
/// No owner while in the custody chain; an owner once delivered; a
/// re-owned chain's owner is the recipient of its latest transfer.
pub fn invariant_owner_matches_status(record: &ChainRecord) -> CustodyResult<()> {
    use super::value_objects::ChainStatus;

    let consistent = match record.status {
        ChainStatus::InCustodyChain => {
            record.current_owner.is_none() && record.ownership_history.is_empty()
        }
        ChainStatus::Delivered => {
            record.current_owner.is_some() && record.ownership_history.is_empty()
        }
        ChainStatus::Reowned => {
            record.current_owner.is_some()
                && record.ownership_history.last().map(|t| t.to) == record.current_owner
        }
    };
    if !consistent {
        return Err(violation(format!(
            "chain {} owner is inconsistent with status {}",
            record.chain_id,
            record.status.as_str()
        )));
    }
    Ok(())
}

/// Invariant: chain ids are dense from 1 in ascending order.
pub fn invariant_dense_ids(chains: &[ChainRecord]) -> CustodyResult<()> {
    for (index, record) in chains.iter().enumerate() {
        let expected = index as ChainId + 1;
        if record.chain_id != expected {
            return Err(violation(format!(
                "expected chain id {} at index {}, found {}",
                expected, index, record.chain_id
            )));
        }
    }
    Ok(())
}

/// Invariant: exclusive holding.
///
/// A consumer-owned chain appears in exactly one consumer's held set, that
/// of its current owner. No consumer holds anything else.
pub fn invariant_exclusive_holding(
    chains: &[ChainRecord],
    consumers: &[Consumer],
) -> CustodyResult<()> {
    let owners: HashMap<ChainId, Address> = chains
        .iter()
        .filter_map(|record| record.current_owner.map(|owner| (record.chain_id, owner)))
        .collect();

    let mut holders: HashMap<ChainId, Address> = HashMap::new();
    for consumer in consumers {
        for chain_id in &consumer.held_items {
            if owners.get(chain_id) != Some(&consumer.identity) {
                return Err(violation(format!(
                    "consumer {} holds chain {} it does not own",
                    format_address(&consumer.identity),
                    chain_id
                )));
            }
            if holders.insert(*chain_id, consumer.identity).is_some() {
                return Err(violation(format!(
                    "chain {} is held more than once",
                    chain_id
                )));
            }
        }
    }

    for chain_id in owners.keys() {
        if !holders.contains_key(chain_id) {
            return Err(violation(format!(
                "owned chain {} is in no consumer's held set",
                chain_id
            )));
        }
    }
    Ok(())
}

/// Invariant: a chain never has more entries than the role sequence has
/// steps, and a delivered chain has exactly one entry per step.
pub fn invariant_step_bound(record: &ChainRecord, steps: usize) -> CustodyResult<()> {
    let len = record.custody_entries.len();
    let within = if record.status.is_consumer_owned() {
        len == steps
    } else {
        len < steps
    };
    if !within {
        return Err(violation(format!(
            "chain {} has {} entries for a {}-step sequence in status {}",
            record.chain_id,
            len,
            steps,
            record.status.as_str()
        )));
    }
    Ok(())
}

/// Run every per-record invariant.
pub fn check_record(record: &ChainRecord) -> CustodyResult<()> {
    invariant_custody_continuity(record)?;
    invariant_owner_matches_status(record)
}
