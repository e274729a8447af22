//! # Integration Test Flows
//!
//! End-to-end custody flows across pc-01-item-catalog, pc-02-role-registry
//! and pc-03-custody-chain.
//!
//! ## Flows Tested:
//!
//! 1. **Full delivery**: manufacturer -> distributor -> wholesaler -> retailer -> consumer
//! 2. **Resale**: consumer -> consumer, then the old owner is locked out
//! 3. **Registry effects**: blocking a holder mid-chain stops their next step
//! 4. **Catalog effects**: many units of one catalog item each get their own chain
//! 5. **Persistence**: a JSON snapshot restores into an identical ledger

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use pc_02_role_registry::RoleRegistryApi;
    use pc_03_custody_chain::{
        ChainStatus, CustodyChainApi, CustodyChainService, CustodyConfig, CustodyError,
        DenialReason, LedgerSnapshot, OwnershipApi,
    };
    use shared_bus::InMemoryEventBus;
    use shared_types::Role;
    use std::sync::Arc;

    // =============================================================================
    // FULL DELIVERY
    // =============================================================================

    /// Four entries, one per role, and the consumer holds the chain.
    #[tokio::test]
    async fn test_full_delivery_through_every_role() {
        let net = SupplyNetwork::new();
        let item = net.add_item("Kettle");
        net.register(ALICE, "Alice").await;

        let chain_id = net.deliver(item, ALICE).await;

        let chain = net.ledger.get_chain(chain_id).unwrap();
        assert_eq!(chain.item_id, item);
        assert_eq!(chain.status, ChainStatus::Delivered);
        assert_eq!(chain.current_owner, Some(ALICE));
        assert_eq!(chain.custody_entries.len(), 4);

        let custodians: Vec<_> = chain.custody_entries.iter().map(|e| e.custodian).collect();
        assert_eq!(custodians, vec![MANUFACTURER, DISTRIBUTOR, WHOLESALER, RETAILER]);
        for pair in chain.custody_entries.windows(2) {
            assert_eq!(pair[0].intended_recipient, Some(pair[1].custodian));
        }
        let last = chain.custody_entries.last().unwrap();
        assert_eq!(last.intended_recipient, None);
        assert_eq!(last.handoff_at, None);

        let alice = net.ledger.get_consumer(&ALICE).unwrap();
        assert_eq!(alice.profile.name, "Alice");
        assert_eq!(alice.held_items, vec![chain_id]);
        assert!(net.ledger.audit_chain(chain_id).is_ok());
    }

    /// Chains for an item that is not in the catalog are refused.
    #[tokio::test]
    async fn test_unknown_item_rejected() {
        let net = SupplyNetwork::new();
        let result = net
            .ledger
            .create_chain(42, MANUFACTURER, 1, DISTRIBUTOR, 2)
            .await;
        assert_eq!(result, Err(CustodyError::UnknownItem(42)));
        assert_eq!(net.ledger.chain_count(), 0);
    }

    /// Only registered manufacturers open chains.
    #[tokio::test]
    async fn test_non_manufacturer_cannot_open() {
        let net = SupplyNetwork::new();
        let item = net.add_item("Kettle");
        let result = net
            .ledger
            .create_chain(item, RETAILER, 1, DISTRIBUTOR, 2)
            .await;
        assert_eq!(
            result,
            Err(CustodyError::UnauthorizedRole {
                role: Role::Manufacturer
            })
        );
    }

    // =============================================================================
    // RESALE
    // =============================================================================

    /// Alice sells to Bob; Alice can no longer move the item; Bob sells on.
    #[tokio::test]
    async fn test_resale_chain() {
        let net = SupplyNetwork::new();
        let item = net.add_item("Bicycle");
        net.register(ALICE, "Alice").await;
        net.register(BOB, "Bob").await;
        net.register(CAROL, "Carol").await;
        let chain_id = net.deliver(item, ALICE).await;

        net.ledger
            .transfer_ownership(ALICE, chain_id, ALICE, BOB, 500)
            .await
            .unwrap();
        assert_eq!(
            net.ledger
                .transfer_ownership(ALICE, chain_id, ALICE, CAROL, 510)
                .await,
            Err(CustodyError::NotOwner { chain_id })
        );

        net.ledger
            .transfer_ownership(BOB, chain_id, BOB, CAROL, 520)
            .await
            .unwrap();

        let chain = net.ledger.get_chain(chain_id).unwrap();
        assert_eq!(chain.status, ChainStatus::Reowned);
        assert_eq!(chain.current_owner, Some(CAROL));
        assert_eq!(chain.custody_entries.len(), 4);
        let owners: Vec<_> = chain.ownership_history.iter().map(|t| t.to).collect();
        assert_eq!(owners, vec![BOB, CAROL]);

        assert!(net.ledger.get_consumer(&ALICE).unwrap().held_items.is_empty());
        assert!(net.ledger.get_consumer(&BOB).unwrap().held_items.is_empty());
        assert_eq!(
            net.ledger.get_consumer(&CAROL).unwrap().held_items,
            vec![chain_id]
        );
    }

    /// Transfers to an unregistered identity are refused unless the ledger
    /// is configured to register them on the fly.
    #[tokio::test]
    async fn test_transfer_to_unregistered_consumer() {
        let strict = SupplyNetwork::new();
        let item = strict.add_item("Lamp");
        strict.register(ALICE, "Alice").await;
        let chain_id = strict.deliver(item, ALICE).await;
        assert_eq!(
            strict
                .ledger
                .transfer_ownership(ALICE, chain_id, ALICE, BOB, 1)
                .await,
            Err(CustodyError::UnknownConsumer(BOB))
        );

        let lenient = SupplyNetwork::with_config(CustodyConfig {
            auto_register_transfer_recipient: true,
            ..Default::default()
        });
        let item = lenient.add_item("Lamp");
        lenient.register(ALICE, "Alice").await;
        let chain_id = lenient.deliver(item, ALICE).await;
        lenient
            .ledger
            .transfer_ownership(ALICE, chain_id, ALICE, BOB, 1)
            .await
            .unwrap();
        let bob = lenient.ledger.get_consumer(&BOB).unwrap();
        assert_eq!(bob.held_items, vec![chain_id]);
        assert_eq!(bob.profile.name, "");
    }

    // =============================================================================
    // REGISTRY EFFECTS
    // =============================================================================

    /// Blocking takes effect on the holder's next call; unblocking restores it.
    #[tokio::test]
    async fn test_blocking_mid_chain() {
        let net = SupplyNetwork::new();
        let item = net.add_item("Drill");
        let chain_id = net
            .ledger
            .create_chain(item, MANUFACTURER, 1, DISTRIBUTOR, 2)
            .await
            .unwrap();

        net.roles
            .block(&ADMIN, Role::Distributor, &DISTRIBUTOR)
            .unwrap();
        assert_eq!(
            net.ledger
                .extend_chain(DISTRIBUTOR, chain_id, 3, WHOLESALER, 4)
                .await,
            Err(CustodyError::UnauthorizedCustodian(
                DenialReason::InactiveRoleHolder {
                    role: Role::Distributor
                }
            ))
        );
        assert_eq!(
            net.ledger.get_chain(chain_id).unwrap().custody_entries.len(),
            1
        );

        net.roles
            .unblock(&ADMIN, Role::Distributor, &DISTRIBUTOR)
            .unwrap();
        net.ledger
            .extend_chain(DISTRIBUTOR, chain_id, 3, WHOLESALER, 4)
            .await
            .unwrap();
    }

    /// A role is judged per position: a wholesaler may not act as distributor.
    #[tokio::test]
    async fn test_wrong_role_for_position() {
        let net = SupplyNetwork::new();
        let item = net.add_item("Drill");
        let chain_id = net
            .ledger
            .create_chain(item, MANUFACTURER, 1, WHOLESALER, 2)
            .await
            .unwrap();

        assert_eq!(
            net.ledger
                .extend_chain(WHOLESALER, chain_id, 3, RETAILER, 4)
                .await,
            Err(CustodyError::UnauthorizedCustodian(
                DenialReason::InactiveRoleHolder {
                    role: Role::Distributor
                }
            ))
        );
    }

    /// An identity holding several roles still follows the sequence.
    #[tokio::test]
    async fn test_multi_role_holder() {
        let net = SupplyNetwork::new();
        net.enroll(Role::Wholesaler, DISTRIBUTOR, "Asian Paints Wholesale");
        let item = net.add_item("Paint");
        net.register(ALICE, "Alice").await;

        let chain_id = net
            .ledger
            .create_chain(item, MANUFACTURER, 1, DISTRIBUTOR, 2)
            .await
            .unwrap();
        net.ledger
            .extend_chain(DISTRIBUTOR, chain_id, 3, DISTRIBUTOR, 4)
            .await
            .unwrap();
        net.ledger
            .extend_chain(DISTRIBUTOR, chain_id, 5, RETAILER, 6)
            .await
            .unwrap();
        net.ledger
            .close_to_consumer(RETAILER, chain_id, ALICE, 7)
            .await
            .unwrap();
        assert!(net.ledger.audit_chain(chain_id).is_ok());
    }

    // =============================================================================
    // CATALOG EFFECTS
    // =============================================================================

    /// Each physical unit has its own chain; the catalog item is shared.
    #[tokio::test]
    async fn test_many_units_of_one_item() {
        let net = SupplyNetwork::new();
        let kettle = net.add_item("Kettle");
        let lamp = net.add_item("Lamp");
        net.register(ALICE, "Alice").await;
        net.register(BOB, "Bob").await;

        let first = net.deliver(kettle, ALICE).await;
        let second = net.deliver(lamp, ALICE).await;
        let third = net.deliver(kettle, BOB).await;

        assert_eq!((first, second, third), (1, 2, 3));
        assert_eq!(net.ledger.chains_for_item(kettle), vec![1, 3]);
        assert_eq!(net.ledger.chains_for_item(lamp), vec![2]);
        assert_eq!(net.ledger.chain_count(), 3);
        assert_eq!(
            net.ledger.get_consumer(&ALICE).unwrap().held_items,
            vec![1, 2]
        );
    }

    // =============================================================================
    // PERSISTENCE
    // =============================================================================

    /// A snapshot survives JSON and restores into an equivalent ledger.
    #[tokio::test]
    async fn test_snapshot_restore_through_json() {
        let net = SupplyNetwork::new();
        let item = net.add_item("Watch");
        net.register(ALICE, "Alice").await;
        net.register(BOB, "Bob").await;
        let sold = net.deliver(item, ALICE).await;
        net.ledger
            .transfer_ownership(ALICE, sold, ALICE, BOB, 900)
            .await
            .unwrap();
        let open = net
            .ledger
            .create_chain(item, MANUFACTURER, 1, DISTRIBUTOR, 2)
            .await
            .unwrap();

        let json = serde_json::to_string(&net.ledger.snapshot()).unwrap();
        let snapshot: LedgerSnapshot = serde_json::from_str(&json).unwrap();

        let restored = CustodyChainService::restore(
            CustodyConfig::default(),
            snapshot,
            net.catalog.clone(),
            net.roles.clone(),
            Arc::new(InMemoryEventBus::new()),
        )
        .unwrap();

        assert_eq!(restored.snapshot(), net.ledger.snapshot());
        assert_eq!(restored.get_chain(sold).unwrap().current_owner, Some(BOB));

        restored
            .extend_chain(DISTRIBUTOR, open, 3, WHOLESALER, 4)
            .await
            .unwrap();
        assert_eq!(restored.chains_for_item(item), vec![sold, open]);
    }

    /// A snapshot taken under a longer sequence does not fit a shorter one.
    #[tokio::test]
    async fn test_restore_rejects_mismatched_sequence() {
        let net = SupplyNetwork::new();
        let item = net.add_item("Watch");
        net.register(ALICE, "Alice").await;
        net.deliver(item, ALICE).await;

        let result = CustodyChainService::restore(
            CustodyConfig {
                role_sequence: vec![Role::Manufacturer, Role::Retailer],
                ..Default::default()
            },
            net.ledger.snapshot(),
            net.catalog.clone(),
            net.roles.clone(),
            Arc::new(InMemoryEventBus::new()),
        );
        assert!(matches!(result, Err(CustodyError::InvariantViolation(_))));
    }
}
