//! # Custody Attacks
//!
//! | Attack | Defence |
//! |--------|---------|
//! | Forged hand-off by a valid role holder | Continuity check |
//! | Skipping intermediate roles | Position check |
//! | Acting after being blocked | Live role lookup |
//! | Selling one unit twice | Status machine |
//! | Stealing a consumer's item | Owner and caller checks |
//! | Replaying an old transfer | Owner check |
//! | Racing two transfers of one item | Per-chain lock |
//! | Re-registering to overwrite a profile | Registration is once only |

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use pc_02_role_registry::RoleRegistryApi;
    use pc_03_custody_chain::{
        ChainStatus, CustodyChainApi, CustodyError, DenialReason, OwnershipApi,
    };
    use shared_types::{ContactProfile, Role};
    use std::sync::Arc;

    const ROGUE_RETAILER: shared_types::Address = [0x44; 20];

    /// A legitimately registered retailer intercepts a chain meant for another.
    #[tokio::test]
    async fn test_forged_handoff_by_registered_holder() {
        let net = SupplyNetwork::new();
        net.enroll(Role::Retailer, ROGUE_RETAILER, "Rogue Store");
        let item = net.add_item("Phone");
        net.register(ALICE, "Alice").await;

        let chain_id = net
            .ledger
            .create_chain(item, MANUFACTURER, 1, DISTRIBUTOR, 2)
            .await
            .unwrap();
        net.ledger
            .extend_chain(DISTRIBUTOR, chain_id, 3, WHOLESALER, 4)
            .await
            .unwrap();
        net.ledger
            .extend_chain(WHOLESALER, chain_id, 5, RETAILER, 6)
            .await
            .unwrap();

        let result = net
            .ledger
            .close_to_consumer(ROGUE_RETAILER, chain_id, ALICE, 7)
            .await;
        assert_eq!(
            result,
            Err(CustodyError::UnauthorizedCustodian(
                DenialReason::NotIntendedRecipient {
                    expected: RETAILER,
                    caller: ROGUE_RETAILER,
                }
            ))
        );
        let chain = net.ledger.get_chain(chain_id).unwrap();
        assert_eq!(chain.status, ChainStatus::InCustodyChain);
        assert!(net.ledger.get_consumer(&ALICE).unwrap().held_items.is_empty());
    }

    /// The manufacturer hands straight to a retailer to skip the middlemen.
    #[tokio::test]
    async fn test_skipping_intermediate_roles() {
        let net = SupplyNetwork::new();
        let item = net.add_item("Phone");
        net.register(ALICE, "Alice").await;

        let chain_id = net
            .ledger
            .create_chain(item, MANUFACTURER, 1, RETAILER, 2)
            .await
            .unwrap();

        assert_eq!(
            net.ledger
                .close_to_consumer(RETAILER, chain_id, ALICE, 3)
                .await,
            Err(CustodyError::UnauthorizedCustodian(
                DenialReason::NoStepAtPosition { position: 1 }
            ))
        );
        assert_eq!(
            net.ledger
                .extend_chain(RETAILER, chain_id, 3, RETAILER, 4)
                .await,
            Err(CustodyError::UnauthorizedCustodian(
                DenialReason::InactiveRoleHolder {
                    role: Role::Distributor
                }
            ))
        );
    }

    /// A blocked wholesaler keeps trying after the administrator acts.
    #[tokio::test]
    async fn test_blocked_holder_cannot_continue() {
        let net = SupplyNetwork::new();
        let item = net.add_item("Phone");
        let chain_id = net
            .ledger
            .create_chain(item, MANUFACTURER, 1, DISTRIBUTOR, 2)
            .await
            .unwrap();
        net.ledger
            .extend_chain(DISTRIBUTOR, chain_id, 3, WHOLESALER, 4)
            .await
            .unwrap();

        net.roles.block(&ADMIN, Role::Wholesaler, &WHOLESALER).unwrap();
        for attempt in 0..3 {
            assert!(matches!(
                net.ledger
                    .extend_chain(WHOLESALER, chain_id, 5 + attempt, RETAILER, 6)
                    .await,
                Err(CustodyError::UnauthorizedCustodian(_))
            ));
        }
        assert_eq!(
            net.ledger.get_chain(chain_id).unwrap().custody_entries.len(),
            2
        );
    }

    /// Non-admins cannot grant themselves a role.
    #[tokio::test]
    async fn test_self_enrollment_refused() {
        let net = SupplyNetwork::new();
        assert!(net
            .roles
            .register_player(
                &MALLORY,
                Role::Manufacturer,
                MALLORY,
                Default::default()
            )
            .is_err());

        let item = net.add_item("Phone");
        assert_eq!(
            net.ledger
                .create_chain(item, MALLORY, 1, MALLORY, 2)
                .await,
            Err(CustodyError::UnauthorizedRole {
                role: Role::Manufacturer
            })
        );
    }

    /// The retailer tries to sell the same unit to a second consumer.
    #[tokio::test]
    async fn test_double_sale() {
        let net = SupplyNetwork::new();
        let item = net.add_item("Phone");
        net.register(ALICE, "Alice").await;
        net.register(BOB, "Bob").await;
        let chain_id = net.deliver(item, ALICE).await;

        assert_eq!(
            net.ledger
                .close_to_consumer(RETAILER, chain_id, BOB, 200)
                .await,
            Err(CustodyError::ChainClosed {
                chain_id,
                status: ChainStatus::Delivered
            })
        );
        assert!(net.ledger.get_consumer(&BOB).unwrap().held_items.is_empty());
    }

    /// Mallory names Alice as sender but signs the call herself.
    #[tokio::test]
    async fn test_theft_by_impersonating_sender() {
        let net = SupplyNetwork::new();
        let item = net.add_item("Phone");
        net.register(ALICE, "Alice").await;
        net.register(MALLORY, "Mallory").await;
        let chain_id = net.deliver(item, ALICE).await;

        assert_eq!(
            net.ledger
                .transfer_ownership(MALLORY, chain_id, ALICE, MALLORY, 300)
                .await,
            Err(CustodyError::UnauthorizedCustodian(
                DenialReason::NotCurrentOwner { caller: MALLORY }
            ))
        );
        assert_eq!(
            net.ledger
                .transfer_ownership(MALLORY, chain_id, MALLORY, MALLORY, 300)
                .await,
            Err(CustodyError::NotOwner { chain_id })
        );
        assert_eq!(
            net.ledger.get_chain(chain_id).unwrap().current_owner,
            Some(ALICE)
        );
    }

    /// Alice replays her old sale after Bob sold the item on.
    #[tokio::test]
    async fn test_replayed_transfer() {
        let net = SupplyNetwork::new();
        let item = net.add_item("Phone");
        for (who, name) in [(ALICE, "Alice"), (BOB, "Bob"), (CAROL, "Carol")] {
            net.register(who, name).await;
        }
        let chain_id = net.deliver(item, ALICE).await;
        net.ledger
            .transfer_ownership(ALICE, chain_id, ALICE, BOB, 1)
            .await
            .unwrap();
        net.ledger
            .transfer_ownership(BOB, chain_id, BOB, CAROL, 2)
            .await
            .unwrap();

        assert_eq!(
            net.ledger
                .transfer_ownership(ALICE, chain_id, ALICE, BOB, 1)
                .await,
            Err(CustodyError::NotOwner { chain_id })
        );
        assert_eq!(
            net.ledger.get_chain(chain_id).unwrap().ownership_history.len(),
            2
        );
    }

    /// Alice races two buyers; exactly one sale lands.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_double_spend() {
        for _ in 0..20 {
            let net = Arc::new(SupplyNetwork::new());
            let item = net.add_item("Phone");
            for (who, name) in [(ALICE, "Alice"), (BOB, "Bob"), (CAROL, "Carol")] {
                net.register(who, name).await;
            }
            let chain_id = net.deliver(item, ALICE).await;

            let to_bob = {
                let net = net.clone();
                tokio::spawn(async move {
                    net.ledger
                        .transfer_ownership(ALICE, chain_id, ALICE, BOB, 9)
                        .await
                })
            };
            let to_carol = {
                let net = net.clone();
                tokio::spawn(async move {
                    net.ledger
                        .transfer_ownership(ALICE, chain_id, ALICE, CAROL, 9)
                        .await
                })
            };
            let outcomes = [to_bob.await.unwrap(), to_carol.await.unwrap()];
            assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 1);

            let held: usize = [ALICE, BOB, CAROL]
                .iter()
                .map(|c| net.ledger.get_consumer(c).unwrap().held_items.len())
                .sum();
            assert_eq!(held, 1);
            assert!(net.ledger.audit_chain(chain_id).is_ok());
        }
    }

    /// Re-registration cannot replace an existing consumer's profile.
    #[tokio::test]
    async fn test_profile_overwrite_refused() {
        let net = SupplyNetwork::new();
        net.register(ALICE, "Alice").await;
        assert_eq!(
            net.ledger
                .register_consumer(ALICE, ContactProfile::named("Mallory"))
                .await,
            Err(CustodyError::AlreadyRegistered(ALICE))
        );
        assert_eq!(net.ledger.get_consumer(&ALICE).unwrap().profile.name, "Alice");
    }
}
