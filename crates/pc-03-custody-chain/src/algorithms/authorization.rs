//! # Transfer Authorization
//!
//! Stateless predicate deciding whether a caller may write the next custody
//! entry. Re-evaluated on every call against the live role registry.
//!
//! Checks run in a fixed order and the first failure is reported:
//!
//! 1. Continuity: the caller is the recipient the previous custodian named.
//! 2. Position: the role sequence has a step of the requested kind at the
//!    position the new entry would occupy.
//! 3. Role: the caller is an active holder of the role for that position.

use crate::domain::{ChainRecord, CustodyError, CustodyResult, DenialReason, StepKind};
use crate::ports::RoleRegistryGateway;
use shared_types::{Address, Role};

/// Outcome of an authorization check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorizationDecision {
    /// Caller may proceed.
    Allowed,
    /// Caller is refused.
    Denied(DenialReason),
}

impl AuthorizationDecision {
    /// Whether the caller may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Convert into the ledger error for a denial.
    pub fn into_result(self) -> CustodyResult<()> {
        match self {
            Self::Allowed => Ok(()),
            Self::Denied(reason) => Err(CustodyError::UnauthorizedCustodian(reason)),
        }
    }
}

/// The caller must be the identity the last entry handed off to.
pub fn check_continuity(record: &ChainRecord, caller: &Address) -> AuthorizationDecision {
    match record.pending_recipient() {
        Some(expected) if expected == *caller => AuthorizationDecision::Allowed,
        Some(expected) => AuthorizationDecision::Denied(DenialReason::NotIntendedRecipient {
            expected,
            caller: *caller,
        }),
        None => AuthorizationDecision::Denied(DenialReason::NoPendingRecipient),
    }
}

/// Role expected for a `kind` step at `position`, if the sequence has one.
///
/// Position 0 is the opening step. The last position of the sequence is the
/// closing step. Everything strictly between is an extension.
pub fn resolve_step(sequence: &[Role], position: usize, kind: StepKind) -> Option<Role> {
    let last = sequence.len().checked_sub(1)?;
    let valid = match kind {
        StepKind::Open => position == 0,
        StepKind::Extend => position > 0 && position < last,
        StepKind::Close => position == last && last > 0,
    };
    if valid {
        sequence.get(position).copied()
    } else {
        None
    }
}

/// The caller must be registered and unblocked for `role`.
pub fn check_role<R: RoleRegistryGateway + ?Sized>(
    registry: &R,
    caller: &Address,
    role: Role,
) -> AuthorizationDecision {
    if registry.is_active_holder(caller, role) {
        AuthorizationDecision::Allowed
    } else {
        AuthorizationDecision::Denied(DenialReason::InactiveRoleHolder { role })
    }
}

/// Continuity then role, for a caller expected to hold `expected_role`.
pub fn authorize<R: RoleRegistryGateway + ?Sized>(
    record: &ChainRecord,
    caller: &Address,
    expected_role: Role,
    registry: &R,
) -> AuthorizationDecision {
    match check_continuity(record, caller) {
        AuthorizationDecision::Allowed => check_role(registry, caller, expected_role),
        denied => denied,
    }
}

/// Full check for appending a `kind` entry to an open chain.
///
/// Resolves the role for the next position and runs [`authorize`] against
/// it. A position with no step of this kind is reported only to the
/// rightful recipient; anyone else still gets the continuity denial.
pub fn authorize_step<R: RoleRegistryGateway + ?Sized>(
    record: &ChainRecord,
    caller: &Address,
    kind: StepKind,
    sequence: &[Role],
    registry: &R,
) -> AuthorizationDecision {
    let position = record.next_position();
    match resolve_step(sequence, position, kind) {
        Some(role) => authorize(record, caller, role, registry),
        None => match check_continuity(record, caller) {
            AuthorizationDecision::Allowed => {
                AuthorizationDecision::Denied(DenialReason::NoStepAtPosition { position })
            }
            denied => denied,
        },
    }
}

/// Opening a chain needs only the opening role.
pub fn authorize_creation<R: RoleRegistryGateway + ?Sized>(
    registry: &R,
    creator: &Address,
    opening_role: Role,
) -> CustodyResult<()> {
    if registry.is_active_holder(creator, opening_role) {
        Ok(())
    } else {
        Err(CustodyError::UnauthorizedRole { role: opening_role })
    }
}

/// Post-delivery transfers must be requested by the owner themself.
pub fn authorize_owner(owner: &Address, caller: &Address) -> AuthorizationDecision {
    if owner == caller {
        AuthorizationDecision::Allowed
    } else {
        AuthorizationDecision::Denied(DenialReason::NotCurrentOwner { caller: *caller })
    }
}
