//! # Administrator Authority
//!
//! The single global administrator identity, modelled as an injected
//! capability rather than a global singleton.

use crate::entities::Address;

/// Admin-authorization check consumed by the collaborator registries.
pub trait AdminCheck: Send + Sync {
    /// The administrator identity.
    fn admin(&self) -> Address;

    /// Whether `caller` is the administrator.
    fn is_admin(&self, caller: &Address) -> bool {
        self.admin() == *caller
    }
}

/// Fixed administrator chosen at deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdminAuthority {
    admin: Address,
}

impl AdminAuthority {
    /// Create an authority for the given administrator.
    pub fn new(admin: Address) -> Self {
        Self { admin }
    }
}

impl AdminCheck for AdminAuthority {
    fn admin(&self) -> Address {
        self.admin
    }
}
