//! Configuration for the Custody Chain Ledger

use crate::domain::{CustodyError, CustodyResult};
use serde::{Deserialize, Serialize};
use shared_types::Role;

/// Custody ledger configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyConfig {
    /// Role performing each custody step, by entry position.
    ///
    /// The first role opens a chain, the last closes it to a consumer.
    pub role_sequence: Vec<Role>,
    /// Register an unknown transfer recipient with an empty profile instead
    /// of rejecting the transfer.
    pub auto_register_transfer_recipient: bool,
}

impl Default for CustodyConfig {
    fn default() -> Self {
        Self {
            role_sequence: Role::ALL.to_vec(),
            auto_register_transfer_recipient: false,
        }
    }
}

impl CustodyConfig {
    /// Reject sequences that cannot form a chain.
    pub fn validate(&self) -> CustodyResult<()> {
        let seq = &self.role_sequence;
        if seq.len() < 2 {
            return Err(CustodyError::InvalidConfig(
                "role_sequence needs at least two roles".to_string(),
            ));
        }
        if seq.first() != Some(&Role::Manufacturer) {
            return Err(CustodyError::InvalidConfig(
                "role_sequence must start with manufacturer".to_string(),
            ));
        }
        if seq.last() != Some(&Role::Retailer) {
            return Err(CustodyError::InvalidConfig(
                "role_sequence must end with retailer".to_string(),
            ));
        }
        for (i, role) in seq.iter().enumerate() {
            if seq[..i].contains(role) {
                return Err(CustodyError::InvalidConfig(format!(
                    "role {} appears more than once in role_sequence",
                    role
                )));
            }
        }
        Ok(())
    }

    /// Role that opens a chain.
    pub fn opening_role(&self) -> Role {
        self.role_sequence
            .first()
            .copied()
            .unwrap_or(Role::Manufacturer)
    }
}
