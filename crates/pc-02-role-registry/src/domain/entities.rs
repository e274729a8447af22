//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{ParticipantProfile, Role};

/// A registered holder of one supply-chain role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePlayer {
    /// Role this registration is for.
    pub role: Role,
    /// Business profile.
    pub profile: ParticipantProfile,
    /// Blocked holders keep their history but may not act.
    pub blocked: bool,
    /// Distinguishes a real registration from a default record.
    pub registered: bool,
}

impl RolePlayer {
    /// Fresh, unblocked registration.
    pub fn new(role: Role, profile: ParticipantProfile) -> Self {
        Self {
            role,
            profile,
            blocked: false,
            registered: true,
        }
    }

    /// Registered and not blocked.
    pub fn is_active(&self) -> bool {
        self.registered && !self.blocked
    }
}
