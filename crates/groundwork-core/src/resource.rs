//! Resource identity and the capability interface shared by all kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::contract::ResourceType;

/// Process-unique identity token assigned to a resource at construction.
///
/// Identities are allocated from a monotonic counter and never reused, even
/// across separate deployments in the same process. They carry no meaning
/// beyond uniqueness; two resources constructed from identical arguments
/// still receive distinct identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(u64);

impl ResourceId {
    /// Wrap a raw identity value. Only the registry allocates fresh ones.
    pub fn from_raw(raw: u64) -> Self {
        ResourceId(raw)
    }

    /// The raw identity value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capability interface implemented by every concrete resource kind.
///
/// Downstream consumers (edge derivation, the registry, diagnostics) treat
/// all kinds uniformly through this trait; there is no base struct to
/// inherit from.
pub trait Resource {
    /// The identity assigned at construction. Never changes.
    fn id(&self) -> ResourceId;

    /// The static type descriptor for this kind. Never changes.
    fn resource_type(&self) -> &'static ResourceType;

    /// Human-readable name supplied by the caller. Used for diagnostics and
    /// addressing; not guaranteed unique.
    fn display_name(&self) -> &str;
}
