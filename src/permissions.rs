use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A host capability the application has to ask for before using it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Camera,
    Location,
    MediaLibrary,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Camera => "camera",
            Self::Location => "location",
            Self::MediaLibrary => "media library",
        };
        f.write_str(name)
    }
}

/// Outcome of a permission prompt. Anything that is not an explicit grant
/// is treated as a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// The permission prompt collaborator.
///
/// A denial blocks the dependent feature with a user-facing message; it is
/// never fatal and never retried.
pub trait Permissions: Send + Sync {
    fn query(&self, capability: Capability) -> PermissionStatus;
}

/// Explicit permission fixture: grants everything except the capabilities
/// it was told to deny.
///
/// This replaces any notion of ambient permission state. Tests and callers
/// construct exactly the grant set they want and inject it.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    denied: HashSet<Capability>,
}

impl StaticPermissions {
    /// Grants every capability.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Denies every capability.
    pub fn deny_all() -> Self {
        Self::default()
            .deny(Capability::Camera)
            .deny(Capability::Location)
            .deny(Capability::MediaLibrary)
    }

    /// Marks a single capability as denied.
    #[must_use]
    pub fn deny(mut self, capability: Capability) -> Self {
        self.denied.insert(capability);
        self
    }
}

impl Permissions for StaticPermissions {
    fn query(&self, capability: Capability) -> PermissionStatus {
        if self.denied.contains(&capability) {
            PermissionStatus::Denied
        } else {
            PermissionStatus::Granted
        }
    }
}
