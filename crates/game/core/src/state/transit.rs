use super::{BiomeKind, ConnectorId, RealmId};

/// Discovery request that is waiting for flavor text.
///
/// Level and biome are fixed when the request starts, so the text collaborator
/// and the realm that is eventually committed always agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingDiscovery {
    pub origin: RealmId,
    pub connector: ConnectorId,
    pub level: u32,
    pub biome: BiomeKind,
}

/// Realm-transition state machine: `Idle -> AwaitingGeneration -> Idle`.
///
/// While a discovery is pending, no second discovery can start, and the tick
/// is suspended for the origin realm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitStatus {
    #[default]
    Idle,
    AwaitingGeneration(PendingDiscovery),
}

impl TransitStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, TransitStatus::Idle)
    }

    pub fn pending(&self) -> Option<&PendingDiscovery> {
        match self {
            TransitStatus::Idle => None,
            TransitStatus::AwaitingGeneration(pending) => Some(pending),
        }
    }

    /// Whether a pending discovery departs from `realm`.
    pub fn suspends(&self, realm: RealmId) -> bool {
        self.pending().is_some_and(|pending| pending.origin == realm)
    }
}
