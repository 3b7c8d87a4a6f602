pub mod common;
pub mod entity;
pub mod player;
pub mod realm;

pub use common::{ConnectorId, EntityId, IdAllocator, RealmId, Timestamp};
pub use entity::{EntityKind, GameEntity};
pub use player::PlayerState;
pub use realm::{
    BiomeKind, Connector, ConnectorKind, Realm, RealmDetails, RealmStats,
};
