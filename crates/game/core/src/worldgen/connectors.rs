use std::f64::consts::TAU;

use strum::{EnumCount, IntoEnumIterator};

use crate::env::GameEnv;
use crate::geometry::Point;
use crate::state::{Connector, ConnectorId, ConnectorKind};

use super::{CONTEXT_CONNECTOR_KIND, roll};

/// Places connector `index` of `total` on a regular polygon inscribed in the
/// realm, starting at angle zero (east of center) and going clockwise in screen
/// coordinates. The kind is picked uniformly at random.
///
/// The returned connector is always unexplored.
pub fn generate_connector(
    env: &GameEnv<'_>,
    seed: u64,
    id: ConnectorId,
    index: u32,
    total: u32,
) -> Connector {
    let config = env.config();
    let angle = f64::from(index) / f64::from(total.max(1)) * TAU;
    let radius = config.realm_size / 2.0 - config.connector_margin;
    let center = config.spawn_point();

    let position = Point::new(
        center.x + angle.cos() * radius,
        center.y + angle.sin() * radius,
    );

    let pick = env
        .rng()
        .index(roll(seed, id.0, CONTEXT_CONNECTOR_KIND), ConnectorKind::COUNT);
    let kind = ConnectorKind::iter().nth(pick).unwrap_or(ConnectorKind::Road);

    Connector::new(id, kind, position)
}
