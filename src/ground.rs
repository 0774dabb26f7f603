//! Ground contact: one downward ray against the host environment, classified
//! with a clearance threshold.

use bevy::prelude::*;

/// Host-supplied ray query primitive. Returns the distance to the first
/// intersection along `dir`, or `None` when the ray hits nothing.
pub trait GroundProbe: Send + Sync {
    fn cast(&self, origin: Vec3, dir: Vec3) -> Option<f32>;
}

impl<F> GroundProbe for F
where
    F: Fn(Vec3, Vec3) -> Option<f32> + Send + Sync,
{
    fn cast(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        self(origin, dir)
    }
}

/// The ray primitive the host hands to the bridge plugin.
#[derive(Resource)]
pub struct GroundRay(pub Box<dyn GroundProbe>);

/// Grounded iff the ray reports a hit closer than `clearance`. A miss reads
/// as airborne, never as contact with nonexistent ground.
pub fn is_grounded(probe: &dyn GroundProbe, origin: Vec3, down: Vec3, clearance: f32) -> bool {
    match probe.cast(origin, down) {
        Some(distance) => distance < clearance,
        None => false,
    }
}
