//! The per-tick control loop: encode incline, exchange datagrams with the
//! bike, sense the ground, integrate gravity, deliver the composed velocity.

use std::net::SocketAddr;
use std::time::Duration;

use bevy::app::AppExit;
use bevy::log::{debug, info, warn, warn_once};
use bevy::prelude::*;

use crate::gravity::{integrate, VerticalVelocity};
use crate::ground::{is_grounded, GroundRay};
use crate::incline::{fold_incline, from_wire, pitch_degrees, to_wire, SENTINEL_INCLINE};
use crate::link::{BikeLink, LinkError};

/// Marker for the rider entity the bridge steers. The host spawns it; an
/// empty query is the "rider absent" case and is not an error.
#[derive(Component)]
pub struct Rider;

/// Composed rider velocity, delivered at most once per tick. Fire-and-forget:
/// the host decides how to apply it to the rider body.
#[derive(Event)]
pub struct ApplyRiderVelocity(pub Vec3);

#[derive(Resource, Clone)]
pub struct BridgeSettings {
    /// Bike endpoint, fixed for the session.
    pub peer: SocketAddr,
    /// Bound on the per-tick receive stall.
    pub receive_timeout: Duration,
    /// Rider origin height above the wheels.
    pub ride_height: f32,
    /// Slack added on top of the ride height before contact is lost.
    pub ground_tolerance: f32,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            peer: SocketAddr::from(([127, 0, 0, 1], 33356)),
            receive_timeout: Duration::from_millis(10),
            ride_height: 1.1,
            ground_tolerance: 0.25,
        }
    }
}

impl BridgeSettings {
    /// Ray distance below which the rider counts as on the ground.
    pub fn clearance(&self) -> f32 {
        self.ride_height + self.ground_tolerance
    }
}

/// Registers the bridge against the host app. The datagram exchange runs on
/// every tick once the link is open; the host must insert a [`GroundRay`]
/// with its ray-query primitive before any velocity is composed and
/// delivered — until then the bike still receives a well-formed incline.
pub struct BikeBridgePlugin;
impl Plugin for BikeBridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BridgeSettings>()
            .init_resource::<VerticalVelocity>()
            .add_event::<ApplyRiderVelocity>()
            .add_systems(Startup, open_link)
            .add_systems(Update, exchange_tick.run_if(resource_exists::<BikeLink>))
            .add_systems(Last, close_link);
    }
}

/// Failing to open the channel is the one failure fatal to the whole bridge.
fn open_link(
    mut commands: Commands,
    settings: Res<BridgeSettings>,
    mut vertical: ResMut<VerticalVelocity>,
) {
    match BikeLink::open(settings.peer, settings.receive_timeout) {
        Ok(link) => {
            info!("bike link open, peer {}", settings.peer);
            vertical.0 = 0.0;
            commands.insert_resource(link);
        }
        Err(e) => panic!("failed to open bike link to {}: {e}", settings.peer),
    }
}

fn close_link(
    mut commands: Commands,
    mut exits: EventReader<AppExit>,
    link: Option<Res<BikeLink>>,
) {
    if exits.read().next().is_some() && link.is_some() {
        info!("bike link closed");
        commands.remove_resource::<BikeLink>();
    }
}

/// One full exchange per tick. Transport failures and timeouts are tick-local:
/// the rest of the tick is skipped and the next tick starts fresh on the same
/// link.
fn exchange_tick(
    link: Res<BikeLink>,
    settings: Res<BridgeSettings>,
    probe: Option<Res<GroundRay>>,
    time: Res<Time>,
    mut vertical: ResMut<VerticalVelocity>,
    rider_q: Query<&Transform, With<Rider>>,
    mut out: EventWriter<ApplyRiderVelocity>,
) {
    let rider = rider_q.get_single().ok();
    let angle = match rider {
        Some(t) => fold_incline(pitch_degrees(t)),
        None => SENTINEL_INCLINE,
    };

    if let Err(e) = link.send(to_wire(angle)) {
        warn!("incline send failed: {e}");
        return;
    }

    let speed = match link.recv() {
        Ok(bytes) => from_wire(bytes),
        Err(LinkError::Timeout) => {
            debug!("no speed reply this tick");
            return;
        }
        Err(e) => {
            warn!("speed receive failed: {e}");
            return;
        }
    };

    // Without a rider there is nothing to ground-check or steer; the gravity
    // scalar is left untouched rather than integrated against nothing.
    let Some(transform) = rider else { return };

    // Same for a host that has not installed its ray primitive yet.
    let Some(probe) = probe else {
        warn_once!("no GroundRay installed; exchanging but not delivering velocity");
        return;
    };

    let grounded = is_grounded(
        probe.0.as_ref(),
        transform.translation,
        *transform.down(),
        settings.clearance(),
    );
    vertical.0 = integrate(vertical.0, grounded, time.delta_seconds());

    out.send(ApplyRiderVelocity(
        *transform.forward() * speed + *transform.up() * vertical.0,
    ));
}
