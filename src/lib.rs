//! Bridge between a Bevy host simulation and an exercise bike over UDP.
//!
//! Each tick the bridge sends the rider's incline angle to the bike and
//! receives the measured wheel speed back, then combines that speed with a
//! locally integrated gravity term into the velocity applied to the rider.

pub mod bridge;
pub mod device;
pub mod gravity;
pub mod ground;
pub mod incline;
pub mod link;

pub use bridge::{ApplyRiderVelocity, BikeBridgePlugin, BridgeSettings, Rider};
pub use gravity::VerticalVelocity;
pub use ground::{GroundProbe, GroundRay};
pub use link::{BikeLink, LinkError};
