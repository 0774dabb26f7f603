//! Stand-in for the bike-side connector: integrates wheel velocity from the
//! received incline using slope force, rolling resistance and aerodynamic
//! drag. Used as the fixed peer in loopback tests and for running the bridge
//! without hardware.

use std::io;
use std::net::UdpSocket;
use std::time::Instant;

use crate::incline::{from_wire, to_wire};
use crate::link::WIRE_LEN;

const GRAVITY: f32 = 9.81;
const ROLLING_RESISTANCE_COEFFICIENT: f32 = 0.01;
const BIKE_AND_RIDER_MASS: f32 = 75.0;
const AIR_DENSITY: f32 = 1.225;
const BIKE_AND_RIDER_AREA: f32 = 0.5;
const DRAG_COEFFICIENT: f32 = 1.0;

/// Wheel velocity model of the bike.
pub struct DeviceSim {
    velocity: f32,
}

impl DeviceSim {
    pub fn new(initial_velocity: f32) -> Self {
        Self {
            velocity: initial_velocity,
        }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Advance the wheel velocity by one control interval for the given
    /// incline. The wheel never spins backward.
    pub fn step(&mut self, incline_deg: f32, dt: f32) -> f32 {
        let rad = incline_deg.to_radians();

        let mut newtons = GRAVITY * rad.sin() * BIKE_AND_RIDER_MASS;
        newtons += ROLLING_RESISTANCE_COEFFICIENT * GRAVITY * BIKE_AND_RIDER_MASS * rad.cos();
        newtons +=
            0.5 * DRAG_COEFFICIENT * AIR_DENSITY * BIKE_AND_RIDER_AREA * self.velocity * self.velocity;

        let accel = -newtons / BIKE_AND_RIDER_MASS;
        self.velocity = (self.velocity + accel * dt).max(0.0);
        self.velocity
    }
}

/// Answer `ticks` incline datagrams on `socket` with the stepped wheel
/// velocity. Undersized datagrams are ignored rather than answered.
pub fn serve(socket: &UdpSocket, sim: &mut DeviceSim, ticks: usize) -> io::Result<()> {
    let mut last = Instant::now();
    let mut buf = [0u8; WIRE_LEN];
    let mut answered = 0;

    while answered < ticks {
        let (n, from) = socket.recv_from(&mut buf)?;
        if n < WIRE_LEN {
            continue;
        }

        let incline = from_wire(buf);
        let now = Instant::now();
        let speed = sim.step(incline, (now - last).as_secs_f32());
        last = now;

        socket.send_to(&to_wire(speed), from)?;
        answered += 1;
    }
    Ok(())
}
