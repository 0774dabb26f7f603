//! Incline encoding: rider pitch folded into a signed angle, plus the 4-byte
//! wire form shared with the bike.

use bevy::prelude::*;

use crate::link::WIRE_LEN;

/// Control input sent when no rider entity can be resolved.
pub const SENTINEL_INCLINE: f32 = 0.0;

/// Fold a raw orientation angle in `[0, 360)` into a signed incline in
/// `(-180, 180]`: angles below 180 read as leaning backward and negate,
/// angles at or above 180 read as leaning forward and map to `360 - angle`.
pub fn fold_incline(raw_deg: f32) -> f32 {
    if raw_deg < 180.0 {
        -raw_deg
    } else {
        360.0 - raw_deg
    }
}

/// X-axis Euler angle of the rider transform, in degrees in `[0, 360)`.
/// X leads the decomposition order: leading-axis extraction covers the full
/// circle and recovers pure-pitch rotations exactly, where a middle-axis
/// extraction would clamp to ±90.
pub fn pitch_degrees(transform: &Transform) -> f32 {
    let (pitch, _, _) = transform.rotation.to_euler(EulerRot::XYZ);
    pitch.to_degrees().rem_euclid(360.0)
}

/// IEEE-754 binary32 in the platform's native byte order, matching the peer.
pub fn to_wire(value: f32) -> [u8; WIRE_LEN] {
    value.to_ne_bytes()
}

pub fn from_wire(bytes: [u8; WIRE_LEN]) -> f32 {
    f32::from_ne_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_180_negates() {
        for deg in 0..180 {
            let a = deg as f32;
            assert_eq!(fold_incline(a), -a);
        }
    }

    #[test]
    fn at_or_above_180_folds_back() {
        for deg in 180..360 {
            let a = deg as f32;
            let folded = fold_incline(a);
            assert_eq!(folded, 360.0 - a);
            assert!((0.0..=180.0).contains(&folded));
        }
    }

    #[test]
    fn wire_roundtrip_is_bit_exact() {
        for v in [
            0.0f32,
            -0.0,
            SENTINEL_INCLINE,
            -90.0,
            90.0,
            179.999,
            f32::MIN_POSITIVE,
            f32::MAX,
            -1234.5678,
        ] {
            assert_eq!(from_wire(to_wire(v)).to_bits(), v.to_bits());
        }
    }

    #[test]
    fn pitch_wraps_negative_rotations() {
        let t = Transform::from_rotation(Quat::from_rotation_x(-30f32.to_radians()));
        let deg = pitch_degrees(&t);
        assert!((deg - 330.0).abs() < 1e-3, "got {deg}");
        assert!((fold_incline(deg) - 30.0).abs() < 1e-3);
    }

    #[test]
    fn pitch_of_identity_is_zero() {
        assert!(pitch_degrees(&Transform::IDENTITY).abs() < 1e-6);
    }

    #[test]
    fn straight_up_and_down_pitch_is_not_clamped() {
        // 90 and 270 sit exactly where a middle-axis Euler extraction
        // gimbal-locks; the rider must still encode them as ±90.
        let up = Transform::from_rotation(Quat::from_rotation_x(90f32.to_radians()));
        assert!((fold_incline(pitch_degrees(&up)) - -90.0).abs() < 1e-3);

        let down = Transform::from_rotation(Quat::from_rotation_x(270f32.to_radians()));
        assert!((fold_incline(pitch_degrees(&down)) - 90.0).abs() < 1e-3);
    }

    #[test]
    fn pitch_covers_the_full_circle() {
        for deg in (0..360).step_by(15) {
            let t = Transform::from_rotation(Quat::from_rotation_x((deg as f32).to_radians()));
            let got = pitch_degrees(&t);
            let diff = (got - deg as f32).rem_euclid(360.0);
            let diff = diff.min(360.0 - diff);
            assert!(diff < 1e-2, "pitch {deg}: got {got}");
        }
    }
}
