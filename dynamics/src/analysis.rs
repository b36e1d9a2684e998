//! Measurements taken from a finished trajectory

use common::numerics::clamp;
use glam::DVec3;

/// Samples at the end of a run used to estimate the outgoing direction
pub const EXIT_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach {
    pub distance: f64,
    pub position: DVec3,
    pub index: usize,
}

/// Sample nearest to `reference`; the first one wins ties
pub fn find_closest_approach(positions: &[DVec3], reference: DVec3) -> Option<ClosestApproach> {
    positions
        .iter()
        .enumerate()
        .map(|(index, &position)| ClosestApproach {
            distance: position.distance(reference),
            position,
            index,
        })
        .fold(None, |best: Option<ClosestApproach>, candidate| match best {
            Some(b) if b.distance <= candidate.distance => Some(b),
            _ => Some(candidate),
        })
}

/// Angle between the initial velocity and the direction travelled over the
/// last [`EXIT_WINDOW`] samples.
///
/// Zero when there are fewer than two samples or either direction vanishes.
pub fn calculate_scattering_angle(positions: &[DVec3], initial_velocity: DVec3) -> f64 {
    if positions.len() < 2 {
        return 0.0;
    }

    let tail = &positions[positions.len().saturating_sub(EXIT_WINDOW)..];
    let outgoing = tail[tail.len() - 1] - tail[0];

    // Lengths here can be femtometres, so normalize explicitly
    let initial_length = initial_velocity.length();
    let outgoing_length = outgoing.length();
    if initial_length == 0.0 || outgoing_length == 0.0 {
        return 0.0;
    }

    let cos = initial_velocity.dot(outgoing) / (initial_length * outgoing_length);
    clamp(cos, -1.0, 1.0).acos()
}

/// Whether `final_position` lies in the detector's angular sector around the
/// beam axis (+x), measured in the x-z plane.
pub fn hits_detector(
    final_position: DVec3,
    angle_min: f64,
    angle_max: f64,
    nucleus: DVec3,
) -> bool {
    let dx = final_position.x - nucleus.x;
    let dz = final_position.z - nucleus.z;
    let angle = dz.abs().atan2(dx);
    angle >= angle_min && angle <= angle_max
}
