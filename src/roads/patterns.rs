//! Angle grammar for road layout.

use crate::config::AngleMode;

/// Round a heading to the nearest permitted increment for the mode, mod 360.
pub fn snap_angle(angle: f64, mode: AngleMode) -> f64 {
    match mode {
        AngleMode::Ortho => ((angle / 90.0).round() * 90.0).rem_euclid(360.0),
        AngleMode::Ortho45 => ((angle / 45.0).round() * 45.0).rem_euclid(360.0),
        AngleMode::Free => angle.rem_euclid(360.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ortho_snaps_to_right_angles() {
        assert_eq!(snap_angle(44.0, AngleMode::Ortho), 0.0);
        assert_eq!(snap_angle(46.0, AngleMode::Ortho), 90.0);
        assert_eq!(snap_angle(-90.0, AngleMode::Ortho), 270.0);
    }

    #[test]
    fn ortho45_snaps_to_diagonals() {
        assert_eq!(snap_angle(40.0, AngleMode::Ortho45), 45.0);
        assert_eq!(snap_angle(100.0, AngleMode::Ortho45), 90.0);
        assert_eq!(snap_angle(337.0, AngleMode::Ortho45), 315.0);
    }

    #[test]
    fn free_only_wraps() {
        assert_eq!(snap_angle(361.5, AngleMode::Free), 1.5);
        assert_eq!(snap_angle(-10.0, AngleMode::Free), 350.0);
    }
}
