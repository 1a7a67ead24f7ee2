//! Raw reading to air velocity conversion.
//!
//! The FS3000 output is not linear. The datasheet (pages 6 and 7) gives a
//! handful of calibration points per variant; between two points the curve
//! is treated as a straight line.

use crate::constants::MPS_TO_MPH;

/// A piecewise-linear map from raw readings to meters per second.
///
/// Both point sequences have the same length and are non-decreasing.
#[derive(Debug, PartialEq)]
pub struct CalibrationProfile {
    raw_points: &'static [u16],
    velocity_points: &'static [f32],
}

/// FS3000-1005 datapoints, 0 to 7.23 m/s.
pub static SEVEN_MPS_PROFILE: CalibrationProfile = CalibrationProfile {
    raw_points: &[409, 915, 1522, 2066, 2523, 2908, 3256, 3572, 3686],
    velocity_points: &[0.0, 1.07, 2.01, 3.00, 3.97, 4.96, 5.98, 6.99, 7.23],
};

/// FS3000-1015 datapoints, 0 to 15 m/s.
pub static FIFTEEN_MPS_PROFILE: CalibrationProfile = CalibrationProfile {
    raw_points: &[
        409, 1203, 1597, 1908, 2187, 2400, 2629, 2801, 3006, 3178, 3309, 3563, 3686,
    ],
    velocity_points: &[
        0.0, 2.00, 3.00, 4.00, 5.00, 6.00, 7.00, 8.00, 9.00, 10.00, 11.00, 13.00, 15.00,
    ],
};

impl CalibrationProfile {
    pub fn raw_points(&self) -> &'static [u16] {
        self.raw_points
    }

    pub fn velocity_points(&self) -> &'static [f32] {
        self.velocity_points
    }

    /// Number of calibration points.
    pub fn len(&self) -> usize {
        self.raw_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_points.is_empty()
    }

    /// Full-scale velocity in m/s, reported for any raw reading at or above the last point.
    pub fn ceiling(&self) -> f32 {
        self.velocity_points[self.velocity_points.len() - 1]
    }

    /// Converts a raw reading to meters per second.
    ///
    /// Readings at or below the first point report 0, readings at or above
    /// the last point report `ceiling()`. In between, the lower bracket is
    /// the last point strictly below `raw`, so a reading equal to an
    /// interior point is interpolated from the segment beneath it.
    pub fn raw_to_velocity(&self, raw: u16) -> f32 {
        let last = self.raw_points.len() - 1;
        if raw <= self.raw_points[0] {
            return 0.0;
        }
        if raw >= self.raw_points[last] {
            return self.ceiling();
        }

        let position = self
            .raw_points
            .iter()
            .rposition(|&point| raw > point)
            .unwrap_or(0);

        let window_size = f32::from(self.raw_points[position + 1] - self.raw_points[position]);
        let diff = f32::from(raw - self.raw_points[position]);
        let percentage_of_window = diff / window_size;

        let window_size_mps = self.velocity_points[position + 1] - self.velocity_points[position];
        self.velocity_points[position] + window_size_mps * percentage_of_window
    }
}

/// Converts meters per second to miles per hour.
pub fn mps_to_mph(mps: f32) -> f32 {
    mps * MPS_TO_MPH
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn tables_are_well_formed() {
        for profile in [&SEVEN_MPS_PROFILE, &FIFTEEN_MPS_PROFILE] {
            assert_eq!(profile.raw_points().len(), profile.velocity_points().len());
            assert_eq!(profile.raw_points()[0], 409);
            assert_eq!(profile.raw_points()[profile.len() - 1], 3686);
            assert!(profile.raw_points().windows(2).all(|w| w[0] <= w[1]));
            assert!(profile.velocity_points().windows(2).all(|w| w[0] <= w[1]));
        }
        assert_eq!(SEVEN_MPS_PROFILE.len(), 9);
        assert_eq!(FIFTEEN_MPS_PROFILE.len(), 13);
    }

    #[test]
    fn saturates_at_floor() {
        for profile in [&SEVEN_MPS_PROFILE, &FIFTEEN_MPS_PROFILE] {
            assert_eq!(profile.raw_to_velocity(409), 0.0);
            assert_eq!(profile.raw_to_velocity(100), 0.0);
            assert_eq!(profile.raw_to_velocity(0), 0.0);
        }
    }

    #[test]
    fn saturates_at_ceiling() {
        assert_eq!(SEVEN_MPS_PROFILE.raw_to_velocity(3686), 7.23);
        assert_eq!(SEVEN_MPS_PROFILE.raw_to_velocity(4095), 7.23);
        assert_eq!(FIFTEEN_MPS_PROFILE.raw_to_velocity(3686), 15.0);
        assert_eq!(FIFTEEN_MPS_PROFILE.raw_to_velocity(4000), 15.0);
    }

    #[test]
    fn interpolates_within_segment() {
        // Halfway between 409 (0.0) and 915 (1.07).
        assert!(approx_eq(SEVEN_MPS_PROFILE.raw_to_velocity(662), 0.535));
        // Halfway between 3006 (9.0) and 3178 (10.0).
        assert!(approx_eq(FIFTEEN_MPS_PROFILE.raw_to_velocity(3092), 9.5));
        // 2860 sits between 2523 (3.97) and 2908 (4.96).
        let expected = 3.97 + (4.96 - 3.97) * (337.0 / 385.0);
        assert!(approx_eq(SEVEN_MPS_PROFILE.raw_to_velocity(2860), expected));
    }

    #[test]
    fn interior_point_uses_segment_below() {
        // 915 is a table point; the bracket is [409, 915] at t = 1, which lands on 1.07.
        assert!(approx_eq(SEVEN_MPS_PROFILE.raw_to_velocity(915), 1.07));
        assert!(approx_eq(FIFTEEN_MPS_PROFILE.raw_to_velocity(3563), 13.0));
    }

    #[test]
    fn monotonic_and_continuous_over_interior() {
        for profile in [&SEVEN_MPS_PROFILE, &FIFTEEN_MPS_PROFILE] {
            let mut previous = profile.raw_to_velocity(410);
            for raw in 411..3686 {
                let velocity = profile.raw_to_velocity(raw);
                assert!(velocity >= previous, "raw {} decreased", raw);
                assert!(velocity - previous < 0.02, "raw {} jumped", raw);
                previous = velocity;
            }
        }
    }

    #[test]
    fn mph_is_a_scalar_multiple() {
        for mps in [0.0, 1.0, 7.23, 15.0, -3.5] {
            assert_eq!(mps_to_mph(mps), mps * MPS_TO_MPH);
        }
        assert!(approx_eq(mps_to_mph(1.0), 2.236_936));
    }
}
