//! Great-circle interpolation of paleomagnetic poles.
//!
//! Poles are interpolated on the sphere, never component-wise in latitude
//! and longitude: the bracketing poles become unit vectors, are blended with
//! slerp, and the result is converted back. A95 is blended linearly in the
//! same fraction. It is a scalar cone radius, not a direction, so linear
//! blending is the modeling choice here.
//!
//! Extrapolation beyond the dated window is opt-in. When enabled, the great
//! circle through the two records nearest the violated boundary is continued
//! past that boundary at the same angular rate, A95 is extended linearly,
//! and the result is tagged as extrapolated. The extended A95 is floored at
//! zero and capped at [`MAX_A95_DEG`](crate::pole::MAX_A95_DEG) (90°): far
//! enough from the window a linear trend would otherwise produce a cone
//! wider than a hemisphere.

use crate::dataset::{ApwpDataset, Bracket};
use crate::{ApwpError, ApwpResult, PoleRecord};

/// Slack allowed on the interpolation fraction before it counts as a caller bug.
const FRACTION_TOLERANCE: f64 = 1e-9;

/// A pole estimate for a requested age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedPole {
    /// The pole, dated at the requested age.
    pub pole: PoleRecord,
    /// `true` when the age lies outside the dataset's dated window.
    pub extrapolated: bool,
}

/// Pole lookup over one frame's dataset.
#[derive(Debug, Clone, Copy)]
pub struct SphericalInterpolator<'a> {
    dataset: &'a ApwpDataset,
}

impl<'a> SphericalInterpolator<'a> {
    pub fn new(dataset: &'a ApwpDataset) -> Self {
        Self { dataset }
    }

    /// Pole at `age_ma` within the dated window.
    ///
    /// Ages outside the window fail with [`ApwpError::OutOfRange`].
    ///
    /// ```
    /// use paleo_apwp::{ApwpDataset, SphericalInterpolator};
    ///
    /// let rows = [(0.0, 90.0, 0.0, 0.0), (10.0, 80.0, 0.0, 2.0)];
    /// let ds = ApwpDataset::from_rows("demo", rows).unwrap();
    /// let pole = SphericalInterpolator::new(&ds).pole_at(5.0).unwrap();
    /// assert!((pole.latitude_deg() - 85.0).abs() < 1e-9);
    /// assert!((pole.a95_deg() - 1.0).abs() < 1e-12);
    /// ```
    pub fn pole_at(&self, age_ma: f64) -> ApwpResult<PoleRecord> {
        self.pole_at_with(age_ma, false).map(|p| p.pole)
    }

    /// Pole at `age_ma`, extrapolating past the dated window if allowed.
    pub fn pole_at_with(
        &self,
        age_ma: f64,
        allow_extrapolation: bool,
    ) -> ApwpResult<InterpolatedPole> {
        if allow_extrapolation && age_ma.is_finite() && !self.dataset.covers(age_ma) {
            return self.extrapolate(age_ma);
        }

        let pole = match self.dataset.records_bracketing(age_ma)? {
            Bracket::Exact(record) => {
                tracing::debug!(
                    frame = self.dataset.frame_id(),
                    age_ma,
                    "exact age match, using recorded pole"
                );
                record.with_age(age_ma)
            }
            Bracket::Between { lower, upper } => {
                let raw_t = (age_ma - lower.age_ma()) / (upper.age_ma() - lower.age_ma());
                debug_assert!(
                    (-FRACTION_TOLERANCE..=1.0 + FRACTION_TOLERANCE).contains(&raw_t),
                    "interpolation fraction {} outside [0, 1]",
                    raw_t
                );
                let t = raw_t.clamp(0.0, 1.0);

                tracing::debug!(
                    frame = self.dataset.frame_id(),
                    age_ma,
                    lower_age_ma = lower.age_ma(),
                    upper_age_ma = upper.age_ma(),
                    t,
                    "interpolating between bracketing poles"
                );
                blend(lower, upper, age_ma, t)
            }
        };

        Ok(InterpolatedPole {
            pole,
            extrapolated: false,
        })
    }

    fn extrapolate(&self, age_ma: f64) -> ApwpResult<InterpolatedPole> {
        if age_ma < 0.0 {
            return Err(ApwpError::invalid_input(
                "age",
                format!(
                    "{} Ma is negative; ages are expressed as positive magnitudes",
                    age_ma
                ),
            ));
        }

        let (inner, outer) = self.dataset.extrapolation_pair(age_ma);
        let pole = if inner == outer {
            outer.with_age(age_ma)
        } else {
            // t > 1: continue past `outer` along the great circle from `inner`
            let t = (age_ma - inner.age_ma()) / (outer.age_ma() - inner.age_ma());
            blend(inner, outer, age_ma, t)
        };

        tracing::warn!(
            frame = self.dataset.frame_id(),
            age_ma,
            min_age_ma = self.dataset.min_age_ma(),
            max_age_ma = self.dataset.max_age_ma(),
            "extrapolating pole beyond the dated window"
        );

        Ok(InterpolatedPole {
            pole,
            extrapolated: true,
        })
    }
}

fn blend(a: &PoleRecord, b: &PoleRecord, age_ma: f64, t: f64) -> PoleRecord {
    let direction = a.to_unit_vector().slerp(&b.to_unit_vector(), t);
    let a95 = (a.a95_deg() + t * (b.a95_deg() - a.a95_deg())).max(0.0);
    PoleRecord::from_unit_vector(age_ma, direction, a95)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_abs_diff_eq;

    fn two_point() -> ApwpDataset {
        ApwpDataset::from_rows("two", [(0.0, 90.0, 0.0, 0.0), (10.0, 80.0, 0.0, 2.0)]).unwrap()
    }

    fn antimeridian() -> ApwpDataset {
        ApwpDataset::from_rows(
            "anti",
            [
                (0.0, 60.0, 170.0, 1.0),
                (10.0, 60.0, -170.0, 3.0),
                (30.0, 50.0, -150.0, 5.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_midpoint_scenario() {
        let ds = two_point();
        let pole = SphericalInterpolator::new(&ds).pole_at(5.0).unwrap();

        assert!(pole.latitude_deg() > 80.0 && pole.latitude_deg() < 90.0);
        assert_abs_diff_eq!(pole.latitude_deg(), 85.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pole.longitude_deg(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pole.a95_deg(), 1.0, epsilon = 1e-12);
        assert_eq!(pole.age_ma(), 5.0);
    }

    #[test]
    fn test_endpoint_idempotence() {
        let ds = antimeridian();
        let interp = SphericalInterpolator::new(&ds);
        for record in ds.records() {
            let pole = interp.pole_at(record.age_ma()).unwrap();
            assert_eq!(&pole, record);
        }
    }

    #[test]
    fn test_stays_on_arc() {
        let ds = antimeridian();
        let interp = SphericalInterpolator::new(&ds);
        let records = ds.records();

        for window in records.windows(2) {
            let (lower, upper) = (&window[0], &window[1]);
            let total = lower.angular_distance_deg(upper);
            for i in 1..10 {
                let age = lower.age_ma() + (upper.age_ma() - lower.age_ma()) * (i as f64 / 10.0);
                let pole = interp.pole_at(age).unwrap();
                let sum = lower.angular_distance_deg(&pole) + pole.angular_distance_deg(upper);
                assert_abs_diff_eq!(sum, total, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_crosses_antimeridian_short_way() {
        let ds = antimeridian();
        let pole = SphericalInterpolator::new(&ds).pole_at(5.0).unwrap();
        // the short arc from 170E to 170W passes through 180
        assert!(pole.longitude_deg().abs() > 175.0);
        assert!(pole.latitude_deg() > 60.0);
        assert_abs_diff_eq!(pole.a95_deg(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_coincident_poles() {
        let ds = ApwpDataset::from_rows("same", [(0.0, 70.0, 20.0, 1.0), (10.0, 70.0, 20.0, 3.0)])
            .unwrap();
        let pole = SphericalInterpolator::new(&ds).pole_at(2.5).unwrap();
        assert_abs_diff_eq!(pole.latitude_deg(), 70.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pole.longitude_deg(), 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pole.a95_deg(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_range_without_flag() {
        let ds = two_point();
        let interp = SphericalInterpolator::new(&ds);
        assert_eq!(
            interp.pole_at(11.0).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            interp.pole_at_with(11.0, false).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
    }

    #[test]
    fn test_extrapolation_continues_great_circle() {
        let ds = two_point();
        let result = SphericalInterpolator::new(&ds).pole_at_with(15.0, true).unwrap();

        assert!(result.extrapolated);
        assert_abs_diff_eq!(result.pole.latitude_deg(), 75.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.pole.longitude_deg(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.pole.a95_deg(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_extrapolation_young_side_floors_a95() {
        let ds = ApwpDataset::from_rows("young", [(10.0, 80.0, 0.0, 1.0), (20.0, 70.0, 0.0, 3.0)])
            .unwrap();
        let result = SphericalInterpolator::new(&ds).pole_at_with(2.0, true).unwrap();

        assert!(result.extrapolated);
        assert_abs_diff_eq!(result.pole.latitude_deg(), 88.0, epsilon = 1e-9);
        assert_eq!(result.pole.a95_deg(), 0.0);
    }

    #[test]
    fn test_extrapolation_caps_a95() {
        let ds = ApwpDataset::from_rows("wide", [(0.0, 80.0, 0.0, 10.0), (10.0, 70.0, 0.0, 60.0)])
            .unwrap();
        let result = SphericalInterpolator::new(&ds).pole_at_with(30.0, true).unwrap();

        // the linear trend reaches 160° at 30 Ma
        assert!(result.extrapolated);
        assert_eq!(result.pole.a95_deg(), 90.0);
        assert_abs_diff_eq!(result.pole.latitude_deg(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_in_range_with_flag_is_not_extrapolated() {
        let ds = two_point();
        let result = SphericalInterpolator::new(&ds).pole_at_with(5.0, true).unwrap();
        assert!(!result.extrapolated);
    }

    #[test]
    fn test_single_record() {
        let ds = ApwpDataset::from_rows("one", [(5.0, 88.0, 10.0, 1.0)]).unwrap();
        let interp = SphericalInterpolator::new(&ds);

        assert_eq!(interp.pole_at(5.0).unwrap(), ds.records()[0]);
        let err = interp.pole_at(6.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        let held = interp.pole_at_with(50.0, true).unwrap();
        assert!(held.extrapolated);
        assert_eq!(held.pole.latitude_deg(), 88.0);
        assert_eq!(held.pole.age_ma(), 50.0);
    }

    #[test]
    fn test_negative_age_rejected_even_with_flag() {
        let ds = two_point();
        let err = SphericalInterpolator::new(&ds).pole_at_with(-1.0, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
