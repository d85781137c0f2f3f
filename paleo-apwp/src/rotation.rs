//! Finite rotations between paleomagnetic reference frames.
//!
//! A [`FiniteRotation`] is an Euler pole plus a signed angle (right-hand
//! rule, positive counter-clockwise looking down on the pole). A
//! [`RotationTable`] stores rotations as edges between named frames, either
//! fixed for all ages or dated, and a [`ReferenceFrameRotator`] chains the
//! edges needed to carry a pole from one frame to another.
//!
//! A95 is rotation invariant: a rigid rotation moves a confidence cone
//! without changing its half-angle.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use paleo_core::constants::{DEG_TO_RAD, RAD_TO_DEG};
use paleo_core::utils::normalize_longitude;
use paleo_core::{RotationMatrix3, Vector3};

use crate::dataset::AGE_TOLERANCE_MA;
use crate::{ApwpError, ApwpResult, PoleRecord};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Rotation about an Euler pole.
///
/// Deserialization goes through [`FiniteRotation::new`], so a decoded
/// rotation is validated and normalized like a constructed one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FiniteRotation {
    pole_latitude_deg: f64,
    pole_longitude_deg: f64,
    angle_deg: f64,
}

impl FiniteRotation {
    /// Validates the Euler pole and angle. The pole longitude is normalized
    /// to [-180°, 180°).
    pub fn new(
        pole_latitude_deg: f64,
        pole_longitude_deg: f64,
        angle_deg: f64,
    ) -> ApwpResult<Self> {
        if !pole_latitude_deg.is_finite() || !(-90.0..=90.0).contains(&pole_latitude_deg) {
            return Err(ApwpError::invalid_input(
                "rotation pole latitude",
                format!("{}° is outside [-90°, 90°]", pole_latitude_deg),
            ));
        }
        if !pole_longitude_deg.is_finite() || !(-360.0..=360.0).contains(&pole_longitude_deg) {
            return Err(ApwpError::invalid_input(
                "rotation pole longitude",
                format!("{}° is outside [-360°, 360°]", pole_longitude_deg),
            ));
        }
        if !angle_deg.is_finite() {
            return Err(ApwpError::invalid_input(
                "rotation angle",
                format!("{}° is not finite", angle_deg),
            ));
        }

        Ok(Self {
            pole_latitude_deg,
            pole_longitude_deg: normalize_longitude(pole_longitude_deg),
            angle_deg,
        })
    }

    pub fn identity() -> Self {
        Self {
            pole_latitude_deg: 90.0,
            pole_longitude_deg: 0.0,
            angle_deg: 0.0,
        }
    }

    /// Recovers Euler pole and angle (in [0°, 180°]) from a rotation matrix.
    pub fn from_matrix(matrix: &RotationMatrix3) -> Self {
        let (axis, angle) = matrix.to_axis_angle();
        let (lat, lon) = axis.to_lat_lon_deg();
        Self {
            pole_latitude_deg: lat,
            pole_longitude_deg: normalize_longitude(lon),
            angle_deg: angle * RAD_TO_DEG,
        }
    }

    pub fn pole_latitude_deg(&self) -> f64 {
        self.pole_latitude_deg
    }

    pub fn pole_longitude_deg(&self) -> f64 {
        self.pole_longitude_deg
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    pub fn axis(&self) -> Vector3 {
        Vector3::from_lat_lon_deg(self.pole_latitude_deg, self.pole_longitude_deg)
    }

    pub fn matrix(&self) -> RotationMatrix3 {
        RotationMatrix3::from_axis_angle(self.axis(), self.angle_deg * DEG_TO_RAD)
    }

    /// Same pole, opposite angle.
    pub fn inverse(&self) -> Self {
        Self {
            angle_deg: -self.angle_deg,
            ..*self
        }
    }

    /// Rotates a pole, keeping its age and A95.
    ///
    /// ```
    /// use paleo_apwp::{FiniteRotation, PoleRecord};
    ///
    /// let quarter_turn = FiniteRotation::new(90.0, 0.0, 90.0).unwrap();
    /// let pole = PoleRecord::new(10.0, 0.0, 0.0, 3.0).unwrap();
    /// let moved = quarter_turn.apply(&pole);
    /// assert!((moved.longitude_deg() - 90.0).abs() < 1e-9);
    /// assert_eq!(moved.a95_deg(), 3.0);
    /// ```
    pub fn apply(&self, pole: &PoleRecord) -> PoleRecord {
        let moved = self.matrix() * pole.to_unit_vector();
        PoleRecord::from_unit_vector(pole.age_ma(), moved, pole.a95_deg())
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct FiniteRotationFields {
    pole_latitude_deg: f64,
    pole_longitude_deg: f64,
    angle_deg: f64,
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for FiniteRotation {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let f = FiniteRotationFields::deserialize(d)?;
        FiniteRotation::new(f.pole_latitude_deg, f.pole_longitude_deg, f.angle_deg)
            .map_err(serde::de::Error::custom)
    }
}

/// One dated entry of a time-dependent rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DatedRotation {
    pub age_ma: f64,
    pub rotation: FiniteRotation,
}

/// A stored transformation between two frames.
#[derive(Debug, Clone, PartialEq)]
pub enum RotationEdge {
    /// Valid at every age.
    Fixed(FiniteRotation),
    /// Strictly age-increasing series, interpolated geodesically between entries.
    Dated(Vec<DatedRotation>),
}

impl RotationEdge {
    /// Rotation at `age_ma`, and whether it was held past the dated window.
    fn rotation_at(
        &self,
        label: &str,
        age_ma: f64,
        allow_extrapolation: bool,
    ) -> ApwpResult<(FiniteRotation, bool)> {
        let entries = match self {
            RotationEdge::Fixed(rotation) => return Ok((*rotation, false)),
            RotationEdge::Dated(entries) => entries,
        };

        let (first, last) = match (entries.first(), entries.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(ApwpError::data_integrity(
                    label,
                    0,
                    "dated rotation has no entries",
                ))
            }
        };

        let before = age_ma < first.age_ma - AGE_TOLERANCE_MA;
        let after = age_ma > last.age_ma + AGE_TOLERANCE_MA;
        if before || after {
            if !allow_extrapolation {
                return Err(ApwpError::out_of_range(
                    label,
                    age_ma,
                    first.age_ma,
                    last.age_ma,
                ));
            }
            let held = if before { first } else { last };
            tracing::warn!(
                edge = label,
                age_ma,
                held_age_ma = held.age_ma,
                "holding boundary rotation beyond the dated window"
            );
            return Ok((held.rotation, true));
        }

        let idx = entries.partition_point(|e| e.age_ma < age_ma);
        for candidate in [idx.checked_sub(1), Some(idx)].into_iter().flatten() {
            if let Some(entry) = entries.get(candidate) {
                if (entry.age_ma - age_ma).abs() <= AGE_TOLERANCE_MA {
                    return Ok((entry.rotation, false));
                }
            }
        }

        let (lower, upper) = (&entries[idx - 1], &entries[idx]);
        let t = (age_ma - lower.age_ma) / (upper.age_ma - lower.age_ma);
        tracing::debug!(edge = label, age_ma, t, "interpolating dated rotation");
        let upper_matrix = upper.rotation.matrix();
        let between = lower.rotation.matrix().interpolate(&upper_matrix, t);
        Ok((FiniteRotation::from_matrix(&between), false))
    }
}

/// Rotation edges between named frames.
///
/// Each unordered frame pair holds at most one edge; an edge stored as
/// `a → b` also serves `b → a` through its inverse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RotationTable {
    edges: BTreeMap<(String, String), RotationEdge>,
}

impl RotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rotation valid at every age.
    pub fn add_fixed(
        &mut self,
        from: &str,
        to: &str,
        rotation: FiniteRotation,
    ) -> ApwpResult<()> {
        self.insert(from, to, RotationEdge::Fixed(rotation))
    }

    /// Adds a time-dependent rotation. Entries must be non-empty with
    /// finite, non-negative, strictly increasing ages.
    pub fn add_dated(
        &mut self,
        from: &str,
        to: &str,
        entries: Vec<DatedRotation>,
    ) -> ApwpResult<()> {
        let label = edge_label(from, to);
        if entries.is_empty() {
            return Err(ApwpError::data_integrity(
                &label,
                0,
                "dated rotation has no entries",
            ));
        }
        for (index, entry) in entries.iter().enumerate() {
            if !entry.age_ma.is_finite() || entry.age_ma < 0.0 {
                return Err(ApwpError::data_integrity(
                    &label,
                    index,
                    format!("{} Ma is not a finite non-negative age", entry.age_ma),
                ));
            }
            if index > 0 && entry.age_ma <= entries[index - 1].age_ma {
                let previous = entries[index - 1].age_ma;
                return Err(ApwpError::data_integrity(
                    &label,
                    index,
                    format!("age {} Ma does not exceed {previous} Ma", entry.age_ma),
                ));
            }
        }
        self.insert(from, to, RotationEdge::Dated(entries))
    }

    fn insert(&mut self, from: &str, to: &str, edge: RotationEdge) -> ApwpResult<()> {
        let label = edge_label(from, to);
        if from.trim().is_empty() || to.trim().is_empty() {
            return Err(ApwpError::data_integrity(&label, 0, "frame id is empty"));
        }
        if from == to {
            return Err(ApwpError::data_integrity(
                &label,
                0,
                "rotation from a frame to itself",
            ));
        }
        let forward = (from.to_string(), to.to_string());
        let reverse = (to.to_string(), from.to_string());
        if self.edges.contains_key(&forward) || self.edges.contains_key(&reverse) {
            return Err(ApwpError::data_integrity(
                &label,
                0,
                "duplicate rotation between these frames",
            ));
        }
        self.edges.insert(forward, edge);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Every frame that appears on either side of an edge.
    pub fn frames(&self) -> BTreeSet<&str> {
        self.edges
            .keys()
            .flat_map(|(a, b)| [a.as_str(), b.as_str()])
            .collect()
    }

    fn neighbors<'s>(&'s self, frame: &'s str) -> impl Iterator<Item = &'s str> + 's {
        self.edges.keys().filter_map(move |(a, b)| {
            if a == frame {
                Some(b.as_str())
            } else if b == frame {
                Some(a.as_str())
            } else {
                None
            }
        })
    }

    /// The direct rotation `from → to` at `age_ma`, inverting a stored
    /// `to → from` edge when needed. `None` if the frames share no edge.
    fn step(
        &self,
        from: &str,
        to: &str,
        age_ma: f64,
        allow_extrapolation: bool,
    ) -> Option<ApwpResult<(FiniteRotation, bool)>> {
        let forward = (from.to_string(), to.to_string());
        if let Some(edge) = self.edges.get(&forward) {
            let label = edge_label(from, to);
            return Some(edge.rotation_at(&label, age_ma, allow_extrapolation));
        }
        let edge = self.edges.get(&(to.to_string(), from.to_string()))?;
        let label = edge_label(to, from);
        Some(
            edge.rotation_at(&label, age_ma, allow_extrapolation)
                .map(|(rotation, held)| (rotation.inverse(), held)),
        )
    }
}

fn edge_label(from: &str, to: &str) -> String {
    format!("{}->{}", from, to)
}

/// A pole carried into another frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedPole {
    pub pole: PoleRecord,
    /// `true` if any dated rotation on the path was held past its window.
    pub extrapolated: bool,
}

/// Moves poles between frames using a [`RotationTable`].
#[derive(Debug, Clone, Copy)]
pub struct ReferenceFrameRotator<'a> {
    table: &'a RotationTable,
}

impl<'a> ReferenceFrameRotator<'a> {
    pub fn new(table: &'a RotationTable) -> Self {
        Self { table }
    }

    /// Shortest chain of frames from `from` to `to`, both ends included.
    pub fn path(&self, from: &str, to: &str) -> ApwpResult<Vec<String>> {
        if from == to {
            return Ok(vec![from.to_string()]);
        }

        let mut previous: BTreeMap<&str, &str> = BTreeMap::new();
        let mut queue = VecDeque::from([from]);
        previous.insert(from, from);

        while let Some(frame) = queue.pop_front() {
            if frame == to {
                let mut path = vec![to.to_string()];
                let mut cursor = to;
                while cursor != from {
                    cursor = previous[cursor];
                    path.push(cursor.to_string());
                }
                path.reverse();
                return Ok(path);
            }
            for next in self.table.neighbors(frame) {
                if !previous.contains_key(next) {
                    previous.insert(next, frame);
                    queue.push_back(next);
                }
            }
        }

        Err(ApwpError::no_rotation_path(from, to))
    }

    /// Composed rotation `from → to` at `age_ma`, and whether any dated
    /// edge on the way was held past its window.
    pub fn rotation_between(
        &self,
        from: &str,
        to: &str,
        age_ma: f64,
        allow_extrapolation: bool,
    ) -> ApwpResult<(FiniteRotation, bool)> {
        let path = self.path(from, to)?;
        tracing::debug!(from, to, age_ma, path = ?path, "resolved rotation path");

        let mut total = RotationMatrix3::identity();
        let mut extrapolated = false;
        for pair in path.windows(2) {
            let (rotation, held) = self
                .table
                .step(&pair[0], &pair[1], age_ma, allow_extrapolation)
                .ok_or_else(|| ApwpError::no_rotation_path(&pair[0], &pair[1]))??;
            total = rotation.matrix() * total;
            extrapolated |= held;
        }
        Ok((FiniteRotation::from_matrix(&total), extrapolated))
    }

    /// Rotates `pole` from frame `from` into frame `to`, evaluating dated
    /// rotations at the pole's age.
    pub fn rotate(
        &self,
        pole: &PoleRecord,
        from: &str,
        to: &str,
        allow_extrapolation: bool,
    ) -> ApwpResult<RotatedPole> {
        if from == to {
            return Ok(RotatedPole {
                pole: *pole,
                extrapolated: false,
            });
        }
        let (rotation, extrapolated) =
            self.rotation_between(from, to, pole.age_ma(), allow_extrapolation)?;
        Ok(RotatedPole {
            pole: rotation.apply(pole),
            extrapolated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, FrameErrorKind};
    use approx::assert_abs_diff_eq;

    fn rot(lat: f64, lon: f64, angle: f64) -> FiniteRotation {
        FiniteRotation::new(lat, lon, angle).unwrap()
    }

    fn pole(age: f64, lat: f64, lon: f64) -> PoleRecord {
        PoleRecord::new(age, lat, lon, 2.5).unwrap()
    }

    fn dated(age_ma: f64, rotation: FiniteRotation) -> DatedRotation {
        DatedRotation { age_ma, rotation }
    }

    #[test]
    fn test_apply_about_geographic_pole() {
        let moved = rot(90.0, 0.0, 30.0).apply(&pole(5.0, 45.0, 10.0));
        assert_abs_diff_eq!(moved.latitude_deg(), 45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(moved.longitude_deg(), 40.0, epsilon = 1e-9);
        assert_eq!(moved.a95_deg(), 2.5);
        assert_eq!(moved.age_ma(), 5.0);
    }

    #[test]
    fn test_inverse_round_trip() {
        let r = rot(-20.0, 135.0, 47.0);
        for &(lat, lon) in &[(80.0, 0.0), (-45.0, 179.0), (0.0, -90.0), (89.9, 45.0)] {
            let original = pole(12.0, lat, lon);
            let back = r.inverse().apply(&r.apply(&original));
            assert!(original.angular_distance_deg(&back) < 1e-9);
            assert_eq!(back.a95_deg(), original.a95_deg());
        }
    }

    #[test]
    fn test_from_matrix() {
        let r = rot(30.0, -60.0, 25.0);
        let recovered = FiniteRotation::from_matrix(&r.matrix());
        assert_abs_diff_eq!(recovered.pole_latitude_deg(), 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(recovered.pole_longitude_deg(), -60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(recovered.angle_deg(), 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_rotation() {
        assert_eq!(
            FiniteRotation::new(95.0, 0.0, 1.0).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert!(FiniteRotation::new(0.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let mut table = RotationTable::new();
        table.add_fixed("a", "b", rot(0.0, 0.0, 10.0)).unwrap();
        let err = table.add_fixed("b", "a", rot(0.0, 0.0, 5.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
        assert!(table.add_fixed("c", "c", rot(0.0, 0.0, 5.0)).is_err());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_dated_edge_validation() {
        let mut table = RotationTable::new();
        let entries = vec![
            dated(10.0, rot(0.0, 0.0, 1.0)),
            dated(10.0, rot(0.0, 0.0, 2.0)),
        ];
        let err = table.add_dated("a", "b", entries).unwrap_err();
        match err {
            ApwpError::DataIntegrity { frame, index, .. } => {
                assert_eq!(frame, "a->b");
                assert_eq!(index, 1);
            }
            other => panic!("Expected DataIntegrity, got {:?}", other),
        }
        assert!(table.add_dated("a", "b", Vec::new()).is_err());
    }

    #[test]
    fn test_same_frame_needs_no_entry() {
        let table = RotationTable::new();
        let rotator = ReferenceFrameRotator::new(&table);
        let p = pole(10.0, 70.0, 30.0);
        let out = rotator.rotate(&p, "x", "x", false).unwrap();
        assert_eq!(out.pole, p);
        assert!(!out.extrapolated);
    }

    #[test]
    fn test_missing_path() {
        let mut table = RotationTable::new();
        table.add_fixed("a", "b", rot(0.0, 0.0, 10.0)).unwrap();
        let rotator = ReferenceFrameRotator::new(&table);
        let err = rotator.rotate(&pole(1.0, 80.0, 0.0), "a", "z", false).unwrap_err();
        match err {
            ApwpError::UnknownFrame { kind, frame, .. } => {
                assert_eq!(kind, FrameErrorKind::NoRotationPath);
                assert_eq!(frame, "z");
            }
            other => panic!("Expected UnknownFrame, got {:?}", other),
        }
    }

    #[test]
    fn test_chained_and_reversed_path() {
        let mut table = RotationTable::new();
        table.add_fixed("a", "b", rot(90.0, 0.0, 20.0)).unwrap();
        table.add_fixed("c", "b", rot(90.0, 0.0, -5.0)).unwrap();
        let rotator = ReferenceFrameRotator::new(&table);

        assert_eq!(rotator.path("a", "c").unwrap(), vec!["a", "b", "c"]);

        // a->b adds 20°, b->c is the inverse of c->b and adds another 5°
        let out = rotator.rotate(&pole(0.0, 10.0, 0.0), "a", "c", false).unwrap();
        assert_abs_diff_eq!(out.pole.longitude_deg(), 25.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out.pole.latitude_deg(), 10.0, epsilon = 1e-9);

        let back = rotator.rotate(&out.pole, "c", "a", false).unwrap();
        assert!(back.pole.angular_distance_deg(&pole(0.0, 10.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_dated_edge_interpolates() {
        let mut table = RotationTable::new();
        table
            .add_dated(
                "a",
                "b",
                vec![
                    dated(0.0, rot(90.0, 0.0, 0.0)),
                    dated(20.0, rot(90.0, 0.0, 40.0)),
                ],
            )
            .unwrap();
        let rotator = ReferenceFrameRotator::new(&table);

        let out = rotator.rotate(&pole(5.0, 0.0, 0.0), "a", "b", false).unwrap();
        assert_abs_diff_eq!(out.pole.longitude_deg(), 10.0, epsilon = 1e-9);
        assert!(!out.extrapolated);

        let exact = rotator.rotate(&pole(20.0, 0.0, 0.0), "a", "b", false).unwrap();
        assert_abs_diff_eq!(exact.pole.longitude_deg(), 40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dated_edge_out_of_window() {
        let mut table = RotationTable::new();
        table
            .add_dated(
                "a",
                "b",
                vec![
                    dated(0.0, rot(90.0, 0.0, 0.0)),
                    dated(20.0, rot(90.0, 0.0, 40.0)),
                ],
            )
            .unwrap();
        let rotator = ReferenceFrameRotator::new(&table);
        let old = pole(30.0, 0.0, 0.0);

        let err = rotator.rotate(&old, "b", "a", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        let held = rotator.rotate(&old, "a", "b", true).unwrap();
        assert!(held.extrapolated);
        assert_abs_diff_eq!(held.pole.longitude_deg(), 40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rotation_between_composes_and_inverts() {
        let mut table = RotationTable::new();
        table.add_fixed("a", "b", rot(90.0, 0.0, 20.0)).unwrap();
        table.add_fixed("c", "b", rot(90.0, 0.0, -5.0)).unwrap();
        let rotator = ReferenceFrameRotator::new(&table);

        let (forward, held) = rotator.rotation_between("a", "c", 0.0, false).unwrap();
        assert!(!held);
        assert_abs_diff_eq!(forward.pole_latitude_deg(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(forward.angle_deg(), 25.0, epsilon = 1e-9);

        // from_matrix reports angles in [0°, 180°], so the reverse flips the pole
        let (backward, _) = rotator.rotation_between("c", "a", 0.0, false).unwrap();
        assert_abs_diff_eq!(backward.pole_latitude_deg(), -90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(backward.angle_deg(), 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dated_rotation_between_midpoint() {
        let mut table = RotationTable::new();
        table
            .add_dated(
                "a",
                "b",
                vec![
                    dated(0.0, rot(0.0, 30.0, 10.0)),
                    dated(10.0, rot(0.0, 30.0, 30.0)),
                ],
            )
            .unwrap();
        let rotator = ReferenceFrameRotator::new(&table);

        let (mid, _) = rotator.rotation_between("b", "a", 5.0, false).unwrap();
        assert_abs_diff_eq!(mid.pole_latitude_deg(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mid.pole_longitude_deg(), -150.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mid.angle_deg(), 20.0, epsilon = 1e-9);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"pole_latitude_deg":95.0,"pole_longitude_deg":0.0,"angle_deg":1.0}"#;
        let err = serde_json::from_str::<FiniteRotation>(json).unwrap_err();
        assert!(err.to_string().contains("rotation pole latitude"));

        let json = r#"{"pole_latitude_deg":10.0,"pole_longitude_deg":270.0,"angle_deg":1.0}"#;
        let r: FiniteRotation = serde_json::from_str(json).unwrap();
        assert_eq!(r.pole_longitude_deg(), -90.0);
        assert_eq!(r, rot(10.0, 270.0, 1.0));
    }

    #[test]
    fn test_frames() {
        let mut table = RotationTable::new();
        table.add_fixed("a", "b", FiniteRotation::identity()).unwrap();
        table.add_fixed("b", "c", FiniteRotation::identity()).unwrap();
        let frames: Vec<_> = table.frames().into_iter().collect();
        assert_eq!(frames, vec!["a", "b", "c"]);
        assert!(!table.is_empty());
    }
}
