//! Apparent polar wander paths for a single reference frame.
//!
//! An [`ApwpDataset`] is the validated, immutable time series of pole
//! estimates for one named frame. Construction enforces:
//!
//! - at least one record and a non-empty frame id;
//! - every record individually valid (see [`PoleRecord::new`]);
//! - ages strictly increasing (duplicates are rejected here, never at query time).
//!
//! Queries never extrapolate: [`ApwpDataset::records_bracketing`] reports
//! [`ApwpError::OutOfRange`] for ages outside `[min_age, max_age]`. The
//! interpolator decides separately whether extrapolation was requested.

use crate::{ApwpError, ApwpResult, PoleRecord};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Ages closer than this (Ma) to a recorded age are treated as that age.
pub const AGE_TOLERANCE_MA: f64 = 1e-9;

/// The record(s) surrounding a query age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bracket<'a> {
    /// The query age matches a recorded age.
    Exact(&'a PoleRecord),
    /// The query age lies strictly between two adjacent records.
    Between {
        lower: &'a PoleRecord,
        upper: &'a PoleRecord,
    },
}

/// One frame's time series of paleomagnetic poles, ordered by age.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ApwpDataset {
    frame_id: String,
    records: Vec<PoleRecord>,
}

impl ApwpDataset {
    /// Builds a dataset from already-constructed records.
    ///
    /// Fails with [`ApwpError::DataIntegrity`] naming the first offending
    /// record if the series is empty or not strictly increasing in age.
    pub fn new(frame_id: impl Into<String>, records: Vec<PoleRecord>) -> ApwpResult<Self> {
        let frame_id = frame_id.into();

        if frame_id.trim().is_empty() {
            return Err(ApwpError::data_integrity(&frame_id, 0, "frame id is empty"));
        }

        if records.is_empty() {
            let message = "dataset has no records";
            return Err(ApwpError::data_integrity(&frame_id, 0, message));
        }

        for (index, pair) in records.windows(2).enumerate() {
            let (prev, curr) = (&pair[0], &pair[1]);
            if curr.age_ma() <= prev.age_ma() {
                let message = if curr.age_ma() == prev.age_ma() {
                    format!("duplicate age {} Ma", curr.age_ma())
                } else {
                    format!(
                        "age {} Ma follows {} Ma; ages must be strictly increasing",
                        curr.age_ma(),
                        prev.age_ma()
                    )
                };
                return Err(ApwpError::data_integrity(&frame_id, index + 1, message));
            }
        }

        tracing::debug!(
            frame = %frame_id,
            records = records.len(),
            min_age_ma = records[0].age_ma(),
            max_age_ma = records[records.len() - 1].age_ma(),
            "loaded APWP dataset"
        );

        Ok(Self { frame_id, records })
    }

    /// Builds a dataset from raw `(age, latitude, longitude, a95)` rows.
    ///
    /// Each row is validated with [`PoleRecord::new`]; the first invalid row
    /// is reported as [`ApwpError::DataIntegrity`] with its index and the
    /// reason it was rejected.
    ///
    /// ```
    /// use paleo_apwp::ApwpDataset;
    ///
    /// let dataset = ApwpDataset::from_rows(
    ///     "torsvik-2012-vandervoo-2015",
    ///     [(0.0, 90.0, 0.0, 0.0), (10.0, 86.5, 170.0, 2.6)],
    /// )
    /// .unwrap();
    /// assert_eq!(dataset.len(), 2);
    ///
    /// let err = ApwpDataset::from_rows("bad", [(0.0, 90.0, 0.0, 0.0), (0.0, 88.0, 0.0, 1.0)]);
    /// assert!(err.is_err());
    /// ```
    pub fn from_rows<I>(frame_id: impl Into<String>, rows: I) -> ApwpResult<Self>
    where
        I: IntoIterator<Item = (f64, f64, f64, f64)>,
    {
        let frame_id = frame_id.into();
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, (age, lat, lon, a95))| {
                PoleRecord::new(age, lat, lon, a95).map_err(|e| {
                    ApwpError::data_integrity(
                        &frame_id,
                        index,
                        format!("{e} (row: age={age}, lat={lat}, lon={lon}, a95={a95})"),
                    )
                })
            })
            .collect::<ApwpResult<Vec<_>>>()?;

        Self::new(frame_id, records)
    }

    pub fn frame_id(&self) -> &str {
        &self.frame_id
    }

    pub fn records(&self) -> &[PoleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`: construction rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min_age_ma(&self) -> f64 {
        self.records[0].age_ma()
    }

    pub fn max_age_ma(&self) -> f64 {
        self.records[self.records.len() - 1].age_ma()
    }

    /// Whether `age_ma` lies inside the dated window (tolerance included).
    pub fn covers(&self, age_ma: f64) -> bool {
        age_ma >= self.min_age_ma() - AGE_TOLERANCE_MA
            && age_ma <= self.max_age_ma() + AGE_TOLERANCE_MA
    }

    /// Finds the record(s) surrounding `age_ma`.
    ///
    /// Returns [`Bracket::Exact`] when the age matches a record (within
    /// [`AGE_TOLERANCE_MA`]), otherwise the two adjacent records with
    /// `lower.age < age < upper.age`. Ages outside the dated window yield
    /// [`ApwpError::OutOfRange`]; non-finite ages yield
    /// [`ApwpError::InvalidInput`].
    pub fn records_bracketing(&self, age_ma: f64) -> ApwpResult<Bracket<'_>> {
        if !age_ma.is_finite() {
            return Err(ApwpError::invalid_input(
                "age",
                format!("{} Ma is not a finite age", age_ma),
            ));
        }

        if !self.covers(age_ma) {
            return Err(ApwpError::out_of_range(
                &self.frame_id,
                age_ma,
                self.min_age_ma(),
                self.max_age_ma(),
            ));
        }

        let idx = self.records.partition_point(|r| r.age_ma() < age_ma);

        if let Some(record) = self.records.get(idx) {
            if (record.age_ma() - age_ma).abs() <= AGE_TOLERANCE_MA {
                return Ok(Bracket::Exact(record));
            }
        }
        if idx > 0 {
            let record = &self.records[idx - 1];
            if (record.age_ma() - age_ma).abs() <= AGE_TOLERANCE_MA {
                return Ok(Bracket::Exact(record));
            }
        }

        // covers() guarantees 0 < idx < len once exact matches are excluded
        Ok(Bracket::Between {
            lower: &self.records[idx - 1],
            upper: &self.records[idx],
        })
    }

    /// The two records nearest the boundary that `age_ma` lies beyond.
    ///
    /// Ordered so that the first record is the inner one and the second is
    /// the boundary record itself; extrapolating from first toward second
    /// moves outward. A single-record dataset returns that record twice.
    pub fn extrapolation_pair(&self, age_ma: f64) -> (&PoleRecord, &PoleRecord) {
        let n = self.records.len();
        if n == 1 {
            return (&self.records[0], &self.records[0]);
        }
        if age_ma < self.min_age_ma() {
            (&self.records[1], &self.records[0])
        } else {
            (&self.records[n - 2], &self.records[n - 1])
        }
    }
}
