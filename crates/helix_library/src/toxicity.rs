//! Gate toxicity tables.
//!
//! Toxicity data for a repressor is a table of relative growth measurements,
//! one per measured input activity level. Growth values are normalized by
//! the uninduced measurement: 1.0 means non-toxic, values below 1.0 indicate
//! the degree of toxicity. The table is not assumed sorted by activity.

use crate::library::LibraryError;
use serde::{Deserialize, Serialize};

/// A table of (input activity, relative growth) measurements for one gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToxicityTable {
    rows: Vec<(f64, f64)>,
}

impl ToxicityTable {
    /// Creates a table from (activity, growth) rows.
    ///
    /// Input activities must be strictly positive and finite: interpolation
    /// happens in log10-activity space, so a zero or negative activity would
    /// poison every query with NaN.
    pub fn new(rows: Vec<(f64, f64)>) -> Result<Self, LibraryError> {
        if rows.is_empty() {
            return Err(LibraryError::EmptyToxicityTable);
        }
        for &(activity, _) in &rows {
            if !(activity.is_finite() && activity > 0.0) {
                return Err(LibraryError::InvalidToxicityActivity(activity));
            }
        }
        Ok(Self { rows })
    }

    /// Creates a table from separate activity and growth columns.
    pub fn from_columns(activities: Vec<f64>, growth: Vec<f64>) -> Result<Self, LibraryError> {
        if activities.len() != growth.len() {
            return Err(LibraryError::RaggedToxicityTable {
                activities: activities.len(),
                growth: growth.len(),
            });
        }
        Self::new(activities.into_iter().zip(growth).collect())
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows (never true for a
    /// successfully constructed table).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row at the given index as (activity, growth).
    pub fn row(&self, index: usize) -> (f64, f64) {
        self.rows[index]
    }

    /// Returns the index of the row with the smallest input activity.
    pub fn arg_min_activity(&self) -> usize {
        self.arg_best(|candidate, best| candidate < best)
    }

    /// Returns the index of the row with the largest input activity.
    pub fn arg_max_activity(&self) -> usize {
        self.arg_best(|candidate, best| candidate > best)
    }

    fn arg_best(&self, better: impl Fn(f64, f64) -> bool) -> usize {
        let mut best = 0;
        for (i, &(activity, _)) in self.rows.iter().enumerate().skip(1) {
            if better(activity, self.rows[best].0) {
                best = i;
            }
        }
        best
    }

    /// Returns the index of the row with the largest activity not exceeding
    /// `activity` (the infimum by first coordinate), if any.
    pub fn arg_infimum(&self, activity: f64) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &(a, _)) in self.rows.iter().enumerate() {
            if a <= activity && best.map_or(true, |b| a > self.rows[b].0) {
                best = Some(i);
            }
        }
        best
    }

    /// Returns the index of the row with the smallest activity not below
    /// `activity` (the supremum by first coordinate), if any.
    pub fn arg_supremum(&self, activity: f64) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &(a, _)) in self.rows.iter().enumerate() {
            if a >= activity && best.map_or(true, |b| a < self.rows[b].0) {
                best = Some(i);
            }
        }
        best
    }
}
