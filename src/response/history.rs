// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor history parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Raw sensor history: parallel arrays of epoch seconds and values.
///
/// ```json
/// {"seconds": [1700000000, 1700000060], "values": [21.5, 21.7]}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SensorHistoryResponse {
    /// Sample times as Unix epoch seconds.
    pub seconds: Vec<i64>,
    /// Sample values.
    pub values: Vec<f64>,
}

/// One recorded sensor value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryPoint {
    /// When the value was recorded.
    pub timestamp: DateTime<Utc>,
    /// The recorded value.
    pub value: f64,
}

/// Recorded values of a sensor, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SensorHistory {
    points: Vec<HistoryPoint>,
}

impl SensorHistory {
    /// Returns the recorded points.
    #[must_use]
    pub fn points(&self) -> &[HistoryPoint] {
        &self.points
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the most recent point.
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.last()
    }

    /// Returns the lowest and highest recorded values.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|p| p.value).fold(None, |acc, v| {
            Some(match acc {
                Some((lo, hi)) => (f64::min(lo, v), f64::max(hi, v)),
                None => (v, v),
            })
        })
    }
}

impl TryFrom<SensorHistoryResponse> for SensorHistory {
    type Error = ParseError;

    /// Zips the parallel arrays, sorting points by time.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrays differ in length or a timestamp is out
    /// of range.
    fn try_from(response: SensorHistoryResponse) -> Result<Self, Self::Error> {
        let SensorHistoryResponse { seconds, values } = response;
        if seconds.len() != values.len() {
            return Err(ParseError::LengthMismatch {
                left: seconds.len(),
                right: values.len(),
            });
        }

        let mut points = seconds
            .into_iter()
            .zip(values)
            .map(|(secs, value)| {
                let timestamp =
                    DateTime::from_timestamp(secs, 0).ok_or_else(|| ParseError::InvalidValue {
                        field: "seconds".to_string(),
                        message: format!("timestamp {secs} is out of range"),
                    })?;
                Ok(HistoryPoint { timestamp, value })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        points.sort_by_key(|p| p.timestamp);

        Ok(Self { points })
    }
}
