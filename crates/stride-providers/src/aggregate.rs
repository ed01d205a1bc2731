// ABOUTME: Client-side summation of raw Health Connect records into day totals
// ABOUTME: Plain addition with no dedup or ordering dependency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::debug;

use crate::conversions::{count_from_f64, meters_from_f64};
use crate::health_connect::{DistanceRecord, FloorsClimbedRecord, HealthConnectRecord, StepsRecord};
use crate::models::{MetricSample, RecordType};

/// Sum of `count` across step records, saturating at `u64::MAX`
pub fn total_steps<'a>(records: impl IntoIterator<Item = &'a StepsRecord>) -> u64 {
    records
        .into_iter()
        .fold(0_u64, |sum, r| sum.saturating_add(r.count))
}

/// Sum of `distance.in_meters` across distance records; negative or non-finite entries count as zero
pub fn total_distance_meters<'a>(records: impl IntoIterator<Item = &'a DistanceRecord>) -> f64 {
    records
        .into_iter()
        .map(|r| meters_from_f64(r.distance.in_meters))
        .sum()
}

/// Sum of `floors` across floors-climbed records
pub fn total_floors<'a>(records: impl IntoIterator<Item = &'a FloorsClimbedRecord>) -> f64 {
    records
        .into_iter()
        .map(|r| r.floors)
        .filter(|floors| floors.is_finite() && *floors > 0.0)
        .sum()
}

/// Day total for one record type; records of other types are ignored
#[must_use]
pub fn total(record_type: RecordType, records: &[HealthConnectRecord]) -> MetricSample {
    let mismatched = records
        .iter()
        .filter(|r| r.record_type() != record_type)
        .count();
    if mismatched > 0 {
        debug!(
            record_type = record_type.as_str(),
            mismatched, "Ignoring records of another type"
        );
    }

    match record_type {
        RecordType::Steps => MetricSample::Steps(total_steps(records.iter().filter_map(|r| {
            match r {
                HealthConnectRecord::Steps(s) => Some(s),
                _ => None,
            }
        }))),
        RecordType::Distance => {
            MetricSample::Distance(total_distance_meters(records.iter().filter_map(|r| {
                match r {
                    HealthConnectRecord::Distance(d) => Some(d),
                    _ => None,
                }
            })))
        }
        RecordType::FloorsClimbed => {
            let floors = total_floors(records.iter().filter_map(|r| match r {
                HealthConnectRecord::FloorsClimbed(f) => Some(f),
                _ => None,
            }));
            MetricSample::FlightsClimbed(count_from_f64(floors))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::health_connect::Length;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_total_ignores_other_record_types() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let records = vec![
            HealthConnectRecord::Steps(StepsRecord {
                count: 120,
                start_time: t,
                end_time: t,
            }),
            HealthConnectRecord::Distance(DistanceRecord {
                distance: Length { in_meters: 99.0 },
                start_time: t,
                end_time: t,
            }),
            HealthConnectRecord::Steps(StepsRecord {
                count: 380,
                start_time: t,
                end_time: t,
            }),
        ];

        assert_eq!(total(RecordType::Steps, &records), MetricSample::Steps(500));
        assert_eq!(
            total(RecordType::FloorsClimbed, &records),
            MetricSample::FlightsClimbed(0)
        );
    }

    #[test]
    fn test_empty_records_sum_to_zero() {
        assert_eq!(total(RecordType::Distance, &[]), MetricSample::Distance(0.0));
    }
}
