// ABOUTME: Date stepper holding the selected calendar date for the dashboard
// ABOUTME: Steps one day back or forward and renders the `Mon Jan 01 2024` label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::HealthResult;
use crate::models::CalendarDate;

/// Selected date with one-day stepping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateStepper {
    date: CalendarDate,
}

impl Default for DateStepper {
    fn default() -> Self {
        Self::new(CalendarDate::today())
    }
}

impl DateStepper {
    /// Stepper starting at a date
    #[must_use]
    pub const fn new(date: CalendarDate) -> Self {
        Self { date }
    }

    /// Selected date
    #[must_use]
    pub const fn date(&self) -> CalendarDate {
        self.date
    }

    /// Move one day back
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidDate` at the start of the representable range.
    pub fn previous(&mut self) -> HealthResult<CalendarDate> {
        self.step(-1)
    }

    /// Move one day forward; future dates are allowed
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidDate` at the end of the representable range.
    pub fn next(&mut self) -> HealthResult<CalendarDate> {
        self.step(1)
    }

    /// Move by a signed number of days
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidDate` if the result is not representable;
    /// the selection is left unchanged.
    pub fn step(&mut self, days: i64) -> HealthResult<CalendarDate> {
        self.date = self.date.add_days(days)?;
        Ok(self.date)
    }

    /// Label shown between the arrows
    #[must_use]
    pub fn label(&self) -> String {
        self.date.display_label()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_across_month_boundary() {
        let mut stepper = DateStepper::new(CalendarDate::from_ymd(2024, 1, 1).unwrap());
        assert_eq!(stepper.label(), "Mon Jan 01 2024");

        let prev = stepper.previous().unwrap();
        assert_eq!(prev, CalendarDate::from_ymd(2023, 12, 31).unwrap());
        assert_eq!(stepper.label(), "Sun Dec 31 2023");

        stepper.next().unwrap();
        stepper.next().unwrap();
        assert_eq!(stepper.date(), CalendarDate::from_ymd(2024, 1, 2).unwrap());
    }
}
