//! Return-on-investment estimate for appointment reminders.
//!
//! Pure arithmetic over a handful of slider values: how much a clinic
//! loses to no-shows each month, and how much a reminder plan recovers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Days used to turn monthly savings into a daily rate.
const DAYS_PER_MONTH: f64 = 30.0;

/// Patients-per-day slider: 5 to 100 in steps of 5.
const PATIENTS_RANGE: (u32, u32) = (5, 100);

/// No-show rate slider, in percent.
const NO_SHOW_RANGE: (u32, u32) = (5, 40);

/// Slider inputs. Out-of-range values are clamped by [`RoiInputs::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiInputs {
    pub patients_per_day: u32,
    /// Percentage of booked patients who do not show up.
    pub no_show_rate_pct: u32,
    pub consultation_fee: f64,
    pub working_days: u32,
    /// Monthly price of the reminder plan.
    pub plan_cost: f64,
    /// Fraction of no-shows the reminders prevent.
    pub no_show_reduction: f64,
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            patients_per_day: 25,
            no_show_rate_pct: 15,
            consultation_fee: 500.0,
            working_days: 25,
            plan_cost: 375.0,
            no_show_reduction: 0.5,
        }
    }
}

/// An adjustable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoiField {
    PatientsPerDay,
    NoShowRate,
    ConsultationFee,
    WorkingDays,
}

impl RoiField {
    pub const ALL: [Self; 4] = [
        Self::PatientsPerDay,
        Self::NoShowRate,
        Self::ConsultationFee,
        Self::WorkingDays,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::PatientsPerDay => "Patients per day",
            Self::NoShowRate => "No-show rate (%)",
            Self::ConsultationFee => "Consultation fee",
            Self::WorkingDays => "Working days / month",
        }
    }

    /// Step used by `nudge` for one key press.
    fn step(self) -> f64 {
        match self {
            Self::PatientsPerDay => 5.0,
            Self::ConsultationFee => 50.0,
            Self::NoShowRate | Self::WorkingDays => 1.0,
        }
    }
}

impl fmt::Display for RoiField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl RoiInputs {
    /// Copy with every slider forced into its range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            patients_per_day: self.patients_per_day.clamp(PATIENTS_RANGE.0, PATIENTS_RANGE.1),
            no_show_rate_pct: self.no_show_rate_pct.clamp(NO_SHOW_RANGE.0, NO_SHOW_RANGE.1),
            consultation_fee: self.consultation_fee.max(0.0),
            working_days: self.working_days.clamp(1, 31),
            plan_cost: self.plan_cost.max(0.0),
            no_show_reduction: self.no_show_reduction.clamp(0.0, 1.0),
        }
    }

    /// Current value of `field` as a number.
    pub fn get(&self, field: RoiField) -> f64 {
        match field {
            RoiField::PatientsPerDay => f64::from(self.patients_per_day),
            RoiField::NoShowRate => f64::from(self.no_show_rate_pct),
            RoiField::ConsultationFee => self.consultation_fee,
            RoiField::WorkingDays => f64::from(self.working_days),
        }
    }

    /// Move `field` by `steps` increments, staying in range.
    ///
    /// The result lands on a multiple of the field's step, as a slider
    /// would.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn nudge(&mut self, field: RoiField, steps: i32) {
        let step = field.step();
        let next = ((self.get(field) / step).round() + f64::from(steps)) * step;
        let next = next.max(0.0);
        match field {
            RoiField::PatientsPerDay => self.patients_per_day = next as u32,
            RoiField::NoShowRate => self.no_show_rate_pct = next as u32,
            RoiField::ConsultationFee => self.consultation_fee = next,
            RoiField::WorkingDays => self.working_days = next as u32,
        }
        *self = self.clamped();
    }

    /// Compute the monthly report.
    pub fn compute(&self) -> RoiReport {
        let inputs = self.clamped();
        let monthly_no_shows = f64::from(inputs.patients_per_day)
            * f64::from(inputs.no_show_rate_pct)
            / 100.0
            * f64::from(inputs.working_days);
        let monthly_loss = monthly_no_shows * inputs.consultation_fee;
        let monthly_savings = monthly_no_shows * inputs.no_show_reduction * inputs.consultation_fee;
        let net_savings = monthly_savings - inputs.plan_cost;
        let roi_pct = if inputs.plan_cost > 0.0 {
            (net_savings / inputs.plan_cost * 100.0).max(0.0)
        } else {
            0.0
        };
        let payback_days = (monthly_savings > 0.0)
            .then(|| inputs.plan_cost / (monthly_savings / DAYS_PER_MONTH));

        RoiReport {
            monthly_no_shows,
            monthly_loss,
            monthly_savings,
            net_savings,
            roi_pct,
            payback_days,
        }
    }
}

/// Result of [`RoiInputs::compute`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiReport {
    pub monthly_no_shows: f64,
    pub monthly_loss: f64,
    pub monthly_savings: f64,
    pub net_savings: f64,
    /// Never negative.
    pub roi_pct: f64,
    /// `None` when nothing is saved.
    pub payback_days: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_report() {
        let report = RoiInputs::default().compute();
        assert!(close(report.monthly_no_shows, 93.75));
        assert!(close(report.monthly_loss, 46_875.0));
        assert!(close(report.monthly_savings, 23_437.5));
        assert!(close(report.net_savings, 23_062.5));
        assert!(close(report.roi_pct, 6_150.0));
        assert!(close(report.payback_days.unwrap(), 0.48));
    }

    #[test]
    fn test_negative_roi_floors_at_zero() {
        let inputs = RoiInputs {
            patients_per_day: 1,
            no_show_rate_pct: 1,
            consultation_fee: 100.0,
            working_days: 1,
            ..RoiInputs::default()
        };
        let report = inputs.compute();
        assert!(report.net_savings < 0.0);
        assert!(close(report.roi_pct, 0.0));
    }

    #[test]
    fn test_zero_savings_has_no_payback() {
        let inputs = RoiInputs {
            consultation_fee: 0.0,
            ..RoiInputs::default()
        };
        let report = inputs.compute();
        assert!(report.payback_days.is_none());
        assert!(close(report.monthly_loss, 0.0));
    }

    #[test]
    fn test_nudge_stays_in_range() {
        let mut inputs = RoiInputs::default();
        inputs.nudge(RoiField::NoShowRate, 200);
        assert_eq!(inputs.no_show_rate_pct, 40);
        inputs.nudge(RoiField::NoShowRate, -100);
        assert_eq!(inputs.no_show_rate_pct, 5);
        inputs.nudge(RoiField::WorkingDays, -100);
        assert_eq!(inputs.working_days, 1);
        inputs.nudge(RoiField::ConsultationFee, -2);
        assert!(close(inputs.consultation_fee, 400.0));
        inputs.nudge(RoiField::PatientsPerDay, 1);
        assert_eq!(inputs.patients_per_day, 30);
    }

    #[test]
    fn test_patients_move_in_steps_of_five() {
        let mut inputs = RoiInputs {
            patients_per_day: 27,
            ..RoiInputs::default()
        };
        inputs.nudge(RoiField::PatientsPerDay, 1);
        assert_eq!(inputs.patients_per_day, 30);
        inputs.nudge(RoiField::PatientsPerDay, 50);
        assert_eq!(inputs.patients_per_day, 100);
        inputs.nudge(RoiField::PatientsPerDay, -50);
        assert_eq!(inputs.patients_per_day, 5);
    }

    #[test]
    fn test_clamped_matches_slider_ranges() {
        let inputs = RoiInputs {
            patients_per_day: 1,
            no_show_rate_pct: 90,
            working_days: 0,
            ..RoiInputs::default()
        }
        .clamped();
        assert_eq!(inputs.patients_per_day, 5);
        assert_eq!(inputs.no_show_rate_pct, 40);
        assert_eq!(inputs.working_days, 1);
    }

    #[test]
    fn test_compute_clamps_raw_inputs() {
        let inputs = RoiInputs {
            patients_per_day: 10_000,
            ..RoiInputs::default()
        };
        let clamped = RoiInputs {
            patients_per_day: 100,
            ..RoiInputs::default()
        };
        assert_eq!(inputs.compute(), clamped.compute());
    }
}
