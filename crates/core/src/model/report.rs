use super::scores::ScoreSet;

/// Dashboard figures for one rendering of the question report.
///
/// Built from a `ScoreSet` on every render and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportViewModel {
    average_percentage: f64,
    rounded_average: u8,
    show_dashboard: bool,
}

impl ReportViewModel {
    /// Derive the dashboard figures from attempt scores.
    ///
    /// An empty set yields an average of 0 and hides the dashboard. Otherwise
    /// the average is the sum of present, non-zero scores divided by the
    /// number of attempts (zero and missing scores still count in the
    /// divisor), rounded to two decimals.
    #[must_use]
    pub fn from_scores(scores: &ScoreSet) -> Self {
        let (average_percentage, show_dashboard) = if scores.is_empty() {
            (0.0, false)
        } else {
            #[allow(clippy::cast_precision_loss)]
            let count = scores.len() as f64;
            (round_to_cents(scores.filtered_sum() / count), true)
        };

        Self {
            average_percentage,
            rounded_average: clamp_percentage(average_percentage),
            show_dashboard,
        }
    }

    #[must_use]
    pub fn average_percentage(&self) -> f64 {
        self.average_percentage
    }

    #[must_use]
    pub fn rounded_average(&self) -> u8 {
        self.rounded_average
    }

    #[must_use]
    pub fn show_dashboard(&self) -> bool {
        self.show_dashboard
    }

    /// Average as shown to the user: two decimals, or a bare `0` when there
    /// were no attempts to average.
    #[must_use]
    pub fn average_label(&self) -> String {
        if self.show_dashboard {
            format!("{:.2}", self.average_percentage)
        } else {
            "0".to_string()
        }
    }
}

/// Round half away from zero to two decimal places.
///
/// The scaled value is first cut to 15 significant digits, so a midpoint
/// such as `1.005` (stored as `1.00499999...`) still rounds up.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scaled = value * 100.0;
    let scaled = format!("{scaled:.14e}").parse::<f64>().unwrap_or(scaled);
    scaled.round() / 100.0
}

/// Round to the nearest whole percent and clamp into `0..=100`.
///
/// Non-finite input maps to 0.
#[must_use]
pub fn clamp_percentage(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = value.round().clamp(0.0, 100.0) as u8;
    clamped
}
