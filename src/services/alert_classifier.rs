use crate::models::AlertLevel;

/// Deviation beyond this percentage of the competitor average raises an alert.
pub const ALERT_THRESHOLD_PCT: f64 = 5.0;

/// Classify the own-vs-competitor rate deviation for one cell.
///
/// Alerting requires both averages to be present and positive; anything else is
/// `None`. The +/-5% boundaries themselves classify as `None` (strict
/// inequality). Total over all valid inputs.
pub fn classify(own_avg: Option<f64>, competitor_avg: Option<f64>) -> AlertLevel {
    let (own, competitor) = match (own_avg, competitor_avg) {
        (Some(own), Some(competitor)) if own > 0.0 && competitor > 0.0 => (own, competitor),
        _ => return AlertLevel::None,
    };

    let percent_diff = (own - competitor) / competitor * 100.0;
    if percent_diff > ALERT_THRESHOLD_PCT {
        AlertLevel::High
    } else if percent_diff < -ALERT_THRESHOLD_PCT {
        AlertLevel::Low
    } else {
        AlertLevel::None
    }
}
