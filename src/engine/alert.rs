//! End-of-step alert dispatch.

use crate::recipe::Step;

/// Seconds before a step ends at which its alert fires.
pub const ALERT_LEAD_SECS: u32 = 4;

/// Whether the alert for `step` fires now, given the countdown value
/// just reached and whether it already fired during this traversal.
pub fn should_fire(step: &Step, remaining_secs: u32, already_fired: bool) -> bool {
    step.alert_eligible() && remaining_secs == ALERT_LEAD_SECS && !already_fired
}
