use chrono::{DateTime, Duration, FixedOffset};
use chrono_tz::Tz;

use crate::output::{format_date, format_marks, pluralize, SECTION_BREAK};

/// Lowest score a submission can end up with
pub const MIN_MARKS: f64 = 0.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// The late-policy subset of the resolved constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatePolicy {
    pub max_late_days: u32,
    pub no_penalty_days: u32,
    pub penalty: u32,
}

/// Result of applying the late policy to a late submission.
#[derive(Debug, Clone, PartialEq)]
pub struct LateOutcome {
    pub score: f64,
    /// Started days past the effective due date (0 if the grace period covered it)
    pub days_late: i64,
    /// Due date after any grace extension
    pub effective_due: DateTime<FixedOffset>,
    /// Submitted after the hard deadline; score forced to [`MIN_MARKS`]
    pub past_deadline: bool,
    pub message: String,
}

/// Fractional days from `start` to `end`, floored at zero
pub fn days_between(start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> f64 {
    let delta = *end - *start;
    let seconds = match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_seconds() as f64,
    };
    (seconds / SECONDS_PER_DAY).max(0.0)
}

/// Apply the late policy.
///
/// Returns `None` for a submission on or before the original due date. Any
/// later submission gets a report, even when the grace period ends up covering
/// it. A started late day always costs a full day's penalty.
pub fn apply_late_penalty(
    policy: &LatePolicy,
    submitted: &DateTime<FixedOffset>,
    due: &DateTime<FixedOffset>,
    score: f64,
    tz: Tz,
) -> Option<LateOutcome> {
    let mut days_late = days_between(due, submitted);
    if days_late <= 0.0 {
        return None;
    }

    let mut message = format!(
        "{SECTION_BREAK}Submission date is: {}.\n",
        format_date(submitted, tz)
    );

    let mut effective_due = *due;
    if policy.no_penalty_days > 0 {
        effective_due = effective_due + Duration::days(i64::from(policy.no_penalty_days));
        message.push_str(&format!(
            "* {}-DAY EXTENSION *: New date due is {}.\n",
            policy.no_penalty_days,
            format_date(&effective_due, tz)
        ));
        days_late = days_between(&effective_due, submitted);
    } else {
        message.push_str(&format!("Due date is: {}.\n", format_date(&effective_due, tz)));
    }

    let started_days = days_late.ceil() as i64;
    if days_late > 0.0 {
        message.push_str(&format!(
            "*** This submission is {} day{} late. ***\n",
            started_days,
            pluralize(started_days)
        ));
    }

    let max_late_days = i64::from(policy.max_late_days);
    if days_late > f64::from(policy.max_late_days) {
        let hard_deadline = effective_due + Duration::days(max_late_days);
        message.push_str(&format!(
            "Submission past the late deadline: {} day{} after due date ({}).\n\
             Your score is {}.\n",
            max_late_days,
            pluralize(max_late_days),
            format_date(&hard_deadline, tz),
            format_marks(MIN_MARKS)
        ));

        return Some(LateOutcome {
            score: MIN_MARKS,
            days_late: started_days,
            effective_due,
            past_deadline: true,
            message,
        });
    }

    let total_penalty = i64::from(policy.penalty) * started_days;
    message.push_str(&format!(
        "Reducing {} mark{} from your score ({}) as per the late submission policy.\n",
        total_penalty,
        pluralize(total_penalty),
        format_marks(score)
    ));

    Some(LateOutcome {
        score: (score - total_penalty as f64).max(MIN_MARKS),
        days_late: started_days,
        effective_due,
        past_deadline: false,
        message,
    })
}
