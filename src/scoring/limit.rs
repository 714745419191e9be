use crate::error::GradeError;
use crate::output::{format_marks, SECTION_BREAK};
use crate::submission::PreviousSubmission;

/// Result of checking a submission against the cap.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitOutcome {
    /// Score that counts for this submission
    pub score: f64,
    /// Attempt number of this submission
    pub submission_count: usize,
    /// The cap was exceeded; the late policy must not run
    pub exceeded: bool,
    /// Text to append to the student-visible output
    pub message: String,
}

/// Apply the submission cap.
///
/// Returns `None` when there is no cap. Within the cap the score is unchanged
/// and only a notice is produced. Past the cap, the score of the most recent
/// previous submission replaces this one's.
pub fn check_submission_limit(
    cap: Option<u32>,
    previous: &[PreviousSubmission],
    score: f64,
) -> Result<Option<LimitOutcome>, GradeError> {
    let Some(cap) = cap else {
        return Ok(None);
    };

    let submission_count = previous.len() + 1;

    if submission_count <= cap as usize {
        let message = format!(
            "{SECTION_BREAK}\
             This is submission {submission_count} of {cap}.\n\
             After {cap} submissions, only submission {cap}'s score will count.\n"
        );
        return Ok(Some(LimitOutcome {
            score,
            submission_count,
            exceeded: false,
            message,
        }));
    }

    // Past the cap means at least `cap` earlier attempts exist.
    let last = previous
        .last()
        .ok_or(GradeError::MissingField("previous_submissions"))?;

    let message = format!(
        "{SECTION_BREAK}\
         {cap} submissions exceeded ({submission_count} submitted).\n\
         Only submission {cap}'s score ({}) will count.\n",
        format_marks(last.score)
    );

    Ok(Some(LimitOutcome {
        score: last.score,
        submission_count,
        exceeded: true,
        message,
    }))
}
