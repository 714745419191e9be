use chrono::{DateTime, FixedOffset};
use tracing::{debug, info, warn};

use crate::config::{self, GraderContext};
use crate::error::GradeError;
use crate::scoring::{
    apply_late_penalty, calculate_score, check_submission_limit, find_extension,
    resolve_constants, Constants, LatePolicy, MIN_MARKS,
};
use crate::storage;
use crate::submission::{Results, SubmissionMetadata};

/// What a grading run did, for the caller's summary line.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    /// Score that ended up in results.json
    pub score: f64,
    /// Attempt number of this submission
    pub submission_count: usize,
    /// The cap replaced this submission's score with the previous one
    pub exceeded_limit: bool,
    /// Started days past the effective due date (0 when on time)
    pub days_late: i64,
    /// How many times results.json was rewritten (0 to 2)
    pub commits: usize,
}

/// Adjusts one submission's score for the submission cap and late policy.
///
/// Everything is loaded up front by [`Grader::load`]; [`Grader::grade`] then
/// runs the two stages in order, persisting results.json after each one that
/// has something to say.
#[derive(Debug)]
pub struct Grader {
    ctx: GraderContext,
    metadata: SubmissionMetadata,
    results: Results,
    constants: Constants,
    score: f64,
    submitted_at: DateTime<FixedOffset>,
    due_at: DateTime<FixedOffset>,
    exceeded_limit: bool,
    commits: usize,
}

impl Grader {
    /// Read and validate every input for a run.
    ///
    /// Fails before anything is written if the config violates its schema or
    /// any input is missing or malformed.
    pub fn load(ctx: GraderContext) -> Result<Self, GradeError> {
        let config = config::load_config(&ctx)?;
        let results: Results = storage::read_json_as(&ctx.results_path())?;
        let metadata: SubmissionMetadata = storage::read_json_as(&ctx.metadata_path())?;

        let extension = find_extension(&config, metadata.emails());
        if let Some((email, _)) = extension {
            info!(email, "applying extension override");
        }
        let constants = resolve_constants(&config, extension.map(|(_, ext)| ext));
        debug!(?constants, "resolved grading constants");

        let score = calculate_score(&results)?;
        let max_marks = metadata.assignment.total_points;
        if !(MIN_MARKS..=max_marks).contains(&score) {
            warn!(score, max_marks, "starting score outside assignment range");
        }

        let submitted_at = metadata.submitted_at()?;
        let due_at = metadata.due_at()?;

        Ok(Self {
            ctx,
            metadata,
            results,
            constants,
            score,
            submitted_at,
            due_at,
            exceeded_limit: false,
            commits: 0,
        })
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Run the submission-cap stage, then the late-penalty stage.
    pub fn grade(mut self) -> Result<GradeReport, GradeError> {
        self.limit_submission_count()?;
        let days_late = self.apply_late_penalty()?;

        Ok(GradeReport {
            score: self.score,
            submission_count: self.metadata.submission_count(),
            exceeded_limit: self.exceeded_limit,
            days_late,
            commits: self.commits,
        })
    }

    fn limit_submission_count(&mut self) -> Result<(), GradeError> {
        let Some(outcome) = check_submission_limit(
            self.constants.max_submissions,
            &self.metadata.previous_submissions,
            self.score,
        )?
        else {
            debug!("no submission cap configured");
            return Ok(());
        };

        if outcome.exceeded {
            info!(
                submission = outcome.submission_count,
                score = outcome.score,
                "submission cap exceeded, keeping previous score"
            );
        }

        self.score = outcome.score;
        self.exceeded_limit = outcome.exceeded;
        self.commit(&outcome.message)
    }

    /// Returns the number of started days late
    fn apply_late_penalty(&mut self) -> Result<i64, GradeError> {
        if self.exceeded_limit {
            debug!("skipping late penalty, this submission's score does not count");
            return Ok(0);
        }

        let policy = LatePolicy {
            max_late_days: self.constants.max_late_days,
            no_penalty_days: self.constants.no_penalty_days,
            penalty: self.constants.penalty,
        };

        let Some(outcome) = apply_late_penalty(
            &policy,
            &self.submitted_at,
            &self.due_at,
            self.score,
            self.ctx.timezone(),
        ) else {
            debug!("submitted on time");
            return Ok(0);
        };

        info!(
            days_late = outcome.days_late,
            past_deadline = outcome.past_deadline,
            before = self.score,
            after = outcome.score,
            "late policy applied"
        );

        self.score = outcome.score;
        self.commit(&outcome.message)?;
        Ok(outcome.days_late)
    }

    /// Append `message` to the output log and persist the current score
    fn commit(&mut self, message: &str) -> Result<(), GradeError> {
        self.results.append_output(message);
        self.results.score = Some(self.score);
        storage::write_json(&self.ctx.results_path(), &self.results)?;
        self.commits += 1;
        Ok(())
    }
}
