use crate::error::GradeError;
use crate::submission::Results;

/// Raw score of a submission before any policy runs.
///
/// An explicit top-level `score` wins as-is. Otherwise the per-test scores are
/// summed, with a test lacking a score counting as zero.
pub fn calculate_score(results: &Results) -> Result<f64, GradeError> {
    if let Some(score) = results.score {
        return Ok(score);
    }

    let tests = results
        .tests
        .as_ref()
        .ok_or(GradeError::MissingField("tests"))?;

    Ok(tests.iter().map(|t| t.score.unwrap_or(0.0)).sum())
}
