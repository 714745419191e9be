pub mod constants;
pub mod late;
pub mod limit;
pub mod score;

pub use constants::{find_extension, resolve_constants, Constants};
pub use late::{apply_late_penalty, days_between, LateOutcome, LatePolicy, MIN_MARKS};
pub use limit::{check_submission_limit, LimitOutcome};
pub use score::calculate_score;
