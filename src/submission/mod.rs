mod types;

pub use types::{
    parse_timestamp, Assignment, PreviousSubmission, Results, SubmissionMetadata, SubmissionUser,
    TestResult,
};
