//! Post-processes an autograder run: caps the number of counted submissions
//! and deducts late penalties from `results/results.json`.

pub mod config;
pub mod error;
pub mod grader;
pub mod output;
pub mod scoring;
pub mod storage;
pub mod submission;

pub use error::GradeError;
pub use grader::{GradeReport, Grader};
