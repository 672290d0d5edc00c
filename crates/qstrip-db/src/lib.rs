//! Persistence layer: the submission store.

pub mod submission;

pub use submission::SubmissionRepository;
