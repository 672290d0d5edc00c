pub mod submission;

pub use submission::{
    HistoryEntry, IngestionResponse, NewSubmission, PageResponse, StripStatus, Submission,
    SubmissionRow,
};
