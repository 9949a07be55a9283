#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use vocab_core::Clock;

pub use error::SessionError;

pub use sessions::{
    DoneReason, FeedbackLine, GradedAnswer, Next, SessionProgress, StudyService, StudySession,
    Submission, Tone, WordLookup, WordPool,
};
