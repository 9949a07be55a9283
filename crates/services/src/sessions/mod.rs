mod engine;
mod feedback;
mod pool;
mod progress;
mod questions;
mod queue;
mod workflow;

// Public API of the study session subsystem.
pub use crate::error::SessionError;
pub use engine::{DoneReason, GradedAnswer, Next, StudySession, Submission};
pub use feedback::{FeedbackLine, Tone, WordLookup, feedback_lines};
pub use pool::WordPool;
pub use progress::SessionProgress;
pub use questions::{GeneratedQuestion, generate_question};
pub use queue::{QueueItem, build_queue, learning_copies, learning_weight};
pub use workflow::StudyService;
