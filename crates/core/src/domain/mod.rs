mod error;
mod ids;
mod language;
mod submission;
mod threshold;

pub use error::DomainError;
pub use ids::{ProblemId, SubmissionId, UserId};
pub use language::{CommentSyntax, Language};
pub use submission::Submission;
pub use threshold::Threshold;
