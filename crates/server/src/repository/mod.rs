mod problem_repository;
mod submission_repository;

pub use problem_repository::{
    NewProblem, ProblemRecord, ProblemRepository, SeaOrmProblemRepository,
};
pub use submission_repository::{NewSubmission, SeaOrmSubmissionRepository, SubmissionRepository};
