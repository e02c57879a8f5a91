use std::str::Utf8Error;

use chrono::NaiveDateTime;

use super::{Language, ProblemId, SubmissionId, UserId};

/// A stored code submission as handed to the similarity engine.
///
/// `raw_code` keeps the bytes exactly as persisted; decoding happens at
/// analysis time so a corrupt record can be skipped instead of failing the
/// whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: SubmissionId,
    pub user_id: UserId,
    pub problem_id: ProblemId,
    pub language: Language,
    pub raw_code: Vec<u8>,
    pub submitted_at: NaiveDateTime,
}

impl Submission {
    pub fn decode_code(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.raw_code)
    }
}
