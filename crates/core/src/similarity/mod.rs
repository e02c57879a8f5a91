//! Plagiarism detection over the submissions of one problem.
//!
//! Source code is first normalized ([`normalize`]) so comments and layout do
//! not count, then every pair of submissions is scored with a Levenshtein
//! based similarity ([`similarity`]). [`SimilarityEngine`] ties both together
//! and produces a ranked [`SimilarityReport`].

mod levenshtein;
mod normalize;
mod report;

pub use levenshtein::{levenshtein_distance, similarity, similarity_of_chars};
pub use normalize::{NormalizedCode, normalize};
pub use report::{
    CANCEL_CHECK_CELL_BUDGET, CancelSignal, ReportError, ReportOptions, SimilarityEngine,
    SimilarityPair, SimilarityReport, SkipReason, SkippedSubmission, generate_similarity_report,
};
