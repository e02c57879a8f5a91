use std::cmp::Ordering as CmpOrdering;
use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::levenshtein::similarity_of_chars;
use super::normalize::normalize;
use crate::domain::{DomainError, ProblemId, Submission, SubmissionId, Threshold, UserId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportOptions {
    pub threshold: Threshold,
    /// Skip pairs where both submissions come from the same student.
    pub exclude_same_user: bool,
    /// How many pair comparisons run between two cancellation checks.
    pub cancel_check_interval: usize,
}

impl ReportOptions {
    pub const DEFAULT_CANCEL_CHECK_INTERVAL: usize = 64;
}

/// Levenshtein cells computed between two cancellation checks at most, on top
/// of the pair interval.
pub const CANCEL_CHECK_CELL_BUDGET: usize = 1 << 22;

/// Polled by a running report at each cancellation check.
pub trait CancelSignal: Debug + Send + Sync {
    fn is_raised(&self) -> bool;
}

impl CancelSignal for AtomicBool {
    fn is_raised(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            exclude_same_user: false,
            cancel_check_interval: Self::DEFAULT_CANCEL_CHECK_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityPair {
    pub submission_id_a: SubmissionId,
    pub submission_id_b: SubmissionId,
    pub user_a: UserId,
    pub user_b: UserId,
    pub similarity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    Undecodable,
    EmptyCode,
    ProblemMismatch,
    DuplicateId,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::Undecodable => "undecodable",
            SkipReason::EmptyCode => "empty_code",
            SkipReason::ProblemMismatch => "problem_mismatch",
            SkipReason::DuplicateId => "duplicate_id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedSubmission {
    pub submission_id: SubmissionId,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityReport {
    pub problem_id: ProblemId,
    pub threshold: Threshold,
    pub total_submissions: usize,
    pub skipped: Vec<SkippedSubmission>,
    pub compared_pairs: usize,
    pub suspicious_pairs: Vec<SimilarityPair>,
}

impl SimilarityReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    #[error(transparent)]
    InvalidThreshold(#[from] DomainError),
    #[error("similarity report cancelled after {compared_pairs} comparisons")]
    Cancelled { compared_pairs: usize },
}

/// Submission that survived normalization, with its code as chars so each
/// pair comparison does not re-decode.
struct Prepared<'a> {
    submission: &'a Submission,
    code: Vec<char>,
}

/// Builds similarity reports. Holds no state between runs; clone it freely
/// or share one across threads.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    options: ReportOptions,
    cancel: Option<Arc<dyn CancelSignal>>,
}

impl SimilarityEngine {
    pub fn new(options: ReportOptions) -> Self {
        Self {
            options,
            cancel: None,
        }
    }

    /// Stops a running report at its next check once `signal` is raised.
    pub fn with_cancellation(mut self, signal: Arc<dyn CancelSignal>) -> Self {
        self.cancel = Some(signal);
        self
    }

    pub fn generate(
        &self,
        problem_id: ProblemId,
        submissions: &[Submission],
    ) -> Result<SimilarityReport, ReportError> {
        let threshold = self.options.threshold;
        let (prepared, skipped) = prepare(problem_id, submissions);

        let check_interval = self.options.cancel_check_interval.max(1);
        let mut compared_pairs = 0;
        let mut suspicious_pairs = Vec::new();
        // Start due so the first comparison is preceded by a check.
        let mut pairs_since_check = check_interval;
        let mut cells_since_check = 0usize;

        for (i, left) in prepared.iter().enumerate() {
            for right in &prepared[i + 1..] {
                if self.options.exclude_same_user
                    && left.submission.user_id == right.submission.user_id
                {
                    continue;
                }

                if pairs_since_check >= check_interval
                    || cells_since_check >= CANCEL_CHECK_CELL_BUDGET
                {
                    if self.is_cancelled() {
                        warn!(%problem_id, compared_pairs, "similarity report cancelled");
                        return Err(ReportError::Cancelled { compared_pairs });
                    }
                    pairs_since_check = 0;
                    cells_since_check = 0;
                }

                let score = similarity_of_chars(&left.code, &right.code);
                compared_pairs += 1;
                pairs_since_check += 1;
                cells_since_check = cells_since_check
                    .saturating_add(left.code.len().saturating_mul(right.code.len()));

                if threshold.is_met_by(score) {
                    suspicious_pairs.push(oriented_pair(left.submission, right.submission, score));
                }
            }
        }

        suspicious_pairs.sort_by(rank);

        info!(
            %problem_id,
            total = submissions.len(),
            skipped = skipped.len(),
            compared_pairs,
            flagged = suspicious_pairs.len(),
            threshold = threshold.value(),
            "similarity report generated"
        );

        Ok(SimilarityReport {
            problem_id,
            threshold,
            total_submissions: submissions.len(),
            skipped,
            compared_pairs,
            suspicious_pairs,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|signal| signal.is_raised())
    }
}

/// Generates a report with default options and the given threshold.
pub fn generate_similarity_report(
    problem_id: ProblemId,
    submissions: &[Submission],
    threshold: f64,
) -> Result<SimilarityReport, ReportError> {
    let options = ReportOptions {
        threshold: Threshold::new(threshold)?,
        ..ReportOptions::default()
    };
    SimilarityEngine::new(options).generate(problem_id, submissions)
}

fn prepare(
    problem_id: ProblemId,
    submissions: &[Submission],
) -> (Vec<Prepared<'_>>, Vec<SkippedSubmission>) {
    let mut prepared = Vec::with_capacity(submissions.len());
    let mut skipped = Vec::new();
    let mut seen = HashSet::with_capacity(submissions.len());

    for submission in submissions {
        match prepare_one(problem_id, submission, &mut seen) {
            Ok(entry) => prepared.push(entry),
            Err(reason) => {
                debug!(
                    submission_id = %submission.id,
                    language = submission.language.as_str(),
                    reason = reason.as_str(),
                    "skipping submission"
                );
                skipped.push(SkippedSubmission {
                    submission_id: submission.id,
                    reason,
                });
            }
        }
    }

    (prepared, skipped)
}

fn prepare_one<'a>(
    problem_id: ProblemId,
    submission: &'a Submission,
    seen: &mut HashSet<SubmissionId>,
) -> Result<Prepared<'a>, SkipReason> {
    if submission.problem_id != problem_id {
        return Err(SkipReason::ProblemMismatch);
    }
    if !seen.insert(submission.id) {
        return Err(SkipReason::DuplicateId);
    }

    let source = submission
        .decode_code()
        .map_err(|_| SkipReason::Undecodable)?;
    let normalized = normalize(source, submission.language);
    if normalized.is_empty() {
        return Err(SkipReason::EmptyCode);
    }

    Ok(Prepared {
        submission,
        code: normalized.as_str().chars().collect(),
    })
}

fn oriented_pair(left: &Submission, right: &Submission, similarity: f64) -> SimilarityPair {
    let (a, b) = if left.id <= right.id {
        (left, right)
    } else {
        (right, left)
    };

    SimilarityPair {
        submission_id_a: a.id,
        submission_id_b: b.id,
        user_a: a.user_id,
        user_b: b.user_id,
        similarity,
    }
}

fn rank(x: &SimilarityPair, y: &SimilarityPair) -> CmpOrdering {
    y.similarity
        .total_cmp(&x.similarity)
        .then_with(|| x.submission_id_a.cmp(&y.submission_id_a))
        .then_with(|| x.submission_id_b.cmp(&y.submission_id_b))
}
