//! Property tests for normalization and pairwise similarity.

use chrono::NaiveDateTime;
use proptest::prelude::*;

use logicode_core::domain::{Language, ProblemId, Submission, SubmissionId, UserId};
use logicode_core::similarity::{generate_similarity_report, normalize, similarity};

const LANGUAGES: [Language; 8] = [
    Language::Rust,
    Language::Cpp,
    Language::C,
    Language::Java,
    Language::Python,
    Language::Go,
    Language::JavaScript,
    Language::TypeScript,
];

/// Source-like text dense in comment markers, quotes, escapes and layout.
fn code_like() -> impl Strategy<Value = String> {
    prop::string::string_regex(r#"[a-z0-9 =;(){}\[\],#/*'"`\\\n\t]{0,64}"#)
        .expect("valid regex")
}

fn language() -> impl Strategy<Value = Language> {
    prop::sample::select(LANGUAGES.to_vec())
}

proptest! {
    #[test]
    fn normalization_is_idempotent(source in code_like(), language in language()) {
        let once = normalize(&source, language);
        let twice = normalize(once.as_str(), language);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalized_code_has_no_edge_whitespace(source in code_like(), language in language()) {
        let normalized = normalize(&source, language);
        prop_assert_eq!(normalized.as_str(), normalized.as_str().trim());
    }

    #[test]
    fn similarity_is_symmetric(a in "\\PC{0,40}", b in "\\PC{0,40}") {
        prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    #[test]
    fn similarity_to_self_is_one(s in "\\PC{0,60}") {
        prop_assert_eq!(similarity(&s, &s), 1.0);
    }

    #[test]
    fn similarity_is_bounded(a in "\\PC{0,40}", b in "\\PC{0,40}") {
        let score = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn reports_count_every_input(codes in prop::collection::vec(code_like(), 0..8)) {
        let problem_id = ProblemId::new();
        let submissions: Vec<Submission> = codes
            .iter()
            .map(|code| Submission {
                id: SubmissionId::new(),
                user_id: UserId::new(),
                problem_id,
                language: Language::C,
                raw_code: code.as_bytes().to_vec(),
                submitted_at: NaiveDateTime::default(),
            })
            .collect();

        let report = generate_similarity_report(problem_id, &submissions, 0.85)
            .expect("valid threshold");

        prop_assert_eq!(report.total_submissions, submissions.len());
        let usable = submissions.len() - report.skipped_count();
        prop_assert_eq!(report.compared_pairs, usable * usable.saturating_sub(1) / 2);
        for pair in &report.suspicious_pairs {
            prop_assert!(pair.submission_id_a < pair.submission_id_b);
            prop_assert!(pair.similarity >= 0.85);
        }
        for window in report.suspicious_pairs.windows(2) {
            prop_assert!(window[0].similarity >= window[1].similarity);
        }
    }
}
