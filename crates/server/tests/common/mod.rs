use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use logicode_core::domain::{Language, ProblemId, Submission, SubmissionId, UserId};
use logicode_server::api::{AppState, build_router};
use logicode_server::config::SimilaritySettings;
use logicode_server::repository::{
    NewProblem, NewSubmission, ProblemRecord, ProblemRepository, SubmissionRepository,
};

#[derive(Clone, Default)]
pub struct InMemoryProblems {
    problems: Arc<Mutex<Vec<ProblemRecord>>>,
}

#[async_trait]
impl ProblemRepository for InMemoryProblems {
    async fn create(&self, new_problem: NewProblem) -> Result<ProblemRecord> {
        let record = ProblemRecord {
            id: ProblemId::new(),
            title: new_problem.title,
            description: new_problem.description,
        };
        self.problems.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, problem_id: ProblemId) -> Result<Option<ProblemRecord>> {
        let problems = self.problems.lock().unwrap();
        Ok(problems.iter().find(|p| p.id == problem_id).cloned())
    }
}

#[derive(Clone, Default)]
pub struct InMemorySubmissions {
    submissions: Arc<Mutex<Vec<Submission>>>,
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissions {
    async fn create(&self, new_submission: NewSubmission) -> Result<Submission> {
        let submission = Submission {
            id: SubmissionId::new(),
            user_id: new_submission.user_id,
            problem_id: new_submission.problem_id,
            language: new_submission.language,
            raw_code: new_submission.source_code,
            submitted_at: NaiveDateTime::default(),
        };
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(submission)
    }

    async fn find_by_id(&self, submission_id: SubmissionId) -> Result<Option<Submission>> {
        let submissions = self.submissions.lock().unwrap();
        Ok(submissions.iter().find(|s| s.id == submission_id).cloned())
    }

    async fn list_by_problem_id(&self, problem_id: ProblemId) -> Result<Vec<Submission>> {
        let submissions = self.submissions.lock().unwrap();
        Ok(submissions
            .iter()
            .filter(|s| s.problem_id == problem_id)
            .cloned()
            .collect())
    }
}

pub struct TestApp {
    pub problems: InMemoryProblems,
    pub submissions: InMemorySubmissions,
    pub router: axum::Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(SimilaritySettings::default())
    }

    pub fn with_settings(settings: SimilaritySettings) -> Self {
        let problems = InMemoryProblems::default();
        let submissions = InMemorySubmissions::default();
        let state = AppState::new(
            Arc::new(problems.clone()),
            Arc::new(submissions.clone()),
            settings,
        );

        Self {
            problems,
            submissions,
            router: build_router(Arc::new(state)),
        }
    }

    pub async fn problem(&self, title: &str) -> ProblemId {
        self.problems
            .create(NewProblem {
                title: title.to_string(),
                description: format!("{title} description"),
            })
            .await
            .expect("create problem")
            .id
    }

    pub async fn submit(
        &self,
        problem_id: ProblemId,
        user_id: UserId,
        language: Language,
        code: &[u8],
    ) -> SubmissionId {
        self.submissions
            .create(NewSubmission {
                user_id,
                problem_id,
                language,
                source_code: code.to_vec(),
            })
            .await
            .expect("create submission")
            .id
    }
}
