//! Generate Exam use case
//!
//! Turns a validated [`ExamRequest`] into a stored [`ExamRecord`]:
//!
//! 1. Validate the request and resolve its subject
//! 2. Resolve hand-picked question ids against a snapshot of the bank
//! 3. Run the stratified assembler with the configured RNG
//! 4. Save the exam, only if assembly succeeded
//!
//! Editing an exam ([`GenerateExamUseCase::regenerate`]) re-runs the same
//! pipeline under the existing id, optionally keeping the current questions.

use crate::config::ExamPolicy;
use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::assembly_notifier::{AssemblyNotifier, NoAssemblyProgress};
use crate::ports::record_store::{RecordStore, StoreError};
use crate::use_cases::shared::find_subject;
use exambank_domain::{
    AssemblyError, DifficultyQuota, ExamId, ExamRecord, Preselection, PreselectionOutcome,
    Question, QuestionId, Subject, SubjectId, assemble, total_requested,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while generating or editing an exam
#[derive(Error, Debug)]
pub enum GenerateExamError {
    #[error("Invalid exam request: {0}")]
    InvalidRequest(String),

    #[error("Subject not found: {0}")]
    UnknownSubject(SubjectId),

    #[error("Question not found: {0}")]
    UnknownQuestionId(QuestionId),

    #[error("Exam not found: {0}")]
    UnknownExam(ExamId),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl GenerateExamError {
    /// Whether the bank simply did not hold enough questions.
    pub fn is_shortfall(&self) -> bool {
        matches!(
            self,
            GenerateExamError::Assembly(AssemblyError::InsufficientQuestions { .. })
        )
    }
}

/// Request to generate an exam.
#[derive(Debug, Clone, Default)]
pub struct ExamRequest {
    pub subject_id: SubjectId,
    pub exam_name: String,
    /// Quotas in declaration order. A difficulty may appear more than once.
    pub distribution: Vec<DifficultyQuota>,
    /// Domain applied to every quota that does not name its own.
    pub knowledge_domain: Option<String>,
    /// Hand-picked question ids, in pick order.
    pub preselected: Vec<QuestionId>,
}

impl ExamRequest {
    pub fn new(subject_id: impl Into<SubjectId>, exam_name: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            exam_name: exam_name.into(),
            ..Default::default()
        }
    }

    pub fn with_quota(mut self, quota: DifficultyQuota) -> Self {
        self.distribution.push(quota);
        self
    }

    pub fn with_knowledge_domain(mut self, domain: impl Into<String>) -> Self {
        self.knowledge_domain = Some(domain.into());
        self
    }

    pub fn with_pick(mut self, id: impl Into<QuestionId>) -> Self {
        self.preselected.push(id.into());
        self
    }

    pub fn validate(&self) -> Result<(), GenerateExamError> {
        if self.exam_name.trim().is_empty() {
            return Err(GenerateExamError::InvalidRequest(
                "exam name must not be blank".to_string(),
            ));
        }
        if self.subject_id.as_str().trim().is_empty() {
            return Err(GenerateExamError::InvalidRequest(
                "subject id must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Quotas as the assembler sees them: blank domains dropped, the
    /// request-level domain filled in where a quota has none.
    pub fn effective_distribution(&self) -> Vec<DifficultyQuota> {
        let fallback = self
            .knowledge_domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        self.distribution
            .iter()
            .map(|quota| {
                let own = quota
                    .knowledge_domain
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty());
                DifficultyQuota {
                    difficulty: quota.difficulty,
                    count: quota.count,
                    knowledge_domain: own.or(fallback).map(str::to_string),
                }
            })
            .collect()
    }
}

/// Changes applied when an existing exam is regenerated; `None` keeps the
/// current value.
#[derive(Debug, Clone, Default)]
pub struct ExamEdit {
    pub exam_name: Option<String>,
    pub distribution: Option<Vec<DifficultyQuota>>,
    pub knowledge_domain: Option<String>,
    pub picks: Vec<QuestionId>,
    /// Keep every current question as preselected.
    pub keep_existing: bool,
}

impl ExamEdit {
    /// The request this edit amounts to for `exam`. Kept questions are not
    /// part of it; they are resolved separately.
    pub fn to_request(&self, exam: &ExamRecord) -> ExamRequest {
        ExamRequest {
            subject_id: exam.subject_id.clone(),
            exam_name: self.exam_name.clone().unwrap_or_else(|| exam.name.clone()),
            distribution: self
                .distribution
                .clone()
                .unwrap_or_else(|| exam.question_distribution.clone()),
            knowledge_domain: self.knowledge_domain.clone(),
            preselected: self.picks.clone(),
        }
    }
}

/// Use case for generating and regenerating exams
pub struct GenerateExamUseCase {
    subjects: Arc<dyn RecordStore<Subject>>,
    questions: Arc<dyn RecordStore<Question>>,
    exams: Arc<dyn RecordStore<ExamRecord>>,
    policy: ExamPolicy,
    activity: Arc<dyn ActivityLogger>,
}

impl GenerateExamUseCase {
    pub fn new(
        subjects: Arc<dyn RecordStore<Subject>>,
        questions: Arc<dyn RecordStore<Question>>,
        exams: Arc<dyn RecordStore<ExamRecord>>,
    ) -> Self {
        Self {
            subjects,
            questions,
            exams,
            policy: ExamPolicy::default(),
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_policy(mut self, policy: ExamPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_activity_logger(mut self, activity: Arc<dyn ActivityLogger>) -> Self {
        self.activity = activity;
        self
    }

    /// Generate a new exam without notices.
    pub fn generate(&self, request: ExamRequest) -> Result<ExamRecord, GenerateExamError> {
        self.generate_with_progress(request, &NoAssemblyProgress)
    }

    /// Generate a new exam, reporting notices to `notifier`.
    pub fn generate_with_progress(
        &self,
        request: ExamRequest,
        notifier: &dyn AssemblyNotifier,
    ) -> Result<ExamRecord, GenerateExamError> {
        let exam = self.build(ExamId::generate(), &request, Vec::new(), notifier)?;
        self.store(&exam, "exam_generated")?;
        info!(
            "Generated exam '{}' ({}) with {} questions",
            exam.name,
            exam.id,
            exam.questions.len()
        );
        Ok(exam)
    }

    /// Replace an existing exam by re-running assembly under its id.
    pub fn regenerate(&self, id: &ExamId, edit: ExamEdit) -> Result<ExamRecord, GenerateExamError> {
        self.regenerate_with_progress(id, edit, &NoAssemblyProgress)
    }

    /// Like [`Self::regenerate`], reporting notices to `notifier`.
    ///
    /// With `keep_existing`, current questions are preselected in their
    /// current order, using the bank's version of each. Questions that were
    /// deleted from the bank since are dropped with a notice.
    pub fn regenerate_with_progress(
        &self,
        id: &ExamId,
        edit: ExamEdit,
        notifier: &dyn AssemblyNotifier,
    ) -> Result<ExamRecord, GenerateExamError> {
        let existing = self
            .exams
            .get(id.as_str())?
            .ok_or_else(|| GenerateExamError::UnknownExam(id.clone()))?;

        let kept = if edit.keep_existing {
            existing.question_ids()
        } else {
            Vec::new()
        };
        let request = edit.to_request(&existing);

        let exam = self.build(id.clone(), &request, kept, notifier)?;
        self.store(&exam, "exam_regenerated")?;
        info!(
            "Regenerated exam '{}' ({}) with {} questions",
            exam.name,
            exam.id,
            exam.questions.len()
        );
        Ok(exam)
    }

    fn build(
        &self,
        id: ExamId,
        request: &ExamRequest,
        kept: Vec<QuestionId>,
        notifier: &dyn AssemblyNotifier,
    ) -> Result<ExamRecord, GenerateExamError> {
        request.validate()?;
        let subject = find_subject(self.subjects.as_ref(), &request.subject_id)?
            .ok_or_else(|| GenerateExamError::UnknownSubject(request.subject_id.clone()))?;

        let pool = self.questions.list()?;
        let by_id: HashMap<&QuestionId, &Question> = pool.iter().map(|q| (&q.id, q)).collect();

        let mut preselection = Preselection::new();
        for question_id in &kept {
            match by_id.get(question_id) {
                Some(question) => {
                    preselection.add((*question).clone());
                }
                None => {
                    warn!("Kept question {} no longer exists; dropped", question_id);
                    notifier.on_kept_question_missing(question_id);
                }
            }
        }
        for question_id in &request.preselected {
            let question = by_id
                .get(question_id)
                .ok_or_else(|| GenerateExamError::UnknownQuestionId(question_id.clone()))?;
            if preselection.add((*question).clone()) == PreselectionOutcome::AlreadyPresent {
                notifier.on_duplicate_pick(question_id);
            }
        }

        let distribution = request.effective_distribution();
        debug!(
            "Assembling {} questions for subject {} from a pool of {} ({} preselected)",
            total_requested(&distribution),
            subject.id,
            pool.len(),
            preselection.len()
        );

        let mut rng = self.policy.rng();
        let selection = match assemble(
            &pool,
            &subject.id,
            &distribution,
            preselection.questions(),
            self.policy.assembly_options(),
            &mut rng,
        ) {
            Ok(selection) => selection,
            Err(err) => {
                for shortfall in err.shortfalls() {
                    notifier.on_quota_short(shortfall);
                }
                warn!("Exam '{}' not generated: {}", request.exam_name.trim(), err);
                return Err(err.into());
            }
        };

        for fill in &selection.fills {
            debug!(
                "Quota {}: {} preselected, {} drawn",
                fill.quota.label(),
                fill.preselected,
                fill.drawn
            );
            notifier.on_quota_filled(fill);
        }

        Ok(ExamRecord::from_selection(
            id,
            subject.id,
            request.exam_name.trim(),
            selection,
        ))
    }

    fn store(&self, exam: &ExamRecord, event_type: &'static str) -> Result<(), GenerateExamError> {
        self.exams.save(exam.clone())?;
        self.activity.log(ActivityEvent::new(
            event_type,
            serde_json::json!({
                "id": exam.id.as_str(),
                "subjectId": exam.subject_id.as_str(),
                "name": exam.name,
                "questionCount": exam.questions.len(),
            }),
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::record_store::InMemoryStore;
    use exambank_domain::{Difficulty, QuotaFill, Shortfall};
    use std::sync::Mutex;

    struct Fixture {
        subject: Subject,
        exams: Arc<InMemoryStore<ExamRecord>>,
        use_case: GenerateExamUseCase,
    }

    fn question(id: &str, subject: &Subject, difficulty: Difficulty, domain: &str) -> Question {
        Question {
            id: QuestionId::new(id),
            subject_id: subject.id.clone(),
            content: format!("content {id}"),
            answer: String::new(),
            difficulty,
            knowledge_domain: domain.to_string(),
        }
    }

    fn fixture() -> Fixture {
        let subject = Subject::new("Math", 3, vec![]).unwrap();
        let mut pool = Vec::new();
        for i in 0..5 {
            pool.push(question(&format!("e{i}"), &subject, Difficulty::Easy, "Algebra"));
        }
        for i in 0..3 {
            pool.push(question(&format!("m{i}"), &subject, Difficulty::Medium, "Geometry"));
        }
        let exams = Arc::new(InMemoryStore::new());
        let use_case = GenerateExamUseCase::new(
            Arc::new(InMemoryStore::with_records(vec![subject.clone()])),
            Arc::new(InMemoryStore::with_records(pool)),
            exams.clone(),
        )
        .with_policy(ExamPolicy::default().with_seed(7));
        Fixture {
            subject,
            exams,
            use_case,
        }
    }

    #[derive(Default)]
    struct Recorder {
        duplicates: Mutex<Vec<QuestionId>>,
        filled: Mutex<usize>,
        short: Mutex<Vec<Shortfall>>,
    }

    impl AssemblyNotifier for Recorder {
        fn on_duplicate_pick(&self, question_id: &QuestionId) {
            self.duplicates.lock().unwrap().push(question_id.clone());
        }
        fn on_quota_filled(&self, _fill: &QuotaFill) {
            *self.filled.lock().unwrap() += 1;
        }
        fn on_quota_short(&self, shortfall: &Shortfall) {
            self.short.lock().unwrap().push(shortfall.clone());
        }
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let request = ExamRequest::new("subj", "  ");
        assert!(matches!(
            request.validate(),
            Err(GenerateExamError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_effective_distribution_applies_request_domain() {
        let request = ExamRequest::new("subj", "Quiz")
            .with_quota(DifficultyQuota::new(Difficulty::Easy, 1))
            .with_quota(DifficultyQuota::new(Difficulty::Hard, 1).with_domain("Logic"))
            .with_knowledge_domain(" Algebra ");
        let quotas = request.effective_distribution();
        assert_eq!(quotas[0].knowledge_domain.as_deref(), Some("Algebra"));
        assert_eq!(quotas[1].knowledge_domain.as_deref(), Some("Logic"));
    }

    #[test]
    fn test_generate_saves_exam() {
        let f = fixture();
        let request = ExamRequest::new(f.subject.id.clone(), "Midterm")
            .with_quota(DifficultyQuota::new(Difficulty::Easy, 2))
            .with_quota(DifficultyQuota::new(Difficulty::Medium, 3));
        let exam = f.use_case.generate(request).unwrap();

        assert_eq!(exam.questions.len(), 5);
        assert_eq!(f.exams.list().unwrap(), vec![exam]);
    }

    #[test]
    fn test_shortfall_persists_nothing_and_notifies() {
        let f = fixture();
        let recorder = Recorder::default();
        let request = ExamRequest::new(f.subject.id.clone(), "Final")
            .with_quota(DifficultyQuota::new(Difficulty::Easy, 3))
            .with_quota(DifficultyQuota::new(Difficulty::Medium, 4));

        let err = f
            .use_case
            .generate_with_progress(request, &recorder)
            .unwrap_err();
        assert!(err.is_shortfall());
        assert!(f.exams.list().unwrap().is_empty());

        let short = recorder.short.lock().unwrap();
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].difficulty, Difficulty::Medium);
        assert_eq!(short[0].missing(), 1);
    }

    #[test]
    fn test_unknown_subject_and_pick() {
        let f = fixture();
        let err = f
            .use_case
            .generate(ExamRequest::new("subj_missing", "Quiz"))
            .unwrap_err();
        assert!(matches!(err, GenerateExamError::UnknownSubject(_)));

        let err = f
            .use_case
            .generate(ExamRequest::new(f.subject.id.clone(), "Quiz").with_pick("ques_missing"))
            .unwrap_err();
        assert!(matches!(err, GenerateExamError::UnknownQuestionId(_)));
    }

    #[test]
    fn test_duplicate_pick_is_a_notice() {
        let f = fixture();
        let recorder = Recorder::default();
        let request = ExamRequest::new(f.subject.id.clone(), "Quiz")
            .with_quota(DifficultyQuota::new(Difficulty::Easy, 2))
            .with_pick("e0")
            .with_pick("e0");

        let exam = f
            .use_case
            .generate_with_progress(request, &recorder)
            .unwrap();
        assert_eq!(exam.questions.len(), 2);
        assert_eq!(exam.questions[0].id, QuestionId::new("e0"));
        assert_eq!(*recorder.duplicates.lock().unwrap(), vec![QuestionId::new("e0")]);
        assert_eq!(*recorder.filled.lock().unwrap(), 1);
    }

    #[test]
    fn test_regenerate_keeps_id_and_questions() {
        let f = fixture();
        let original = f
            .use_case
            .generate(
                ExamRequest::new(f.subject.id.clone(), "Quiz")
                    .with_quota(DifficultyQuota::new(Difficulty::Easy, 2)),
            )
            .unwrap();

        let edit = ExamEdit {
            exam_name: Some("Quiz v2".to_string()),
            distribution: Some(vec![
                DifficultyQuota::new(Difficulty::Easy, 2),
                DifficultyQuota::new(Difficulty::Medium, 1),
            ]),
            keep_existing: true,
            ..Default::default()
        };
        let updated = f.use_case.regenerate(&original.id, edit).unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.name, "Quiz v2");
        assert_eq!(updated.questions.len(), 3);
        assert_eq!(updated.questions[..2], original.questions[..]);
        assert_eq!(f.exams.list().unwrap().len(), 1);
    }

    #[test]
    fn test_shrinking_distribution_while_keeping_all_is_rejected() {
        let f = fixture();
        let original = f
            .use_case
            .generate(
                ExamRequest::new(f.subject.id.clone(), "Quiz")
                    .with_quota(DifficultyQuota::new(Difficulty::Easy, 3)),
            )
            .unwrap();

        let edit = ExamEdit {
            exam_name: Some("Short quiz".to_string()),
            distribution: Some(vec![DifficultyQuota::new(Difficulty::Easy, 1)]),
            keep_existing: true,
            ..Default::default()
        };
        let err = f.use_case.regenerate(&original.id, edit).unwrap_err();

        match err {
            GenerateExamError::Assembly(AssemblyError::PreselectionOverflow { question_ids }) => {
                assert_eq!(question_ids.len(), 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(f.exams.list().unwrap(), vec![original]);
    }

    #[test]
    fn test_regenerate_unknown_exam() {
        let f = fixture();
        let err = f
            .use_case
            .regenerate(&ExamId::new("exam_missing"), ExamEdit::default())
            .unwrap_err();
        assert!(matches!(err, GenerateExamError::UnknownExam(_)));
    }
}
