//! End-to-end workflow over in-memory stores: catalog, bank, generation,
//! editing and archive sharing the same collections.

use exambank_application::{
    ExamArchiveUseCase, ExamEdit, ExamPolicy, ExamRequest, GenerateExamError,
    GenerateExamUseCase, InMemoryStore, NewQuestion, NewSubject, QuestionBankUseCase,
    RecordStore, SubjectCatalogUseCase,
};
use exambank_domain::{
    AssemblyError, Difficulty, DifficultyQuota, ExamRecord, Question, QuestionFilter, Subject,
    SubjectId,
};
use std::collections::HashSet;
use std::sync::Arc;

struct Bank {
    subjects: Arc<InMemoryStore<Subject>>,
    questions: Arc<InMemoryStore<Question>>,
    exams: Arc<InMemoryStore<ExamRecord>>,
}

impl Bank {
    fn new() -> Self {
        Self {
            subjects: Arc::new(InMemoryStore::new()),
            questions: Arc::new(InMemoryStore::new()),
            exams: Arc::new(InMemoryStore::new()),
        }
    }

    fn catalog(&self) -> SubjectCatalogUseCase {
        SubjectCatalogUseCase::new(self.subjects.clone())
    }

    fn questions(&self) -> QuestionBankUseCase {
        QuestionBankUseCase::new(self.questions.clone(), self.subjects.clone())
    }

    fn generator(&self, seed: u64) -> GenerateExamUseCase {
        GenerateExamUseCase::new(
            self.subjects.clone(),
            self.questions.clone(),
            self.exams.clone(),
        )
        .with_policy(ExamPolicy::default().with_seed(seed))
    }

    fn archive(&self) -> ExamArchiveUseCase {
        ExamArchiveUseCase::new(self.exams.clone())
    }

    fn subject(&self, name: &str) -> SubjectId {
        self.catalog()
            .create(NewSubject {
                name: name.to_string(),
                credits: 4,
                knowledge_domains: vec!["Graphs".to_string(), "Sorting".to_string()],
            })
            .unwrap()
            .id
    }

    fn add(&self, subject_id: &SubjectId, difficulty: Difficulty, domain: &str, n: usize) {
        let bank = self.questions();
        for i in 0..n {
            bank.create(NewQuestion {
                subject_id: subject_id.clone(),
                content: format!("{difficulty} {domain} question {i}"),
                answer: format!("answer {i}"),
                difficulty,
                knowledge_domain: domain.to_string(),
            })
            .unwrap();
        }
    }
}

fn assert_no_duplicates(exam: &ExamRecord) {
    let ids: HashSet<_> = exam.questions.iter().map(|q| q.id.clone()).collect();
    assert_eq!(ids.len(), exam.questions.len());
}

#[test]
fn generates_exam_matching_distribution() {
    let bank = Bank::new();
    let algo = bank.subject("Algorithms");
    let other = bank.subject("History");
    bank.add(&algo, Difficulty::Easy, "Graphs", 4);
    bank.add(&algo, Difficulty::Hard, "Sorting", 3);
    bank.add(&other, Difficulty::Easy, "Graphs", 10);

    let exam = bank
        .generator(1)
        .generate(
            ExamRequest::new(algo.clone(), "Midterm")
                .with_quota(DifficultyQuota::new(Difficulty::Easy, 3))
                .with_quota(DifficultyQuota::new(Difficulty::Hard, 2)),
        )
        .unwrap();

    assert_eq!(exam.questions.len(), exam.requested_total());
    assert!(exam.questions.iter().all(|q| q.subject_id == algo));
    assert_eq!(exam.count_by_difficulty()[&Difficulty::Easy], 3);
    assert_eq!(exam.count_by_difficulty()[&Difficulty::Hard], 2);
    assert_no_duplicates(&exam);

    assert_eq!(bank.archive().list(Some(&algo)).unwrap(), vec![exam]);
    assert!(bank.archive().list(Some(&other)).unwrap().is_empty());
}

#[test]
fn shortfall_reports_tier_and_persists_nothing() {
    let bank = Bank::new();
    let subject = bank.subject("Algorithms");
    bank.add(&subject, Difficulty::Easy, "Graphs", 5);
    bank.add(&subject, Difficulty::Medium, "Graphs", 3);

    let err = bank
        .generator(2)
        .generate(
            ExamRequest::new(subject, "Final")
                .with_quota(DifficultyQuota::new(Difficulty::Easy, 3))
                .with_quota(DifficultyQuota::new(Difficulty::Medium, 4)),
        )
        .unwrap_err();

    match err {
        GenerateExamError::Assembly(AssemblyError::InsufficientQuestions {
            shortfalls,
            requested,
            selected,
        }) => {
            assert_eq!(requested, 7);
            assert_eq!(selected, 6);
            assert_eq!(shortfalls.len(), 1);
            assert_eq!(shortfalls[0].difficulty, Difficulty::Medium);
            assert_eq!(shortfalls[0].missing(), 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(bank.exams.list().unwrap().is_empty());
}

#[test]
fn picked_question_counts_toward_its_tier() {
    let bank = Bank::new();
    let subject = bank.subject("Algorithms");
    bank.add(&subject, Difficulty::Easy, "Graphs", 6);

    let picked = bank
        .questions()
        .list(&QuestionFilter::new().with_subject(subject.clone()))
        .unwrap()
        .remove(4);

    let exam = bank
        .generator(3)
        .generate(
            ExamRequest::new(subject, "Quiz")
                .with_quota(DifficultyQuota::new(Difficulty::Easy, 3))
                .with_pick(picked.id.clone()),
        )
        .unwrap();

    assert_eq!(exam.questions.len(), 3);
    assert!(exam.contains(&picked.id));
    assert_no_duplicates(&exam);
}

#[test]
fn request_domain_restricts_every_quota() {
    let bank = Bank::new();
    let subject = bank.subject("Algorithms");
    bank.add(&subject, Difficulty::Easy, "Graphs", 2);
    bank.add(&subject, Difficulty::Easy, "Sorting", 5);

    let exam = bank
        .generator(4)
        .generate(
            ExamRequest::new(subject.clone(), "Graph quiz")
                .with_quota(DifficultyQuota::new(Difficulty::Easy, 2))
                .with_knowledge_domain("Graphs"),
        )
        .unwrap();
    assert!(exam.questions.iter().all(|q| q.knowledge_domain == "Graphs"));

    let err = bank
        .generator(4)
        .generate(
            ExamRequest::new(subject, "Too many")
                .with_quota(DifficultyQuota::new(Difficulty::Easy, 3))
                .with_knowledge_domain("Graphs"),
        )
        .unwrap_err();
    assert!(err.is_shortfall());
}

#[test]
fn same_seed_draws_same_questions() {
    let bank = Bank::new();
    let subject = bank.subject("Algorithms");
    bank.add(&subject, Difficulty::Medium, "Graphs", 12);

    let request = ExamRequest::new(subject, "Seeded")
        .with_quota(DifficultyQuota::new(Difficulty::Medium, 4));
    let a = bank.generator(99).generate(request.clone()).unwrap();
    let b = bank.generator(99).generate(request).unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(a.question_ids(), b.question_ids());
}

#[test]
fn editing_keeps_id_and_replaces_record() {
    let bank = Bank::new();
    let subject = bank.subject("Algorithms");
    bank.add(&subject, Difficulty::Easy, "Graphs", 4);
    bank.add(&subject, Difficulty::Hard, "Graphs", 4);

    let generator = bank.generator(5);
    let exam = generator
        .generate(
            ExamRequest::new(subject, "Draft")
                .with_quota(DifficultyQuota::new(Difficulty::Easy, 2)),
        )
        .unwrap();

    // A kept question deleted from the bank is dropped, and its slot redrawn.
    let gone = exam.questions[0].id.clone();
    bank.questions().delete(&gone).unwrap();

    let edited = generator
        .regenerate(
            &exam.id,
            ExamEdit {
                exam_name: Some("Final".to_string()),
                distribution: Some(vec![
                    DifficultyQuota::new(Difficulty::Easy, 2),
                    DifficultyQuota::new(Difficulty::Hard, 1),
                ]),
                keep_existing: true,
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(edited.id, exam.id);
    assert_eq!(edited.name, "Final");
    assert_eq!(edited.questions.len(), 3);
    assert!(!edited.contains(&gone));
    assert!(edited.contains(&exam.questions[1].id));
    assert_no_duplicates(&edited);

    let stored = bank.archive().list(None).unwrap();
    assert_eq!(stored, vec![edited]);
}

#[test]
fn deleting_a_subject_leaves_its_exams() {
    let bank = Bank::new();
    let subject = bank.subject("Algorithms");
    bank.add(&subject, Difficulty::Easy, "Graphs", 1);
    bank.generator(6)
        .generate(
            ExamRequest::new(subject.clone(), "Tiny")
                .with_quota(DifficultyQuota::new(Difficulty::Easy, 1)),
        )
        .unwrap();

    bank.catalog().delete(&subject).unwrap();
    assert_eq!(bank.archive().list(Some(&subject)).unwrap().len(), 1);
}
