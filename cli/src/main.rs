//! CLI entrypoint for exam-bank
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use exambank_application::{
    ActivityLogger, ExamArchiveUseCase, ExamEdit, ExamRequest, GenerateExamUseCase,
    MonthlyGoalsUseCase, NewQuestion, NewSession, NewSubject, NoActivityLogger,
    QuestionBankUseCase, QuestionChanges, StudyLogUseCase, SubjectCatalogUseCase, SubjectChanges,
};
use exambank_domain::{
    ExamId, ExamRecord, MonthlyGoal, OutputFormat, Question, QuestionFilter, QuestionId,
    SessionEdit, SessionFilter, SessionId, Severity, StudySession, Subject, SubjectId,
};
use exambank_infrastructure::{ConfigLoader, FileConfig, JsonFileStore, JsonlActivityLogger};
use exambank_presentation::{
    Cli, Command, ConsoleAssemblyReporter, ConsoleFormatter, ExamCommand, GoalCommand,
    OutputConfig, QuestionCommand, SessionCommand, SubjectCommand, render,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", ConsoleFormatter::error(&err.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {e}"))?
    };
    check_config(&config)?;

    let output = OutputConfig::resolve(
        cli.output,
        cli.no_color,
        config.output.parse_format().0,
        config.output.color,
    );
    output.apply();

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.storage.resolved_data_dir());
    info!("Using data directory {}", data_dir.display());

    let app = App::open(&config, data_dir, output.format, cli.verbose > 0)?;
    match cli.command {
        Command::Subject(command) => app.subject(command),
        Command::Question(command) => app.question(command),
        Command::Exam(command) => app.exam(command),
        Command::Session(command) => app.session(command),
        Command::Goal(command) => app.goal(command),
    }
}

/// Log warnings, fail on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    let mut errors = Vec::new();
    for issue in issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => errors.push(issue.message),
        }
    }
    if !errors.is_empty() {
        bail!("invalid configuration: {}", errors.join("; "));
    }
    Ok(())
}

/// Wired use cases for one invocation
struct App {
    catalog: SubjectCatalogUseCase,
    bank: QuestionBankUseCase,
    generator: GenerateExamUseCase,
    archive: ExamArchiveUseCase,
    study_log: StudyLogUseCase,
    goals: MonthlyGoalsUseCase,
    format: OutputFormat,
    verbose: bool,
}

impl App {
    fn open(
        config: &FileConfig,
        data_dir: PathBuf,
        format: OutputFormat,
        verbose: bool,
    ) -> Result<Self> {
        // === Dependency Injection ===
        let subjects = Arc::new(JsonFileStore::<Subject>::open(&data_dir)?);
        let questions = Arc::new(JsonFileStore::<Question>::open(&data_dir)?);
        let exams = Arc::new(JsonFileStore::<ExamRecord>::open(&data_dir)?);
        let sessions = Arc::new(JsonFileStore::<StudySession>::open(&data_dir)?);
        let goals = Arc::new(JsonFileStore::<MonthlyGoal>::open(&data_dir)?);

        let activity: Arc<dyn ActivityLogger> = match &config.logging.activity_log {
            Some(path) => match JsonlActivityLogger::open(path) {
                Ok(logger) => Arc::new(logger),
                Err(e) => {
                    warn!("Activity log {} disabled: {}", path.display(), e);
                    Arc::new(NoActivityLogger)
                }
            },
            None => Arc::new(NoActivityLogger),
        };

        Ok(Self {
            catalog: SubjectCatalogUseCase::new(subjects.clone())
                .with_policy(config.subjects.to_policy())
                .with_activity_logger(activity.clone()),
            bank: QuestionBankUseCase::new(questions.clone(), subjects.clone())
                .with_activity_logger(activity.clone()),
            generator: GenerateExamUseCase::new(subjects.clone(), questions, exams.clone())
                .with_policy(config.exams.to_policy())
                .with_activity_logger(activity.clone()),
            archive: ExamArchiveUseCase::new(exams).with_activity_logger(activity.clone()),
            study_log: StudyLogUseCase::new(sessions, subjects.clone())
                .with_activity_logger(activity.clone()),
            goals: MonthlyGoalsUseCase::new(goals, subjects).with_activity_logger(activity),
            format,
            verbose,
        })
    }

    fn subject(&self, command: SubjectCommand) -> Result<()> {
        match command {
            SubjectCommand::Add {
                name,
                credits,
                domains,
            } => {
                let subject = self.catalog.create(NewSubject {
                    name,
                    credits,
                    knowledge_domains: domains,
                })?;
                self.print(&subject, ConsoleFormatter::subject);
            }
            SubjectCommand::Edit {
                id,
                name,
                credits,
                domains,
            } => {
                let changes = SubjectChanges {
                    name,
                    credits,
                    knowledge_domains: (!domains.is_empty()).then_some(domains),
                };
                let subject = self.catalog.update(&SubjectId::new(id), changes)?;
                self.print(&subject, ConsoleFormatter::subject);
            }
            SubjectCommand::List => {
                let subjects = self.catalog.list()?;
                self.print(subjects.as_slice(), ConsoleFormatter::subjects);
            }
            SubjectCommand::Show { id } => {
                let subject = self.catalog.get(&SubjectId::new(id))?;
                self.print(&subject, ConsoleFormatter::subject);
            }
            SubjectCommand::Delete { id } => {
                self.catalog.delete(&SubjectId::new(id.as_str()))?;
                self.deleted("subject", &id);
            }
        }
        Ok(())
    }

    fn question(&self, command: QuestionCommand) -> Result<()> {
        match command {
            QuestionCommand::Add {
                subject,
                content,
                answer,
                difficulty,
                domain,
            } => {
                let question = self.bank.create(NewQuestion {
                    subject_id: SubjectId::new(subject),
                    content,
                    answer,
                    difficulty,
                    knowledge_domain: domain,
                })?;
                self.print(&question, ConsoleFormatter::question);
            }
            QuestionCommand::Edit {
                id,
                subject,
                content,
                answer,
                difficulty,
                domain,
            } => {
                let changes = QuestionChanges {
                    subject_id: subject.map(SubjectId::new),
                    content,
                    answer,
                    difficulty,
                    knowledge_domain: domain,
                };
                let question = self.bank.update(&QuestionId::new(id), changes)?;
                self.print(&question, ConsoleFormatter::question);
            }
            QuestionCommand::List {
                subject,
                difficulty,
                domain,
                search,
            } => {
                let mut filter = QuestionFilter::new();
                if let Some(subject) = subject {
                    filter = filter.with_subject(subject);
                }
                if let Some(difficulty) = difficulty {
                    filter = filter.with_difficulty(difficulty);
                }
                if let Some(domain) = domain {
                    filter = filter.with_knowledge_domain(domain);
                }
                if let Some(text) = search {
                    filter = filter.with_text(text);
                }
                let questions = self.bank.list(&filter)?;
                self.print(questions.as_slice(), ConsoleFormatter::questions);
            }
            QuestionCommand::Show { id } => {
                let question = self.bank.get(&QuestionId::new(id))?;
                self.print(&question, ConsoleFormatter::question);
            }
            QuestionCommand::Delete { id } => {
                self.bank.delete(&QuestionId::new(id.as_str()))?;
                self.deleted("question", &id);
            }
        }
        Ok(())
    }

    fn exam(&self, command: ExamCommand) -> Result<()> {
        let reporter = ConsoleAssemblyReporter::new(self.verbose);
        match command {
            ExamCommand::Generate {
                subject,
                name,
                quotas,
                picks,
            } => {
                let Some(distribution) = quotas.distribution() else {
                    bail!(
                        "no distribution given; use --easy, --medium, --hard, --very-hard or --quota"
                    );
                };
                let request = ExamRequest {
                    subject_id: SubjectId::new(subject),
                    exam_name: name,
                    distribution,
                    knowledge_domain: quotas.domain,
                    preselected: picks.into_iter().map(QuestionId::new).collect(),
                };
                let exam = self.generator.generate_with_progress(request, &reporter)?;
                self.print(&exam, ConsoleFormatter::exam);
            }
            ExamCommand::Edit {
                id,
                name,
                quotas,
                picks,
                keep_all,
            } => {
                let edit = ExamEdit {
                    exam_name: name,
                    distribution: quotas.distribution(),
                    knowledge_domain: quotas.domain,
                    picks: picks.into_iter().map(QuestionId::new).collect(),
                    keep_existing: keep_all,
                };
                let exam = self
                    .generator
                    .regenerate_with_progress(&ExamId::new(id), edit, &reporter)?;
                self.print(&exam, ConsoleFormatter::exam);
            }
            ExamCommand::List { subject } => {
                let subject = subject.map(SubjectId::new);
                let exams = self.archive.list(subject.as_ref())?;
                self.print(exams.as_slice(), ConsoleFormatter::exams);
            }
            ExamCommand::Show { id } => {
                let exam = self.archive.get(&ExamId::new(id))?;
                self.print(&exam, ConsoleFormatter::exam);
            }
            ExamCommand::Delete { id } => {
                self.archive.delete(&ExamId::new(id.as_str()))?;
                self.deleted("exam", &id);
            }
        }
        Ok(())
    }

    fn session(&self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::Add {
                subject,
                date,
                duration,
                content,
                notes,
            } => {
                let session = self.study_log.create(NewSession {
                    subject_id: SubjectId::new(subject),
                    date,
                    duration,
                    content,
                    notes,
                })?;
                self.print(&session, ConsoleFormatter::session);
            }
            SessionCommand::Edit {
                id,
                subject,
                date,
                duration,
                content,
                notes,
            } => {
                let edit = SessionEdit {
                    subject_id: subject.map(SubjectId::new),
                    date,
                    duration,
                    content,
                    notes,
                };
                let session = self.study_log.update(&SessionId::new(id), edit)?;
                self.print(&session, ConsoleFormatter::session);
            }
            SessionCommand::List { subject, on } => {
                let mut filter = SessionFilter::new();
                if let Some(subject) = subject {
                    filter = filter.with_subject(subject);
                }
                if let Some(day) = on {
                    filter = filter.on_day(day);
                }
                let listing = self.study_log.list(&filter)?;
                self.print(&listing, ConsoleFormatter::sessions);
            }
            SessionCommand::Show { id } => {
                let session = self.study_log.get(&SessionId::new(id))?;
                self.print(&session, ConsoleFormatter::session);
            }
            SessionCommand::Delete { id } => {
                self.study_log.delete(&SessionId::new(id.as_str()))?;
                self.deleted("session", &id);
            }
        }
        Ok(())
    }

    fn goal(&self, command: GoalCommand) -> Result<()> {
        match command {
            GoalCommand::Set {
                subject,
                target,
                completed,
            } => {
                let goal = self.goals.set(&SubjectId::new(subject), target, completed)?;
                self.print(&goal, ConsoleFormatter::goal);
            }
            GoalCommand::Update {
                subject,
                target,
                completed,
            } => {
                if target.is_none() && completed.is_none() {
                    bail!("nothing to change; use --target or --completed");
                }
                let goal = self
                    .goals
                    .update(&SubjectId::new(subject), target, completed)?;
                self.print(&goal, ConsoleFormatter::goal);
            }
            GoalCommand::List => {
                let board = self.goals.board()?;
                self.print(&board, ConsoleFormatter::goals);
            }
            GoalCommand::Show { subject } => {
                let goal = self.goals.get(&SubjectId::new(subject))?;
                self.print(&goal, ConsoleFormatter::goal);
            }
            GoalCommand::Delete { subject } => {
                self.goals.delete(&SubjectId::new(subject.as_str()))?;
                self.deleted("goal", &subject);
            }
        }
        Ok(())
    }

    fn print<T, F>(&self, value: &T, table: F)
    where
        T: serde::Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        println!("{}", render(self.format, value, table).trim_end());
    }

    fn deleted(&self, kind: &str, id: &str) {
        match self.format {
            OutputFormat::Table => println!("Deleted {} {}", kind, id),
            OutputFormat::Json => println!(
                "{}",
                ConsoleFormatter::json(&serde_json::json!({ "deleted": kind, "id": id }))
            ),
        }
    }
}
