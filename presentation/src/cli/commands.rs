//! CLI command definitions

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use exambank_domain::{
    Difficulty, DifficultyQuota, DomainError, OutputFormat, StudyDuration, parse_study_date,
};
use std::path::PathBuf;

/// CLI arguments for exam-bank
#[derive(Parser, Debug)]
#[command(name = "exam-bank")]
#[command(author, version, about = "Question bank with stratified random exam generation")]
#[command(long_about = r#"
exam-bank keeps subjects and their questions, and assembles exams by drawing
questions at random per difficulty tier. It also logs study sessions and
tracks monthly study-hour goals per subject.

An exam request lists how many questions each tier needs (optionally per
knowledge domain). Hand-picked questions count toward their tier; the rest
are drawn without repetition. If the bank cannot fill a tier, nothing is
saved and every short tier is reported.

Configuration files are loaded from (in priority order):
1. EXAM_BANK_* environment variables (e.g. EXAM_BANK_EXAMS__SEED=7)
2. --config <path>          Explicit config file
3. ./exam-bank.toml         Project-level config
4. ~/.config/exam-bank/config.toml   Global config

Example:
  exam-bank subject add --name "Algorithms" --credits 4 --domain Graphs
  exam-bank question add --subject subj_... --difficulty hard --content "..." --answer "..."
  exam-bank exam generate --subject subj_... --name Midterm --easy 5 --medium 3 --hard 2
  exam-bank exam generate --subject subj_... --name Quiz --quota very-hard:2:Graphs
  exam-bank session add --subject subj_... --date "2024-03-01 14:30" --duration 1:30 --content "Limits"
  exam-bank goal set --subject subj_... --target 20
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (table or json)
    #[arg(short, long, global = true, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Directory holding the JSON collections
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage subjects
    #[command(subcommand)]
    Subject(SubjectCommand),

    /// Manage the question bank
    #[command(subcommand)]
    Question(QuestionCommand),

    /// Generate and browse exams
    #[command(subcommand)]
    Exam(ExamCommand),

    /// Log study sessions
    #[command(subcommand)]
    Session(SessionCommand),

    /// Monthly study-hour goals per subject
    #[command(subcommand)]
    Goal(GoalCommand),
}

#[derive(Subcommand, Debug)]
pub enum SubjectCommand {
    /// Create a subject
    Add {
        /// Subject name (letters, digits and spaces)
        #[arg(long)]
        name: String,

        /// Credit count
        #[arg(long, default_value_t = 0)]
        credits: u32,

        /// Knowledge domain (can be specified multiple times)
        #[arg(long = "domain", value_name = "DOMAIN")]
        domains: Vec<String>,
    },

    /// Edit a subject
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        credits: Option<u32>,

        /// Replace the knowledge domains (can be specified multiple times)
        #[arg(long = "domain", value_name = "DOMAIN")]
        domains: Vec<String>,
    },

    /// List subjects
    List,

    /// Show one subject
    Show { id: String },

    /// Delete a subject
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum QuestionCommand {
    /// Add a question
    Add {
        /// Subject id
        #[arg(long)]
        subject: String,

        #[arg(long)]
        content: String,

        #[arg(long, default_value = "")]
        answer: String,

        /// Easy, Medium, Hard or VeryHard (case-insensitive)
        #[arg(long)]
        difficulty: Difficulty,

        /// Knowledge domain
        #[arg(long, default_value = "")]
        domain: String,
    },

    /// Edit a question
    Edit {
        id: String,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        answer: Option<String>,

        #[arg(long)]
        difficulty: Option<Difficulty>,

        #[arg(long)]
        domain: Option<String>,
    },

    /// List questions, optionally filtered
    List {
        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        difficulty: Option<Difficulty>,

        #[arg(long)]
        domain: Option<String>,

        /// Case-insensitive text search in the content
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
    },

    /// Show one question with its answer
    Show { id: String },

    /// Delete a question
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ExamCommand {
    /// Generate a new exam
    Generate {
        /// Subject id
        #[arg(long)]
        subject: String,

        /// Exam name
        #[arg(long)]
        name: String,

        #[command(flatten)]
        quotas: QuotaArgs,

        /// Hand-picked question id (can be specified multiple times)
        #[arg(long = "pick", value_name = "QUESTION_ID")]
        picks: Vec<String>,
    },

    /// Regenerate an existing exam under the same id
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        quotas: QuotaArgs,

        /// Hand-picked question id (can be specified multiple times)
        #[arg(long = "pick", value_name = "QUESTION_ID")]
        picks: Vec<String>,

        /// Keep every current question and only draw what is missing
        #[arg(long)]
        keep_all: bool,
    },

    /// List exams
    List {
        /// Only exams of this subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Show one exam with its questions
    Show { id: String },

    /// Delete an exam
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Log a study session
    Add {
        /// Subject id
        #[arg(long)]
        subject: String,

        /// Start, as YYYY-MM-DD [HH:MM[:SS]]
        #[arg(long, value_parser = parse_study_date)]
        date: NaiveDateTime,

        /// Length as HH:MM
        #[arg(long)]
        duration: StudyDuration,

        /// What was studied
        #[arg(long)]
        content: String,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Edit a study session
    Edit {
        id: String,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long, value_parser = parse_study_date)]
        date: Option<NaiveDateTime>,

        #[arg(long)]
        duration: Option<StudyDuration>,

        #[arg(long)]
        content: Option<String>,

        /// New notes; an empty value clears them
        #[arg(long)]
        notes: Option<String>,
    },

    /// List sessions, oldest first, with their total time
    List {
        #[arg(long)]
        subject: Option<String>,

        /// Only sessions on this day (YYYY-MM-DD)
        #[arg(long, value_name = "DAY", value_parser = parse_day)]
        on: Option<NaiveDate>,
    },

    /// Show one session
    Show { id: String },

    /// Delete a session
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum GoalCommand {
    /// Set the monthly goal of a subject, replacing any previous one
    Set {
        /// Subject id
        #[arg(long)]
        subject: String,

        /// Target hours for the month
        #[arg(long)]
        target: u32,

        /// Hours already studied
        #[arg(long, default_value_t = 0)]
        completed: u32,
    },

    /// Change the target or completed hours of a goal
    Update {
        /// Subject id
        subject: String,

        #[arg(long)]
        target: Option<u32>,

        #[arg(long)]
        completed: Option<u32>,
    },

    /// List every goal with the overall progress
    List,

    /// Show the goal of one subject
    Show { subject: String },

    /// Delete the goal of a subject
    Delete { subject: String },
}

fn parse_day(s: &str) -> Result<NaiveDate, DomainError> {
    parse_study_date(s).map(|date| date.date())
}

/// Distribution flags shared by `exam generate` and `exam edit`
#[derive(Args, Debug, Clone, Default)]
pub struct QuotaArgs {
    /// Number of Easy questions
    #[arg(long, value_name = "N")]
    pub easy: Option<usize>,

    /// Number of Medium questions
    #[arg(long, value_name = "N")]
    pub medium: Option<usize>,

    /// Number of Hard questions
    #[arg(long, value_name = "N")]
    pub hard: Option<usize>,

    /// Number of VeryHard questions
    #[arg(long, value_name = "N")]
    pub very_hard: Option<usize>,

    /// Extra quota as DIFFICULTY:COUNT[:DOMAIN] (can be specified multiple times)
    #[arg(long = "quota", value_name = "QUOTA")]
    pub quotas: Vec<DifficultyQuota>,

    /// Knowledge domain applied to every quota without its own
    #[arg(long, value_name = "DOMAIN")]
    pub domain: Option<String>,
}

impl QuotaArgs {
    /// Quotas in tier order followed by `--quota` entries, or `None` when
    /// no distribution flag was given.
    pub fn distribution(&self) -> Option<Vec<DifficultyQuota>> {
        let tiers = [
            (Difficulty::Easy, self.easy),
            (Difficulty::Medium, self.medium),
            (Difficulty::Hard, self.hard),
            (Difficulty::VeryHard, self.very_hard),
        ];

        let mut quotas: Vec<DifficultyQuota> = tiers
            .into_iter()
            .filter_map(|(difficulty, count)| count.map(|n| DifficultyQuota::new(difficulty, n)))
            .collect();
        quotas.extend(self.quotas.iter().cloned());

        (!quotas.is_empty()).then_some(quotas)
    }
}
