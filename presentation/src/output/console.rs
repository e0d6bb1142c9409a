//! Console output formatter for subjects, questions and exams

use colored::Colorize;
use exambank_application::{GoalBoard, SessionListing};
use exambank_domain::{Difficulty, ExamRecord, MonthlyGoal, Question, StudySession, Subject};
use serde::Serialize;

const CONTENT_WIDTH: usize = 48;

/// Formats bank records for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Table of subjects
    pub fn subjects(subjects: &[Subject]) -> String {
        if subjects.is_empty() {
            return Self::empty("No subjects yet.");
        }

        let mut output = Self::table_header(&[("ID", 38), ("NAME", 24), ("CREDITS", 8)]);
        output.push_str("  DOMAINS\n");
        for s in subjects {
            output.push_str(&format!(
                "{:<38}{:<24}{:<8}  {}\n",
                s.id.as_str().dimmed(),
                Self::truncate(&s.name, 22),
                s.credits,
                s.knowledge_domains.join(", ")
            ));
        }
        output
    }

    /// One subject with all its fields
    pub fn subject(subject: &Subject) -> String {
        let mut output = Self::header(&subject.name);
        output.push('\n');
        output.push_str(&Self::field("ID", subject.id.as_str()));
        output.push_str(&Self::field("Credits", &subject.credits.to_string()));
        output.push_str(&Self::field(
            "Domains",
            &Self::or_dash(&subject.knowledge_domains.join(", ")),
        ));
        output
    }

    /// Table of questions
    pub fn questions(questions: &[Question]) -> String {
        if questions.is_empty() {
            return Self::empty("No questions match.");
        }

        let mut output =
            Self::table_header(&[("ID", 38), ("DIFFICULTY", 11), ("DOMAIN", 16)]);
        output.push_str("  CONTENT\n");
        for q in questions {
            output.push_str(&format!(
                "{:<38}{}{:<16}  {}\n",
                q.id.as_str().dimmed(),
                Self::difficulty(q.difficulty, 11),
                Self::truncate(&Self::or_dash(&q.knowledge_domain), 15),
                Self::truncate(&q.content, CONTENT_WIDTH)
            ));
        }
        output.push_str(&format!("\n{} question(s)\n", questions.len()));
        output
    }

    /// One question with its answer
    pub fn question(question: &Question) -> String {
        let mut output = Self::section_header(question.id.as_str());
        output.push_str(&Self::field("Subject", question.subject_id.as_str()));
        output.push_str(&Self::field(
            "Difficulty",
            &Self::difficulty(question.difficulty, 0),
        ));
        output.push_str(&Self::field("Domain", &Self::or_dash(&question.knowledge_domain)));
        output.push_str(&format!("\n{}\n{}\n", "Question:".cyan().bold(), question.content));
        output.push_str(&format!(
            "\n{}\n{}\n",
            "Answer:".green().bold(),
            Self::or_dash(&question.answer)
        ));
        output
    }

    /// Table of exams
    pub fn exams(exams: &[ExamRecord]) -> String {
        if exams.is_empty() {
            return Self::empty("No exams yet.");
        }

        let mut output = Self::table_header(&[("ID", 38), ("NAME", 24), ("QUESTIONS", 10)]);
        output.push_str("  SUBJECT\n");
        for e in exams {
            output.push_str(&format!(
                "{:<38}{:<24}{:<10}  {}\n",
                e.id.as_str().dimmed(),
                Self::truncate(&e.name, 22),
                e.questions.len(),
                e.subject_id
            ));
        }
        output
    }

    /// One exam: distribution summary, then every question
    pub fn exam(exam: &ExamRecord) -> String {
        let mut output = Self::header(&exam.name);
        output.push('\n');
        output.push_str(&Self::field("ID", exam.id.as_str()));
        output.push_str(&Self::field("Subject", exam.subject_id.as_str()));

        output.push_str(&Self::section_header("Distribution"));
        for quota in &exam.question_distribution {
            output.push_str(&format!("  * {}\n", quota));
        }
        let counts = exam.count_by_difficulty();
        let summary = Difficulty::ALL
            .iter()
            .filter_map(|d| counts.get(d).map(|n| format!("{} {}", n, d)))
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!(
            "  {} {}\n",
            "Total:".bold(),
            Self::or_dash(&summary)
        ));

        output.push_str(&Self::section_header("Questions"));
        for (i, q) in exam.questions.iter().enumerate() {
            output.push_str(&format!(
                "\n{:>3}. {} {}\n     {}\n",
                i + 1,
                Self::difficulty(q.difficulty, 0),
                format!("[{}]", Self::or_dash(&q.knowledge_domain)).dimmed(),
                q.content
            ));
            if !q.answer.is_empty() {
                output.push_str(&format!("     {} {}\n", "->".green(), q.answer));
            }
        }
        output
    }

    /// Table of study sessions with their total time
    pub fn sessions(listing: &SessionListing) -> String {
        if listing.sessions.is_empty() {
            return Self::empty("No study sessions logged.");
        }

        let mut output =
            Self::table_header(&[("ID", 38), ("DATE", 18), ("SUBJECT", 24), ("TIME", 7)]);
        output.push_str("  CONTENT\n");
        for s in &listing.sessions {
            output.push_str(&format!(
                "{:<38}{:<18}{:<24}{:<7}  {}\n",
                s.id.as_str().dimmed(),
                s.date.format("%Y-%m-%d %H:%M").to_string(),
                Self::truncate(s.subject_id.as_str(), 22),
                s.duration.to_string(),
                Self::truncate(&s.content, CONTENT_WIDTH)
            ));
        }
        output.push_str(&format!(
            "\n{} session(s), {} {}\n",
            listing.sessions.len(),
            listing.total.to_string().bold(),
            "total".dimmed()
        ));
        output
    }

    /// One study session with its notes
    pub fn session(session: &StudySession) -> String {
        let mut output = Self::section_header(session.id.as_str());
        output.push_str(&Self::field("Subject", session.subject_id.as_str()));
        output.push_str(&Self::field(
            "Date",
            &session.date.format("%Y-%m-%d %H:%M").to_string(),
        ));
        output.push_str(&Self::field("Duration", &session.duration.to_string()));
        output.push_str(&format!("\n{}\n{}\n", "Studied:".cyan().bold(), session.content));
        output.push_str(&format!(
            "\n{}\n{}\n",
            "Notes:".green().bold(),
            Self::or_dash(session.notes.as_deref().unwrap_or_default())
        ));
        output
    }

    /// Every monthly goal with the overall progress
    pub fn goals(board: &GoalBoard) -> String {
        if board.goals.is_empty() {
            return Self::empty("No monthly goals set.");
        }

        let mut output = Self::table_header(&[("SUBJECT", 38), ("DONE", 8), ("TARGET", 8)]);
        output.push_str("  PROGRESS\n");
        for g in &board.goals {
            output.push_str(&format!(
                "{:<38}{:<8}{:<8}  {}\n",
                Self::truncate(g.subject_id.as_str(), 36),
                format!("{}h", g.completed),
                format!("{}h", g.target),
                Self::progress_bar(g.progress_percent())
            ));
        }
        let summary = &board.summary;
        output.push_str(&format!(
            "\n{} {}h of {}h  {}\n",
            "Overall:".bold(),
            summary.completed,
            summary.target,
            Self::progress_bar(summary.percent)
        ));
        output
    }

    /// One monthly goal
    pub fn goal(goal: &MonthlyGoal) -> String {
        let mut output = Self::section_header(goal.subject_id.as_str());
        output.push_str(&Self::field("Target", &format!("{}h", goal.target)));
        output.push_str(&Self::field("Completed", &format!("{}h", goal.completed)));
        output.push_str(&Self::field(
            "Progress",
            &Self::progress_bar(goal.progress_percent()),
        ));
        output
    }

    /// Single-line error for the terminal
    pub fn error(message: &str) -> String {
        format!("{} {}", "error:".red().bold(), message)
    }

    /// Pretty JSON of any serializable value
    pub fn json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn table_header(columns: &[(&str, usize)]) -> String {
        columns
            .iter()
            .map(|(name, width)| format!("{:<width$}", name, width = width).bold().to_string())
            .collect()
    }

    fn field(label: &str, value: &str) -> String {
        format!("{} {}\n", format!("{:<11}", format!("{label}:")).cyan(), value)
    }

    fn difficulty(difficulty: Difficulty, width: usize) -> String {
        let padded = format!("{:<width$}", difficulty.as_str(), width = width);
        match difficulty {
            Difficulty::Easy => padded.green().to_string(),
            Difficulty::Medium => padded.yellow().to_string(),
            Difficulty::Hard => padded.red().to_string(),
            Difficulty::VeryHard => padded.magenta().bold().to_string(),
        }
    }

    /// Twenty-cell bar followed by the percentage
    fn progress_bar(percent: f64) -> String {
        const CELLS: usize = 20;
        let percent = percent.clamp(0.0, 100.0);
        let filled = ((percent / 100.0) * CELLS as f64).round() as usize;
        let bar = format!(
            "{}{}",
            "#".repeat(filled),
            "-".repeat(CELLS - filled)
        );
        let bar = if percent >= 100.0 {
            bar.green().to_string()
        } else {
            bar.yellow().to_string()
        };
        format!("[{}] {:.1}%", bar, percent)
    }

    fn empty(message: &str) -> String {
        format!("{}\n", message.dimmed())
    }

    fn or_dash(value: &str) -> String {
        if value.trim().is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    }

    /// Cut `text` to at most `max` characters, marking the cut with "..."
    fn truncate(text: &str, max: usize) -> String {
        let single_line = text.replace('\n', " ");
        if single_line.chars().count() <= max {
            return single_line;
        }
        let kept: String = single_line.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
