//! Study tracking: logged sessions and monthly hour goals per subject.
//!
//! - [`session::StudySession`]: one sitting, with date, duration and notes
//! - [`goal::MonthlyGoal`]: target and completed hours for a subject

pub mod duration;
pub mod goal;
pub mod session;
