//! Survey conversation core: steps, session state, transition function,
//! and fixed prompt texts.
//!
//! The survey is a fixed eight-question wellbeing check-in: two scaled
//! questions for each of three categories (wellbeing, activity, mood),
//! followed by two open questions. A session walks the steps linearly;
//! completing the last step hands off to scoring and persistence.

pub mod machine;
pub mod prompts;
pub mod session;

pub use machine::{MENU_LABELS, Outcome, RESTART_COMMAND, Reply, submit};
pub use session::{AnswerKey, Session, SurveyStep};
