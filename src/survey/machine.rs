//! The conversation transition function.
//!
//! `submit` is pure over the session: from the current step and the raw
//! input it decides the stored answer, the next step, and the reply text.
//! No IO happens here: when `Outcome::Finalize` comes back, the caller
//! runs scoring and persistence and then resets the session.

use super::prompts;
use super::session::{Session, SurveyStep};

/// Explicit restart command, accepted from every step. Discards any
/// in-progress answers and returns to the main menu.
pub const RESTART_COMMAND: &str = "/start";

/// The three fixed main-menu labels, in display order.
pub const MENU_LABELS: [&str; 3] = [
    prompts::MENU_TEST,
    prompts::MENU_RETROSPECTIVE,
    prompts::MENU_HELP,
];

/// A reply to send back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Whether the main-menu labels should be offered alongside this reply.
    pub show_menu: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            show_menu: false,
        }
    }

    fn menu(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            show_menu: true,
        }
    }
}

/// Result of feeding one user message into the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The session advanced (or stayed put); send this reply.
    Reply(Reply),
    /// The terminal step just collected its answer. The caller must run
    /// scoring and persistence exactly once, then reset the session.
    Finalize,
}

/// Feed one raw user message into the session.
pub fn submit(session: &mut Session, input: &str) -> Outcome {
    let trimmed = input.trim();

    if trimmed == RESTART_COMMAND {
        session.reset();
        return Outcome::Reply(Reply::menu(prompts::WELCOME));
    }

    match session.step {
        SurveyStep::ChoosingAction => choose_action(session, trimmed),
        step => {
            if let Some(key) = step.answer_key() {
                // Stored verbatim. Scaled answers are validated together at
                // finalize time, not per step, so one error message covers
                // all six.
                session.record_answer(key, input);
            }
            match step.next() {
                Some(next) => {
                    session.step = next;
                    Outcome::Reply(Reply::text(prompts::step_prompt(next)))
                }
                None => Outcome::Finalize,
            }
        }
    }
}

/// Handle the three fixed menu labels. Anything else re-prompts without
/// touching the session.
fn choose_action(session: &mut Session, choice: &str) -> Outcome {
    match choice {
        prompts::MENU_TEST => {
            session.step = SurveyStep::AskSamo1;
            Outcome::Reply(Reply::text(prompts::step_prompt(SurveyStep::AskSamo1)))
        }
        prompts::MENU_RETROSPECTIVE => Outcome::Reply(Reply::menu(format!(
            "{}\n\n{}",
            prompts::RETROSPECTIVE_STUB,
            prompts::WELCOME
        ))),
        prompts::MENU_HELP => Outcome::Reply(Reply::menu(format!(
            "{}\n\n{}",
            prompts::HELP,
            prompts::WELCOME
        ))),
        _ => Outcome::Reply(Reply::menu(prompts::USE_MENU)),
    }
}
