//! Fixed user-facing texts: menu labels, questions, notices.

use super::session::SurveyStep;

/// Main-menu labels. Transports that can render buttons show these three.
pub const MENU_TEST: &str = "Test";
pub const MENU_RETROSPECTIVE: &str = "Retrospective";
pub const MENU_HELP: &str = "Help";

/// Greeting shown whenever the session sits at the main menu.
pub const WELCOME: &str = "Welcome! Choose an action:";

/// Reply to unrecognized input at the main menu. State does not change.
pub const USE_MENU: &str = "Please use the menu buttons.";

pub const HELP: &str = "This bot helps you track your state across three categories:\n\
1. Wellbeing\n\
2. Activity\n\
3. Mood\n\
\n\
Take the test and the bot will save your results and offer simple recommendations.";

pub const RETROSPECTIVE_STUB: &str = "The retrospective feature is under development.";

/// Shown when any scaled answer fails to parse or is outside 1-7.
pub const SCALE_ERROR: &str = "Error: scale answers must be numbers from 1 to 7.\n\
Please take the test again with valid numbers.";

/// Shown when the result row could not be written.
pub const SAVE_ERROR: &str = "Failed to save your results. Please try the test again later.";

/// The text shown when the session enters `step`.
///
/// Each question step owns the question whose answer it collects; the menu
/// step shows the greeting.
pub fn step_prompt(step: SurveyStep) -> &'static str {
    match step {
        SurveyStep::ChoosingAction => WELCOME,
        SurveyStep::AskSamo1 => {
            "Let's begin the test.\nRate your physical state (wellbeing) on a scale from 1 to 7."
        }
        SurveyStep::AskSamo2 => "Do you feel alert and healthy? (1-7)",
        SurveyStep::AskAct1 => "Do you feel energetic? (1-7)",
        SurveyStep::AskAct2 => "Do you feel tired or in need of rest? (1-7)",
        SurveyStep::AskMood1 => "How would you rate your mood right now? (1-7)",
        SurveyStep::AskMood2 => "Do you feel positive or negative? (1-7)",
        SurveyStep::AskOpen1 => "Which three words best describe your current state?",
        SurveyStep::AskOpen2 => "What influenced your state the most today?",
    }
}
