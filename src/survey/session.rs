//! Session state: the current survey step and the answers collected so far.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The steps of the survey conversation.
///
/// Progresses linearly: ChoosingAction → AskSamo1 → AskSamo2 → AskAct1 →
/// AskAct2 → AskMood1 → AskMood2 → AskOpen1 → AskOpen2. Completing AskOpen2
/// triggers scoring, after which the session returns to ChoosingAction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStep {
    ChoosingAction,
    AskSamo1,
    AskSamo2,
    AskAct1,
    AskAct2,
    AskMood1,
    AskMood2,
    AskOpen1,
    AskOpen2,
}

impl SurveyStep {
    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Forward one step at a time, plus the fallback to the main menu that
    /// restart and finalize take from every step. No step is skippable and
    /// there is no other backward transition.
    pub fn can_transition_to(&self, target: SurveyStep) -> bool {
        use SurveyStep::*;
        if target == ChoosingAction {
            return true;
        }
        matches!(
            (self, target),
            (ChoosingAction, AskSamo1)
                | (AskSamo1, AskSamo2)
                | (AskSamo2, AskAct1)
                | (AskAct1, AskAct2)
                | (AskAct2, AskMood1)
                | (AskMood1, AskMood2)
                | (AskMood2, AskOpen1)
                | (AskOpen1, AskOpen2)
        )
    }

    /// The next step in the linear progression, if any.
    ///
    /// `None` for the terminal question step (its completion triggers
    /// scoring rather than another prompt).
    pub fn next(&self) -> Option<SurveyStep> {
        use SurveyStep::*;
        match self {
            ChoosingAction => Some(AskSamo1),
            AskSamo1 => Some(AskSamo2),
            AskSamo2 => Some(AskAct1),
            AskAct1 => Some(AskAct2),
            AskAct2 => Some(AskMood1),
            AskMood1 => Some(AskMood2),
            AskMood2 => Some(AskOpen1),
            AskOpen1 => Some(AskOpen2),
            AskOpen2 => None,
        }
    }

    /// Whether this is the terminal question step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::AskOpen2)
    }

    /// The key under which this step's answer is stored.
    ///
    /// `None` for the menu step, which collects no answer.
    pub fn answer_key(&self) -> Option<AnswerKey> {
        use SurveyStep::*;
        match self {
            ChoosingAction => None,
            AskSamo1 => Some(AnswerKey::Samo1),
            AskSamo2 => Some(AnswerKey::Samo2),
            AskAct1 => Some(AnswerKey::Act1),
            AskAct2 => Some(AnswerKey::Act2),
            AskMood1 => Some(AnswerKey::Mood1),
            AskMood2 => Some(AnswerKey::Mood2),
            AskOpen1 => Some(AnswerKey::Open1),
            AskOpen2 => Some(AnswerKey::Open2),
        }
    }
}

impl Default for SurveyStep {
    fn default() -> Self {
        Self::ChoosingAction
    }
}

/// Keys the collected answers are stored under.
///
/// The first six are scaled (1-7) answers, two per category; the last two
/// are free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerKey {
    #[serde(rename = "samo_1")]
    Samo1,
    #[serde(rename = "samo_2")]
    Samo2,
    #[serde(rename = "act_1")]
    Act1,
    #[serde(rename = "act_2")]
    Act2,
    #[serde(rename = "mood_1")]
    Mood1,
    #[serde(rename = "mood_2")]
    Mood2,
    #[serde(rename = "open_1")]
    Open1,
    #[serde(rename = "open_2")]
    Open2,
}

impl AnswerKey {
    /// The six scaled answer keys, in question order.
    pub const SCALED: [AnswerKey; 6] = [
        AnswerKey::Samo1,
        AnswerKey::Samo2,
        AnswerKey::Act1,
        AnswerKey::Act2,
        AnswerKey::Mood1,
        AnswerKey::Mood2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Samo1 => "samo_1",
            Self::Samo2 => "samo_2",
            Self::Act1 => "act_1",
            Self::Act2 => "act_2",
            Self::Mood1 => "mood_1",
            Self::Mood2 => "mood_2",
            Self::Open1 => "open_1",
            Self::Open2 => "open_2",
        }
    }

    /// Whether answers under this key must parse as a 1-7 integer.
    pub fn is_scaled(&self) -> bool {
        !matches!(self, Self::Open1 | Self::Open2)
    }
}

impl std::fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-user in-progress conversation state.
///
/// Owned by the caller and passed into every machine operation, so hosts
/// decide where sessions live (the in-process host keeps them in a map;
/// the serde derives allow an external store instead).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// The step currently waiting for input.
    pub step: SurveyStep,
    answers: HashMap<AnswerKey, String>,
}

impl Session {
    /// A fresh session at the main menu with no answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw answer under `key`, replacing any earlier value.
    pub fn record_answer(&mut self, key: AnswerKey, text: impl Into<String>) {
        self.answers.insert(key, text.into());
    }

    /// The raw answer stored under `key`, if any.
    pub fn answer(&self, key: AnswerKey) -> Option<&str> {
        self.answers.get(&key).map(String::as_str)
    }

    /// Number of answers collected so far.
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    /// Discard all answers and return to the main menu.
    pub fn reset(&mut self) {
        self.step = SurveyStep::ChoosingAction;
        self.answers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use SurveyStep::*;
        let transitions = [
            (ChoosingAction, AskSamo1),
            (AskSamo1, AskSamo2),
            (AskSamo2, AskAct1),
            (AskAct1, AskAct2),
            (AskAct2, AskMood1),
            (AskMood1, AskMood2),
            (AskMood2, AskOpen1),
            (AskOpen1, AskOpen2),
        ];
        for (from, to) in transitions {
            assert!(
                from.can_transition_to(to),
                "{from:?} should transition to {to:?}"
            );
        }
    }

    #[test]
    fn invalid_transitions() {
        use SurveyStep::*;
        // Skip steps
        assert!(!ChoosingAction.can_transition_to(AskSamo2));
        assert!(!AskSamo1.can_transition_to(AskAct1));
        assert!(!AskAct2.can_transition_to(AskOpen1));
        // Go backward to a question step
        assert!(!AskAct1.can_transition_to(AskSamo2));
        assert!(!AskOpen2.can_transition_to(AskOpen1));
        // Self-transition on question steps
        assert!(!AskMood1.can_transition_to(AskMood1));
    }

    #[test]
    fn menu_reachable_from_every_step() {
        use SurveyStep::*;
        let all = [
            ChoosingAction,
            AskSamo1,
            AskSamo2,
            AskAct1,
            AskAct2,
            AskMood1,
            AskMood2,
            AskOpen1,
            AskOpen2,
        ];
        for step in all {
            assert!(
                step.can_transition_to(ChoosingAction),
                "{step:?} should fall back to the menu"
            );
        }
    }

    #[test]
    fn next_walks_all_steps() {
        use SurveyStep::*;
        let expected = [
            AskSamo1, AskSamo2, AskAct1, AskAct2, AskMood1, AskMood2, AskOpen1, AskOpen2,
        ];
        let mut current = ChoosingAction;
        for expected_next in expected {
            let next = current.next().unwrap();
            assert_eq!(next, expected_next);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn only_open2_is_terminal() {
        use SurveyStep::*;
        assert!(AskOpen2.is_terminal());
        for step in [
            ChoosingAction,
            AskSamo1,
            AskSamo2,
            AskAct1,
            AskAct2,
            AskMood1,
            AskMood2,
            AskOpen1,
        ] {
            assert!(!step.is_terminal());
        }
    }

    #[test]
    fn answer_keys_match_steps() {
        use SurveyStep::*;
        assert_eq!(ChoosingAction.answer_key(), None);
        assert_eq!(AskSamo1.answer_key(), Some(AnswerKey::Samo1));
        assert_eq!(AskAct2.answer_key(), Some(AnswerKey::Act2));
        assert_eq!(AskMood1.answer_key(), Some(AnswerKey::Mood1));
        assert_eq!(AskOpen2.answer_key(), Some(AnswerKey::Open2));
    }

    #[test]
    fn scaled_keys_exclude_open_answers() {
        for key in AnswerKey::SCALED {
            assert!(key.is_scaled(), "{key} should be scaled");
        }
        assert!(!AnswerKey::Open1.is_scaled());
        assert!(!AnswerKey::Open2.is_scaled());
    }

    #[test]
    fn record_and_reset() {
        let mut session = Session::new();
        assert_eq!(session.step, SurveyStep::ChoosingAction);
        assert_eq!(session.answer_count(), 0);

        session.step = SurveyStep::AskSamo2;
        session.record_answer(AnswerKey::Samo1, "5");
        assert_eq!(session.answer(AnswerKey::Samo1), Some("5"));
        assert_eq!(session.answer_count(), 1);

        session.reset();
        assert_eq!(session.step, SurveyStep::ChoosingAction);
        assert_eq!(session.answer_count(), 0);
        assert_eq!(session.answer(AnswerKey::Samo1), None);
    }

    #[test]
    fn record_answer_replaces_earlier_value() {
        let mut session = Session::new();
        session.record_answer(AnswerKey::Open1, "calm");
        session.record_answer(AnswerKey::Open1, "tired");
        assert_eq!(session.answer(AnswerKey::Open1), Some("tired"));
        assert_eq!(session.answer_count(), 1);
    }

    #[test]
    fn session_serde_roundtrip_keeps_wire_key_names() {
        let mut session = Session::new();
        session.step = SurveyStep::AskAct1;
        session.record_answer(AnswerKey::Samo1, "6");
        session.record_answer(AnswerKey::Samo2, "7");

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"samo_1\""), "json was: {json}");
        assert!(json.contains("\"samo_2\""));

        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.step, SurveyStep::AskAct1);
        assert_eq!(parsed.answer(AnswerKey::Samo1), Some("6"));
        assert_eq!(parsed.answer(AnswerKey::Samo2), Some("7"));
    }
}
