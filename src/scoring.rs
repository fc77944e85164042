//! Scoring of a completed survey: scaled-answer validation, per-category
//! averages, and the interpretation/recommendation report.

use crate::error::ScoreError;
use crate::survey::{AnswerKey, Session};

/// The three category averages of one completed test.
///
/// Each is the mean of two 1-7 integers, so every reachable value is a
/// multiple of 0.5 within `[1.0, 7.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScores {
    pub wellbeing: f64,
    pub activity: f64,
    pub mood: f64,
}

impl CategoryScores {
    /// Mean of the three category averages.
    pub fn overall(&self) -> f64 {
        (self.wellbeing + self.activity + self.mood) / 3.0
    }
}

/// A validated, scored test ready for persistence and reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub scores: CategoryScores,
    pub open_1: String,
    pub open_2: String,
}

/// Validate the six scaled answers and compute the category averages.
///
/// Two passes: every answer must parse as an integer before any range
/// check runs, so a non-numeric answer is always reported ahead of an
/// out-of-range one. Surrounding whitespace is tolerated; the stored
/// answers themselves are left untouched. A missing scaled answer counts
/// as a parse failure.
pub fn evaluate(session: &Session) -> Result<TestResult, ScoreError> {
    let mut values = [0i64; 6];
    for (slot, key) in values.iter_mut().zip(AnswerKey::SCALED) {
        let raw = session.answer(key).unwrap_or("");
        *slot = raw.trim().parse().map_err(|_| ScoreError::NotANumber {
            key,
            value: raw.to_string(),
        })?;
    }
    for (value, key) in values.into_iter().zip(AnswerKey::SCALED) {
        if !(1..=7).contains(&value) {
            return Err(ScoreError::OutOfRange { key, value });
        }
    }

    let avg = |a: i64, b: i64| (a + b) as f64 / 2.0;
    Ok(TestResult {
        scores: CategoryScores {
            wellbeing: avg(values[0], values[1]),
            activity: avg(values[2], values[3]),
            mood: avg(values[4], values[5]),
        },
        open_1: session.answer(AnswerKey::Open1).unwrap_or("").to_string(),
        open_2: session.answer(AnswerKey::Open2).unwrap_or("").to_string(),
    })
}

/// Interpretation band for a category score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Average,
    Low,
}

impl ScoreBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent level!",
            Self::Average => "Average, room for improvement.",
            Self::Low => "Low, pay attention to rest and health.",
        }
    }
}

/// Classify a score. Thresholds are shared with `recommendation`; the
/// unrounded value is classified, display rounding happens in `report`.
pub fn interpret(score: f64) -> ScoreBand {
    if score >= 5.0 {
        ScoreBand::Excellent
    } else if score >= 3.0 {
        ScoreBand::Average
    } else {
        ScoreBand::Low
    }
}

/// One recommendation string for the overall average.
pub fn recommendation(overall: f64) -> &'static str {
    match interpret(overall) {
        ScoreBand::Excellent => "Your overall state is good. Keep it up!",
        ScoreBand::Average => {
            "Not bad, but there is room to improve. Pay attention to rest and your daily routine."
        }
        ScoreBand::Low => {
            "There are warning signs. Review your sleep and nutrition, and try to reduce stress."
        }
    }
}

fn category_line(name: &str, score: f64) -> String {
    format!("{name}: {score:.1} - {}", interpret(score).label())
}

/// The user-facing result text: one line per category, a blank line, then
/// the overall recommendation.
pub fn report(scores: &CategoryScores) -> String {
    format!(
        "{}\n{}\n{}\n\nOverall recommendation: {}",
        category_line("Wellbeing", scores.wellbeing),
        category_line("Activity", scores.activity),
        category_line("Mood", scores.mood),
        recommendation(scores.overall())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(scaled: [&str; 6], open: [&str; 2]) -> Session {
        let mut session = Session::new();
        for (key, value) in AnswerKey::SCALED.into_iter().zip(scaled) {
            session.record_answer(key, value);
        }
        session.record_answer(AnswerKey::Open1, open[0]);
        session.record_answer(AnswerKey::Open2, open[1]);
        session
    }

    #[test]
    fn averages_are_arithmetic_means() {
        let session = session_with(["6", "6", "4", "4", "2", "2"], ["calm", "work"]);
        let result = evaluate(&session).unwrap();
        assert_eq!(result.scores.wellbeing, 6.0);
        assert_eq!(result.scores.activity, 4.0);
        assert_eq!(result.scores.mood, 2.0);
        assert_eq!(result.scores.overall(), 4.0);
        assert_eq!(result.open_1, "calm");
        assert_eq!(result.open_2, "work");
    }

    #[test]
    fn half_point_averages_survive() {
        let session = session_with(["6", "7", "1", "2", "3", "4"], ["a", "b"]);
        let result = evaluate(&session).unwrap();
        assert_eq!(result.scores.wellbeing, 6.5);
        assert_eq!(result.scores.activity, 1.5);
        assert_eq!(result.scores.mood, 3.5);
    }

    #[test]
    fn every_valid_grid_point_is_in_range() {
        for a in 1..=7 {
            for b in 1..=7 {
                let a_str = a.to_string();
                let b_str = b.to_string();
                let session = session_with(
                    [&a_str, &b_str, &a_str, &b_str, &a_str, &b_str],
                    ["x", "y"],
                );
                let result = evaluate(&session).unwrap();
                let expected = (a + b) as f64 / 2.0;
                assert_eq!(result.scores.wellbeing, expected);
                assert!((1.0..=7.0).contains(&result.scores.wellbeing));
            }
        }
    }

    #[test]
    fn whitespace_around_numbers_is_accepted() {
        let session = session_with([" 5 ", "5", "\t4", "4 ", "3", " 3"], ["a", "b"]);
        let result = evaluate(&session).unwrap();
        assert_eq!(result.scores.wellbeing, 5.0);
    }

    #[test]
    fn non_numeric_answer_fails_parse() {
        let session = session_with(["6", "six", "4", "4", "2", "2"], ["a", "b"]);
        let err = evaluate(&session).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::NotANumber {
                key: AnswerKey::Samo2,
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_answer_fails_range_check() {
        let session = session_with(["6", "6", "8", "4", "2", "2"], ["a", "b"]);
        let err = evaluate(&session).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::OutOfRange {
                key: AnswerKey::Act1,
                value: 8,
            }
        ));

        let session = session_with(["6", "6", "4", "4", "0", "2"], ["a", "b"]);
        assert!(matches!(
            evaluate(&session).unwrap_err(),
            ScoreError::OutOfRange {
                key: AnswerKey::Mood1,
                value: 0,
            }
        ));
    }

    #[test]
    fn parse_failures_win_over_range_failures() {
        // Out-of-range value comes earlier in key order; the parse pass
        // still runs to completion first.
        let session = session_with(["99", "6", "4", "4", "2", "oops"], ["a", "b"]);
        let err = evaluate(&session).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::NotANumber {
                key: AnswerKey::Mood2,
                ..
            }
        ));
    }

    #[test]
    fn missing_scaled_answer_counts_as_parse_failure() {
        let mut session = Session::new();
        session.record_answer(AnswerKey::Samo1, "5");
        let err = evaluate(&session).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::NotANumber {
                key: AnswerKey::Samo2,
                ..
            }
        ));
    }

    #[test]
    fn missing_open_answers_become_empty_strings() {
        let mut session = Session::new();
        for key in AnswerKey::SCALED {
            session.record_answer(key, "4");
        }
        let result = evaluate(&session).unwrap();
        assert_eq!(result.open_1, "");
        assert_eq!(result.open_2, "");
    }

    #[test]
    fn interpret_thresholds() {
        assert_eq!(interpret(5.0), ScoreBand::Excellent);
        assert_eq!(interpret(7.0), ScoreBand::Excellent);
        assert_eq!(interpret(4.9), ScoreBand::Average);
        assert_eq!(interpret(3.0), ScoreBand::Average);
        assert_eq!(interpret(2.9), ScoreBand::Low);
        assert_eq!(interpret(1.0), ScoreBand::Low);
    }

    #[test]
    fn recommendation_thresholds_mirror_interpret() {
        assert_eq!(recommendation(5.0), recommendation(6.5));
        assert!(recommendation(5.0).contains("Keep it up"));
        assert!(recommendation(3.0).contains("room to improve"));
        assert!(recommendation(2.99).contains("warning signs"));
    }

    #[test]
    fn report_layout() {
        let scores = CategoryScores {
            wellbeing: 6.0,
            activity: 4.0,
            mood: 2.0,
        };
        let text = report(&scores);
        assert_eq!(
            text,
            "Wellbeing: 6.0 - Excellent level!\n\
             Activity: 4.0 - Average, room for improvement.\n\
             Mood: 2.0 - Low, pay attention to rest and health.\n\
             \n\
             Overall recommendation: Not bad, but there is room to improve. \
             Pay attention to rest and your daily routine."
        );
    }

    #[test]
    fn report_rounds_to_one_decimal() {
        let scores = CategoryScores {
            wellbeing: 5.5,
            activity: 3.5,
            mood: 6.5,
        };
        let text = report(&scores);
        assert!(text.contains("Wellbeing: 5.5"));
        assert!(text.contains("Activity: 3.5"));
        assert!(text.contains("Mood: 6.5"));
    }
}
