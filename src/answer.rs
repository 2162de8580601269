use crate::config::Mode;
use crate::question::{ChoiceState, PresentedQuestion};

/// Named audio cue for the rendering layer. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Correct,
    Incorrect,
}

/// Outcome of resolving one answer (or a timeout) against a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Whether the user's pick was the correct answer. Always false on timeout.
    pub is_correct: bool,
    /// Score increment the session should apply (0 or 1).
    pub score_delta: usize,
    /// Feedback line, if the mode shows one.
    pub feedback: Option<String>,
    /// Audio cue, if the mode plays one.
    pub cue: Option<Cue>,
    /// Whether the question is finished and advancement is unlocked.
    pub question_over: bool,
    /// Arcade only: the miss that ends the run.
    pub ends_run: bool,
}

/// Resolves a user pick (`Some(index)`) or a timer expiry (`None`) against
/// the presented question, mutating the per-choice visual states.
///
/// Callers must pass an index of a still-active choice; resolved questions
/// and inert choices are guarded at the session level.
pub fn resolve(mode: Mode, question: &mut PresentedQuestion, chosen: Option<usize>) -> Resolution {
    match mode {
        Mode::Standard => resolve_revealing(question, chosen, false),
        Mode::Test => resolve_revealing(question, chosen, true),
        Mode::Learn => resolve_learn(question, chosen),
        Mode::Arcade => resolve_arcade(question, chosen),
    }
}

/// Standard and test mode: a single pick settles the question and reveals
/// the correct answer. Test mode keeps the scoring but mutes feedback and
/// sound.
fn resolve_revealing(
    question: &mut PresentedQuestion,
    chosen: Option<usize>,
    silent: bool,
) -> Resolution {
    let is_correct = chosen == Some(question.correct_index);
    reveal_all(question, chosen);
    question.resolved = true;

    let correct_text = question.choices[question.correct_index].text.clone();
    let (feedback, cue) = if silent {
        (None, None)
    } else if is_correct {
        (Some("Correct!".to_string()), Some(Cue::Correct))
    } else if chosen.is_some() {
        (
            Some(format!("Wrong! The correct answer was: {correct_text}")),
            Some(Cue::Incorrect),
        )
    } else {
        // Timeout: reveal without a cue.
        (
            Some(format!("Time's up! The correct answer was: {correct_text}")),
            None,
        )
    };

    Resolution {
        is_correct,
        score_delta: usize::from(is_correct),
        feedback,
        cue,
        question_over: true,
        ends_run: false,
    }
}

/// Learn mode: wrong guesses only disable themselves, and the question stays
/// open until the correct answer is found or a single choice remains. That
/// last choice is auto-revealed without a success cue, since the user never
/// actively picked it.
fn resolve_learn(question: &mut PresentedQuestion, chosen: Option<usize>) -> Resolution {
    let Some(index) = chosen else {
        // Timer expiry takes the same auto-reveal path as exhaustion.
        finish_learn(question);
        return Resolution {
            is_correct: false,
            score_delta: 0,
            feedback: Some("Time's up!".to_string()),
            cue: None,
            question_over: true,
            ends_run: false,
        };
    };

    if index == question.correct_index {
        question.choices[index].state = ChoiceState::Correct;
        disable_remaining(question);
        question.resolved = true;

        return Resolution {
            is_correct: true,
            score_delta: 0,
            feedback: Some("Correct!".to_string()),
            cue: None,
            question_over: true,
            ends_run: false,
        };
    }

    question.choices[index].state = ChoiceState::Incorrect;

    let remaining = question.active_indices();
    if remaining.len() == 1 {
        // Only the correct answer can be left: every wrong pick is inert and
        // the correct one is never picked wrongly.
        finish_learn(question);
        return Resolution {
            is_correct: false,
            score_delta: 0,
            feedback: Some("All options tried!".to_string()),
            cue: Some(Cue::Incorrect),
            question_over: true,
            ends_run: false,
        };
    }

    Resolution {
        is_correct: false,
        score_delta: 0,
        feedback: Some("Try again!".to_string()),
        cue: Some(Cue::Incorrect),
        question_over: false,
        ends_run: false,
    }
}

/// Arcade mode: one wrong pick or timeout ends the run; the score is the
/// streak of consecutive correct answers.
fn resolve_arcade(question: &mut PresentedQuestion, chosen: Option<usize>) -> Resolution {
    let is_correct = chosen == Some(question.correct_index);
    reveal_all(question, chosen);
    question.resolved = true;

    Resolution {
        is_correct,
        score_delta: usize::from(is_correct),
        feedback: is_correct.then(|| "Correct!".to_string()),
        cue: Some(if is_correct { Cue::Correct } else { Cue::Incorrect }),
        question_over: true,
        ends_run: !is_correct,
    }
}

fn reveal_all(question: &mut PresentedQuestion, chosen: Option<usize>) {
    let correct_index = question.correct_index;

    for (index, choice) in question.choices.iter_mut().enumerate() {
        choice.state = if index == correct_index {
            ChoiceState::Correct
        } else if Some(index) == chosen {
            ChoiceState::Incorrect
        } else {
            ChoiceState::Disabled
        };
    }
}

fn disable_remaining(question: &mut PresentedQuestion) {
    for choice in question.choices.iter_mut() {
        if choice.is_active() {
            choice.state = ChoiceState::Disabled;
        }
    }
}

fn finish_learn(question: &mut PresentedQuestion) {
    let correct_index = question.correct_index;

    for (index, choice) in question.choices.iter_mut().enumerate() {
        if index == correct_index {
            choice.state = ChoiceState::Correct;
        } else if choice.is_active() {
            choice.state = ChoiceState::Disabled;
        }
    }

    question.resolved = true;
}
