use rand::Rng;
use rand::seq::SliceRandom;

/// One validated trivia question, alive for a single question cycle.
///
/// All text is already HTML-entity decoded; `correct_answer` is guaranteed to
/// be a member of `choices` (enforced by [`crate::fetch::question_from_payload`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub correct_answer: String,
    pub choices: Vec<String>,
}

/// Visual classification of one answer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceState {
    /// Still selectable.
    Neutral,
    /// Revealed as the correct answer.
    Correct,
    /// A wrong pick, highlighted red and inert.
    Incorrect,
    /// Inert without highlight.
    Disabled,
}

/// One rendered answer option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub text: String,
    pub state: ChoiceState,
}

impl Choice {
    pub fn is_active(&self) -> bool {
        self.state == ChoiceState::Neutral
    }
}

/// A question as shown on screen: shuffled choices plus their visual states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedQuestion {
    pub prompt: String,
    pub choices: Vec<Choice>,
    pub correct_index: usize,
    /// Set once correctness has been determined; unlocks advancement.
    pub resolved: bool,
}

impl PresentedQuestion {
    /// Lays out a question for display, shuffling the choices into a uniform
    /// random permutation independent of the order the service returned.
    pub fn present<R: Rng + ?Sized>(rng: &mut R, question: Question) -> Self {
        let Question {
            prompt,
            correct_answer,
            mut choices,
        } = question;

        choices.shuffle(rng);

        let correct_index = choices
            .iter()
            .position(|choice| *choice == correct_answer)
            .expect("correct answer must be present after shuffle");

        Self {
            prompt,
            choices: choices
                .into_iter()
                .map(|text| Choice {
                    text,
                    state: ChoiceState::Neutral,
                })
                .collect(),
            correct_index,
            resolved: false,
        }
    }

    /// Indices of choices that are still selectable.
    pub fn active_indices(&self) -> Vec<usize> {
        self.choices
            .iter()
            .enumerate()
            .filter(|(_, choice)| choice.is_active())
            .map(|(index, _)| index)
            .collect()
    }
}
