use crate::question::Question;

/// Canned general-knowledge questions for offline play: the native CLI demo
/// and integration tests run the session machine against this deck instead
/// of the question service.
pub fn demo_questions() -> Vec<Question> {
    let raw: [(&str, &str, [&str; 4]); 6] = [
        (
            "Which planet is known as the Red Planet?",
            "Mars",
            ["Mars", "Venus", "Jupiter", "Mercury"],
        ),
        (
            "What is the chemical symbol for gold?",
            "Au",
            ["Au", "Ag", "Gd", "Go"],
        ),
        (
            "Who painted the Mona Lisa?",
            "Leonardo da Vinci",
            [
                "Leonardo da Vinci",
                "Michelangelo",
                "Raphael",
                "Caravaggio",
            ],
        ),
        (
            "In which year did the Berlin Wall fall?",
            "1989",
            ["1989", "1991", "1987", "1993"],
        ),
        (
            "What is the largest ocean on Earth?",
            "Pacific Ocean",
            [
                "Pacific Ocean",
                "Atlantic Ocean",
                "Indian Ocean",
                "Arctic Ocean",
            ],
        ),
        (
            "Which language has the most native speakers?",
            "Mandarin Chinese",
            ["Mandarin Chinese", "English", "Spanish", "Hindi"],
        ),
    ];

    raw.into_iter()
        .map(|(prompt, correct, choices)| Question {
            prompt: prompt.to_string(),
            correct_answer: correct.to_string(),
            choices: choices.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_demo_question_is_valid() {
        for question in demo_questions() {
            assert!(!question.prompt.is_empty());
            assert!(
                question.choices.contains(&question.correct_answer),
                "correct answer must be a choice in {:?}",
                question.prompt
            );
            assert_eq!(question.choices.len(), 4);
        }
    }
}
