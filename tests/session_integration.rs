use openquiz::{
    ChoiceState, Cue, Effect, Filters, Mode, Phase, QuizConfig, Session, SummaryReport,
    demo_questions, question_from_payload,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn config(mode: Mode, total: usize, timer: bool, seconds: u32) -> QuizConfig {
    QuizConfig::new(mode, Filters::default(), total, timer, seconds)
}

/// Feeds one demo question into a loading session.
fn serve_question(session: &mut Session, seed: u64) -> Vec<Effect> {
    let question = demo_questions()
        .into_iter()
        .next()
        .expect("demo deck is non-empty");
    let mut rng = StdRng::seed_from_u64(seed);
    session.question_loaded(&mut rng, question)
}

fn correct_index(session: &Session) -> usize {
    session
        .question()
        .expect("a question should be on screen")
        .correct_index
}

fn wrong_index(session: &Session) -> usize {
    let correct = correct_index(session);
    session
        .question()
        .expect("a question should be on screen")
        .choices
        .iter()
        .enumerate()
        .find(|(index, _)| *index != correct)
        .map(|(index, _)| index)
        .expect("questions have more than one choice")
}

#[test]
fn standard_session_reports_sixty_percent_for_six_of_ten() {
    let (mut session, effects) = Session::start(config(Mode::Standard, 10, false, 15));
    assert_eq!(effects, vec![Effect::Fetch]);

    for round in 0..10 {
        serve_question(&mut session, round);
        let pick = if round < 6 {
            correct_index(&session)
        } else {
            wrong_index(&session)
        };
        session.choose(pick);
        session.advance();
    }

    let report = session.summary().expect("session should be summarized");
    assert_eq!(report.headline(), "Your score: 6 / 10");
    assert_eq!(report.percent_line().as_deref(), Some("That's 60% correct."));
    assert_eq!(report.comment(), Some("Not bad, but you can do better!"));
}

#[test]
fn summary_rendering_is_idempotent() {
    let (mut session, _) = Session::start(config(Mode::Standard, 1, false, 15));
    serve_question(&mut session, 1);
    session.choose(correct_index(&session));
    session.advance();

    let first = session.summary().expect("summarized");
    let second = session.summary().expect("still summarized");
    assert_eq!(first, second);
}

#[test]
fn arcade_run_ends_on_the_first_miss_at_streak_four() {
    let (mut session, _) = Session::start(config(Mode::Arcade, 10, false, 15));

    for round in 0..4 {
        serve_question(&mut session, round);
        session.choose(correct_index(&session));
        assert_eq!(session.advance(), vec![Effect::Fetch]);
    }

    serve_question(&mut session, 40);
    session.choose(wrong_index(&session));

    assert_eq!(session.phase(), Phase::Summarized);
    let report = session.summary().expect("arcade run should be summarized");
    assert_eq!(report, SummaryReport::Streak { length: 4 });
    assert_eq!(report.headline(), "Streak: 4 correct answers in a row");
    assert!(report.percent_line().is_none());
}

#[test]
fn learn_mode_elimination_reveals_the_last_choice() {
    let (mut session, _) = Session::start(config(Mode::Learn, 1, false, 15));
    serve_question(&mut session, 7);

    let correct = correct_index(&session);
    let wrong: Vec<usize> = (0..4).filter(|index| *index != correct).collect();

    // Two wrong guesses: both inert, the other two still active.
    session.choose(wrong[0]);
    session.choose(wrong[1]);
    {
        let question = session.question().expect("question on screen");
        assert_eq!(question.choices[wrong[0]].state, ChoiceState::Incorrect);
        assert_eq!(question.choices[wrong[1]].state, ChoiceState::Incorrect);
        assert_eq!(question.active_indices().len(), 2);
        assert!(!session.can_advance());
    }

    // Third wrong guess exhausts the distractors: the correct choice is
    // auto-revealed without a success cue and advancement unlocks.
    let effects = session.choose(wrong[2]);
    assert!(!effects.contains(&Effect::Cue(Cue::Correct)));

    let question = session.question().expect("question on screen");
    assert_eq!(question.choices[correct].state, ChoiceState::Correct);
    assert!(session.can_advance());
    assert_eq!(session.score(), 0);
}

#[test]
fn learn_session_finishes_with_a_completion_notice() {
    let (mut session, _) = Session::start(config(Mode::Learn, 2, false, 15));

    for round in 0..2 {
        serve_question(&mut session, round);
        session.choose(correct_index(&session));
        session.advance();
    }

    let report = session.summary().expect("summarized");
    assert_eq!(report, SummaryReport::LearnComplete);
    assert_eq!(report.headline(), "You completed Learn Mode!");
}

#[test]
fn three_failed_attempts_surface_a_manual_retry() {
    let (mut session, _) = Session::start(config(Mode::Standard, 10, false, 15));
    let index_before = session.current_index();
    let score_before = session.score();

    assert_eq!(
        session.fetch_failed("connection refused".to_string()),
        vec![Effect::Fetch]
    );
    assert_eq!(
        session.fetch_failed("connection refused".to_string()),
        vec![Effect::Fetch]
    );
    assert!(
        session
            .fetch_failed("connection refused".to_string())
            .is_empty()
    );

    assert_eq!(session.phase(), Phase::Failed);
    assert_eq!(session.failure_message(), Some("connection refused"));
    assert_eq!(session.current_index(), index_before);
    assert_eq!(session.score(), score_before);

    // The manual retry affordance restarts the cycle for the same slot.
    assert_eq!(session.retry(), vec![Effect::Fetch]);
    assert_eq!(session.current_index(), index_before);
}

#[test]
fn timer_expiry_resolves_as_an_uncredited_miss() {
    let (mut session, _) = Session::start(config(Mode::Standard, 2, true, 15));

    let effects = serve_question(&mut session, 3);
    assert_eq!(effects, vec![Effect::ArmTimer(15)]);

    for _ in 0..14 {
        assert!(session.tick().is_empty());
    }
    let effects = session.tick();
    assert!(effects.contains(&Effect::CancelTimer));

    let question = session.question().expect("question on screen");
    assert_eq!(
        question.choices[question.correct_index].state,
        ChoiceState::Correct
    );
    assert_eq!(session.score(), 0);
    assert!(session.can_advance());
}

#[test]
fn disabled_timer_means_no_resolution_without_user_action() {
    let (mut session, _) = Session::start(config(Mode::Standard, 2, false, 15));
    serve_question(&mut session, 5);

    // Even a flood of stray ticks cannot settle the question.
    for _ in 0..100 {
        assert!(session.tick().is_empty());
    }
    assert!(!session.can_advance());
    assert!(
        !session
            .question()
            .expect("question on screen")
            .resolved
    );
}

#[test]
fn shuffled_choices_always_contain_the_correct_answer() {
    for seed in 0..50 {
        let (mut session, _) = Session::start(config(Mode::Standard, 1, false, 15));
        serve_question(&mut session, seed);

        let question = session.question().expect("question on screen");
        assert_eq!(question.choices.len(), 4);
        assert_eq!(
            question.choices[question.correct_index].text,
            "Mars",
            "correct answer must survive the shuffle"
        );
    }
}

#[test]
fn service_payload_flows_end_to_end() {
    let payload = serde_json::from_str(
        r#"{
            "question": "What does &quot;HTTP&quot; stand for?",
            "correct_answer": "HyperText Transfer Protocol",
            "answers": [
                "HyperText Transfer Protocol",
                "HyperText Transit Path",
                "High Throughput Transfer Protocol",
                "Hyperlink Text Type Protocol"
            ]
        }"#,
    )
    .expect("payload should deserialize");

    let question = question_from_payload(payload).expect("payload should validate");
    assert_eq!(question.prompt, "What does \"HTTP\" stand for?");

    let (mut session, _) = Session::start(config(Mode::Standard, 1, false, 15));
    let mut rng = StdRng::seed_from_u64(17);
    session.question_loaded(&mut rng, question);
    session.choose(correct_index(&session));
    session.advance();

    let report = session.summary().expect("summarized");
    assert_eq!(report.headline(), "Your score: 1 / 1");
    assert_eq!(report.comment(), Some("You're a master!"));
}
