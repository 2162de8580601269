#[cfg(target_arch = "wasm32")]
fn main() {
    openquiz::ui::mount();
}

/// Terminal demo of the quiz core: the same session machine the browser UI
/// drives, fed from the canned deck instead of the question service.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use openquiz::{Effect, Filters, Mode, Phase, QuizConfig, Session, demo_questions};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::{self, BufRead, Write};

    fn pump(
        session: &mut Session,
        rng: &mut StdRng,
        deck: &mut impl Iterator<Item = openquiz::Question>,
        effects: Vec<Effect>,
    ) {
        for effect in effects {
            if let Effect::Fetch = effect {
                let next = match deck.next() {
                    Some(question) => session.question_loaded(rng, question),
                    None => session.fetch_failed("demo deck exhausted".to_string()),
                };
                pump(session, rng, deck, next);
            }
            // Timer and audio effects have no terminal equivalent.
        }
    }

    let questions = demo_questions();
    let config = QuizConfig::new(Mode::Standard, Filters::default(), questions.len(), false, 15);
    let total = config.total_questions;

    let mut rng = StdRng::from_entropy();
    let mut deck = questions.into_iter();
    let (mut session, effects) = Session::start(config);
    pump(&mut session, &mut rng, &mut deck, effects);

    println!("openquiz demo — {total} questions, standard mode\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while session.phase() != Phase::Summarized {
        if session.phase() == Phase::Failed {
            println!(
                "{}",
                session.failure_message().unwrap_or("question unavailable")
            );
            break;
        }

        let Some(question) = session.question() else {
            break;
        };

        println!("{}", session.counter_text());
        println!("{}", question.prompt);
        for (index, choice) in question.choices.iter().enumerate() {
            println!("  {}) {}", index + 1, choice.text);
        }

        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let Some(Ok(line)) = lines.next() else {
            println!();
            return;
        };

        let Some(pick) = line
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=question.choices.len()).contains(n))
        else {
            println!("Enter a number between 1 and {}.\n", question.choices.len());
            continue;
        };

        let effects = session.choose(pick - 1);
        pump(&mut session, &mut rng, &mut deck, effects);

        if let Some(feedback) = session.feedback() {
            println!("{feedback}\n");
        }

        if session.can_advance() {
            let effects = session.advance();
            pump(&mut session, &mut rng, &mut deck, effects);
        }
    }

    if let Some(report) = session.summary() {
        println!("{}", report.headline());
        if let Some(line) = report.percent_line() {
            println!("{line}");
        }
        if let Some(comment) = report.comment() {
            println!("{comment}");
        }
    }
}
