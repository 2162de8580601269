#![cfg(target_arch = "wasm32")]

use crate::{
    Choice, ChoiceState, Cue, Effect, Filters, Mode, Phase, QuizConfig, Session, SummaryReport,
    question_count_from, question_from_payload, quiz_url, time_limit_from,
};
use gloo_net::http::Request;
use leptos::leptos_dom::helpers::{IntervalHandle, set_interval_with_handle};
use leptos::*;
use rand::SeedableRng;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

const QUIZ_ENDPOINT: &str = "http://127.0.0.1:8000/quiz";
const THEME_KEY: &str = "darkMode";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scene {
    Setup,
    Quiz,
    Summary,
}

/// The handles the effect executor needs. Copy so that free functions and
/// spawned futures can capture it without lifetime ceremony.
#[derive(Clone, Copy)]
struct QuizHandles {
    session: RwSignal<Option<Session>>,
    timer: StoredValue<Option<IntervalHandle>>,
}

/// Routes a session mutation through the signal and executes the effects it
/// returns. Events arriving after the session was discarded are dropped.
fn apply(handles: QuizHandles, step: impl FnOnce(&mut Session) -> Vec<Effect>) {
    let effects = handles
        .session
        .try_update(|slot| slot.as_mut().map(step).unwrap_or_default())
        .unwrap_or_default();

    run_effects(handles, effects);
}

fn run_effects(handles: QuizHandles, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Fetch => start_fetch(handles),
            Effect::ArmTimer(_seconds) => arm_timer(handles),
            Effect::CancelTimer => cancel_timer(handles),
            Effect::Cue(cue) => play_cue(cue),
        }
    }
}

async fn fetch_question(filters: &Filters) -> Result<crate::Question, String> {
    let url = quiz_url(QUIZ_ENDPOINT, filters).map_err(|error| error.to_string())?;

    let payload = Request::get(&url)
        .send()
        .await
        .map_err(|error| error.to_string())?
        .json::<crate::QuestionPayload>()
        .await
        .map_err(|error| error.to_string())?;

    question_from_payload(payload).map_err(|error| error.to_string())
}

fn start_fetch(handles: QuizHandles) {
    let filters = handles
        .session
        .with_untracked(|slot| slot.as_ref().map(|session| session.config().filters.clone()));
    let Some(filters) = filters else {
        return;
    };

    spawn_local(async move {
        match fetch_question(&filters).await {
            Ok(question) => apply(handles, move |session| {
                let mut rng = rand::rngs::StdRng::from_entropy();
                session.question_loaded(&mut rng, question)
            }),
            Err(message) => apply(handles, move |session| session.fetch_failed(message)),
        }
    });
}

fn arm_timer(handles: QuizHandles) {
    cancel_timer(handles);

    let result = set_interval_with_handle(
        move || apply(handles, |session| session.tick()),
        Duration::from_secs(1),
    );

    if let Ok(handle) = result {
        handles.timer.set_value(Some(handle));
    }
}

fn cancel_timer(handles: QuizHandles) {
    if let Some(handle) = handles.timer.get_value() {
        handle.clear();
    }
    handles.timer.set_value(None);
}

fn play_cue(cue: Cue) {
    let src = match cue {
        Cue::Correct => "assets/correct.mp3",
        Cue::Incorrect => "assets/wrong.mp3",
    };

    if let Ok(audio) = HtmlAudioElement::new_with_src(src) {
        let _ = audio.play();
    }
}

fn set_body_theme(theme: &str) {
    if let Some(document) = leptos::window().document() {
        if let Some(body) = document.body() {
            let _ = body.set_attribute("data-theme", theme);
        }
    }
}

fn stored_dark_mode() -> bool {
    leptos::window()
        .local_storage()
        .ok()
        .flatten()
        .and_then(|storage| storage.get_item(THEME_KEY).ok().flatten())
        .map(|value| value == "true")
        .unwrap_or(false)
}

fn store_dark_mode(enabled: bool) {
    if let Ok(Some(storage)) = leptos::window().local_storage() {
        let _ = storage.set_item(THEME_KEY, if enabled { "true" } else { "false" });
    }
}

fn choice_class(choice: &Choice) -> &'static str {
    match choice.state {
        ChoiceState::Neutral => "answer-btn",
        ChoiceState::Correct => "answer-btn correct",
        ChoiceState::Incorrect => "answer-btn incorrect",
        ChoiceState::Disabled => "answer-btn disabled",
    }
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Standard => "Standard",
        Mode::Test => "Test",
        Mode::Learn => "Learn",
        Mode::Arcade => "Arcade",
    }
}

#[component]
fn ModeSwitch(mode: ReadSignal<Mode>, set_mode: WriteSignal<Mode>) -> impl IntoView {
    let options = [Mode::Standard, Mode::Test, Mode::Learn, Mode::Arcade];

    view! {
        <div class="mode-switch">
            {options
                .into_iter()
                .map(|option| {
                    view! {
                        <button
                            type="button"
                            class=move || {
                                if mode.get() == option {
                                    "mode-btn active".to_string()
                                } else {
                                    "mode-btn".to_string()
                                }
                            }
                            on:click=move |_| set_mode.set(option)
                        >
                            {mode_label(option)}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn SummaryCard(report: SummaryReport, on_restart: Callback<()>) -> impl IntoView {
    view! {
        <section class="panel summary-box">
            <div class="panel-title">"Quiz complete"</div>
            <p class="result-text">{report.headline()}</p>
            {report
                .percent_line()
                .map(|line| view! { <p class="percent-text">{line}</p> })}
            {report
                .comment()
                .map(|comment| view! { <p class="comment-text">{comment}</p> })}
            <button class="btn btn-primary" type="button" on:click=move |_| on_restart.call(())>
                "Play again"
            </button>
        </section>
    }
}

#[component]
fn QuestionCard(
    session: Session,
    on_choose: Callback<usize>,
    on_advance: Callback<()>,
    on_retry: Callback<()>,
    on_back: Callback<()>,
) -> impl IntoView {
    let next_label = if session.is_final_question() {
        "Finish"
    } else {
        "Next Question"
    };
    let can_advance = session.can_advance();
    let failed = session.phase() == Phase::Failed;

    let prompt_view = match session.phase() {
        Phase::Loading => view! { <p class="prompt-text">"Loading question..."</p> }.into_view(),
        Phase::Failed => {
            let message = session
                .failure_message()
                .map(|message| format!("Failed to load question: {message}"))
                .unwrap_or_else(|| "Failed to load question.".to_string());
            view! { <p class="error-body">{message}</p> }.into_view()
        }
        _ => {
            let prompt = session
                .question()
                .map(|question| question.prompt.clone())
                .unwrap_or_default();
            view! { <p class="prompt-text">{prompt}</p> }.into_view()
        }
    };

    let choices_view = session.question().map(|question| {
        let resolved = question.resolved;

        view! {
            <div class="answers-grid">
                {question
                    .choices
                    .iter()
                    .enumerate()
                    .map(|(index, choice)| {
                        let inert = resolved || !choice.is_active();
                        let text = choice.text.clone();
                        let class = choice_class(choice);
                        let on_choose = on_choose.clone();

                        view! {
                            <button
                                class=class
                                type="button"
                                disabled=inert
                                on:click=move |_| on_choose.call(index)
                            >
                                {text}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        }
    });

    let progress_style = session
        .progress_percent()
        .map(|percent| format!("width: {percent}%;"))
        .unwrap_or_else(|| "width: 0%;".to_string());
    let counter = session.counter_text();
    let score_line = session.score_text();
    let time_line = session.remaining_time_text();
    let feedback = session.feedback().map(str::to_string);

    view! {
        <section class="panel quiz-container">
            <div class="quiz-header">
                <span class="question-counter">{counter}</span>
                {score_line.map(|line| view! { <span class="score-counter">{line}</span> })}
            </div>

            <div class="progress-bar">
                <div class="progress-bar-inner" style=progress_style></div>
            </div>

            {prompt_view}
            {choices_view}

            <div class="quiz-footer">
                {time_line.map(|line| view! { <span class="timer-text">{line}</span> })}
                {feedback.map(|line| view! { <span class="feedback-text">{line}</span> })}
            </div>

            <div class="controls-row">
                <Show when=move || failed>
                    <button class="btn" type="button" on:click=move |_| on_retry.call(())>
                        "Retry"
                    </button>
                </Show>
                <button
                    class="btn btn-primary"
                    type="button"
                    disabled=!can_advance
                    on:click=move |_| on_advance.call(())
                >
                    {next_label}
                </button>
                <button class="btn" type="button" on:click=move |_| on_back.call(())>
                    "Back"
                </button>
            </div>
        </section>
    }
}

#[component]
fn App() -> impl IntoView {
    let initial_theme = if stored_dark_mode() { "dark" } else { "light" };
    let (theme, set_theme) = create_signal(String::from(initial_theme));

    let (mode, set_mode) = create_signal(Mode::Standard);
    let (category, set_category) = create_signal(String::new());
    let (difficulty, set_difficulty) = create_signal(String::new());
    let (count_input, set_count_input) = create_signal(String::from("10"));
    let (time_input, set_time_input) = create_signal(String::from("15"));
    let (timer_enabled, set_timer_enabled) = create_signal(false);

    let session = create_rw_signal::<Option<Session>>(None);
    let timer = store_value::<Option<IntervalHandle>>(None);
    let handles = QuizHandles { session, timer };

    create_effect(move |_| set_body_theme(&theme.get()));

    let toggle_theme = move |_| {
        let next = if theme.get() == "dark" { "light" } else { "dark" };
        store_dark_mode(next == "dark");
        set_theme.set(String::from(next));
    };

    let start_quiz = move |_| {
        let config = QuizConfig::new(
            mode.get(),
            Filters::from_inputs(&category.get(), &difficulty.get()),
            question_count_from(&count_input.get()),
            timer_enabled.get(),
            time_limit_from(&time_input.get()),
        );

        let (started, effects) = Session::start(config);
        session.set(Some(started));
        run_effects(handles, effects);
    };

    let leave_quiz = Callback::new(move |_| {
        cancel_timer(handles);
        session.set(None);
    });

    let on_choose = Callback::new(move |index: usize| {
        apply(handles, move |session| session.choose(index));
    });
    let on_advance = Callback::new(move |_| apply(handles, |session| session.advance()));
    let on_retry = Callback::new(move |_| apply(handles, |session| session.retry()));

    let scene = move || match session.get() {
        None => Scene::Setup,
        Some(active) if active.phase() == Phase::Summarized => Scene::Summary,
        Some(_) => Scene::Quiz,
    };

    view! {
        <div class="app">
            <header class="app-header">
                <div class="app-title">"Open Trivia Quiz"</div>
                <button class="pill" type="button" on:click=toggle_theme>
                    {move || {
                        if theme.get() == "dark" { "Light Mode" } else { "Dark Mode" }
                    }}
                </button>
            </header>

            <Show when=move || scene() == Scene::Setup>
                <section class="panel setup">
                    <div class="panel-title">"Quiz settings"</div>

                    <label class="field-label">"Category"</label>
                    <select
                        on:change=move |ev| set_category.set(event_target_value(&ev))
                        prop:value=move || category.get()
                    >
                        <option value="">"Any category"</option>
                        <option value="9">"General Knowledge"</option>
                        <option value="17">"Science & Nature"</option>
                        <option value="21">"Sports"</option>
                        <option value="22">"Geography"</option>
                        <option value="23">"History"</option>
                    </select>

                    <label class="field-label">"Difficulty"</label>
                    <select
                        on:change=move |ev| set_difficulty.set(event_target_value(&ev))
                        prop:value=move || difficulty.get()
                    >
                        <option value="">"Any difficulty"</option>
                        <option value="easy">"Easy"</option>
                        <option value="medium">"Medium"</option>
                        <option value="hard">"Hard"</option>
                    </select>

                    <label class="field-label">"Play mode"</label>
                    <ModeSwitch mode=mode set_mode=set_mode />

                    <Show when=move || mode.get() != Mode::Arcade>
                        <label class="field-label">"Number of questions"</label>
                        <input
                            type="number"
                            min="1"
                            prop:value=move || count_input.get()
                            on:input=move |ev| set_count_input.set(event_target_value(&ev))
                        />
                    </Show>

                    <label class="field-label checkbox-row">
                        <input
                            type="checkbox"
                            prop:checked=move || timer_enabled.get()
                            on:change=move |ev| set_timer_enabled.set(event_target_checked(&ev))
                        />
                        "Enable per-question timer"
                    </label>

                    <Show when=move || timer_enabled.get()>
                        <label class="field-label">"Time limit (seconds)"</label>
                        <input
                            type="number"
                            min="5"
                            prop:value=move || time_input.get()
                            on:input=move |ev| set_time_input.set(event_target_value(&ev))
                        />
                    </Show>

                    <button class="btn btn-primary" type="button" on:click=start_quiz>
                        "Start Quiz"
                    </button>
                </section>
            </Show>

            <Show when=move || scene() == Scene::Quiz>
                {move || {
                    session
                        .get()
                        .map(|active| {
                            view! {
                                <QuestionCard
                                    session=active
                                    on_choose=on_choose
                                    on_advance=on_advance
                                    on_retry=on_retry
                                    on_back=leave_quiz
                                />
                            }
                        })
                }}
            </Show>

            <Show when=move || scene() == Scene::Summary>
                {move || {
                    session
                        .get()
                        .and_then(|active| active.summary())
                        .map(|report| {
                            view! { <SummaryCard report=report on_restart=leave_quiz /> }
                        })
                }}
            </Show>
        </div>
    }
}

#[wasm_bindgen]
pub fn mount() {
    console_error_panic_hook::set_once();
    mount_to_body(|| view! { <App /> });
}
