pub mod answer;
pub mod config;
pub mod demo;
pub mod entities;
pub mod fetch;
pub mod question;
pub mod session;
pub mod summary;
pub mod ui;

pub use answer::{Cue, Resolution, resolve};
pub use config::{
    Filters, Mode, QuizConfig, UNBOUNDED, question_count_from, time_limit_from,
};
pub use demo::demo_questions;
pub use entities::decode_entities;
pub use fetch::{FetchError, MAX_ATTEMPTS, QuestionPayload, question_from_payload, quiz_url};
pub use question::{Choice, ChoiceState, PresentedQuestion, Question};
pub use session::{Effect, Phase, Session};
pub use summary::{SummaryReport, comment_for};
