/// Play mode fixed for the lifetime of one session.
///
/// The modes are mutually exclusive; combinations such as "test and learn at
/// once" are unrepresentable. Whether the countdown timer runs is a separate
/// setting ([`QuizConfig::timer_enabled`]) and may be combined with any mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Scored play with feedback, sounds and a final percentage.
    Standard,
    /// Scored play with feedback, sounds and the score counter hidden.
    Test,
    /// Unscored exploration; wrong guesses stay open until the answer is found.
    Learn,
    /// Unbounded streak play; the first miss ends the run.
    Arcade,
}

impl Mode {
    /// Whether a correct answer increments the session score.
    pub fn scores(self) -> bool {
        matches!(self, Mode::Standard | Mode::Test | Mode::Arcade)
    }

    /// Whether the score counter is shown during play.
    pub fn shows_score(self) -> bool {
        matches!(self, Mode::Standard | Mode::Arcade)
    }
}

/// Optional question-service filters, passed through as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

impl Filters {
    /// Builds filters from raw select values, treating the empty string as "any".
    pub fn from_inputs(category: &str, difficulty: &str) -> Self {
        Self {
            category: (!category.is_empty()).then(|| category.to_string()),
            difficulty: (!difficulty.is_empty()).then(|| difficulty.to_string()),
        }
    }
}

/// Sentinel question count for unbounded (arcade) sessions.
pub const UNBOUNDED: usize = usize::MAX;

pub const DEFAULT_QUESTION_COUNT: usize = 10;
pub const DEFAULT_TIME_LIMIT_SECONDS: u32 = 15;
pub const MIN_TIME_LIMIT_SECONDS: u32 = 5;

/// Session-wide configuration, captured once at start and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub mode: Mode,
    pub filters: Filters,
    pub total_questions: usize,
    pub timer_enabled: bool,
    pub time_limit_seconds: u32,
}

impl QuizConfig {
    /// Builds a sanitized configuration. Out-of-range limits are clamped
    /// rather than rejected; arcade sessions always run unbounded.
    pub fn new(
        mode: Mode,
        filters: Filters,
        total_questions: usize,
        timer_enabled: bool,
        time_limit_seconds: u32,
    ) -> Self {
        let total_questions = match mode {
            Mode::Arcade => UNBOUNDED,
            _ => total_questions.max(1),
        };

        Self {
            mode,
            filters,
            total_questions,
            timer_enabled,
            time_limit_seconds: time_limit_seconds.max(MIN_TIME_LIMIT_SECONDS),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.total_questions == UNBOUNDED
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::new(
            Mode::Standard,
            Filters::default(),
            DEFAULT_QUESTION_COUNT,
            false,
            DEFAULT_TIME_LIMIT_SECONDS,
        )
    }
}

/// Parses the question-count setup field, falling back to the default on
/// non-numeric input and clamping to a floor of one question.
pub fn question_count_from(input: &str) -> usize {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|count| *count >= 1)
        .unwrap_or(DEFAULT_QUESTION_COUNT)
}

/// Parses the time-limit setup field, falling back to the default on
/// non-numeric input and clamping to the five-second floor.
pub fn time_limit_from(input: &str) -> u32 {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|seconds| *seconds > 0)
        .unwrap_or(DEFAULT_TIME_LIMIT_SECONDS)
        .max(MIN_TIME_LIMIT_SECONDS)
}
