use rand::Rng;

use crate::answer::{self, Cue, Resolution};
use crate::config::QuizConfig;
use crate::fetch::MAX_ATTEMPTS;
use crate::question::{PresentedQuestion, Question};
use crate::summary::SummaryReport;

/// Where the session currently is in its per-question cycle.
///
/// "Setup" is the absence of a session; constructing one via
/// [`Session::start`] is the explicit start action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A fetch is in flight (or about to be re-sent).
    Loading,
    /// A question is on screen.
    Presented,
    /// Retries are exhausted; waiting for a manual retry or a skip.
    Failed,
    /// Terminal. The summary report is available.
    Summarized,
}

/// Side effects the rendering adapter must execute after a state transition.
/// The core never touches the network, timers or audio itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one question request and feed the result back via
    /// [`Session::question_loaded`] or [`Session::fetch_failed`].
    Fetch,
    /// Start a once-per-second countdown of the given length, delivering
    /// [`Session::tick`] calls.
    ArmTimer(u32),
    /// Stop the running countdown, if any.
    CancelTimer,
    /// Play an audio cue.
    Cue(Cue),
}

/// The live quiz state: one value owning everything that changes during play,
/// mutated only through its methods.
///
/// Every mutating method returns the [`Effect`]s the caller must run. Inputs
/// that arrive in the wrong phase (a late fetch completion, a stale timer
/// tick, a click on a settled question) are ignored, which is what makes
/// stray callbacks harmless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    config: QuizConfig,
    phase: Phase,
    current_index: usize,
    score: usize,
    attempts: u32,
    question: Option<PresentedQuestion>,
    failure: Option<String>,
    remaining_seconds: u32,
    feedback: Option<String>,
}

impl Session {
    /// Starts a session: captures the configuration, zeroes the counters and
    /// requests the first question.
    pub fn start(config: QuizConfig) -> (Self, Vec<Effect>) {
        let session = Self {
            config,
            phase: Phase::Loading,
            current_index: 0,
            score: 0,
            attempts: 1,
            question: None,
            failure: None,
            remaining_seconds: 0,
            feedback: None,
        };

        (session, vec![Effect::Fetch])
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn question(&self) -> Option<&PresentedQuestion> {
        self.question.as_ref()
    }

    pub fn failure_message(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// A successful fetch. Shuffles the choices, presents the question and
    /// arms the timer when enabled. Ignored unless a load is pending.
    pub fn question_loaded<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        question: Question,
    ) -> Vec<Effect> {
        if self.phase != Phase::Loading {
            return Vec::new();
        }

        self.question = Some(PresentedQuestion::present(rng, question));
        self.phase = Phase::Presented;
        self.failure = None;
        self.feedback = None;
        self.attempts = 1;

        if self.config.timer_enabled {
            self.remaining_seconds = self.config.time_limit_seconds;
            vec![Effect::ArmTimer(self.config.time_limit_seconds)]
        } else {
            Vec::new()
        }
    }

    /// A failed fetch attempt. Retries immediately while attempts remain;
    /// afterwards the session parks in [`Phase::Failed`] and waits for the
    /// user. Neither the index nor the score moves.
    pub fn fetch_failed(&mut self, message: String) -> Vec<Effect> {
        if self.phase != Phase::Loading {
            return Vec::new();
        }

        if self.attempts < MAX_ATTEMPTS {
            self.attempts += 1;
            return vec![Effect::Fetch];
        }

        self.phase = Phase::Failed;
        self.failure = Some(message);
        Vec::new()
    }

    /// Manual retry after a terminal fetch failure, restarting the bounded
    /// attempt cycle for the same question slot.
    pub fn retry(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Failed {
            return Vec::new();
        }

        self.phase = Phase::Loading;
        self.failure = None;
        self.attempts = 1;
        vec![Effect::Fetch]
    }

    /// The user picked a choice. Delegates to the answer evaluator, applies
    /// the score delta and, in arcade mode, may end the run on the spot.
    pub fn choose(&mut self, index: usize) -> Vec<Effect> {
        if self.phase != Phase::Presented {
            return Vec::new();
        }

        let Some(question) = self.question.as_mut() else {
            return Vec::new();
        };
        if question.resolved || !question.choices.get(index).is_some_and(|c| c.is_active()) {
            return Vec::new();
        }

        let resolution = answer::resolve(self.config.mode, question, Some(index));
        self.apply(resolution)
    }

    /// One whole-second countdown tick. At zero the question resolves as
    /// "no answer". Ticks outside an unresolved presented question are stale
    /// and ignored.
    pub fn tick(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Presented || !self.config.timer_enabled {
            return Vec::new();
        }

        let Some(question) = self.question.as_mut() else {
            return Vec::new();
        };
        if question.resolved || self.remaining_seconds == 0 {
            return Vec::new();
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds > 0 {
            return Vec::new();
        }

        let resolution = answer::resolve(self.config.mode, question, None);
        self.apply(resolution)
    }

    /// Advances past a settled (or terminally failed) question, moving to the
    /// next load or to the summary once the target count is reached.
    pub fn advance(&mut self) -> Vec<Effect> {
        let settled = match self.phase {
            Phase::Presented => self.question.as_ref().is_some_and(|q| q.resolved),
            Phase::Failed => true,
            _ => false,
        };
        if !settled {
            return Vec::new();
        }

        self.current_index += 1;
        self.question = None;
        self.failure = None;
        self.feedback = None;

        if self.current_index >= self.config.total_questions {
            self.phase = Phase::Summarized;
            return Vec::new();
        }

        self.phase = Phase::Loading;
        self.attempts = 1;
        vec![Effect::Fetch]
    }

    fn apply(&mut self, resolution: Resolution) -> Vec<Effect> {
        let mut effects = Vec::new();

        // Any resolution event silences the countdown, even a learn-mode
        // guess that leaves the question open.
        if self.config.timer_enabled {
            effects.push(Effect::CancelTimer);
        }

        if self.config.mode.scores() {
            self.score += resolution.score_delta;
        }
        self.feedback = resolution.feedback;

        if let Some(cue) = resolution.cue {
            effects.push(Effect::Cue(cue));
        }

        if resolution.ends_run {
            self.phase = Phase::Summarized;
        }

        effects
    }

    /// Whether the current question has settled and the next/finish action
    /// is available.
    pub fn can_advance(&self) -> bool {
        match self.phase {
            Phase::Presented => self.question.as_ref().is_some_and(|q| q.resolved),
            Phase::Failed => true,
            _ => false,
        }
    }

    /// True when advancing would end the session (the "Finish" label).
    pub fn is_final_question(&self) -> bool {
        !self.config.is_unbounded() && self.current_index + 1 >= self.config.total_questions
    }

    /// Progress through the session as a whole percentage, or `None` for
    /// unbounded (arcade) play where it has no meaning.
    pub fn progress_percent(&self) -> Option<u32> {
        if self.config.is_unbounded() {
            return None;
        }

        let position = (self.current_index + 1).min(self.config.total_questions);
        Some(round_percent(position, self.config.total_questions))
    }

    /// "Question 3 of 10", or just the position when unbounded.
    pub fn counter_text(&self) -> String {
        if self.config.is_unbounded() {
            format!("Question {}", self.current_index + 1)
        } else {
            format!(
                "Question {} of {}",
                self.current_index + 1,
                self.config.total_questions
            )
        }
    }

    /// Score line for the modes that display one during play.
    pub fn score_text(&self) -> Option<String> {
        match self.config.mode {
            crate::config::Mode::Standard => Some(format!("Score: {} pts", self.score)),
            crate::config::Mode::Arcade => Some(format!("Streak: {}", self.score)),
            _ => None,
        }
    }

    /// Remaining-time line while an unresolved timed question is on screen.
    pub fn remaining_time_text(&self) -> Option<String> {
        if !self.config.timer_enabled || self.phase != Phase::Presented {
            return None;
        }
        if self.question.as_ref().is_some_and(|q| q.resolved) {
            return None;
        }

        Some(format!("Time left: {}s", self.remaining_seconds))
    }

    /// The terminal report. Pure: available only once summarized, and
    /// repeated calls yield the same value.
    pub fn summary(&self) -> Option<SummaryReport> {
        if self.phase != Phase::Summarized {
            return None;
        }

        Some(SummaryReport::for_session(
            self.config.mode,
            self.score,
            self.config.total_questions,
        ))
    }
}

pub(crate) fn round_percent(part: usize, whole: usize) -> u32 {
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
