use crate::config::Mode;
use crate::session::round_percent;

/// Terminal report for a finished session. Built once from final session
/// state; rendering it has no further effect on anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryReport {
    /// Standard and test modes: score, percentage and a banded comment.
    Scored {
        score: usize,
        total: usize,
        percent: u32,
        comment: &'static str,
    },
    /// Learn mode has no meaningful score; just a completion notice.
    LearnComplete,
    /// Arcade: the streak length at the moment the run ended.
    Streak { length: usize },
}

impl SummaryReport {
    pub fn for_session(mode: Mode, score: usize, total: usize) -> Self {
        match mode {
            Mode::Learn => Self::LearnComplete,
            Mode::Arcade => Self::Streak { length: score },
            Mode::Standard | Mode::Test => {
                let percent = round_percent(score, total);
                Self::Scored {
                    score,
                    total,
                    percent,
                    comment: comment_for(percent),
                }
            }
        }
    }

    /// Headline of the report.
    pub fn headline(&self) -> String {
        match self {
            Self::Scored { score, total, .. } => format!("Your score: {score} / {total}"),
            Self::LearnComplete => "You completed Learn Mode!".to_string(),
            Self::Streak { length } => {
                format!("Streak: {length} correct answers in a row")
            }
        }
    }

    /// Secondary percentage line, absent for learn and arcade reports.
    pub fn percent_line(&self) -> Option<String> {
        match self {
            Self::Scored { percent, .. } => Some(format!("That's {percent}% correct.")),
            _ => None,
        }
    }

    pub fn comment(&self) -> Option<&'static str> {
        match self {
            Self::Scored { comment, .. } => Some(comment),
            _ => None,
        }
    }
}

/// The encouragement band for a final percentage.
pub fn comment_for(percent: u32) -> &'static str {
    if percent <= 30 {
        "You need more practice!"
    } else if percent <= 60 {
        "Not bad, but you can do better!"
    } else if percent <= 90 {
        "Great result!"
    } else {
        "You're a master!"
    }
}
