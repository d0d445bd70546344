use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::session::SessionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ScoreLabel {
    Excellent,
    Good,
    #[strum(to_string = "Needs Improvement")]
    NeedsImprovement,
}

impl ScoreLabel {
    pub fn for_score(overall: u8) -> Self {
        match overall {
            80..=u8::MAX => Self::Excellent,
            60..=79 => Self::Good,
            _ => Self::NeedsImprovement,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// 0..=100
    pub overall: u8,
    pub words_per_minute: u32,
}

impl Score {
    pub fn label(&self) -> ScoreLabel {
        ScoreLabel::for_score(self.overall)
    }
}

/// Turns a finished session into a score.
pub trait Scorer {
    fn score(&mut self, result: &SessionResult) -> Score;
}

/// Placeholder scoring: 30% of the completion rate plus a uniform 55..85 bonus.
/// Speaking pace is a uniform 120..140 words per minute.
#[derive(Debug, Clone)]
pub struct RandomizedScorer<R: Rng> {
    rng: R,
}

impl RandomizedScorer<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomizedScorer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Scorer for RandomizedScorer<R> {
    fn score(&mut self, result: &SessionResult) -> Score {
        let bonus: f64 = self.rng.gen_range(55.0..85.0);
        let overall = (result.completion_rate * 0.3 + bonus).round().clamp(0.0, 100.0) as u8;
        let words_per_minute = self.rng.gen_range(120..=140);
        Score {
            overall,
            words_per_minute,
        }
    }
}

/// Canned written feedback shown under the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub strengths: &'static [&'static str],
    pub improvements: &'static [&'static str],
    pub recommendations: &'static [&'static str],
}

pub const FEEDBACK: Feedback = Feedback {
    strengths: &[
        "Clear and articulate communication",
        "Good use of specific examples",
        "Confident delivery and tone",
        "Well-structured responses",
    ],
    improvements: &[
        "Could elaborate more on technical details",
        "Consider using the STAR method more consistently",
        "Practice maintaining eye contact",
        "Work on reducing filler words",
    ],
    recommendations: &[
        "Research more about the company's recent projects",
        "Prepare more quantified achievements",
        "Practice behavioral questions with specific examples",
        "Work on your closing questions for the interviewer",
    ],
};
