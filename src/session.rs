use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::InterviewError;

/// Durations offered by the setup form, in minutes.
pub const DURATION_CHOICES: [u32; 4] = [15, 30, 45, 60];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [Self::Entry, Self::Mid, Self::Senior, Self::Lead];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Entry => "Entry Level (0-2 years)",
            Self::Mid => "Mid Level (3-5 years)",
            Self::Senior => "Senior Level (6+ years)",
            Self::Lead => "Lead/Manager (8+ years)",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum InterviewType {
    Behavioral,
    Technical,
    SystemDesign,
    CaseStudy,
    Mixed,
}

impl InterviewType {
    pub const ALL: [InterviewType; 5] = [
        Self::Behavioral,
        Self::Technical,
        Self::SystemDesign,
        Self::CaseStudy,
        Self::Mixed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Behavioral => "Behavioral",
            Self::Technical => "Technical",
            Self::SystemDesign => "System Design",
            Self::CaseStudy => "Case Study",
            Self::Mixed => "Mixed Interview",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];
}

/// Parameters of one practice interview. Never mutated once handed to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub role: String,
    pub company: Option<String>,
    pub experience_level: ExperienceLevel,
    pub interview_type: InterviewType,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,
}

impl SessionConfig {
    /// Normalise free-text fields and check the invariants a room relies on.
    pub fn validated(mut self) -> Result<Self, InterviewError> {
        self.role = self.role.trim().to_string();
        if self.role.is_empty() {
            return Err(InterviewError::EmptyRole);
        }
        if !DURATION_CHOICES.contains(&self.duration_minutes) {
            return Err(InterviewError::InvalidDuration(self.duration_minutes));
        }
        self.company = self
            .company
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        Ok(self)
    }

    pub fn duration_secs(&self) -> u64 {
        u64::from(self.duration_minutes) * 60
    }
}

/// Which trigger ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum FinishReason {
    #[strum(to_string = "time expired")]
    TimeExpired,
    #[strum(to_string = "ended early")]
    EndedEarly,
    #[strum(to_string = "all questions answered")]
    AllAnswered,
}

/// Snapshot handed from the room to the results screen. Built once per session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub config: SessionConfig,
    pub answers: Vec<String>,
    pub questions_asked: Vec<String>,
    pub question_total: usize,
    pub total_time_secs: u64,
    pub completion_rate: f64,
    /// Seconds spent on each answered question, in answer order.
    pub answer_times: Vec<u64>,
    pub finish_reason: FinishReason,
    pub finished_at: DateTime<Local>,
}

/// Percentage of the script reached, clamped to [0, 100].
pub fn completion_rate(asked: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (asked as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}
