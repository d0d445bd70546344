use crate::config::Config;
use crate::error::InterviewError;
use crate::session::{
    Difficulty, ExperienceLevel, InterviewType, SessionConfig, DURATION_CHOICES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Role,
    Company,
    ExperienceLevel,
    InterviewType,
    Duration,
    Difficulty,
    Start,
}

impl SetupField {
    pub const ALL: [SetupField; 7] = [
        Self::Role,
        Self::Company,
        Self::ExperienceLevel,
        Self::InterviewType,
        Self::Duration,
        Self::Difficulty,
        Self::Start,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Role => "Job Title",
            Self::Company => "Company (Optional)",
            Self::ExperienceLevel => "Experience Level",
            Self::InterviewType => "Interview Type",
            Self::Duration => "Duration",
            Self::Difficulty => "Difficulty Level",
            Self::Start => "Start Interview",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Role | Self::Company)
    }
}

/// Step through a fixed list of choices, wrapping at either end.
fn cycle<T: Copy + PartialEq>(choices: &[T], current: T, forward: bool) -> T {
    let idx = choices.iter().position(|c| *c == current).unwrap_or(0);
    let len = choices.len();
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    choices[next]
}

/// Draft configuration edited on the setup screen.
#[derive(Debug, Clone)]
pub struct SetupForm {
    pub role: String,
    pub company: String,
    pub experience_level: ExperienceLevel,
    pub interview_type: InterviewType,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,
    focus: usize,
}

impl SetupForm {
    pub fn new(defaults: &Config) -> Self {
        let duration_minutes = if DURATION_CHOICES.contains(&defaults.duration_minutes) {
            defaults.duration_minutes
        } else {
            Config::default().duration_minutes
        };
        Self {
            role: defaults.role.clone(),
            company: defaults.company.clone(),
            experience_level: defaults.experience_level,
            interview_type: defaults.interview_type,
            duration_minutes,
            difficulty: defaults.difficulty,
            focus: 0,
        }
    }

    pub fn focus(&self) -> SetupField {
        SetupField::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % SetupField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + SetupField::ALL.len() - 1) % SetupField::ALL.len();
    }

    pub fn type_char(&mut self, c: char) {
        match self.focus() {
            SetupField::Role => self.role.push(c),
            SetupField::Company => self.company.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus() {
            SetupField::Role => {
                self.role.pop();
            }
            SetupField::Company => {
                self.company.pop();
            }
            _ => {}
        }
    }

    /// Change the focused choice field. Text fields and the start button ignore this.
    pub fn cycle(&mut self, forward: bool) {
        match self.focus() {
            SetupField::ExperienceLevel => {
                self.experience_level =
                    cycle(&ExperienceLevel::ALL, self.experience_level, forward)
            }
            SetupField::InterviewType => {
                self.interview_type = cycle(&InterviewType::ALL, self.interview_type, forward)
            }
            SetupField::Duration => {
                self.duration_minutes = cycle(&DURATION_CHOICES, self.duration_minutes, forward)
            }
            SetupField::Difficulty => {
                self.difficulty = cycle(&Difficulty::ALL, self.difficulty, forward)
            }
            SetupField::Role | SetupField::Company | SetupField::Start => {}
        }
    }

    /// The start control stays disabled until a role is entered.
    pub fn can_start(&self) -> bool {
        !self.role.trim().is_empty()
    }

    pub fn submit(&self) -> Result<SessionConfig, InterviewError> {
        SessionConfig {
            role: self.role.clone(),
            company: Some(self.company.clone()),
            experience_level: self.experience_level,
            interview_type: self.interview_type,
            duration_minutes: self.duration_minutes,
            difficulty: self.difficulty,
        }
        .validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn new_form_uses_defaults() {
        let form = SetupForm::new(&Config::default());
        assert_eq!(form.focus(), SetupField::Role);
        assert_eq!(form.duration_minutes, 30);
        assert_eq!(form.experience_level, ExperienceLevel::Mid);
        assert!(!form.can_start());
    }

    #[test]
    fn invalid_stored_duration_is_replaced() {
        let cfg = Config {
            duration_minutes: 17,
            ..Config::default()
        };
        assert_eq!(SetupForm::new(&cfg).duration_minutes, 30);
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = SetupForm::new(&Config::default());
        form.focus_prev();
        assert_eq!(form.focus(), SetupField::Start);
        form.focus_next();
        assert_eq!(form.focus(), SetupField::Role);
        for _ in 0..SetupField::ALL.len() {
            form.focus_next();
        }
        assert_eq!(form.focus(), SetupField::Role);
    }

    #[test]
    fn typing_edits_only_text_fields() {
        let mut form = SetupForm::new(&Config::default());
        for c in "SRE".chars() {
            form.type_char(c);
        }
        form.backspace();
        assert_eq!(form.role, "SR");

        form.focus_next();
        form.type_char('X');
        assert_eq!(form.company, "X");

        form.focus_next();
        form.type_char('Y');
        assert_eq!(form.role, "SR");
        assert_eq!(form.company, "X");
    }

    #[test]
    fn cycling_choices_wraps() {
        let mut form = SetupForm::new(&Config::default());
        while form.focus() != SetupField::Duration {
            form.focus_next();
        }
        form.cycle(true);
        assert_eq!(form.duration_minutes, 45);
        form.cycle(true);
        form.cycle(true);
        assert_eq!(form.duration_minutes, 15);
        form.cycle(false);
        assert_eq!(form.duration_minutes, 60);

        form.focus_next();
        form.cycle(false);
        assert_eq!(form.difficulty, Difficulty::Easy);
        form.cycle(false);
        assert_eq!(form.difficulty, Difficulty::Hard);
    }

    #[test]
    fn cycling_text_field_is_noop() {
        let mut form = SetupForm::new(&Config::default());
        let before = form.clone();
        form.cycle(true);
        assert_eq!(form.role, before.role);
        assert_eq!(form.duration_minutes, before.duration_minutes);
    }

    #[test]
    fn submit_requires_role() {
        let form = SetupForm::new(&Config::default());
        assert_matches!(form.submit(), Err(InterviewError::EmptyRole));
    }

    #[test]
    fn submit_builds_validated_config() {
        let mut form = SetupForm::new(&Config::default());
        form.role = "  Frontend Engineer ".into();
        form.interview_type = InterviewType::SystemDesign;
        assert!(form.can_start());

        let cfg = form.submit().unwrap();
        assert_eq!(cfg.role, "Frontend Engineer");
        assert_eq!(cfg.company, None);
        assert_eq!(cfg.interview_type, InterviewType::SystemDesign);
        assert_eq!(cfg.duration_minutes, 30);
    }
}
