use crate::error::InterviewError;

/// Fixed question list with a forward-only cursor.
#[derive(Debug, Clone)]
pub struct QuestionSequencer {
    questions: Vec<String>,
    cursor: usize,
}

impl QuestionSequencer {
    pub fn new(questions: Vec<String>) -> Result<Self, InterviewError> {
        if questions.is_empty() {
            return Err(InterviewError::EmptyScript);
        }
        Ok(Self {
            questions,
            cursor: 0,
        })
    }

    pub fn current(&self) -> Result<&str, InterviewError> {
        self.questions
            .get(self.cursor)
            .map(String::as_str)
            .ok_or(InterviewError::OutOfRange {
                index: self.cursor,
                len: self.questions.len(),
            })
    }

    /// Move to the next question. Returns false once the last question is reached.
    pub fn advance(&mut self) -> bool {
        if self.has_next() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.questions.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions shown so far, including the one at the cursor.
    pub fn asked(&self) -> &[String] {
        &self.questions[..=self.cursor]
    }
}
