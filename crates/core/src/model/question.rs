use crate::model::config::QuestionMode;
use crate::text::escape_html;

//
// ─── PROMPT ────────────────────────────────────────────────────────────────────
//

/// One piece of prompt markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSegment {
    Text(String),
    /// The quizzed word, rendered emphasized.
    Strong(String),
    /// A quoted block such as a definition.
    Quote(String),
    LineBreak,
}

/// Structured prompt text. The rendering layer decides how to show it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    segments: Vec<PromptSegment>,
}

impl Prompt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.segments.push(PromptSegment::Text(text.into()));
        self
    }

    #[must_use]
    pub fn strong(mut self, text: impl Into<String>) -> Self {
        self.segments.push(PromptSegment::Strong(text.into()));
        self
    }

    #[must_use]
    pub fn quote(mut self, text: impl Into<String>) -> Self {
        self.segments.push(PromptSegment::Quote(text.into()));
        self
    }

    #[must_use]
    pub fn line_break(mut self) -> Self {
        self.segments.push(PromptSegment::LineBreak);
        self
    }

    #[must_use]
    pub fn segments(&self) -> &[PromptSegment] {
        &self.segments
    }

    /// HTML rendering with every text segment escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PromptSegment::Text(t) => out.push_str(&escape_html(t)),
                PromptSegment::Strong(t) => {
                    out.push_str("<strong>");
                    out.push_str(&escape_html(t));
                    out.push_str("</strong>");
                }
                PromptSegment::Quote(t) => {
                    out.push_str("<blockquote>");
                    out.push_str(&escape_html(t));
                    out.push_str("</blockquote>");
                }
                PromptSegment::LineBreak => out.push_str("<br>"),
            }
        }
        out
    }

    /// Plain-text rendering for terminals and logs.
    #[must_use]
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PromptSegment::Text(t) => out.push_str(t),
                PromptSegment::Strong(t) => {
                    out.push('*');
                    out.push_str(t);
                    out.push('*');
                }
                PromptSegment::Quote(t) => {
                    out.push_str("  \"");
                    out.push_str(t);
                    out.push('"');
                }
                PromptSegment::LineBreak => out.push('\n'),
            }
        }
        out
    }

    /// True if any segment contains `needle` verbatim.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.segments.iter().any(|segment| match segment {
            PromptSegment::Text(t) | PromptSegment::Strong(t) | PromptSegment::Quote(t) => {
                t.contains(needle)
            }
            PromptSegment::LineBreak => false,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Answer shape of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionBody {
    /// Free-text answer.
    Input,
    /// Pick one of `choices`; `answer_index` points at the correct one.
    MultipleChoice {
        choices: Vec<String>,
        answer_index: usize,
    },
}

/// A single quiz prompt handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    mode: QuestionMode,
    prompt: Prompt,
    body: QuestionBody,
}

impl Question {
    #[must_use]
    pub fn input(mode: QuestionMode, prompt: Prompt) -> Self {
        Self {
            mode,
            prompt,
            body: QuestionBody::Input,
        }
    }

    #[must_use]
    pub fn multiple_choice(
        mode: QuestionMode,
        prompt: Prompt,
        choices: Vec<String>,
        answer_index: usize,
    ) -> Self {
        Self {
            mode,
            prompt,
            body: QuestionBody::MultipleChoice {
                choices,
                answer_index,
            },
        }
    }

    #[must_use]
    pub fn mode(&self) -> QuestionMode {
        self.mode
    }

    #[must_use]
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    #[must_use]
    pub fn body(&self) -> &QuestionBody {
        &self.body
    }

    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        matches!(self.body, QuestionBody::MultipleChoice { .. })
    }

    /// Choices of a multiple-choice question; empty for input questions.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        match &self.body {
            QuestionBody::MultipleChoice { choices, .. } => choices,
            QuestionBody::Input => &[],
        }
    }

    #[must_use]
    pub fn answer_index(&self) -> Option<usize> {
        match &self.body {
            QuestionBody::MultipleChoice { answer_index, .. } => Some(*answer_index),
            QuestionBody::Input => None,
        }
    }
}

/// A user's answer to a [`Question`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Choice(usize),
}

impl Answer {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_rendering_escapes_content() {
        let prompt = Prompt::new()
            .text("Definition:")
            .line_break()
            .quote("less <than> & more");
        assert_eq!(
            prompt.to_html(),
            "Definition:<br><blockquote>less &lt;than&gt; &amp; more</blockquote>"
        );
    }

    #[test]
    fn plain_rendering_marks_emphasis() {
        let prompt = Prompt::new().text("Pick a synonym for ").strong("banal");
        assert_eq!(prompt.to_plain(), "Pick a synonym for *banal*");
        assert!(prompt.contains("banal"));
        assert!(!prompt.contains("eschew"));
    }

    #[test]
    fn choices_are_empty_for_input_questions() {
        let question = Question::input(QuestionMode::SpellingToWord, Prompt::new().text("x"));
        assert!(!question.is_multiple_choice());
        assert!(question.choices().is_empty());
        assert_eq!(question.answer_index(), None);
    }

    #[test]
    fn multiple_choice_exposes_answer_index() {
        let question = Question::multiple_choice(
            QuestionMode::DefinitionToWord,
            Prompt::new(),
            vec!["a".into(), "b".into()],
            1,
        );
        assert_eq!(question.choices(), ["a", "b"]);
        assert_eq!(question.answer_index(), Some(1));
    }
}
