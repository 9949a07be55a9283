//! Line-oriented quiz loop over any reader/writer pair.

use std::io::{self, BufRead, Write};

use services::sessions::{
    DoneReason, FeedbackLine, Next, StudySession, Submission, Tone, WordLookup, feedback_lines,
};
use vocab_core::model::{Answer, Question, SessionSummary};

pub const SHOW_COMMAND: &str = ":show";
pub const QUIT_COMMAND: &str = ":quit";

enum Reply {
    Answer(Answer),
    Quit,
}

/// Run `session` until it finishes, the user quits, or input ends.
///
/// # Errors
///
/// Returns any I/O error from `input` or `output`.
pub fn run_quiz<R: BufRead, W: Write>(
    session: &mut StudySession,
    lookup: &WordLookup,
    input: &mut R,
    output: &mut W,
) -> io::Result<SessionSummary> {
    writeln!(
        output,
        "Type your answer, {SHOW_COMMAND} to reveal it, {QUIT_COMMAND} to stop."
    )?;

    loop {
        let question = match session.next() {
            Next::Question(question) => question,
            Next::Done(reason) => {
                writeln!(output, "{}", reason.message())?;
                break;
            }
        };

        writeln!(output)?;
        write_progress(session, output)?;
        write_question(&question, output)?;

        let Some(reply) = read_reply(session, input, output)? else {
            break;
        };
        let answer = match reply {
            Reply::Answer(answer) => answer,
            Reply::Quit => break,
        };

        let submission = session.submit(answer);
        if let Submission::Graded(graded) = &submission {
            for line in feedback_lines(graded, lookup) {
                write_feedback(&line, output)?;
            }
        }
        if submission.is_done() {
            writeln!(output, "{}", DoneReason::Complete.message())?;
            break;
        }
    }

    let summary = session.summary();
    write_summary(&summary, output)?;
    Ok(summary)
}

/// Keep prompting until the user gives a usable reply. `None` on end of input
/// or when no question is waiting.
fn read_reply<R: BufRead, W: Write>(
    session: &StudySession,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<Reply>> {
    let Some(question) = session.current_question() else {
        return Ok(None);
    };
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();

        match line {
            QUIT_COMMAND => return Ok(Some(Reply::Quit)),
            SHOW_COMMAND => {
                let expected = session.current_answer().unwrap_or_default();
                writeln!(output, "Answer: {expected}")?;
                continue;
            }
            _ => {}
        }

        if !question.is_multiple_choice() {
            return Ok(Some(Reply::Answer(Answer::text(line))));
        }
        match parse_choice(line, question.choices()) {
            Some(index) => return Ok(Some(Reply::Answer(Answer::Choice(index)))),
            None => writeln!(
                output,
                "Pick a number from 1 to {}.",
                question.choices().len()
            )?,
        }
    }
}

/// Accept a 1-based number or the exact text of a choice.
fn parse_choice(line: &str, choices: &[String]) -> Option<usize> {
    if let Ok(number) = line.parse::<usize>() {
        return (1..=choices.len()).contains(&number).then(|| number - 1);
    }
    choices
        .iter()
        .position(|choice| choice.eq_ignore_ascii_case(line))
}

fn write_progress<W: Write>(session: &StudySession, output: &mut W) -> io::Result<()> {
    let progress = session.progress();
    match progress.total {
        Some(total) => writeln!(output, "[{}/{}]", progress.answered + 1, total),
        None => writeln!(
            output,
            "[{} answered, streak {}]",
            progress.answered,
            session.stats().streak()
        ),
    }
}

fn write_question<W: Write>(question: &Question, output: &mut W) -> io::Result<()> {
    writeln!(output, "{}", question.prompt().to_plain())?;
    for (index, choice) in question.choices().iter().enumerate() {
        writeln!(output, "  {}) {choice}", index + 1)?;
    }
    Ok(())
}

fn write_feedback<W: Write>(line: &FeedbackLine, output: &mut W) -> io::Result<()> {
    let marker = match line.tone {
        Tone::Correct => '+',
        Tone::Incorrect => '-',
    };
    writeln!(output, "{marker} {}", line.text)
}

fn write_summary<W: Write>(summary: &SessionSummary, output: &mut W) -> io::Result<()> {
    let elapsed = summary.elapsed().num_seconds().max(0);
    writeln!(output)?;
    writeln!(
        output,
        "Answered {} | Correct {} | Accuracy {:.0}% | Best streak {} | Time {}:{:02}",
        summary.attempts(),
        summary.correct(),
        summary.accuracy() * 100.0,
        summary.best_streak(),
        elapsed / 60,
        elapsed % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use storage::repository::InMemoryRepository;
    use vocab_core::model::{
        ContentKind, Direction, EntryDraft, ListId, PoolEntry, SessionConfig, SessionMode,
    };
    use vocab_core::time::fixed_clock;

    fn quiz_session(content: ContentKind, direction: Direction) -> StudySession {
        let list = ListId::new("gre").unwrap();
        let pool = vec![PoolEntry::new(
            list,
            EntryDraft::new("banal", "trite").validate().unwrap(),
        )];
        let config = SessionConfig::new(content, direction, SessionMode::Test);
        StudySession::with_rng(
            pool,
            config,
            Arc::new(InMemoryRepository::new()),
            StdRng::seed_from_u64(1),
        )
        .with_clock(fixed_clock())
    }

    fn run(session: &mut StudySession, input: &str) -> (SessionSummary, String) {
        let mut output = Vec::new();
        let lookup = WordLookup::from_pool(session.pool());
        let summary = run_quiz(
            session,
            &lookup,
            &mut Cursor::new(input.as_bytes()),
            &mut output,
        )
        .unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[test]
    fn spelling_quiz_grades_typed_answers() {
        let mut session = quiz_session(ContentKind::Spelling, Direction::ToWord);
        let (summary, output) = run(&mut session, ":show\nBanal\n");

        assert!(output.contains("Answer: banal"));
        assert!(output.contains("+ Correct!"));
        assert!(output.contains("Session complete."));
        assert_eq!(summary.correct(), 1);
    }

    #[test]
    fn invalid_choice_is_asked_again() {
        let mut session = quiz_session(ContentKind::Definition, Direction::ToAnswer);
        let (summary, output) = run(&mut session, "7\n1\n");

        assert!(output.contains("Pick a number from 1 to 1."));
        assert_eq!(summary.attempts(), 1);
        assert_eq!(summary.correct(), 1);
    }

    #[test]
    fn quit_and_end_of_input_stop_without_grading() {
        let mut session = quiz_session(ContentKind::Spelling, Direction::ToWord);
        let (summary, _) = run(&mut session, ":quit\n");
        assert_eq!(summary.attempts(), 0);

        let mut session = quiz_session(ContentKind::Spelling, Direction::ToWord);
        let (summary, output) = run(&mut session, "");
        assert_eq!(summary.attempts(), 0);
        assert!(output.contains("Answered 0"));
    }

    #[test]
    fn choices_match_by_number_or_text() {
        let choices = vec!["trite".to_string(), "avoid".to_string()];
        assert_eq!(parse_choice("2", &choices), Some(1));
        assert_eq!(parse_choice("TRITE", &choices), Some(0));
        assert_eq!(parse_choice("0", &choices), None);
        assert_eq!(parse_choice("nope", &choices), None);
    }
}
