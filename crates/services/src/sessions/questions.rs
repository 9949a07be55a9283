use std::collections::HashSet;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use vocab_core::model::{PoolEntry, Prompt, Question, QuestionMode, SynAntPrompt};

/// Wrong options offered next to the correct one.
pub const DISTRACTOR_COUNT: usize = 3;

const RELATION_SEPARATOR: &str = ", ";

/// A question together with the plain-text answer it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuestion {
    pub question: Question,
    pub expected: String,
}

#[derive(Clone, Copy)]
enum Relation {
    Synonym,
    Antonym,
}

impl Relation {
    fn terms(self, entry: &PoolEntry) -> &[String] {
        match self {
            Relation::Synonym => entry.entry().synonyms(),
            Relation::Antonym => entry.entry().antonyms(),
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Relation::Synonym => "synonym",
            Relation::Antonym => "antonym",
        }
    }

    fn article(self) -> &'static str {
        match self {
            Relation::Synonym => "a",
            Relation::Antonym => "an",
        }
    }
}

/// Build the question for `target` in `mode`.
///
/// `pool` supplies distractors; it normally contains `target` itself.
pub fn generate_question<R: Rng + ?Sized>(
    pool: &[PoolEntry],
    target: &PoolEntry,
    mode: QuestionMode,
    syn_ant: SynAntPrompt,
    rng: &mut R,
) -> GeneratedQuestion {
    match mode {
        QuestionMode::SpellingToWord => spelling_to_word(target),
        QuestionMode::SpellingToAnswer => spelling_to_answer(target),
        QuestionMode::DefinitionToAnswer => definition_to_answer(pool, target, rng),
        QuestionMode::DefinitionToWord => definition_to_word(pool, target, rng),
        QuestionMode::SynonymToAnswer => {
            relation_to_answer(pool, target, Relation::Synonym, mode, syn_ant, rng)
        }
        QuestionMode::AntonymToAnswer => {
            relation_to_answer(pool, target, Relation::Antonym, mode, syn_ant, rng)
        }
        QuestionMode::SynonymToWord => {
            relation_to_word(pool, target, Relation::Synonym, mode, syn_ant, rng)
        }
        QuestionMode::AntonymToWord => {
            relation_to_word(pool, target, Relation::Antonym, mode, syn_ant, rng)
        }
    }
}

//
// ─── FREE TEXT ─────────────────────────────────────────────────────────────────
//

fn spelling_to_word(target: &PoolEntry) -> GeneratedQuestion {
    let prompt = Prompt::new()
        .text("Definition:")
        .line_break()
        .quote(target.definition());
    GeneratedQuestion {
        question: Question::input(QuestionMode::SpellingToWord, prompt),
        expected: target.word().to_owned(),
    }
}

fn spelling_to_answer(target: &PoolEntry) -> GeneratedQuestion {
    let prompt = Prompt::new()
        .text("Word:")
        .line_break()
        .strong(target.word())
        .line_break()
        .text("Type the definition");
    GeneratedQuestion {
        question: Question::input(QuestionMode::SpellingToAnswer, prompt),
        expected: target.definition().to_owned(),
    }
}

//
// ─── MULTIPLE CHOICE ───────────────────────────────────────────────────────────
//

fn definition_to_answer<R: Rng + ?Sized>(
    pool: &[PoolEntry],
    target: &PoolEntry,
    rng: &mut R,
) -> GeneratedQuestion {
    let correct = target.definition().to_owned();
    let definitions = pool.iter().map(|entry| entry.definition().to_owned());
    let distractors = pick_distractors(definitions, |c| c == correct, rng);
    let prompt = Prompt::new()
        .text("What is the best definition for: ")
        .strong(target.word())
        .text("?");
    multiple_choice(QuestionMode::DefinitionToAnswer, prompt, correct, distractors, rng)
}

fn definition_to_word<R: Rng + ?Sized>(
    pool: &[PoolEntry],
    target: &PoolEntry,
    rng: &mut R,
) -> GeneratedQuestion {
    let prompt = Prompt::new()
        .text("Which word matches this definition?")
        .line_break()
        .quote(target.definition());
    word_choice(pool, target, QuestionMode::DefinitionToWord, prompt, rng)
}

fn relation_to_answer<R: Rng + ?Sized>(
    pool: &[PoolEntry],
    target: &PoolEntry,
    relation: Relation,
    mode: QuestionMode,
    syn_ant: SynAntPrompt,
    rng: &mut R,
) -> GeneratedQuestion {
    let prompt = Prompt::new()
        .text(format!("Pick {} {} for ", relation.article(), relation.noun()))
        .strong(target.word());

    let own = relation.terms(target);
    let Some(correct) = pick_relation(own, syn_ant, rng) else {
        // No relation to ask about: the entry's own word stands in.
        return word_choice(pool, target, mode, prompt, rng);
    };

    let vocabulary = pool
        .iter()
        .flat_map(|entry| relation.terms(entry).iter().cloned());
    let distractors = pick_distractors(
        vocabulary,
        |c| c == correct || own.iter().any(|term| term == c),
        rng,
    );
    multiple_choice(mode, prompt, correct, distractors, rng)
}

fn relation_to_word<R: Rng + ?Sized>(
    pool: &[PoolEntry],
    target: &PoolEntry,
    relation: Relation,
    mode: QuestionMode,
    syn_ant: SynAntPrompt,
    rng: &mut R,
) -> GeneratedQuestion {
    let shown = pick_relation(relation.terms(target), syn_ant, rng)
        .unwrap_or_else(|| target.word().to_owned());
    let prompt = Prompt::new()
        .text(format!("Which word matches this {}?", relation.noun()))
        .line_break()
        .quote(shown);
    word_choice(pool, target, mode, prompt, rng)
}

/// Multiple choice whose correct option is the target's word.
fn word_choice<R: Rng + ?Sized>(
    pool: &[PoolEntry],
    target: &PoolEntry,
    mode: QuestionMode,
    prompt: Prompt,
    rng: &mut R,
) -> GeneratedQuestion {
    let correct = target.word().to_owned();
    let words = pool.iter().map(|entry| entry.word().to_owned());
    let distractors = pick_distractors(words, |c| c.eq_ignore_ascii_case(&correct), rng);
    multiple_choice(mode, prompt, correct, distractors, rng)
}

//
// ─── HELPERS ───────────────────────────────────────────────────────────────────
//

fn pick_relation<R: Rng + ?Sized>(
    terms: &[String],
    syn_ant: SynAntPrompt,
    rng: &mut R,
) -> Option<String> {
    if terms.is_empty() {
        return None;
    }
    match syn_ant {
        SynAntPrompt::Random => terms.choose(rng).cloned(),
        SynAntPrompt::All => Some(terms.join(RELATION_SEPARATOR)),
    }
}

/// Up to [`DISTRACTOR_COUNT`] distinct, non-blank candidates not rejected by
/// `is_excluded`, sampled uniformly.
fn pick_distractors<R, I, F>(candidates: I, is_excluded: F, rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = String>,
    F: Fn(&str) -> bool,
{
    let mut seen = HashSet::new();
    let mut pool: Vec<String> = candidates
        .into_iter()
        .filter(|c| !c.trim().is_empty() && !is_excluded(c.as_str()))
        .filter(|c| seen.insert(c.clone()))
        .collect();
    pool.shuffle(rng);
    pool.truncate(DISTRACTOR_COUNT);
    pool
}

fn multiple_choice<R: Rng + ?Sized>(
    mode: QuestionMode,
    prompt: Prompt,
    correct: String,
    distractors: Vec<String>,
    rng: &mut R,
) -> GeneratedQuestion {
    let mut choices = Vec::with_capacity(distractors.len() + 1);
    choices.push(correct.clone());
    choices.extend(distractors);
    choices.shuffle(rng);
    let answer_index = choices.iter().position(|c| *c == correct).unwrap_or(0);

    GeneratedQuestion {
        question: Question::multiple_choice(mode, prompt, choices, answer_index),
        expected: correct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use vocab_core::model::{EntryDraft, ListId};

    fn entry(word: &str, definition: &str, synonyms: &[&str], antonyms: &[&str]) -> PoolEntry {
        PoolEntry::new(
            ListId::new("gre").unwrap(),
            EntryDraft::new(word, definition)
                .with_synonyms(synonyms.iter().copied())
                .with_antonyms(antonyms.iter().copied())
                .validate()
                .unwrap(),
        )
    }

    fn pool() -> Vec<PoolEntry> {
        vec![
            entry("banal", "trite", &["stale", "hackneyed"], &["fresh"]),
            entry("eschew", "avoid", &["shun"], &["embrace"]),
            entry("laconic", "terse", &["concise"], &["verbose"]),
            entry("ebullient", "cheerful", &["exuberant"], &["gloomy"]),
            entry("obdurate", "stubborn", &[], &[]),
        ]
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn ask(
        pool: &[PoolEntry],
        index: usize,
        mode: QuestionMode,
        syn_ant: SynAntPrompt,
    ) -> GeneratedQuestion {
        generate_question(pool, &pool[index], mode, syn_ant, &mut rng())
    }

    fn assert_well_formed(generated: &GeneratedQuestion) {
        let choices = generated.question.choices();
        let index = generated.question.answer_index().unwrap();
        assert_eq!(choices[index], generated.expected);
        assert_eq!(choices.iter().filter(|c| **c == generated.expected).count(), 1);
        let distinct: HashSet<&String> = choices.iter().collect();
        assert_eq!(distinct.len(), choices.len());
    }

    #[test]
    fn spelling_prompts_embed_the_right_side() {
        let pool = pool();
        let to_word = ask(&pool, 0, QuestionMode::SpellingToWord, SynAntPrompt::Random);
        assert!(!to_word.question.is_multiple_choice());
        assert!(to_word.question.prompt().contains("trite"));
        assert_eq!(to_word.expected, "banal");
        assert_eq!(
            to_word.question.prompt().to_html(),
            "Definition:<br><blockquote>trite</blockquote>"
        );

        let to_answer = ask(&pool, 0, QuestionMode::SpellingToAnswer, SynAntPrompt::Random);
        assert_eq!(to_answer.expected, "trite");
        assert_eq!(
            to_answer.question.prompt().to_html(),
            "Word:<br><strong>banal</strong><br>Type the definition"
        );
    }

    #[test]
    fn every_multiple_choice_mode_has_four_distinct_choices() {
        let pool = pool();
        let mut rng = rng();
        for mode in QuestionMode::ALL.into_iter().filter(|m| !m.is_free_text()) {
            for target in &pool[..4] {
                let generated =
                    generate_question(&pool, target, mode, SynAntPrompt::Random, &mut rng);
                assert_eq!(generated.question.choices().len(), 4, "{mode} / {}", target.word());
                assert_well_formed(&generated);
            }
        }
    }

    #[test]
    fn definition_prompt_and_answer() {
        let pool = pool();
        let generated = ask(&pool, 1, QuestionMode::DefinitionToAnswer, SynAntPrompt::Random);
        assert_eq!(generated.expected, "avoid");
        assert_eq!(
            generated.question.prompt().to_html(),
            "What is the best definition for: <strong>eschew</strong>?"
        );
    }

    #[test]
    fn relation_distractors_skip_the_entrys_own_relations() {
        let pool = pool();
        let mut rng = rng();
        for _ in 0..20 {
            let generated = generate_question(
                &pool,
                &pool[0],
                QuestionMode::SynonymToAnswer,
                SynAntPrompt::Random,
                &mut rng,
            );
            let own = ["stale", "hackneyed"];
            assert!(own.contains(&generated.expected.as_str()));
            let others = generated
                .question
                .choices()
                .iter()
                .filter(|c| **c != generated.expected);
            for other in others {
                assert!(!own.contains(&other.as_str()), "{other}");
            }
        }
    }

    #[test]
    fn all_prompt_joins_relations_into_one_choice() {
        let pool = pool();
        let generated = ask(&pool, 0, QuestionMode::SynonymToAnswer, SynAntPrompt::All);
        assert_eq!(generated.expected, "stale, hackneyed");
        assert_well_formed(&generated);

        let to_word = ask(&pool, 0, QuestionMode::AntonymToWord, SynAntPrompt::All);
        assert_eq!(
            to_word.question.prompt().to_html(),
            "Which word matches this antonym?<br><blockquote>fresh</blockquote>"
        );
        assert_eq!(to_word.expected, "banal");
    }

    #[test]
    fn missing_relation_falls_back_to_the_word() {
        let pool = pool();
        let generated = ask(&pool, 4, QuestionMode::AntonymToAnswer, SynAntPrompt::Random);
        assert_eq!(generated.expected, "obdurate");
        assert!(generated.question.prompt().to_html().starts_with("Pick an antonym for"));
        assert_well_formed(&generated);

        let to_word = ask(&pool, 4, QuestionMode::SynonymToWord, SynAntPrompt::Random);
        assert!(to_word.question.prompt().contains("obdurate"));
    }

    #[test]
    fn small_pools_give_fewer_choices() {
        let pool = vec![entry("banal", "trite", &[], &[]), entry("eschew", "avoid", &[], &[])];
        let generated = ask(&pool, 0, QuestionMode::DefinitionToWord, SynAntPrompt::Random);
        assert_eq!(generated.question.choices().len(), 2);
        assert_well_formed(&generated);
    }

    #[test]
    fn duplicate_definitions_are_offered_once() {
        let pool = vec![
            entry("banal", "trite", &[], &[]),
            entry("hackneyed", "trite", &[], &[]),
            entry("eschew", "avoid", &[], &[]),
            entry("shun", "avoid", &[], &[]),
        ];
        let generated = ask(&pool, 0, QuestionMode::DefinitionToAnswer, SynAntPrompt::Random);
        assert_eq!(generated.question.choices().len(), 2);
        assert_well_formed(&generated);
    }

    #[test]
    fn answer_position_varies_between_draws() {
        let pool = pool();
        let positions: HashSet<usize> = (0..20)
            .map(|seed| {
                let generated = generate_question(
                    &pool,
                    &pool[0],
                    QuestionMode::DefinitionToAnswer,
                    SynAntPrompt::Random,
                    &mut StdRng::seed_from_u64(seed),
                );
                assert_well_formed(&generated);
                generated.question.answer_index().unwrap()
            })
            .collect();
        assert!(positions.len() > 1);
    }
}
