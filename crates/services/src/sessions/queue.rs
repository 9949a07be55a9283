use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use vocab_core::model::{
    ContentKind, ItemStat, MissingRelationPolicy, PoolEntry, QuestionMode, SessionConfig,
    SessionMode, StatKey, StatsSnapshot,
};

/// Accuracy assumed for an item that has never been answered.
const UNSEEN_ACCURACY: f64 = 0.5;

/// One pending question: which pool entry, asked in which mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueItem {
    pub index: usize,
    pub mode: QuestionMode,
}

/// Learning-mode weight of an item: `1.5 - accuracy`.
#[must_use]
pub fn learning_weight(stat: Option<&ItemStat>) -> f64 {
    let accuracy = stat
        .filter(|s| s.attempts() > 0)
        .map_or(UNSEEN_ACCURACY, ItemStat::accuracy);
    1.5 - accuracy
}

/// Number of queue copies for a weight, never less than one.
#[must_use]
pub fn learning_copies(weight: f64) -> usize {
    let copies = (weight * 2.0).round();
    if copies.is_finite() && copies >= 1.0 {
        // Weights stay within [0.5, 1.5], so this is at most 3.
        copies as usize
    } else {
        1
    }
}

pub(crate) fn is_eligible(entry: &PoolEntry, mode: QuestionMode, policy: MissingRelationPolicy) -> bool {
    if policy == MissingRelationPolicy::FallbackToWord {
        return true;
    }
    match mode.content() {
        ContentKind::Synonym => !entry.entry().synonyms().is_empty(),
        ContentKind::Antonym => !entry.entry().antonyms().is_empty(),
        ContentKind::Spelling | ContentKind::Definition => true,
    }
}

/// Build a shuffled queue for one seeding pass.
///
/// Normal and test sessions get one item per eligible entry. Learning
/// sessions replicate each entry by its learning weight, so weak items come
/// up more often.
pub fn build_queue<R: Rng + ?Sized>(
    pool: &[PoolEntry],
    config: &SessionConfig,
    stats: &StatsSnapshot,
    rng: &mut R,
) -> VecDeque<QueueItem> {
    let mode = config.question_mode();
    let mut items = Vec::with_capacity(pool.len());

    for (index, entry) in pool.iter().enumerate() {
        if !is_eligible(entry, mode, config.missing_relation()) {
            continue;
        }
        let copies = match config.session_mode() {
            SessionMode::Learning => {
                let key = StatKey::new(entry.list_id().clone(), entry.word(), mode);
                learning_copies(learning_weight(stats.get(&key)))
            }
            SessionMode::Normal | SessionMode::Test => 1,
        };
        items.extend(std::iter::repeat_n(QueueItem { index, mode }, copies));
    }

    items.shuffle(rng);
    debug!(
        %mode,
        session_mode = config.session_mode().as_str(),
        items = items.len(),
        pool = pool.len(),
        "seeded study queue"
    );
    items.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use vocab_core::model::{Direction, EntryDraft, ListId};

    fn pool() -> Vec<PoolEntry> {
        let list = ListId::new("gre").unwrap();
        vec![
            PoolEntry::new(
                list.clone(),
                EntryDraft::new("banal", "trite")
                    .with_synonyms(["stale"])
                    .validate()
                    .unwrap(),
            ),
            PoolEntry::new(list.clone(), EntryDraft::new("eschew", "avoid").validate().unwrap()),
            PoolEntry::new(list, EntryDraft::new("laconic", "terse").validate().unwrap()),
        ]
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn weight_defaults_to_one_for_unseen_items() {
        assert!((learning_weight(None) - 1.0).abs() < f64::EPSILON);
        assert_eq!(learning_copies(learning_weight(None)), 2);
    }

    #[test]
    fn weak_items_get_more_copies() {
        let perfect = ItemStat::from_persisted(4, 4);
        let failing = ItemStat::from_persisted(4, 0);
        assert_eq!(learning_copies(learning_weight(Some(&perfect))), 1);
        assert_eq!(learning_copies(learning_weight(Some(&failing))), 3);
        assert_eq!(learning_copies(0.1), 1);
    }

    #[test]
    fn test_mode_queues_every_entry_once() {
        let config = SessionConfig::new(ContentKind::Spelling, Direction::ToWord, SessionMode::Test);
        let queue = build_queue(&pool(), &config, &StatsSnapshot::new(), &mut rng());

        let mut indexes: Vec<usize> = queue.iter().map(|item| item.index).collect();
        indexes.sort_unstable();
        assert_eq!(indexes, [0, 1, 2]);
        assert!(queue.iter().all(|item| item.mode == QuestionMode::SpellingToWord));
    }

    #[test]
    fn learning_mode_replicates_by_accuracy() {
        let entries = pool();
        let config =
            SessionConfig::new(ContentKind::Definition, Direction::ToAnswer, SessionMode::Learning);
        let mut stats = StatsSnapshot::new();
        stats.insert(
            StatKey::new(entries[0].list_id().clone(), "banal", QuestionMode::DefinitionToAnswer),
            ItemStat::from_persisted(2, 2),
        );
        stats.insert(
            StatKey::new(entries[1].list_id().clone(), "ESCHEW", QuestionMode::DefinitionToAnswer),
            ItemStat::from_persisted(3, 0),
        );

        let queue = build_queue(&entries, &config, &stats, &mut rng());
        let count = |index| queue.iter().filter(|item| item.index == index).count();
        assert_eq!(count(0), 1);
        assert_eq!(count(1), 3);
        assert_eq!(count(2), 2);
    }

    #[test]
    fn skip_policy_drops_entries_without_relations() {
        let config = SessionConfig::new(ContentKind::Synonym, Direction::ToAnswer, SessionMode::Normal)
            .with_missing_relation(MissingRelationPolicy::SkipEntry);
        let queue = build_queue(&pool(), &config, &StatsSnapshot::new(), &mut rng());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].index, 0);

        let fallback =
            SessionConfig::new(ContentKind::Synonym, Direction::ToAnswer, SessionMode::Normal);
        assert_eq!(build_queue(&pool(), &fallback, &StatsSnapshot::new(), &mut rng()).len(), 3);
    }
}
