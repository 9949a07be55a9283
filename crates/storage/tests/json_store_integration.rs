use std::fs;

use storage::json::JsonListStore;
use storage::repository::{ListRepository, StatsRepository, Storage, StorageError};
use vocab_core::model::{EntryDraft, ItemStat, ListId, QuestionMode, StatKey, VocabList};

fn sample_list(id: &str) -> VocabList {
    let mut list = VocabList::new(ListId::new(id).unwrap(), "GRE");
    list.add_word(
        EntryDraft::new("banal", "trite; lacking originality")
            .with_synonyms(["trite"])
            .validate()
            .unwrap(),
    )
    .unwrap();
    list.add_word(EntryDraft::new("eschew", "avoid").validate().unwrap())
        .unwrap();
    list
}

#[test]
fn stats_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lists.json");

    let store = JsonListStore::open(&path).unwrap();
    store.save_lists(&[sample_list("gre")]).unwrap();

    let key = StatKey::new(ListId::new("gre").unwrap(), "Banal", QuestionMode::SpellingToWord);
    store.save_stat(&key, ItemStat::from_persisted(5, 4)).unwrap();

    let reopened = JsonListStore::open(&path).unwrap();
    let snapshot = reopened.load_stats().unwrap();
    let stat = snapshot.get(&key).copied().unwrap();
    assert_eq!(stat.attempts(), 5);
    assert_eq!(stat.correct(), 4);

    let lists = reopened.load_lists().unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].words().len(), 2);
    assert_eq!(lists[0].words()[0].synonyms(), ["trite".to_string()]);
}

#[test]
fn stat_keys_use_the_composite_format_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lists.json");
    let storage = Storage::json_file(&path).unwrap();
    storage.lists.save_lists(&[sample_list("gre")]).unwrap();

    let key = StatKey::new(ListId::new("gre").unwrap(), "eschew", QuestionMode::DefinitionToAnswer);
    storage.stats.save_stat(&key, ItemStat::from_persisted(1, 0)).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("gre::eschew::definition_toAnswer"));
}

#[test]
fn unknown_list_is_not_found_and_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lists.json");
    let store = JsonListStore::open(&path).unwrap();
    store.save_lists(&[sample_list("gre")]).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let key = StatKey::new(ListId::new("toefl").unwrap(), "banal", QuestionMode::SpellingToWord);
    let err = store.save_stat(&key, ItemStat::default()).unwrap_err();

    assert!(matches!(err, StorageError::NotFound));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn malformed_document_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lists.json");
    fs::write(&path, "{ not json").unwrap();

    let err = JsonListStore::open(&path).err().unwrap();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[test]
fn hand_written_store_with_gaps_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lists.json");
    fs::write(
        &path,
        r#"[
            {"id": "old", "words": [{"word": "banal", "definition": "trite"}, {"definition": "orphan"}],
             "stats": {"old::banal::spelling_toWord": {"attempts": 2, "correct": 9}, "junk": {}}}
        ]"#,
    )
    .unwrap();

    let store = JsonListStore::open(&path).unwrap();
    let lists = store.load_lists().unwrap();
    assert_eq!(lists[0].name(), "Untitled");
    assert_eq!(lists[0].words().len(), 1);

    let stats = store.load_stats().unwrap();
    assert_eq!(stats.len(), 1);
    let stat = stats.values().next().copied().unwrap();
    assert_eq!(stat.correct(), 2);
}

#[test]
fn store_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("lists.json");
    let store = JsonListStore::open(&path).unwrap();
    store.save_lists(&[sample_list("gre")]).unwrap();
    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());
}
