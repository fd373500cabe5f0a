use pretty_assertions::assert_eq;
use starlane_core::{insert_ranked, score_key, HighScoreEntry, HighScoreStore};
use starlane_domain_song::SongId;
use starlane_infra_storage_fs::MemoryStorage;
use starlane_ports::storage::StoragePort;
use std::sync::Arc;

fn store() -> (Arc<MemoryStorage>, HighScoreStore) {
    let storage = Arc::new(MemoryStorage::new());
    let store = HighScoreStore::new(storage.clone());
    (storage, store)
}

fn scores(list: &[HighScoreEntry]) -> Vec<u64> {
    list.iter().map(|e| e.score).collect()
}

#[test]
fn list_keeps_the_best_three_descending() {
    let (_, store) = store();
    let song = SongId::new("twinkle");
    let mut last = Vec::new();
    for (k, score) in [400, 100, 900, 250, 700].into_iter().enumerate() {
        last = store.record_at(&song, score, k as i64);
        assert_eq!(last.len(), (k + 1).min(3));
    }
    assert_eq!(scores(&last), vec![900, 700, 400]);
    assert_eq!(store.load(&song), last);
}

#[test]
fn equal_scores_keep_insertion_order() {
    let list = insert_ranked(Vec::new(), HighScoreEntry { score: 5, achieved_at: 1 });
    let list = insert_ranked(list, HighScoreEntry { score: 5, achieved_at: 2 });
    let list = insert_ranked(list, HighScoreEntry { score: 9, achieved_at: 3 });
    let list = insert_ranked(list, HighScoreEntry { score: 5, achieved_at: 4 });
    let order: Vec<i64> = list.iter().map(|e| e.achieved_at).collect();
    assert_eq!(order, vec![3, 1, 2]);
}

#[test]
fn songs_do_not_share_lists() {
    let (storage, store) = store();
    store.record_at(&SongId::new("a"), 10, 0);
    store.record_at(&SongId::new("b"), 20, 0);
    assert_eq!(scores(&store.load(&SongId::new("a"))), vec![10]);
    assert_eq!(storage.len(), 2);
    assert!(storage.read_value("score:b").unwrap().is_some());
}

#[test]
fn unreadable_list_counts_as_empty() {
    let (storage, store) = store();
    let song = SongId::new("broken");
    storage.write_value(&score_key(&song), "{not json").unwrap();

    assert!(store.load(&song).is_empty());
    let list = store.record_at(&song, 42, 7);
    assert_eq!(list, vec![HighScoreEntry { score: 42, achieved_at: 7 }]);
    assert_eq!(store.load(&song), list);
}

#[test]
fn record_stamps_the_current_time() {
    let (_, store) = store();
    let before = chrono::Utc::now().timestamp_millis();
    let list = store.record(&SongId::new("now"), 1);
    assert!(list[0].achieved_at >= before);
}

#[test]
fn stored_list_out_of_order_is_reranked_on_load() {
    let (storage, store) = store();
    let song = SongId::new("twinkle");
    let stored: Vec<HighScoreEntry> = [1, 9, 5, 7]
        .into_iter()
        .enumerate()
        .map(|(i, score)| HighScoreEntry { score, achieved_at: i as i64 })
        .collect();
    storage
        .write_value(&score_key(&song), &serde_json::to_string(&stored).unwrap())
        .unwrap();

    assert_eq!(scores(&store.load(&song)), vec![9, 7, 5]);
    assert_eq!(scores(&store.record_at(&song, 6, 10)), vec![9, 7, 6]);
}
