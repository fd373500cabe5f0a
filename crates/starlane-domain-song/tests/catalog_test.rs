use starlane_domain_song::{all_songs, challenge_songs, find_song, magic, remix, Difficulty, CHALLENGE_SONG_COUNT};
use starlane_ports::types::Pitch;
use std::collections::HashSet;

#[test]
fn catalog_has_base_songs_and_two_variants_each() {
    let songs = all_songs();
    assert_eq!(songs.len(), 30);

    let ids: HashSet<_> = songs.iter().map(|s| s.id.as_str().to_string()).collect();
    assert_eq!(ids.len(), songs.len(), "song ids must be unique");
    assert!(ids.contains("twinkle_remix"));
    assert!(ids.contains("old_macdonald_magic"));
}

#[test]
fn every_catalog_song_is_valid() {
    for song in all_songs() {
        song.validate()
            .unwrap_or_else(|err| panic!("{} should be valid: {err}", song.id));
    }
}

#[test]
fn challenge_list_is_the_first_fifteen() {
    let challenge = challenge_songs();
    assert_eq!(challenge.len(), CHALLENGE_SONG_COUNT);
    assert_eq!(challenge[0].id.as_str(), "twinkle");
    assert_eq!(challenge[10].id.as_str(), "twinkle_remix");
    assert_eq!(challenge[14].id.as_str(), "mary_lamb_remix");
}

#[test]
fn remix_compresses_onsets_and_rounds_up() {
    let twinkle = find_song("twinkle").expect("twinkle is in the catalog");
    let fast = remix(&twinkle);

    assert_eq!(fast.difficulty, Difficulty::Hard);
    let onsets: Vec<_> = fast.notes.iter().map(|n| n.onset_ms).collect();
    assert_eq!(onsets, vec![0, 334, 667, 1000, 1334, 1667, 2000]);
    assert!(fast.notes.iter().all(|n| n.duration_ms == 250));
}

#[test]
fn magic_lifts_odd_notes_to_c5() {
    let twinkle = find_song("twinkle").expect("twinkle is in the catalog");
    let sparkly = magic(&twinkle);

    let pitches: Vec<_> = sparkly.notes.iter().map(|n| n.pitch).collect();
    assert_eq!(
        pitches,
        vec![Pitch::C4, Pitch::C5, Pitch::G4, Pitch::C5, Pitch::A4, Pitch::C5, Pitch::G4]
    );
    assert_eq!(sparkly.notes[3].onset_ms, twinkle.notes[3].onset_ms);
}
