use starlane_domain_song::{key_def, lane_position, white_key_count, KeyColor, KEYBOARD};
use starlane_ports::types::Pitch;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn keyboard_table_follows_pitch_order() {
    for (i, key) in KEYBOARD.iter().enumerate() {
        assert_eq!(key.pitch, Pitch::ALL[i]);
        assert_eq!(key.color == KeyColor::Black, key.pitch.is_sharp());
    }
    assert_eq!(white_key_count(), 15);
    assert_eq!(key_def(Pitch::A4).frequency_hz, 440.0);
    assert_eq!(key_def(Pitch::G3).label, "Sol");
}

#[test]
fn white_keys_sit_in_the_middle_of_their_slot() {
    let width = 100.0 / 15.0;
    assert!(approx(lane_position(Pitch::C3), width / 2.0));
    assert!(approx(lane_position(Pitch::C4), 7.0 * width + width / 2.0));
    assert!(approx(lane_position(Pitch::C5), 100.0 - width / 2.0));
}

#[test]
fn black_keys_sit_on_the_boundary_of_their_neighbours() {
    let width = 100.0 / 15.0;
    assert!(approx(lane_position(Pitch::Cs3), width));
    assert!(approx(lane_position(Pitch::Fs4), 11.0 * width));
    assert!(approx(lane_position(Pitch::As4), 13.0 * width));
}

#[test]
fn every_lane_is_inside_the_span() {
    for pitch in Pitch::ALL {
        let x = lane_position(pitch);
        assert!((0.0..=100.0).contains(&x), "{pitch} -> {x}");
    }
}
