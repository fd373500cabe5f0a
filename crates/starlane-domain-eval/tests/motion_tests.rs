use starlane_domain_eval::{Health, HealthRules, MotionConfig, Playfield, VisualVariant};
use starlane_ports::types::Pitch;

fn arcade_motion() -> MotionConfig {
    MotionConfig {
        spawn_progress: -15.0,
        despawn_progress: 105.0,
        units_per_second: 45.0,
    }
}

#[test]
fn progress_grows_with_elapsed_time() {
    let mut field = Playfield::new(arcade_motion());
    field.spawn(1, Pitch::C4, VisualVariant::Star, 1_000);
    assert_eq!(field.notes()[0].progress, -15.0);

    field.advance(2_000);
    assert_eq!(field.notes()[0].progress, 30.0);

    // A clock that goes backwards never moves a note up the screen.
    field.advance(1_500);
    assert_eq!(field.notes()[0].progress, 30.0);
}

#[test]
fn notes_past_the_threshold_are_returned_as_misses() {
    let mut field = Playfield::new(arcade_motion());
    field.spawn(1, Pitch::C4, VisualVariant::Star, 0);
    field.spawn(2, Pitch::D4, VisualVariant::Diamond, 1_000);

    // 120 units at 45/s: progress first passes 105 at 2667ms.
    assert!(field.advance(2_666).is_empty(), "just short of the threshold");

    let missed = field.advance(2_667);
    assert_eq!(missed.len(), 1);
    assert_eq!(missed[0].instance_id, 1);
    assert!(!missed[0].hit);
    assert_eq!(field.notes().len(), 1);
}

#[test]
fn hit_notes_leave_immediately() {
    let mut field = Playfield::new(arcade_motion());
    field.spawn(5, Pitch::A4, VisualVariant::Star, 0);

    let note = field.take_hit(5).expect("note is live");
    assert!(note.hit);
    assert!(field.is_empty());
    assert!(field.take_hit(5).is_none());
}

#[test]
fn health_is_clamped() {
    let rules = HealthRules::arcade();
    let start = rules.start();
    assert_eq!(start.get(), 50);

    assert_eq!(rules.on_hit(Health::new(99)).get(), 100);
    assert_eq!(rules.on_misses(Health::new(7), 2).get(), 0);
    assert_eq!(Health::new(250).get(), 100);

    assert!(!rules.is_fever(Health::new(89)));
    assert!(rules.is_fever(Health::new(90)));
}
