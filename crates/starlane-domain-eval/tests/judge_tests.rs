use pretty_assertions::assert_eq;
use starlane_domain_eval::{
    find_candidate, Grade, GradeTier, HitDetector, HitWindow, MotionConfig,
    MultiplierPolicy, Playfield, RuleError, ScoringRule, VisualVariant,
};
use starlane_ports::types::Pitch;

fn window() -> HitWindow {
    HitWindow {
        hit_line: 82.0,
        half_width: 12.0,
    }
}

// 1 progress unit per 10ms keeps the arithmetic exact.
fn field() -> Playfield {
    Playfield::new(MotionConfig {
        spawn_progress: 0.0,
        despawn_progress: 105.0,
        units_per_second: 100.0,
    })
}

#[test]
fn multiplier_steps_every_ten_hits() {
    let rule = ScoringRule::tiered();
    for combo in 0..10 {
        assert_eq!(rule.multiplier(combo), 1);
    }
    for combo in 10..20 {
        assert_eq!(rule.multiplier(combo), 2);
    }
    assert_eq!(rule.multiplier(20), 3);
    assert_eq!(rule.multiplier(29), 3);
    assert_eq!(rule.multiplier(105), 11);
}

#[test]
fn grade_labels_are_english() {
    assert_eq!(Grade::Perfect.label(), "Perfect!");
    assert_eq!(Grade::Great.label(), "Great!");
    assert_eq!(Grade::Good.label(), "Good!");
}

#[test]
fn tightest_tier_wins() {
    let rule = ScoringRule::tiered();
    assert_eq!(rule.judge(0.0, 0).map(|j| j.grade), Some(Grade::Perfect));
    assert_eq!(rule.judge(3.99, 0).map(|j| j.grade), Some(Grade::Perfect));
    assert_eq!(rule.judge(4.0, 0).map(|j| j.grade), Some(Grade::Great));
    assert_eq!(rule.judge(8.0, 0).map(|j| j.grade), Some(Grade::Good));
    assert_eq!(rule.judge(12.0, 0), None);
}

#[test]
fn tiered_points_use_the_combo_multiplier() {
    let rule = ScoringRule::tiered();
    let judgement = rule.judge(5.0, 23).expect("inside the good band");
    assert_eq!(judgement.base_points, 200);
    assert_eq!(judgement.multiplier, 3);
    assert_eq!(judgement.points, 600);
}

#[test]
fn flat_rule_ignores_combo() {
    let rule = ScoringRule::flat(10, window());
    let judgement = rule.judge(11.0, 50).expect("inside the window");
    assert_eq!(judgement.grade, Grade::Good);
    assert_eq!(judgement.multiplier, 1);
    assert_eq!(judgement.points, 10);
}

#[test]
fn unordered_tiers_are_rejected() {
    let tiers = vec![
        GradeTier {
            grade: Grade::Perfect,
            max_accuracy: 8.0,
            points: 300,
        },
        GradeTier {
            grade: Grade::Great,
            max_accuracy: 4.0,
            points: 200,
        },
    ];
    assert_eq!(
        ScoringRule::new(tiers, MultiplierPolicy::Fixed),
        Err(RuleError::UnorderedTiers(1))
    );
    assert_eq!(
        ScoringRule::new(Vec::new(), MultiplierPolicy::Fixed),
        Err(RuleError::NoTiers)
    );
}

#[test]
fn detect_picks_the_note_nearest_the_hit_line() {
    let mut field = field();
    field.spawn(1, Pitch::C4, VisualVariant::Star, 0);
    field.spawn(2, Pitch::C4, VisualVariant::Star, 50);
    field.spawn(3, Pitch::D4, VisualVariant::Star, 0);
    // note 1 at 86, note 2 at 81, note 3 at 86
    assert!(field.advance(860).is_empty());

    let detector = HitDetector::new(window(), ScoringRule::tiered());
    let hit = detector
        .detect(&mut field, Pitch::C4, 0)
        .expect("two C4 notes are in the window");

    assert_eq!(hit.note.instance_id, 2);
    assert!(hit.note.hit);
    assert_eq!(hit.judgement.grade, Grade::Perfect);
    assert_eq!(field.notes().len(), 2);
}

#[test]
fn equal_distance_goes_to_the_earlier_spawn() {
    let mut field = field();
    field.spawn(7, Pitch::E4, VisualVariant::Diamond, 0);
    field.spawn(8, Pitch::E4, VisualVariant::Diamond, 0);
    field.advance(820);

    let candidate = find_candidate(field.notes(), Pitch::E4, &window()).expect("both on the line");
    assert_eq!(candidate.instance_id, 7);
    assert_eq!(candidate.accuracy, 0.0);
}

#[test]
fn input_without_match_changes_nothing() {
    let mut field = field();
    field.spawn(1, Pitch::G4, VisualVariant::Star, 0);
    field.advance(500);

    let detector = HitDetector::new(window(), ScoringRule::tiered());
    assert!(detector.detect(&mut field, Pitch::G4, 0).is_none(), "still far from the line");
    assert!(detector.detect(&mut field, Pitch::A4, 0).is_none(), "wrong pitch");
    assert_eq!(field.notes().len(), 1);
}

#[test]
fn window_bounds_are_exclusive() {
    let w = window();
    assert!(w.contains(82.0));
    assert!(w.contains(93.9));
    assert!(!w.contains(94.0));
    assert!(!w.contains(70.0));
}
