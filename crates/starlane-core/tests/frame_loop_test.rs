use pretty_assertions::assert_eq;
use starlane_core::{FrameLoop, Recorder, Task, PLAYBACK_TAIL_MS};
use starlane_ports::types::Pitch;

fn drain(frame_loop: &mut FrameLoop, now_ms: u64) -> Vec<Task> {
    std::iter::from_fn(|| frame_loop.pop_due(now_ms).map(|(_, task)| task)).collect()
}

#[test]
fn tasks_run_in_due_order_with_stable_ties() {
    let mut frame_loop = FrameLoop::new();
    frame_loop.schedule_at(30, Task::PlaybackEnd);
    frame_loop.schedule_at(10, Task::PlaybackNote { pitch: Pitch::C4 });
    frame_loop.schedule_at(10, Task::PlaybackNote { pitch: Pitch::D4 });
    frame_loop.schedule_at(20, Task::SessionTick);

    assert!(drain(&mut frame_loop, 9).is_empty());
    assert_eq!(
        drain(&mut frame_loop, 20),
        vec![
            Task::PlaybackNote { pitch: Pitch::C4 },
            Task::PlaybackNote { pitch: Pitch::D4 },
            Task::SessionTick,
        ]
    );
    assert_eq!(frame_loop.next_due_ms(), Some(30));
}

#[test]
fn cancelled_tasks_never_fire() {
    let mut frame_loop = FrameLoop::new();
    let tick = frame_loop.schedule_at(16, Task::SessionTick);
    let settle = frame_loop.schedule_at(200, Task::SettleFeedback);

    assert!(frame_loop.cancel(tick));
    assert!(!frame_loop.cancel(tick));
    assert!(!frame_loop.is_pending(tick));
    assert!(frame_loop.is_pending(settle));
    assert_eq!(drain(&mut frame_loop, 1_000), vec![Task::SettleFeedback]);
    assert!(frame_loop.is_empty());
}

#[test]
fn handles_are_not_reused_after_firing() {
    let mut frame_loop = FrameLoop::new();
    let first = frame_loop.schedule_at(0, Task::SessionTick);
    frame_loop.pop_due(0);
    let second = frame_loop.schedule_at(0, Task::SessionTick);
    assert_ne!(first, second);
    assert!(!frame_loop.cancel(first));
    assert!(frame_loop.is_pending(second));
}

#[test]
fn recorder_keeps_offsets_from_record_start() {
    let mut recorder = Recorder::new();
    assert!(!recorder.record(Pitch::C4, 50));
    assert!(recorder.start_recording(1_000));
    recorder.record(Pitch::C4, 1_000);
    recorder.record(Pitch::E4, 1_250);
    assert!(recorder.stop_recording());
    assert!(!recorder.record(Pitch::G4, 1_500));

    let offsets: Vec<(Pitch, u64)> = recorder.notes().iter().map(|n| (n.pitch, n.offset_ms)).collect();
    assert_eq!(offsets, vec![(Pitch::C4, 0), (Pitch::E4, 250)]);
}

#[test]
fn playback_schedules_notes_then_sentinel() {
    let mut recorder = Recorder::new();
    let mut frame_loop = FrameLoop::new();
    recorder.start_recording(0);
    recorder.record(Pitch::C4, 100);
    recorder.record(Pitch::D4, 400);
    recorder.stop_recording();

    assert!(recorder.start_playback(&mut frame_loop, 10_000));
    assert!(recorder.is_playing());
    assert_eq!(frame_loop.len(), 3);
    assert!(!recorder.start_recording(10_050));

    assert_eq!(drain(&mut frame_loop, 10_100), vec![Task::PlaybackNote { pitch: Pitch::C4 }]);
    assert_eq!(drain(&mut frame_loop, 10_400), vec![Task::PlaybackNote { pitch: Pitch::D4 }]);
    assert!(drain(&mut frame_loop, 10_400 + PLAYBACK_TAIL_MS - 1).is_empty());
    assert_eq!(drain(&mut frame_loop, 10_400 + PLAYBACK_TAIL_MS), vec![Task::PlaybackEnd]);
    recorder.finish_playback();
    assert!(!recorder.is_playing());
}

#[test]
fn stopping_playback_cancels_everything_left() {
    let mut recorder = Recorder::new();
    let mut frame_loop = FrameLoop::new();
    recorder.start_recording(0);
    for (i, pitch) in [Pitch::C4, Pitch::D4, Pitch::E4].into_iter().enumerate() {
        recorder.record(pitch, i as u64 * 100);
    }
    recorder.stop_recording();
    recorder.start_playback(&mut frame_loop, 0);

    drain(&mut frame_loop, 0);
    assert_eq!(recorder.stop_playback(&mut frame_loop), 3);
    assert!(frame_loop.is_empty());
    assert!(!recorder.is_playing());
    assert_eq!(recorder.stop_playback(&mut frame_loop), 0);
}

#[test]
fn nothing_to_play_without_a_take() {
    let mut recorder = Recorder::new();
    let mut frame_loop = FrameLoop::new();
    assert!(!recorder.start_playback(&mut frame_loop, 0));
    assert!(frame_loop.is_empty());
}
