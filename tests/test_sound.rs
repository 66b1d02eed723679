use gravity_runner::sound::SoundEntry;
use gravity_runner::*;

/// Records every play request.
#[derive(Default)]
struct Recorder {
    played: Vec<(&'static str, f32, PlayDuration)>,
}

impl SoundSink<&'static str> for Recorder {
    fn play(&mut self, sound: &&'static str, volume: f32, duration: PlayDuration) {
        self.played.push((*sound, volume, duration));
    }
}

impl Recorder {
    fn count(&self, sound: &str) -> usize {
        self.played.iter().filter(|(s, _, _)| *s == sound).count()
    }
}

// ── one-shot sounds ───────────────────────────────────────────────────────────

#[test]
fn sound_waits_for_its_delay() {
    let mut queue = SoundQueue::new();
    let mut sink = Recorder::default();
    queue.add_sound("shot", 0.5, 1.0);

    queue.update(0.25, &mut sink);
    assert!(sink.played.is_empty());
    assert_eq!(queue.clock(), 0.25);

    queue.update(0.25, &mut sink);
    assert_eq!(sink.played, vec![("shot", 1.0, PlayDuration::UntilEnd)]);
    assert!(queue.is_empty());
}

#[test]
fn clock_rewinds_when_queue_drains() {
    let mut queue = SoundQueue::new();
    let mut sink = Recorder::default();
    queue.add_sound("shot", 0.0, 1.0);
    queue.update(0.5, &mut sink);
    assert_eq!(sink.count("shot"), 1);
    assert_eq!(queue.clock(), 0.0);
}

#[test]
fn idle_queue_keeps_clock_at_zero() {
    let mut queue: SoundQueue<&'static str> = SoundQueue::new();
    let mut sink = Recorder::default();
    queue.update(1.0, &mut sink);
    assert_eq!(queue.clock(), 0.0);
}

#[test]
fn delay_is_relative_to_current_clock() {
    let mut queue = SoundQueue::new();
    let mut sink = Recorder::default();
    queue.add_sound("late", 2.0, 1.0);
    queue.update(0.5, &mut sink);

    queue.add_sound("flip", 0.25, 0.5);
    assert_eq!(queue.entry(&"flip").map(|e| e.fire_at), Some(0.75));

    queue.update(0.25, &mut sink);
    assert_eq!(sink.count("flip"), 1);
    assert_eq!(sink.count("late"), 0);
    assert!(queue.contains(&"late"));
}

#[test]
fn play_duration_is_passed_through() {
    let mut queue = SoundQueue::new();
    let mut sink = Recorder::default();
    queue.add_sound_with("clip", 0.0, 0.5, PlayDuration::Seconds(1.5), false);
    queue.update(0.0, &mut sink);
    assert_eq!(sink.played, vec![("clip", 0.5, PlayDuration::Seconds(1.5))]);
}

#[test]
fn re_adding_overwrites_entry() {
    let mut queue = SoundQueue::new();
    queue.add_sound("shot", 1.0, 0.2);
    queue.add_sound("shot", 0.5, 0.9);
    assert_eq!(queue.len(), 1);
    let entry = queue.entry(&"shot").unwrap();
    assert_eq!(entry.volume, 0.9);
    assert_eq!(entry.fire_at, 0.5);
}

// ── continuous sounds ─────────────────────────────────────────────────────────

#[test]
fn continuous_sound_plays_every_update_until_deleted() {
    let mut queue = SoundQueue::new();
    let mut sink = Recorder::default();
    queue.add_sound_with("engine", 5.0, 0.3, PlayDuration::Seconds(1.0), true);

    for _ in 0..4 {
        queue.update(0.25, &mut sink);
    }
    assert_eq!(sink.count("engine"), 4);
    assert_eq!(queue.clock(), 1.0);
    assert!(sink
        .played
        .iter()
        .all(|(_, _, d)| *d == PlayDuration::UntilEnd));

    queue.delete_sound(&"engine").unwrap();
    queue.update(0.25, &mut sink);
    assert_eq!(sink.count("engine"), 4);
    assert_eq!(queue.clock(), 0.0);
}

#[test]
fn one_shot_fires_on_schedule_beside_continuous_sound() {
    let mut queue = SoundQueue::new();
    let mut sink = Recorder::default();
    queue.add_sound_with("engine", 0.0, 0.3, PlayDuration::UntilEnd, true);
    queue.add_sound("shot", 0.5, 1.0);

    queue.update(0.25, &mut sink);
    assert_eq!(sink.count("shot"), 0);
    queue.update(0.25, &mut sink);
    assert_eq!(sink.count("shot"), 1);
    assert!(!queue.contains(&"shot"));

    // Engine is still queued, so the clock keeps running
    assert_eq!(queue.clock(), 0.5);
    queue.update(0.25, &mut sink);
    assert_eq!(queue.clock(), 0.75);
    assert_eq!(sink.count("shot"), 1);
    assert_eq!(sink.count("engine"), 3);
}

// ── delete & errors ───────────────────────────────────────────────────────────

#[test]
fn delete_returns_entry() {
    let mut queue = SoundQueue::new();
    queue.add_sound("shot", 0.5, 1.0);
    let entry = queue.delete_sound(&"shot").unwrap();
    assert_eq!(
        entry,
        SoundEntry {
            fire_at: 0.5,
            volume: 1.0,
            duration: PlayDuration::UntilEnd,
            continuous: false
        }
    );
    assert!(queue.is_empty());
}

#[test]
fn delete_missing_is_not_found() {
    let mut queue: SoundQueue<&'static str> = SoundQueue::new();
    let err = queue.delete_sound(&"ghost").unwrap_err();
    assert!(matches!(err, GameError::NotFound(_)));
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn negative_dt_does_not_advance_clock() {
    let mut queue = SoundQueue::new();
    let mut sink = Recorder::default();
    queue.add_sound("shot", 0.5, 1.0);
    queue.update(0.25, &mut sink);
    queue.update(-1.0, &mut sink);
    assert_eq!(queue.clock(), 0.25);
    assert!(sink.played.is_empty());
}

#[test]
fn negative_play_time_means_until_end() {
    assert_eq!(PlayDuration::from_seconds(-1.0), PlayDuration::UntilEnd);
    assert_eq!(PlayDuration::from_seconds(2.0), PlayDuration::Seconds(2.0));
}
