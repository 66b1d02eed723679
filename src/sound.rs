//! Delayed sound triggers.
//!
//! Entries are keyed by sound identity and measured against a queue-local
//! clock that runs while anything is pending and rewinds to zero once the
//! queue drains. Continuous entries replay on every update until removed.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use crate::compute::usable_dt;
use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayDuration {
    /// Play to the natural end of the sound.
    UntilEnd,
    Seconds(f32),
}

impl PlayDuration {
    /// Negative values mean "until the end".
    pub fn from_seconds(seconds: f32) -> Self {
        if seconds < 0.0 {
            PlayDuration::UntilEnd
        } else {
            PlayDuration::Seconds(seconds)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundEntry {
    /// Queue-clock time at which the sound fires.
    pub fire_at: f32,
    pub volume: f32,
    /// Ignored for continuous entries.
    pub duration: PlayDuration,
    pub continuous: bool,
}

/// Audio playback collaborator.
pub trait SoundSink<K> {
    fn play(&mut self, sound: &K, volume: f32, duration: PlayDuration);
}

#[derive(Clone, Debug)]
pub struct SoundQueue<K> {
    clock: f32,
    sounds: HashMap<K, SoundEntry>,
}

impl<K> Default for SoundQueue<K> {
    fn default() -> Self {
        Self {
            clock: 0.0,
            sounds: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Debug> SoundQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-shot sound played to its end `delay` seconds from now.
    pub fn add_sound(&mut self, sound: K, delay: f32, volume: f32) {
        self.add_sound_with(sound, delay, volume, PlayDuration::UntilEnd, false);
    }

    /// Register (or overwrite) the entry for `sound`.
    pub fn add_sound_with(
        &mut self,
        sound: K,
        delay: f32,
        volume: f32,
        duration: PlayDuration,
        continuous: bool,
    ) {
        let entry = SoundEntry {
            fire_at: self.clock + delay,
            volume,
            duration,
            continuous,
        };
        self.sounds.insert(sound, entry);
    }

    pub fn delete_sound(&mut self, sound: &K) -> Result<SoundEntry, GameError> {
        self.sounds
            .remove(sound)
            .ok_or_else(|| GameError::NotFound(format!("sound {sound:?}")))
    }

    /// Advance the clock, play whatever is due and drop fired one-shots.
    pub fn update<S: SoundSink<K> + ?Sized>(&mut self, dt: f32, sink: &mut S) {
        if let Some(dt) = usable_dt(dt) {
            self.clock += dt;
        }

        let clock = self.clock;
        self.sounds.retain(|sound, entry| {
            if entry.continuous {
                sink.play(sound, entry.volume, PlayDuration::UntilEnd);
                true
            } else if clock >= entry.fire_at {
                trace!(?sound, clock, "sound fired");
                sink.play(sound, entry.volume, entry.duration);
                false
            } else {
                true
            }
        });

        if self.sounds.is_empty() {
            self.clock = 0.0;
        }
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn entry(&self, sound: &K) -> Option<&SoundEntry> {
        self.sounds.get(sound)
    }

    pub fn contains(&self, sound: &K) -> bool {
        self.sounds.contains_key(sound)
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}
