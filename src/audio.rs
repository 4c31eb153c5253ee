//! Sound effect interface
//!
//! The simulation fires named effects at a sink and never waits on the
//! result; playback failures stay inside the sink and cannot touch game
//! state. Real playback lives outside this crate.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player starts a tile move
    Move,
    /// Food eaten
    Food,
    /// Knife picked up
    Pickup,
    /// Ghost killed or boss defeated
    Kill,
    /// Boss damaged but still standing
    BossHit,
    /// Boss fires a projectile
    BossAttack,
    /// Player loses a life
    LifeLost,
    /// Level cleared, transition starting
    LevelClear,
    /// Out of lives
    GameOver,
    /// Final level cleared
    Victory,
}

/// Fire-and-forget audio sink. Implementations must not fail the caller.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Sink that discards every effect, for headless runs and most tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Sink that records every effect in play order, for tests and the demo
/// binary's end-of-run summary.
#[derive(Debug, Default, Clone)]
pub struct MemoryAudio {
    pub played: Vec<SoundEffect>,
}

impl MemoryAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `effect` has been played
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|&&e| e == effect).count()
    }

    pub fn last(&self) -> Option<SoundEffect> {
        self.played.last().copied()
    }
}

impl AudioSink for MemoryAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_audio_records_in_order() {
        let mut audio = MemoryAudio::new();
        audio.play(SoundEffect::Move);
        audio.play(SoundEffect::Food);
        audio.play(SoundEffect::Move);
        assert_eq!(audio.played.len(), 3);
        assert_eq!(audio.count(SoundEffect::Move), 2);
        assert_eq!(audio.last(), Some(SoundEffect::Move));
    }

    #[test]
    fn test_null_audio_discards() {
        let mut audio = NullAudio;
        audio.play(SoundEffect::GameOver);
    }
}
