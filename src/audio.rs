//! Sound cues
//!
//! The host owns actual playback. The simulation only queues cues during a
//! frame; the host drains the queue afterwards and plays each one
//! (fire-and-forget).

/// Opaque handle to a sound loaded by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u32);

/// A loaded sound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sound {
    id: SoundId,
}

impl Sound {
    pub fn new(id: SoundId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> SoundId {
        self.id
    }

    /// Queue this sound for playback at the end of the frame
    pub fn play(&self, audio: &mut AudioQueue) {
        audio.push(self.id);
    }
}

/// Sound cues raised during the current frame
#[derive(Debug, Default)]
pub struct AudioQueue {
    pending: Vec<SoundId>,
    muted: bool,
    /// Cues accepted since the queue was created
    total_played: u64,
}

impl AudioQueue {
    pub fn new(muted: bool) -> Self {
        Self {
            pending: Vec::with_capacity(16),
            muted,
            total_played: 0,
        }
    }

    /// Mute/unmute; muted cues are dropped on arrival
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn push(&mut self, id: SoundId) {
        if self.muted {
            return;
        }
        self.pending.push(id);
        self.total_played += 1;
    }

    /// Take every pending cue, leaving the queue empty
    pub fn drain(&mut self) -> Vec<SoundId> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn total_played(&self) -> u64 {
        self.total_played
    }
}
