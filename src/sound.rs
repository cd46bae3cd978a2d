//! Sound cues for game events
//!
//! The terminal has no mixer, so cues ring the terminal bell. The game core
//! never calls into this module; the driver maps tick outcomes to cues.

use log::trace;
use std::io::{self, Write};

use crate::game::TickOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Food was eaten
    Eat,
    /// The snake hit a wall or itself
    Wall,
}

impl SoundCue {
    /// The cue a tick outcome should play, if any
    pub fn for_outcome(outcome: &TickOutcome) -> Option<SoundCue> {
        match outcome {
            TickOutcome::Ate => Some(SoundCue::Eat),
            TickOutcome::GameOver { .. } => Some(SoundCue::Wall),
            TickOutcome::Idle | TickOutcome::Moved => None,
        }
    }
}

pub trait SoundSink {
    fn play(&mut self, cue: SoundCue) -> io::Result<()>;
}

/// Rings the bell once for food and twice for a crash
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SoundSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) -> io::Result<()> {
        trace!("Playing {:?}", cue);
        let bells: &[u8] = match cue {
            SoundCue::Eat => b"\x07",
            SoundCue::Wall => b"\x07\x07",
        };
        self.out.write_all(bells)?;
        self.out.flush()
    }
}

/// Plays nothing
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: SoundCue) -> io::Result<()> {
        Ok(())
    }
}
