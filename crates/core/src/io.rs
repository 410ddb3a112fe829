//! Collaborator seams: key input, frame output, and audio.
//!
//! The world never touches the terminal or the sound device directly. It
//! calls through these traits, so a headless world can run with
//! [`ScriptedKeys`], [`CaptureSink`], and [`SilentAudio`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use tdtbge_types::QUIT_KEY;

/// Produces one key per call, blocking until one is available.
pub trait KeySource {
    fn read_key(&mut self) -> io::Result<char>;
}

/// Receives each finished frame.
pub trait FrameSink {
    fn present(&mut self, frame: &str) -> io::Result<()>;

    /// Debug side channel. Ignored unless overridden.
    fn diagnostic(&mut self, _line: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Fire-and-forget sound playback.
pub trait AudioSink {
    fn play(&mut self, clip: &str);

    /// Whether `clip` is still playing as background music.
    fn is_playing(&mut self, _clip: &str) -> bool {
        false
    }

    /// Start `clip` as background music.
    fn play_music(&mut self, clip: &str) {
        self.play(clip);
    }
}

/// Replays a fixed key sequence, then reports the quit key forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<char>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = char>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<char> {
        Ok(self.keys.pop_front().unwrap_or(QUIT_KEY))
    }
}

/// Shared log of everything a world printed.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub frames: Vec<String>,
    pub diagnostics: Vec<String>,
}

/// Records frames and diagnostics in memory.
///
/// Clones share the same transcript, so a test can keep one handle and give
/// the other to the world.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    transcript: Rc<RefCell<Transcript>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<String> {
        self.transcript.borrow().frames.clone()
    }

    pub fn diagnostics(&self) -> Vec<String> {
        self.transcript.borrow().diagnostics.clone()
    }

    pub fn last_frame(&self) -> Option<String> {
        self.transcript.borrow().frames.last().cloned()
    }
}

impl FrameSink for CaptureSink {
    fn present(&mut self, frame: &str) -> io::Result<()> {
        self.transcript.borrow_mut().frames.push(frame.to_string());
        Ok(())
    }

    fn diagnostic(&mut self, line: &str) -> io::Result<()> {
        self.transcript
            .borrow_mut()
            .diagnostics
            .push(line.to_string());
        Ok(())
    }
}

/// Output that discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Audio that only logs what it was asked to play.
#[derive(Debug, Clone, Default)]
pub struct SilentAudio {
    music: Option<String>,
}

impl AudioSink for SilentAudio {
    fn play(&mut self, clip: &str) {
        log::trace!("play {}", clip);
    }

    fn is_playing(&mut self, clip: &str) -> bool {
        self.music.as_deref() == Some(clip)
    }

    fn play_music(&mut self, clip: &str) {
        log::trace!("music {}", clip);
        self.music = Some(clip.to_string());
    }
}

/// Records every requested clip; clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    played: Rc<RefCell<Vec<String>>>,
    music: Rc<RefCell<Option<String>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<String> {
        self.played.borrow().clone()
    }

    pub fn stop_music(&self) {
        self.music.borrow_mut().take();
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, clip: &str) {
        self.played.borrow_mut().push(clip.to_string());
    }

    fn is_playing(&mut self, clip: &str) -> bool {
        self.music.borrow().as_deref() == Some(clip)
    }

    fn play_music(&mut self, clip: &str) {
        self.play(clip);
        *self.music.borrow_mut() = Some(clip.to_string());
    }
}
