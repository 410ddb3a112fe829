//! TerminalRenderer: prints world frames to a real terminal.
//!
//! Frames are encoded into a byte buffer first and written in one go, so a
//! frame never appears half drawn.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};

use tdtbge_core::FrameSink;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    clear_between_frames: bool,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    /// `debug` keeps previous frames and diagnostics on screen.
    pub fn new(debug: bool) -> Self {
        Self {
            stdout: io::stdout(),
            clear_between_frames: !debug,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.buf.clear();
        if self.clear_between_frames {
            self.buf.queue(terminal::EnterAlternateScreen)?;
        }
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        if self.clear_between_frames {
            self.buf.queue(terminal::LeaveAlternateScreen)?;
        }
        self.flush_buf()?;
        if terminal::is_raw_mode_enabled()? {
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()
    }
}

impl FrameSink for TerminalRenderer {
    fn present(&mut self, frame: &str) -> io::Result<()> {
        self.buf.clear();
        encode_frame_into(frame, self.clear_between_frames, &mut self.buf)?;
        self.flush_buf()
    }

    fn diagnostic(&mut self, line: &str) -> io::Result<()> {
        self.buf.clear();
        self.buf.queue(Print(line))?;
        self.buf.queue(Print("\r\n"))?;
        self.flush_buf()
    }
}

/// Encode a frame into `out`.
///
/// Lines end in `\r\n` so the block also lays out correctly while the
/// terminal is in raw mode.
pub fn encode_frame_into(frame: &str, clear: bool, out: &mut Vec<u8>) -> io::Result<()> {
    if clear {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        out.queue(cursor::MoveTo(0, 0))?;
    }
    for line in frame.lines() {
        out.queue(Print(line))?;
        out.queue(Print("\r\n"))?;
    }
    out.queue(ResetColor)?;
    Ok(())
}
