//! Audio collaborator.
//!
//! With the `audio` feature, clips are decoded and played through rodio: each
//! effect on its own detached sink, background music on a sink that is kept
//! so the world can ask whether it is still playing. Without the feature,
//! requests are only logged.

use tdtbge_core::AudioSink;

#[cfg(feature = "audio")]
mod backend {
    use std::fs::File;
    use std::io::BufReader;

    use anyhow::Result;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    pub struct Backend {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Option<(String, Sink)>,
    }

    impl Backend {
        pub fn open() -> Result<Self> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
                music: None,
            })
        }

        fn sink_for(&self, clip: &str) -> Result<Sink> {
            let sink = Sink::try_new(&self.handle)?;
            let file = File::open(clip)?;
            sink.append(Decoder::new(BufReader::new(file))?);
            Ok(sink)
        }

        pub fn play(&mut self, clip: &str) -> Result<()> {
            self.sink_for(clip)?.detach();
            Ok(())
        }

        pub fn play_music(&mut self, clip: &str) -> Result<()> {
            let sink = self.sink_for(clip)?;
            self.music = Some((clip.to_string(), sink));
            Ok(())
        }

        pub fn is_playing(&self, clip: &str) -> bool {
            matches!(&self.music, Some((name, sink)) if name == clip && !sink.empty())
        }
    }
}

/// Plays sounds on the default output device when one is available.
pub struct TerminalAudio {
    #[cfg(feature = "audio")]
    backend: Option<backend::Backend>,
    music: Option<String>,
}

impl TerminalAudio {
    /// Open the default device; falls back to silence if there is none.
    pub fn open() -> Self {
        Self {
            #[cfg(feature = "audio")]
            backend: match backend::Backend::open() {
                Ok(backend) => Some(backend),
                Err(err) => {
                    log::warn!("audio disabled: {}", err);
                    None
                }
            },
            music: None,
        }
    }

    /// Never plays anything.
    pub fn silent() -> Self {
        Self {
            #[cfg(feature = "audio")]
            backend: None,
            music: None,
        }
    }
}

impl AudioSink for TerminalAudio {
    fn play(&mut self, clip: &str) {
        log::debug!("sound {}", clip);
        #[cfg(feature = "audio")]
        if let Some(backend) = self.backend.as_mut() {
            if let Err(err) = backend.play(clip) {
                log::warn!("failed to play {}: {}", clip, err);
            }
        }
    }

    fn is_playing(&mut self, clip: &str) -> bool {
        #[cfg(feature = "audio")]
        if let Some(backend) = self.backend.as_ref() {
            return backend.is_playing(clip);
        }
        self.music.as_deref() == Some(clip)
    }

    fn play_music(&mut self, clip: &str) {
        log::info!("music {}", clip);
        self.music = Some(clip.to_string());
        #[cfg(feature = "audio")]
        if let Some(backend) = self.backend.as_mut() {
            if let Err(err) = backend.play_music(clip) {
                log::warn!("failed to play {}: {}", clip, err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_audio_remembers_music_only() {
        let mut audio = TerminalAudio::silent();
        audio.play("coin.wav");
        assert!(!audio.is_playing("theme.wav"));
        audio.play_music("theme.wav");
        assert!(audio.is_playing("theme.wav"));
        assert!(!audio.is_playing("coin.wav"));
    }
}
