//! Ambient background music
//!
//! The view state never touches audio directly. It emits `AudioCue`s, and
//! `AmbientAudio` turns them into calls on an `AudioBackend`. Playback
//! problems are logged and otherwise ignored.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use thiserror::Error;
use tracing::{debug, warn};

/// Background tracks, one per kind of screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    /// Plays on every screen except the loading screen
    Landing,
    /// Plays while a request is outstanding
    Loading,
}

impl Track {
    /// Short name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Track::Landing => "landing",
            Track::Loading => "loading",
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Declarative playback instruction emitted by a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Start (or keep) playing a track
    Play(Track),
    /// Stop a track
    Pause(Track),
    /// Silence all output, keeping track of what is playing
    Mute,
    /// Restore output
    Unmute,
}

/// Errors raised by audio backends
#[derive(Debug, Error)]
pub enum AudioError {
    /// No file was configured for the requested track
    #[error("No audio file configured for the {0} track")]
    MissingTrack(Track),

    /// The player command line is empty
    #[error("Audio player command is empty")]
    EmptyCommand,

    /// The external player could not be started or stopped
    #[error("Audio player '{program}' failed: {source}")]
    Player {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can make a track audible or silent
pub trait AudioBackend {
    /// Starts audible playback of a track
    fn start(&mut self, track: Track) -> Result<(), AudioError>;

    /// Stops audible playback of a track
    fn stop(&mut self, track: Track) -> Result<(), AudioError>;
}

/// Backend that produces no sound and only logs what it would do
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn start(&mut self, track: Track) -> Result<(), AudioError> {
        debug!(track = track.name(), "audio start (silent)");
        Ok(())
    }

    fn stop(&mut self, track: Track) -> Result<(), AudioError> {
        debug!(track = track.name(), "audio stop (silent)");
        Ok(())
    }
}

/// Audio files for each track
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackFiles {
    /// File played by the landing track
    pub landing: Option<PathBuf>,
    /// File played by the loading track
    pub loading: Option<PathBuf>,
}

impl TrackFiles {
    fn path(&self, track: Track) -> Option<&PathBuf> {
        match track {
            Track::Landing => self.landing.as_ref(),
            Track::Loading => self.loading.as_ref(),
        }
    }
}

/// Backend that plays tracks through an external command-line player
///
/// The track file is appended to the configured command line, e.g.
/// `mpv --loop=inf --no-video` becomes `mpv --loop=inf --no-video landing.mp3`.
/// Only one player process runs at a time.
///
/// Stopping a track kills its player, and a player cannot be silenced while
/// it keeps running. Muting therefore ends the process, and unmuting starts
/// the track again from the beginning instead of at the point it would have
/// reached.
#[derive(Debug)]
pub struct CommandBackend {
    program: String,
    args: Vec<String>,
    files: TrackFiles,
    current: Option<(Track, Child)>,
}

impl CommandBackend {
    /// Builds a backend from a whitespace-separated command line
    ///
    /// # Arguments
    /// * `command_line` - Player program followed by its arguments
    /// * `files` - Audio files for each track
    pub fn from_command_line(command_line: &str, files: TrackFiles) -> Result<Self, AudioError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(AudioError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
            files,
            current: None,
        })
    }

    /// Program that will be spawned
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed before the track file
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Track whose player process is still running
    ///
    /// A player that has exited on its own (no loop option, or a crash) is
    /// reaped here and no longer counts as playing.
    pub fn running_track(&mut self) -> Option<Track> {
        let (track, child) = self.current.as_mut()?;
        match child.try_wait() {
            Ok(None) => Some(*track),
            Ok(Some(status)) => {
                debug!(track = track.name(), %status, "audio player exited");
                self.current = None;
                None
            }
            Err(err) => {
                warn!(track = track.name(), error = %err, "audio player state unknown");
                self.current = None;
                None
            }
        }
    }

    fn kill_current(&mut self) -> Result<(), AudioError> {
        let Some((_, mut child)) = self.current.take() else {
            return Ok(());
        };
        let result = child.kill().and_then(|_| child.wait().map(|_| ()));
        result.map_err(|source| AudioError::Player {
            program: self.program.clone(),
            source,
        })
    }
}

impl AudioBackend for CommandBackend {
    fn start(&mut self, track: Track) -> Result<(), AudioError> {
        if self.running_track() == Some(track) {
            return Ok(());
        }
        let path = self
            .files
            .path(track)
            .cloned()
            .ok_or(AudioError::MissingTrack(track))?;
        self.kill_current()?;

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AudioError::Player {
                program: self.program.clone(),
                source,
            })?;
        self.current = Some((track, child));
        Ok(())
    }

    fn stop(&mut self, track: Track) -> Result<(), AudioError> {
        match self.current {
            Some((playing, _)) if playing == track => self.kill_current(),
            _ => Ok(()),
        }
    }
}

impl Drop for CommandBackend {
    fn drop(&mut self) {
        let _ = self.kill_current();
    }
}

/// Executes audio cues against a backend
///
/// Tracks which track is logically playing separately from whether it is
/// audible, so muting and unmuting resumes whatever the current screen wants.
pub struct AmbientAudio {
    backend: Box<dyn AudioBackend + Send>,
    playing: Option<Track>,
    muted: bool,
}

impl AmbientAudio {
    /// Creates a new handler
    ///
    /// # Arguments
    /// * `backend` - Where audible playback happens
    /// * `muted` - Whether output starts silenced
    pub fn new(backend: Box<dyn AudioBackend + Send>, muted: bool) -> Self {
        Self {
            backend,
            playing: None,
            muted,
        }
    }

    /// Creates a muted handler with a silent backend
    pub fn silent() -> Self {
        Self::new(Box::new(SilentBackend), true)
    }

    /// Track that is logically playing, audible or not
    pub fn playing(&self) -> Option<Track> {
        self.playing
    }

    /// Whether output is silenced
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Applies a single cue. Failures are logged and swallowed.
    pub fn handle(&mut self, cue: AudioCue) {
        if let Err(err) = self.apply(cue) {
            warn!(?cue, error = %err, "audio playback failed");
        }
    }

    fn apply(&mut self, cue: AudioCue) -> Result<(), AudioError> {
        match cue {
            AudioCue::Play(track) => {
                let previous = self.playing.replace(track);
                if self.muted {
                    return Ok(());
                }
                if let Some(old) = previous.filter(|old| *old != track) {
                    self.backend.stop(old)?;
                }
                self.backend.start(track)
            }
            AudioCue::Pause(track) => {
                if self.playing != Some(track) {
                    return Ok(());
                }
                self.playing = None;
                if self.muted {
                    return Ok(());
                }
                self.backend.stop(track)
            }
            AudioCue::Mute => {
                if self.muted {
                    return Ok(());
                }
                self.muted = true;
                match self.playing {
                    Some(track) => self.backend.stop(track),
                    None => Ok(()),
                }
            }
            AudioCue::Unmute => {
                // The cue that follows an unmute restarts the current track.
                self.muted = false;
                Ok(())
            }
        }
    }
}
