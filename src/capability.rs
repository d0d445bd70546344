//! Host capabilities the interview room can use when present: camera/microphone
//! capture and speech-to-text. The room probes each one on entry and falls back to a
//! text-only mode when a probe fails; neither ever blocks the session.

use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::CapabilityError;

/// Source of a combined audio/video handle.
pub trait MediaCapture {
    fn acquire(&self) -> Result<MediaHandle, CapabilityError>;
}

/// Live camera/microphone handle. Released on drop so every exit path frees it.
pub struct MediaHandle {
    device: String,
    camera_on: bool,
    mic_on: bool,
    released: bool,
    on_release: Option<Box<dyn FnOnce()>>,
}

impl MediaHandle {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            camera_on: true,
            mic_on: true,
            released: false,
            on_release: None,
        }
    }

    /// Run `hook` exactly once when the handle is released, e.g. to close a capture stream.
    pub fn with_release_hook(mut self, hook: impl FnOnce() + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn camera_on(&self) -> bool {
        self.camera_on && !self.released
    }

    pub fn mic_on(&self) -> bool {
        self.mic_on && !self.released
    }

    pub fn toggle_camera(&mut self) -> bool {
        if !self.released {
            self.camera_on = !self.camera_on;
        }
        self.camera_on()
    }

    pub fn toggle_mic(&mut self) -> bool {
        if !self.released {
            self.mic_on = !self.mic_on;
        }
        self.mic_on()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            if let Some(hook) = self.on_release.take() {
                hook();
            }
            info!(device = %self.device, "media handle released");
        }
    }
}

impl fmt::Debug for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaHandle")
            .field("device", &self.device)
            .field("camera_on", &self.camera_on)
            .field("mic_on", &self.mic_on)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

impl Drop for MediaHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Probes well-known device nodes for a camera and a microphone.
#[derive(Debug, Clone)]
pub struct DeviceProbe {
    video_nodes: Vec<PathBuf>,
    audio_nodes: Vec<PathBuf>,
}

impl DeviceProbe {
    pub fn new(video_nodes: Vec<PathBuf>, audio_nodes: Vec<PathBuf>) -> Self {
        Self {
            video_nodes,
            audio_nodes,
        }
    }
}

impl Default for DeviceProbe {
    fn default() -> Self {
        Self::new(
            vec![PathBuf::from("/dev/video0"), PathBuf::from("/dev/video1")],
            vec![PathBuf::from("/dev/snd")],
        )
    }
}

impl MediaCapture for DeviceProbe {
    fn acquire(&self) -> Result<MediaHandle, CapabilityError> {
        let video = self
            .video_nodes
            .iter()
            .find(|p| p.exists())
            .ok_or_else(|| CapabilityError::MediaAccessDenied("no camera found".into()))?;
        if !self.audio_nodes.iter().any(|p| p.exists()) {
            return Err(CapabilityError::MediaAccessDenied(
                "no microphone found".into(),
            ));
        }
        debug!(device = %video.display(), "media devices detected");
        Ok(MediaHandle::new(video.display().to_string()))
    }
}

/// Capture source for hosts without any media devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMedia;

impl MediaCapture for NoMedia {
    fn acquire(&self) -> Result<MediaHandle, CapabilityError> {
        Err(CapabilityError::MediaAccessDenied(
            "media capture disabled".into(),
        ))
    }
}

/// Speech-to-text engine producing interim transcripts while listening.
pub trait SpeechRecognizer {
    fn is_available(&self) -> bool;
    fn start(&mut self) -> Result<(), CapabilityError>;
    fn stop(&mut self);
    fn is_listening(&self) -> bool;
    /// Latest transcript for the current utterance, if it changed since the last poll.
    fn poll(&mut self) -> Option<String>;
}

/// The voice control is inert on hosts without speech recognition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl SpeechRecognizer for Unsupported {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self) -> Result<(), CapabilityError> {
        Err(CapabilityError::SpeechRecognitionUnavailable)
    }

    fn stop(&mut self) {}

    fn is_listening(&self) -> bool {
        false
    }

    fn poll(&mut self) -> Option<String> {
        None
    }
}

/// Replays a fixed utterance one word per poll, the way a continuous recognizer
/// grows its interim result. Stops by itself after the last word.
#[derive(Debug, Clone)]
pub struct ScriptedRecognizer {
    words: Vec<String>,
    emitted: usize,
    listening: bool,
}

impl ScriptedRecognizer {
    pub fn new(utterance: &str) -> Self {
        Self {
            words: utterance.split_whitespace().map(str::to_string).collect(),
            emitted: 0,
            listening: false,
        }
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn is_available(&self) -> bool {
        true
    }

    fn start(&mut self) -> Result<(), CapabilityError> {
        self.emitted = 0;
        self.listening = !self.words.is_empty();
        Ok(())
    }

    fn stop(&mut self) {
        self.listening = false;
    }

    fn is_listening(&self) -> bool {
        self.listening
    }

    fn poll(&mut self) -> Option<String> {
        if !self.listening {
            return None;
        }
        self.emitted += 1;
        if self.emitted >= self.words.len() {
            self.listening = false;
        }
        Some(self.words[..self.emitted].join(" "))
    }
}
