use crate::config::SoundConfig;
use gtk::prelude::*;
use gtk::MediaFile;
use std::path::PathBuf;

/// Plays the evaluation chime. Every failure is swallowed; a missing sound never
/// gets in the way of a calculation.
pub struct Chime {
    path: Option<PathBuf>,
    // Holds the stream alive until the next play; dropping it stops playback.
    current: Option<MediaFile>,
}

impl Chime {
    pub fn new(config: &SoundConfig) -> Self {
        Self {
            path: config.enabled.then(|| config.path.clone()),
            current: None,
        }
    }

    pub fn play(&mut self) {
        let Some(path) = &self.path else {
            return;
        };
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "chime file not found, skipping");
            return;
        }

        let media = MediaFile::for_filename(path);
        media.connect_error_notify(|stream| {
            if let Some(err) = stream.error() {
                tracing::debug!(error = %err, "chime playback failed");
            }
        });
        media.play();
        self.current = Some(media);
    }
}
