//! Best-effort text-to-speech.
//!
//! Narration is decorative: callers hand over a sentence and move on. Nothing
//! here reports failure back to the caller.

use std::process::{Child, Command, Stdio};
use std::sync::Mutex;
use tracing::{debug, info, warn};

pub trait Narrator: Send + Sync {
    /// Speak `text` aloud without waiting for playback.
    fn speak(&self, text: &str);

    /// Stop any ongoing speech.
    fn cancel(&self) {}

    /// True while an utterance is still playing.
    fn is_speaking(&self) -> bool {
        false
    }
}

/// Narrator that only logs. Used when narration is disabled or muted.
#[derive(Debug, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&self, text: &str) {
        debug!("narration muted: {text}");
    }
}

/// Speaks through an external TTS program (e.g. `espeak-ng`).
///
/// The text is passed as the final argument. Only one utterance plays at a
/// time: speaking again stops the previous child. Finished children are
/// reaped by [`Narrator::is_speaking`], [`Narrator::cancel`] or the next
/// utterance.
pub struct SpeechCommand {
    program: String,
    args: Vec<String>,
    current: Mutex<Option<Child>>,
}

impl SpeechCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            current: Mutex::new(None),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

fn stop_child(mut child: Child) {
    // Fails harmlessly if the child already exited
    let _ = child.kill();
    let _ = child.wait();
}

impl Narrator for SpeechCommand {
    fn speak(&self, text: &str) {
        let Ok(mut current) = self.current.lock() else {
            warn!("Narration state poisoned, skipping: {}", text);
            return;
        };
        if let Some(previous) = current.take() {
            stop_child(previous);
        }

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                info!("Narrating via {}: {}", self.program, text);
                *current = Some(child);
            }
            Err(e) => {
                warn!("Narration unavailable ({}): {}", self.program, e);
            }
        }
    }

    fn cancel(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(child) = current.take() {
                stop_child(child);
            }
        }
    }

    fn is_speaking(&self) -> bool {
        let Ok(mut current) = self.current.lock() else {
            return false;
        };
        let running = current
            .as_mut()
            .is_some_and(|child| matches!(child.try_wait(), Ok(None)));
        if !running {
            // try_wait has already reaped it
            current.take();
        }
        running
    }
}

impl Drop for SpeechCommand {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Narrator;
    use std::sync::Mutex;

    /// Records everything it is asked to say
    #[derive(Default)]
    pub struct RecordingNarrator {
        pub spoken: Mutex<Vec<String>>,
        pub cancels: Mutex<usize>,
        pub speaking: Mutex<bool>,
    }

    impl RecordingNarrator {
        pub fn lines(&self) -> Vec<String> {
            self.spoken.lock().unwrap().clone()
        }

        pub fn cancel_count(&self) -> usize {
            *self.cancels.lock().unwrap()
        }

        /// Let the current utterance end on its own
        pub fn finish(&self) {
            *self.speaking.lock().unwrap() = false;
        }
    }

    impl Narrator for RecordingNarrator {
        fn speak(&self, text: &str) {
            self.spoken.lock().unwrap().push(text.to_string());
            *self.speaking.lock().unwrap() = true;
        }

        fn cancel(&self) {
            *self.cancels.lock().unwrap() += 1;
            *self.speaking.lock().unwrap() = false;
        }

        fn is_speaking(&self) -> bool {
            *self.speaking.lock().unwrap()
        }
    }
}
