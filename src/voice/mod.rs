/*!
 * Voice I/O adapters: microphone capture, speech recognition, and speech
 * synthesis.
 *
 * Capture and playback are synchronous with respect to the session loop; a
 * question is fully recorded before transcription starts, and playback of an
 * explanation blocks until the audio finishes.
 */

pub mod capture;
pub mod stt;
pub mod tts;

pub use stt::SpeechRecognizer;
pub use tts::SpeechSynthesizer;

use crate::app_config::SpeechConfig;
use crate::errors::SpeechError;

/// Combined voice input/output facade handed to the session menu
pub struct VoiceIo {
    recognizer: SpeechRecognizer,
    synthesizer: SpeechSynthesizer,
}

impl VoiceIo {
    /// Build both adapters from the speech configuration
    pub fn new(config: SpeechConfig) -> Self {
        Self {
            recognizer: SpeechRecognizer::new(config.clone()),
            synthesizer: SpeechSynthesizer::new(config),
        }
    }

    /// Capture a spoken question and transcribe it with the given locale hint
    pub async fn listen(&self, locale: &str) -> Result<String, SpeechError> {
        self.recognizer.listen(locale).await
    }

    /// Speak text aloud in the given two-letter language code
    pub async fn speak(&self, text: &str, lang_code: &str) -> Result<(), SpeechError> {
        self.synthesizer.speak(text, lang_code).await
    }
}
