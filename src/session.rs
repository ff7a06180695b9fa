/*!
 * Interactive session menu
 *
 * A single-threaded loop around one waiting state: print the menu, read a
 * choice, run the action, return to the menu. Every action is atomic and
 * there is no cross-action sequencing, so the state machine is this loop
 * plus the `SessionState` value it mutates.
 */

use std::io::{BufRead, Write};

use anyhow::Result;
use log::{error, warn};

use crate::analysis::{AnalysisOutcome, AnalysisService};
use crate::document::Document;
use crate::language_utils;
use crate::voice::VoiceIo;

/// Mutable per-session state, passed through every menu action
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Current source language (full name, user-supplied)
    pub language: String,
    /// Whether explanations are spoken aloud
    pub tts_enabled: bool,
    /// Last explanation, kept for replay (empty until the first question)
    pub last_explanation: String,
}

impl SessionState {
    /// Create session state with the given language and initial TTS setting
    pub fn new(language: impl Into<String>, tts_enabled: bool) -> Self {
        Self {
            language: language.into(),
            tts_enabled,
            last_explanation: String::new(),
        }
    }

    /// Flip the text-to-speech flag, returning the new value
    pub fn toggle_tts(&mut self) -> bool {
        self.tts_enabled = !self.tts_enabled;
        self.tts_enabled
    }

    /// Replace the current language; empty or whitespace input is rejected
    pub fn set_language(&mut self, new_language: &str) -> bool {
        let trimmed = new_language.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.language = trimmed.to_string();
        true
    }

    /// Store the explanation of the latest successful question
    pub fn record_explanation(&mut self, explanation: &str) {
        self.last_explanation = explanation.to_string();
    }

    /// Two-letter locale hint derived from the current language
    pub fn locale_hint(&self) -> String {
        language_utils::speech_locale(&self.language)
    }
}

/// One of the six menu actions, or an unrecognized input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuChoice {
    /// Ask a question typed at the prompt
    AskTyped,
    /// Ask a question captured from the microphone
    AskVoice,
    /// Change the session's source language
    ChangeLanguage,
    /// Redisplay (and optionally replay) the last explanation
    ReplayLast,
    /// Flip the text-to-speech flag
    ToggleSpeech,
    /// Leave the session
    Exit,
    /// Anything else
    Invalid,
}

impl MenuChoice {
    /// Parse a menu input line into a choice
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => Self::AskTyped,
            "2" => Self::AskVoice,
            "3" => Self::ChangeLanguage,
            "4" => Self::ReplayLast,
            "5" => Self::ToggleSpeech,
            "6" => Self::Exit,
            _ => Self::Invalid,
        }
    }
}

/// Interactive question-answering session over one document
pub struct Session {
    state: SessionState,
    document: Document,
    analysis: AnalysisService,
    /// Voice adapters; None runs the session text-only
    voice: Option<VoiceIo>,
}

impl Session {
    /// Create a session with defaults derived from the document
    pub fn new(
        document: Document,
        analysis: AnalysisService,
        voice: Option<VoiceIo>,
        tts_enabled: bool,
    ) -> Self {
        let state = SessionState::new(document.language(), tts_enabled);
        Self {
            state,
            document,
            analysis,
            voice,
        }
    }

    /// Current session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run the menu loop until the user exits
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu();

            let Some(input) = prompt_line("Enter choice: ")? else {
                break;
            };

            match MenuChoice::parse(&input) {
                MenuChoice::AskTyped => {
                    let Some(question) = prompt_line("> Your question: ")? else {
                        break;
                    };
                    if question.trim().is_empty() {
                        println!("Question was empty, returning to menu.");
                    } else {
                        self.ask(question.trim()).await;
                    }
                }
                MenuChoice::AskVoice => {
                    self.ask_voice().await;
                }
                MenuChoice::ChangeLanguage => {
                    let Some(new_language) =
                        prompt_line("Enter new language (e.g., Tamil, Hindi, English): ")?
                    else {
                        break;
                    };
                    if self.change_language(&new_language) {
                        println!("Language changed to {}", self.state.language);
                    } else {
                        println!("Language unchanged.");
                    }
                }
                MenuChoice::ReplayLast => {
                    self.replay_last().await;
                }
                MenuChoice::ToggleSpeech => {
                    let enabled = self.state.toggle_tts();
                    println!(
                        "Text-to-speech is now {}",
                        if enabled { "ON" } else { "OFF" }
                    );
                }
                MenuChoice::Exit => {
                    println!("Goodbye! See you again.");
                    break;
                }
                MenuChoice::Invalid => {
                    println!("Invalid choice, please try again.");
                }
            }
        }

        Ok(())
    }

    /// Answer a typed or transcribed question and display the result
    ///
    /// Stores the explanation (not the quotation) for replay and speaks it
    /// when text-to-speech is enabled.
    pub async fn ask(&mut self, question: &str) -> AnalysisOutcome {
        let outcome = self
            .analysis
            .answer_question(self.document.text(), question, &self.state.language)
            .await;

        self.state.record_explanation(&outcome.explanation);
        display_outcome(&outcome);
        self.speak(&outcome.explanation).await;

        outcome
    }

    /// Capture a spoken question and answer it
    pub async fn ask_voice(&mut self) -> Option<AnalysisOutcome> {
        let Some(voice) = &self.voice else {
            println!("Voice input is not available in this session.");
            return None;
        };

        match voice.listen(&self.state.locale_hint()).await {
            Ok(question) if !question.trim().is_empty() => {
                println!("You said: {}", question);
                Some(self.ask(question.trim()).await)
            }
            Ok(_) => {
                println!("Could not understand audio, try again.");
                None
            }
            Err(e) => {
                error!("Speech capture failed: {}", e);
                println!("Could not understand audio, try again.");
                None
            }
        }
    }

    /// Replace the session language; empty input leaves it untouched
    pub fn change_language(&mut self, new_language: &str) -> bool {
        self.state.set_language(new_language)
    }

    /// Redisplay and optionally re-speak the stored explanation
    ///
    /// Returns false when no question has been answered yet.
    pub async fn replay_last(&mut self) -> bool {
        if self.state.last_explanation.is_empty() {
            println!("No explanation available yet.");
            return false;
        }

        println!("Replaying last explanation:\n{}", self.state.last_explanation);
        let last = self.state.last_explanation.clone();
        self.speak(&last).await;
        true
    }

    /// Speak text when a voice adapter is present and TTS is on
    async fn speak(&self, text: &str) {
        if !self.state.tts_enabled {
            return;
        }
        let Some(voice) = &self.voice else {
            return;
        };

        if let Err(e) = voice.speak(text, &self.state.locale_hint()).await {
            warn!("Text-to-speech failed: {}", e);
        }
    }

    /// Print the main menu with the live TTS state
    fn print_menu(&self) {
        println!();
        println!("==== Main Menu ====");
        println!(" 1) Ask a question (type)");
        println!(" 2) Ask a question (voice)");
        println!(" 3) Change language");
        println!(" 4) Replay last explanation");
        println!(
            " 5) Toggle text-to-speech (currently {})",
            if self.state.tts_enabled { "ON" } else { "OFF" }
        );
        println!(" 6) Exit");
    }
}

/// Display an answer and its supporting quotation
fn display_outcome(outcome: &AnalysisOutcome) {
    println!();
    println!("Explanation:");
    println!("{}", outcome.explanation);
    println!();
    println!("Source:");
    println!("\"{}\"", outcome.source_quote);
}

/// Print a prompt and read one line from stdin; None means end of input
fn prompt_line(prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut line = String::new();
    let bytes = std::io::stdin().lock().read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
