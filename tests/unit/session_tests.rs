/*!
 * Tests for session state and menu choice handling
 */

use anyhow::Result;
use legalens::analysis::AnalysisService;
use legalens::document::Document;
use legalens::providers::mock::MockProvider;
use legalens::session::{MenuChoice, Session, SessionState};

/// Build a session over a small English document and a scripted provider
fn test_session(mock: MockProvider) -> Result<Session> {
    let document = Document::from_text(
        "The tenant shall pay rent by the 5th of each month.",
        "English",
    )?;
    let analysis = AnalysisService::with_mock(mock);
    Ok(Session::new(document, analysis, None, true))
}

fn well_formed_response(_prompt: &str) -> String {
    "**Explanation (English):**\nRent is due by the 5th.\n\n\
     **Source from original document (English):**\n\
     \"The tenant shall pay rent by the 5th of each month.\""
        .to_string()
}

/// Test menu input parsing
#[test]
fn test_menuChoice_parse_shouldMapDigitsAndRejectEverythingElse() {
    assert_eq!(MenuChoice::parse("1"), MenuChoice::AskTyped);
    assert_eq!(MenuChoice::parse("2"), MenuChoice::AskVoice);
    assert_eq!(MenuChoice::parse("3"), MenuChoice::ChangeLanguage);
    assert_eq!(MenuChoice::parse("4"), MenuChoice::ReplayLast);
    assert_eq!(MenuChoice::parse("5"), MenuChoice::ToggleSpeech);
    assert_eq!(MenuChoice::parse("6"), MenuChoice::Exit);

    // Whitespace is tolerated, anything else is invalid
    assert_eq!(MenuChoice::parse(" 4 "), MenuChoice::ReplayLast);
    assert_eq!(MenuChoice::parse("7"), MenuChoice::Invalid);
    assert_eq!(MenuChoice::parse("exit"), MenuChoice::Invalid);
    assert_eq!(MenuChoice::parse(""), MenuChoice::Invalid);
}

/// Test that toggling TTS twice restores the original state
#[test]
fn test_sessionState_toggleTts_shouldBeAnInvolution() {
    let mut state = SessionState::new("English", true);

    assert!(!state.toggle_tts());
    assert!(state.toggle_tts());
    assert!(state.tts_enabled);
}

/// Test language changes, including the empty-input guard
#[test]
fn test_sessionState_setLanguage_shouldRejectEmptyInput() {
    let mut state = SessionState::new("English", true);

    assert!(state.set_language("Tamil"));
    assert_eq!(state.language, "Tamil");
    assert_eq!(state.locale_hint(), "ta");

    assert!(!state.set_language("   "));
    assert_eq!(state.language, "Tamil");

    assert!(state.set_language("  Hindi  "));
    assert_eq!(state.language, "Hindi");
}

/// Test that a fresh session starts with the document language and no replay
#[tokio::test]
async fn test_session_freshState_shouldHaveNoReplayableExplanation() -> Result<()> {
    let mock = MockProvider::working();
    let mut session = test_session(mock.clone())?;

    assert_eq!(session.state().language, "English");
    assert!(session.state().last_explanation.is_empty());

    // Replaying before any question reports unavailability without crashing
    // and without touching the provider
    assert!(!session.replay_last().await);
    assert!(mock.prompts().is_empty());
    Ok(())
}

/// Test that answering a question stores only the explanation for replay
#[tokio::test]
async fn test_session_ask_shouldRecordExplanationForReplay() -> Result<()> {
    let mock = MockProvider::working().with_responder(well_formed_response);
    let mut session = test_session(mock)?;

    let outcome = session.ask("When is rent due?").await;

    assert_eq!(outcome.explanation, "Rent is due by the 5th.");
    assert_eq!(session.state().last_explanation, "Rent is due by the 5th.");
    // The quotation is not part of the replay text
    assert!(!session.state().last_explanation.contains("tenant shall pay"));

    assert!(session.replay_last().await);
    Ok(())
}

/// Test that a failed question still records the failure explanation
#[tokio::test]
async fn test_session_ask_withFailingProvider_shouldRecordFailureText() -> Result<()> {
    let mut session = test_session(MockProvider::failing())?;

    let outcome = session.ask("When is rent due?").await;

    assert_eq!(outcome.explanation, "Could not process the request.");
    assert_eq!(session.state().last_explanation, "Could not process the request.");
    Ok(())
}

/// Test voice input without a voice adapter
#[tokio::test]
async fn test_session_askVoice_withoutVoiceAdapter_shouldReportUnavailable() -> Result<()> {
    let mut session = test_session(MockProvider::working())?;

    assert!(session.ask_voice().await.is_none());
    Ok(())
}

/// Test changing the session language mid-session
#[tokio::test]
async fn test_session_changeLanguage_shouldAffectFollowingQuestions() -> Result<()> {
    let mock = MockProvider::working().with_responder(well_formed_response);
    let mut session = test_session(mock.clone())?;

    assert!(session.change_language("Tamil"));
    session.ask("When is rent due?").await;

    // The non-English language now routes through translation
    assert_eq!(mock.count_prompts_starting_with("Translate"), 2);
    Ok(())
}
