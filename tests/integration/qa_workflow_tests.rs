/*!
 * End-to-end question answering tests over a loaded document
 */

use anyhow::Result;
use tokio_test;

use legalens::analysis::AnalysisService;
use legalens::document::Document;
use legalens::providers::mock::MockProvider;
use legalens::session::Session;
use crate::common;

const RENT_SENTENCE: &str = "The tenant shall pay rent by the 5th of each month.";

fn rent_responder(prompt: &str) -> String {
    if prompt.starts_with("You are a precise legal assistant") {
        format!(
            "**Explanation (English):**\n\
             The agreement requires payment by the 5th of each month.\n\n\
             **Source from original document (English):**\n\
             \"{}\"",
            RENT_SENTENCE
        )
    } else {
        prompt.to_string()
    }
}

/// Test the full workflow: load a file, ask, get an explanation that
/// references the deadline, backed by the verbatim source sentence
#[tokio::test]
async fn test_qaWorkflow_withRentQuestion_shouldQuoteSourceVerbatim() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_agreement(&temp_dir.path().to_path_buf(), "agreement.txt")?;

    let document = Document::load(&path, "English")?;
    let mock = MockProvider::working().with_responder(rent_responder);
    let service = AnalysisService::with_mock(mock.clone());

    let outcome = service
        .answer_question(document.text(), "When do I have to pay rent?", "English")
        .await;

    // The explanation mentions the deadline and the quotation matches the
    // document sentence exactly
    assert!(outcome.explanation.contains("the 5th of each month"));
    assert_eq!(outcome.source_quote, RENT_SENTENCE);
    assert!(document.text().contains(&outcome.source_quote));

    // English sessions never translate; the one call was the analysis
    assert_eq!(mock.prompts().len(), 1);
    let analysis_prompt = &mock.prompts()[0];
    assert!(analysis_prompt.contains(RENT_SENTENCE));
    assert!(analysis_prompt.contains("When do I have to pay rent?"));
    Ok(())
}

/// Test the same workflow driven through a session, including replay state
#[test]
fn test_qaWorkflow_throughSession_shouldKeepReplayableAnswer() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_agreement(&temp_dir.path().to_path_buf(), "agreement.txt")?;

    let document = Document::load(&path, "English")?;
    let mock = MockProvider::working().with_responder(rent_responder);
    let mut session = Session::new(document, AnalysisService::with_mock(mock), None, false);

    tokio_test::block_on(async {
        let first = session.ask("When do I have to pay rent?").await;
        assert_eq!(first.source_quote, RENT_SENTENCE);
        assert!(session.replay_last().await);

        // A second question replaces the stored explanation
        session.ask("Can I terminate the agreement?").await;
    });

    assert_eq!(
        session.state().last_explanation,
        "The agreement requires payment by the 5th of each month."
    );
    Ok(())
}

/// Test a consecutive-question session: each question stands alone with
/// no cached translations carried between them
#[tokio::test]
async fn test_qaWorkflow_withConsecutiveTamilQuestions_shouldRetranslateEachTime() -> Result<()> {
    let mock = MockProvider::working().with_responder(rent_responder);
    let service = AnalysisService::with_mock(mock.clone());

    let document = "வாடகை ஒவ்வொரு மாதமும் 5ஆம் தேதிக்குள் செலுத்த வேண்டும்.";
    service.answer_question(document, "When is rent due?", "Tamil").await;
    service.answer_question(document, "Who pays rent?", "Tamil").await;

    // Two questions, two document translations and two back-translations
    assert_eq!(mock.count_prompts_starting_with("Translate the following"), 2);
    assert_eq!(mock.count_prompts_starting_with("Translate and simplify"), 2);
    assert_eq!(
        mock.count_prompts_starting_with("You are a precise legal assistant"),
        2
    );
    Ok(())
}
