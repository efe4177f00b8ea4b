/// AI endpoints
///
/// Each call posts a text fragment and returns a generated artifact. The
/// fragment is trimmed; an empty one is rejected locally.

use crate::client::ApiClient;
use crate::error::ClientResult;
use learnease_shared::models::ai::{
    Flashcard, FlashcardsRequest, FlashcardsResponse, StudyNotes, StudyNotesRequest,
    SummarizeRequest, Summary,
};
use learnease_shared::validation::validate_selection;
use reqwest::Method;
use tracing::debug;

impl ApiClient {
    /// `POST /ai/summarize-text`
    pub async fn summarize(&self, text: &str) -> ClientResult<String> {
        let body = SummarizeRequest {
            text_to_summarize: validate_selection(text)?,
        };
        debug!(chars = body.text_to_summarize.len(), "Requesting summary");

        let builder = self
            .authorized(Method::POST, &["ai", "summarize-text"])
            .await?
            .json(&body);

        let summary: Summary = self.send_json(builder, "Failed to generate summary.").await?;
        Ok(summary.summary)
    }

    /// `POST /ai/generate-flashcards`
    pub async fn generate_flashcards(&self, text: &str) -> ClientResult<Vec<Flashcard>> {
        let body = FlashcardsRequest {
            text_to_generate_from: validate_selection(text)?,
        };
        debug!(chars = body.text_to_generate_from.len(), "Requesting flashcards");

        let builder = self
            .authorized(Method::POST, &["ai", "generate-flashcards"])
            .await?
            .json(&body);

        let response: FlashcardsResponse = self
            .send_json(builder, "Failed to generate flashcards.")
            .await?;
        Ok(response.flashcards)
    }

    /// `POST /ai/generate-study-notes`
    pub async fn generate_study_notes(&self, text: &str) -> ClientResult<String> {
        let body = StudyNotesRequest {
            text_to_generate_notes_from: validate_selection(text)?,
        };
        debug!(chars = body.text_to_generate_notes_from.len(), "Requesting study notes");

        let builder = self
            .authorized(Method::POST, &["ai", "generate-study-notes"])
            .await?
            .json(&body);

        let notes: StudyNotes = self
            .send_json(builder, "Failed to generate study notes.")
            .await?;
        Ok(notes.study_notes)
    }
}
