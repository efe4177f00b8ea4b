/// AI artifact models
///
/// Artifacts are generated per request from a caller-supplied text fragment.
/// They have no identity and are never persisted; a page keeps one only for
/// as long as its modal is open.
///
/// | Endpoint | Request field | Response |
/// |----------|---------------|----------|
/// | `POST /ai/summarize-text` | `text_to_summarize` | `{ "summary": ... }` |
/// | `POST /ai/generate-flashcards` | `text_to_generate_from` | `{ "flashcards": [{ "front", "back" }] }` |
/// | `POST /ai/generate-study-notes` | `text_to_generate_notes_from` | `{ "study_notes": ... }` |

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub text_to_summarize: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardsRequest {
    pub text_to_generate_from: String,
}

/// One question/answer card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardsResponse {
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyNotesRequest {
    pub text_to_generate_notes_from: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyNotes {
    pub study_notes: String,
}
