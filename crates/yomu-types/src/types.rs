use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Pointer moved over text
    Pointer {
        event: PointerEvent,
        source: TextSource,
    },
    ShowResults(LookupOutcome),
    /// Input ended; flush what is pending and stop
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Websocket,
    Stdin,
}

/// Pointer position over text, as reported by the page script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Sentence under the pointer
    pub sentence: String,
    /// UTF-16 offset of the pointer inside `sentence`. May be negative
    /// when the caret could not be placed.
    pub offset: i64,
    /// Screen position, forwarded to the overlay
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

/// Everything the overlay needs for one pointer position.
#[derive(Debug, Clone, Serialize)]
pub struct LookupOutcome {
    /// Monotonic id of the pipeline run that produced this outcome
    pub generation: u64,
    pub sentence: String,
    pub offset: i64,
    /// Pointer screen position, copied from the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    pub candidates: Vec<String>,
    pub results: Vec<DisplayResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayResult {
    pub entry_id: i32,
    pub term: String,
    pub reading: String,
    pub tags: Vec<String>,
    /// Rendered entry document as an HTML fragment
    pub html: String,
}
