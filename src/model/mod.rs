//! Wire model: questionnaire instruments and their items.
//!
//! Field names are the stable external contract; renaming any serialized
//! field breaks callers and previously persisted payloads. Optional fields
//! are omitted when absent so "not computed" stays distinguishable from
//! "computed and empty".

use serde::{Deserialize, Serialize};
use uuid::Uuid;


/// One free-text questionnaire item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Item number within the source instrument, e.g. `"1"` or `"2a"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_no: Option<String>,

    /// Introductory text applying to the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_intro: Option<String>,

    /// Text of the item. The only required field.
    pub question_text: String,

    /// Ordered answer options.
    #[serde(default)]
    pub options: Vec<String>,

    /// Zero-indexed page of the source document the item was found on.
    #[serde(default)]
    pub source_page: u32,

    /// Back-reference to the owning instrument, filled while flattening.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_id: Option<String>,

    /// Human-readable name of the owning instrument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_name: Option<String>,

    /// Dominant topics inferred from the reference corpus. Absent when no
    /// corpus was available, never defaulted to an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics_auto: Option<Vec<String>>,

    /// Nearest reference item, embedded verbatim. Absent when no corpus
    /// was available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_match_from_mhc_auto: Option<Box<Question>>,
}

impl Question {
    /// Creates a question carrying only `question_text`.
    pub fn new(question_text: impl Into<String>) -> Self {
        Self {
            question_no: None,
            question_intro: None,
            question_text: question_text.into(),
            options: Vec::new(),
            source_page: 0,
            instrument_id: None,
            instrument_name: None,
            topics_auto: None,
            nearest_match_from_mhc_auto: None,
        }
    }
}

/// A questionnaire: an ordered set of [`Question`]s plus file provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Unique identifier for the source file (UUID-4, dashless).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,

    /// Unique identifier for the instrument (UUID-4, dashless).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_id: Option<String>,

    /// Human-readable name of the instrument.
    #[serde(default = "Instrument::default_name")]
    pub instrument_name: String,

    /// Name of the input file.
    #[serde(default = "Instrument::default_file_name")]
    pub file_name: String,

    /// Type of the input file, e.g. `"pdf"`, `"xlsx"`, `"txt"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,

    /// Sub-section of the file, e.g. an Excel tab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_section: Option<String>,

    /// Study the instrument belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study: Option<String>,

    /// Sweep within the study.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<String>,

    /// ISO 639-1 code of the instrument language, e.g. `"en"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Optional free-form metadata (URL, citation, DOI, copyright holder).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,

    /// The items inside the instrument, in document order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Instrument {
    fn default_name() -> String {
        "Untitled instrument".to_string()
    }

    fn default_file_name() -> String {
        "Untitled file".to_string()
    }

    /// Creates a named instrument with the given questions.
    pub fn new(instrument_name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            file_id: None,
            instrument_id: None,
            instrument_name: instrument_name.into(),
            file_name: Self::default_file_name(),
            file_type: None,
            file_section: None,
            study: None,
            sweep: None,
            language: None,
            metadata: None,
            questions,
        }
    }

    /// Fills absent `file_id` / `instrument_id` with fresh identifiers.
    pub fn assign_missing_ids(&mut self) {
        if self.file_id.is_none() {
            self.file_id = Some(generate_id());
        }
        if self.instrument_id.is_none() {
            self.instrument_id = Some(generate_id());
        }
    }
}

/// Generates a random unique identifier (UUID-4, dashless hex).
///
/// Never reuses a value across calls; callers rely on this for id
/// assignment across requests.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}
