use serde::{Deserialize, Serialize};

/// A word-level unit produced by the tokenizer service.
///
/// `word` is the exact slice of the tokenized sentence this lexeme covers.
/// Lexemes are laid out contiguously from the start of the sentence, so the
/// span of lexeme `i` starts at the summed length of every lexeme before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lexeme {
    /// The surface form of the word
    pub word: String,
    /// Dictionary form, when the tokenizer computed one for the whole word
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    /// Simplified part-of-speech classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    /// All tokens that make up this word
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<LexemeExtra>,
}

impl Lexeme {
    /// Length of the lexeme's span in UTF-16 code units, the unit page
    /// scripts report offsets in.
    pub fn utf16_len(&self) -> usize {
        self.word.encode_utf16().count()
    }

    /// Lemma of the first token, used as the headword candidate.
    pub fn head_lemma(&self) -> Option<&str> {
        self.tokens
            .first()
            .map(|token| token.lemma.as_str())
            .filter(|lemma| !lemma.is_empty())
    }
}

/// A prepared token with linguistic analysis information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Token {
    /// The literal text of the token
    pub literal: String,
    pub pos: String,
    pub pos2: String,
    pub pos3: String,
    pub pos4: String,
    pub inflection_type: String,
    pub inflection_form: String,
    /// Dictionary (citation) form
    pub lemma: String,
    /// Reading in kana
    pub reading: String,
    pub hatsuon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexemeExtra {
    pub reading: String,
    pub transcription: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar: Option<String>,
}
