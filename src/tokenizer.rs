// src/tokenizer.rs
// Lexer for semicolon separated WFMPRE responses

use crate::error::{FormatError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    TokenStart,
    InToken,
    InQuotes,
    Escape,
    EndQuotes,
}

/// What a single character does to the token being accumulated.
enum Action {
    Push(char),
    Emit,
    Skip,
}

impl LexState {
    fn step(self, c: char) -> Result<(LexState, Action)> {
        use LexState::*;

        let next = match (self, c) {
            (TokenStart, '"') => (InQuotes, Action::Skip),
            (TokenStart, ';') => (TokenStart, Action::Emit),
            (TokenStart, c) => (InToken, Action::Push(c)),

            (InToken, ';') => (TokenStart, Action::Emit),
            (InToken, '"') => return Err(FormatError::QuoteInUnquotedToken),
            (InToken, c) => (InToken, Action::Push(c)),

            (InQuotes, '"') => (EndQuotes, Action::Skip),
            (InQuotes, '\\') => (Escape, Action::Skip),
            (InQuotes, c) => (InQuotes, Action::Push(c)),

            (Escape, '"') => (InQuotes, Action::Push('"')),
            (Escape, c) => return Err(FormatError::UnknownEscape(c)),

            (EndQuotes, ';') => (TokenStart, Action::Emit),
            (EndQuotes, _) => return Err(FormatError::TrailingAfterQuote),
        };
        Ok(next)
    }

    /// States in which the input may end; the pending token is flushed.
    fn accepts_end(self) -> bool {
        matches!(
            self,
            LexState::TokenStart | LexState::InToken | LexState::EndQuotes
        )
    }
}

/// Split a WFMPRE response into its positional tokens.
///
/// Fields are separated by `;`. A field may be wrapped in double quotes, in
/// which case `;` is literal and `\"` stands for a quote. Empty fields are
/// kept so positions stay stable, and the last field is always emitted, so
/// `"a;"` yields `["a", ""]`.
pub fn tokenize(text: &str) -> Result<Vec<String>> {
    let mut state = LexState::TokenStart;
    let mut token = String::new();
    let mut tokens = Vec::new();

    for c in text.chars() {
        let (next, action) = state.step(c)?;
        match action {
            Action::Push(c) => token.push(c),
            Action::Emit => tokens.push(std::mem::take(&mut token)),
            Action::Skip => {}
        }
        state = next;
    }

    if !state.accepts_end() {
        return Err(FormatError::UnfinishedToken);
    }
    tokens.push(token);

    log::trace!("tokenized preamble into {} fields", tokens.len());
    Ok(tokens)
}
