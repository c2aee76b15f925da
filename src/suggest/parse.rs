//! Parsing raw generator output into commit candidates.

use std::fmt;

const FENCE: &str = "```";

/// One proposed commit message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitCandidate(String);

impl CommitCandidate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the line has the `type(scope): subject` shape.
    pub fn is_conventional(line: &str) -> bool {
        line.contains(':')
            && line.contains('(')
            && line.contains(')')
            && !line.starts_with(FENCE)
            && !line.ends_with(FENCE)
    }
}

impl fmt::Display for CommitCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why the candidate list is empty or not format-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionDiagnostic {
    /// The generator call failed; carries the provider's summary.
    GenerationFailed(String),
    /// The generator answered with nothing but whitespace.
    NoUsableOutput,
    /// No line had the expected shape; candidates are the raw lines.
    FormatMismatch,
}

impl fmt::Display for SuggestionDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionDiagnostic::GenerationFailed(reason) => {
                write!(f, "Could not generate suggestions: {}", reason)
            }
            SuggestionDiagnostic::NoUsableOutput => {
                write!(f, "The generator returned no usable output")
            }
            SuggestionDiagnostic::FormatMismatch => write!(
                f,
                "Warning: suggestions do not match the `type(scope): subject` format; showing them unfiltered"
            ),
        }
    }
}

/// Ordered candidates plus an optional diagnostic for the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    pub candidates: Vec<CommitCandidate>,
    pub diagnostic: Option<SuggestionDiagnostic>,
}

impl Suggestions {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            candidates: Vec::new(),
            diagnostic: Some(SuggestionDiagnostic::GenerationFailed(reason.into())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Split a response into trimmed, non-blank lines.
pub fn raw_lines(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Apply the candidate policy to a raw response.
///
/// Well-formed lines are kept in order. When none are well-formed but the
/// response has text, every raw line is returned and flagged as a format
/// mismatch so a readable suggestion is still offered.
pub fn parse_suggestions(response: &str) -> Suggestions {
    let lines = raw_lines(response);
    if lines.is_empty() {
        return Suggestions {
            candidates: Vec::new(),
            diagnostic: Some(SuggestionDiagnostic::NoUsableOutput),
        };
    }

    let valid: Vec<CommitCandidate> = lines
        .iter()
        .filter(|line| CommitCandidate::is_conventional(line))
        .cloned()
        .map(CommitCandidate)
        .collect();

    if valid.is_empty() {
        return Suggestions {
            candidates: lines.into_iter().map(CommitCandidate).collect(),
            diagnostic: Some(SuggestionDiagnostic::FormatMismatch),
        };
    }

    Suggestions {
        candidates: valid,
        diagnostic: None,
    }
}
