//! Prompt construction for commit message suggestions.

use crate::commit::DiffText;

/// Number of suggestions the prompt asks for.
pub const SUGGESTION_COUNT: usize = 3;

/// Build the instruction prompt for `diff`.
///
/// The diff is embedded verbatim. The output contract is plain lines so the
/// response can be split without any JSON extraction.
pub fn build_suggestion_prompt(diff: &DiffText) -> String {
    let truncation_note = if diff.is_truncated() {
        "\n\nNote: The diff was truncated due to size. Focus on the visible changes."
    } else {
        ""
    };

    format!(
        r#"You are generating Git commit messages following the Conventional Commits specification.

## Staged Diff
{diff}{truncation_note}

## Task
Write exactly {count} alternative commit messages for the staged diff above.

## Rules
- One message per line, exactly {count} lines, nothing else.
- Each line MUST have the form `type(scope): subject`.
- Type: one of feat, fix, build, chore, ci, docs, style, refactor, perf, test
- Scope: the primary module or area affected.
- Subject: imperative mood, lowercase after the colon, no period at the end.
- Do NOT number the lines and do NOT add bullets.
- Do NOT wrap the output in code fences (```).
- Do NOT add explanations before or after the messages.

## Example
For a diff that adds a login endpoint, a valid response is:

feat(auth): add login endpoint
feat(api): expose session login route
refactor(auth): extract credential check"#,
        diff = diff.as_str(),
        count = SUGGESTION_COUNT,
    )
}
