//! Prompt builder: migration persona + ranked context + question + instructions.

use contract_pairs::synthesize::keys;
use rag_store::RetrievalResult;

/// System message sent with every generation request.
pub const MIGRATION_SYSTEM: &str = "You are an expert in both Solidity and ink! smart contracts \
helping developers migrate from Solidity to ink!. Use the provided context as ground truth; \
if it is insufficient, say so.";

/// Closing instructions appended after the question.
pub const INSTRUCTIONS: &str = "Provide a detailed, step-by-step explanation based on the provided code examples. Focus on:
1. Key differences: the main conceptual differences between Solidity and ink!
2. Migration steps: clear, actionable steps for converting the pattern
3. Code examples: concrete before/after snippets taken from the context
4. Best practices: important considerations and gotchas

Format the answer with specific code snippets and explanations, not raw code dumps.";

/// Builds the user prompt with a labeled context block capped at `max_chars`.
///
/// Hits keep their ranking order. A hit that does not fit is truncated on a
/// char boundary and nothing after it is included.
///
/// # Example
/// ```
/// # use contextor::prompt::build_user_prompt;
/// let prompt = build_user_prompt("How do events work?", &[], 2000);
/// assert!(prompt.contains("Question:\nHow do events work?"));
/// ```
pub fn build_user_prompt(question: &str, hits: &[RetrievalResult], max_chars: usize) -> String {
    let mut out = String::new();

    if !hits.is_empty() {
        out.push_str("Context (top-ranked Solidity/ink! examples):\n");
        let mut budget = max_chars;

        for (i, h) in hits.iter().enumerate() {
            let header = format!(
                "==[{}]== {} :: {} (score {:.3})\n",
                i + 1,
                h.metadata
                    .get(keys::PAIR_ID)
                    .map(String::as_str)
                    .unwrap_or(h.id.as_str()),
                h.metadata
                    .get(keys::SOURCE_FILE)
                    .map(String::as_str)
                    .unwrap_or(""),
                h.score
            );
            let text = h.content.trim();

            if header.len() >= budget {
                break;
            }
            out.push_str(&header);
            budget -= header.len();

            let take = budget.saturating_sub(2);
            if text.len() > take {
                out.push_str(safe_truncate(text, take));
                out.push_str("\n…\n");
                break;
            }
            out.push_str(text);
            out.push('\n');
            budget -= text.len() + 1;
        }
        out.push('\n');
    }

    out.push_str("Question:\n");
    out.push_str(question.trim());
    out.push_str("\n\n");
    out.push_str(INSTRUCTIONS);
    out.push('\n');
    out
}

fn safe_truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
