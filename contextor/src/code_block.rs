//! Fenced code block extraction from Markdown.

/// Returns the body of the first fenced code block in `markdown`.
///
/// Opening fences are runs of three or more backticks, optionally followed by
/// an info string. The block ends at the first line consisting only of a
/// backtick run at least as long as the opener. An unterminated block runs to
/// the end of the input.
///
/// # Example
/// ```
/// use contextor::code_block::first_fenced_block;
/// let md = "intro\n```rust\nfn main() {}\n```\n";
/// assert_eq!(first_fenced_block(md).as_deref(), Some("fn main() {}"));
/// ```
pub fn first_fenced_block(markdown: &str) -> Option<String> {
    let mut lines = markdown.lines();

    let fence_len = loop {
        let line = lines.next()?;
        let n = backtick_run(line.trim_start());
        if n >= 3 {
            break n;
        }
    };

    let mut body = Vec::new();
    for line in lines {
        let t = line.trim();
        let n = backtick_run(t);
        if n >= fence_len && n == t.len() {
            break;
        }
        body.push(line);
    }
    Some(body.join("\n"))
}

fn backtick_run(s: &str) -> usize {
    s.bytes().take_while(|b| *b == b'`').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_fence_gives_none() {
        assert_eq!(first_fenced_block("just prose\n`inline`"), None);
    }

    #[test]
    fn takes_only_the_first_block() {
        let md = "# T\n```solidity\ncontract A {}\n```\n\n```rust\nmod a {}\n```\n";
        assert_eq!(first_fenced_block(md).as_deref(), Some("contract A {}"));
    }

    #[test]
    fn longer_fence_contains_inner_backticks() {
        let md = "````rust\n/// ```\n/// doc\n/// ```\nfn f() {}\n````\n";
        assert_eq!(
            first_fenced_block(md).as_deref(),
            Some("/// ```\n/// doc\n/// ```\nfn f() {}")
        );
    }

    #[test]
    fn unterminated_block_runs_to_end() {
        assert_eq!(first_fenced_block("```\na\nb").as_deref(), Some("a\nb"));
    }
}
