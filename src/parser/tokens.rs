//! The token line handed to production parsers.

use super::error::ParseFailure;

/// An ordered sequence of tokens from one source line.
///
/// The trailing `{` sentinel, when present, is stripped at construction
/// and remembered as [`TokenLine::block_start`]; production parsers only
/// ever see the payload tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TokenLine {
    tokens: Vec<String>,
    block_start: bool,
}

impl TokenLine {
    pub fn new(mut tokens: Vec<String>) -> Self {
        let block_start = tokens.last().map(|t| t == "{").unwrap_or(false);
        if block_start {
            tokens.pop();
        }
        Self {
            tokens,
            block_start,
        }
    }

    /// True when the line declared a block (`{` was its final token).
    pub fn block_start(&self) -> bool {
        self.block_start
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.get(0)
    }

    /// Token at `index`, or a usage error quoting `grammar`.
    pub fn require(&self, index: usize, grammar: &'static str) -> Result<&str, ParseFailure> {
        self.get(index).ok_or(ParseFailure::Expected(grammar))
    }

    /// Fail with a usage error when more than `max` tokens are present.
    pub fn at_most(&self, max: usize, grammar: &'static str) -> Result<(), ParseFailure> {
        if self.tokens.len() > max {
            return Err(ParseFailure::Expected(grammar));
        }
        Ok(())
    }

    /// Tokens from `from` to the end of the line.
    pub fn rest(&self, from: usize) -> &[String] {
        if from >= self.tokens.len() {
            &[]
        } else {
            &self.tokens[from..]
        }
    }

    /// Drop the first `count` tokens (used for identifier bindings).
    pub fn strip_prefix(&mut self, count: usize) {
        self.tokens.drain(..count.min(self.tokens.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(tokens: &[&str]) -> TokenLine {
        TokenLine::new(tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_block_start_is_stripped() {
        let tokens = line(&["model", "{"]);
        assert!(tokens.block_start());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.first(), Some("model"));
    }

    #[test]
    fn test_brace_only_counts_inside_last_position() {
        let tokens = line(&["person", "A"]);
        assert!(!tokens.block_start());
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_strip_prefix_for_bindings() {
        let mut tokens = line(&["u", "=", "person", "User"]);
        tokens.strip_prefix(2);
        assert_eq!(tokens.first(), Some("person"));
        assert_eq!(tokens.len(), 2);
    }
}
