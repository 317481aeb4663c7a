//! Grammatical context tracked while parsing.
//!
//! [`ParseContext`] records which enclosing constructs are active. The
//! parser only changes it through scoped helpers that put the previous
//! value back when the construct ends, whether it parsed or failed.

use bitflags::bitflags;

bitflags! {
    /// Active grammatical contexts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParseContext: u16 {
        /// Strict-mode code.
        const STRICT_MODE = 1 << 0;
        /// Inside a `for` head initializer, where `in` starts a for-in loop
        /// instead of being an operator.
        const DISALLOW_IN = 1 << 1;
        /// Inside a `switch` body; `break` is legal.
        const IN_SWITCH = 1 << 2;
        /// Inside a loop body; `break` and `continue` are legal.
        const IN_ITERATION = 1 << 3;
        /// Inside a function body; `return` is legal.
        const IN_FUNCTION = 1 << 4;
    }
}

impl ParseContext {
    /// Context a function body starts with, given the caller's context.
    ///
    /// Only strictness crosses the function boundary.
    pub fn for_function_body(self) -> Self {
        (self & ParseContext::STRICT_MODE) | ParseContext::IN_FUNCTION
    }
}

/// Ordered set of the labels enclosing the current statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Creates an empty label set
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `name` labels an enclosing statement.
    pub fn contains(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }

    /// Adds an innermost label
    pub fn push(&mut self, name: String) {
        self.labels.push(name);
    }

    /// Removes the innermost label
    pub fn pop(&mut self) -> Option<String> {
        self.labels.pop()
    }

    /// Labels from outermost to innermost
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}
