//! Token usage reported by the model client.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Token usage for a single completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the input/prompt.
    #[serde(default, alias = "prompt_tokens")]
    pub input_tokens: u32,

    /// Number of tokens in the output/completion.
    #[serde(default, alias = "completion_tokens")]
    pub output_tokens: u32,

    /// Total tokens used (input + output).
    #[serde(default)]
    pub total_tokens: u32,
}

impl Usage {
    /// Create a new usage record.
    #[must_use]
    pub const fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }

    /// A usage record with every counter at zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }
}

impl AddAssign for Usage {
    fn add_assign(&mut self, rhs: Self) {
        self.input_tokens = self.input_tokens.saturating_add(rhs.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(rhs.output_tokens);
        self.total_tokens = self.total_tokens.saturating_add(rhs.total_tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_computes_total() {
        let usage = Usage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn add_assign_accumulates() {
        let mut usage = Usage::zero();
        usage += Usage::new(10, 5);
        usage += Usage::new(1, 1);
        assert_eq!(usage, Usage::new(11, 6));
    }

    #[test]
    fn deserializes_openai_field_names() {
        let usage: Usage = serde_json::from_str(
            r#"{"prompt_tokens": 7, "completion_tokens": 3, "total_tokens": 10}"#,
        )
        .expect("deserialize");
        assert_eq!(usage, Usage::new(7, 3));
    }
}
