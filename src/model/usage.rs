//! Token usage reported on assistant messages.

use serde::Deserialize;
use std::ops::AddAssign;

/// Token usage statistics from a single assistant message.
///
/// Counts absent from the JSON decode as zero; `service_tier` stays absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub cache_creation_input_tokens: u64,
    #[serde(default)]
    pub cache_read_input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub service_tier: Option<String>,
}

impl Usage {
    /// Input tokens including cache creation and cache reads.
    ///
    /// Counts come straight from the transcript, so all sums saturate.
    pub fn total_input(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.cache_creation_input_tokens)
            .saturating_add(self.cache_read_input_tokens)
    }

    pub fn total(&self) -> u64 {
        self.total_input().saturating_add(self.output_tokens)
    }
}

impl AddAssign<&Usage> for Usage {
    /// Sums token counts. `service_tier` is left untouched.
    fn add_assign(&mut self, other: &Usage) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.cache_creation_input_tokens = self
            .cache_creation_input_tokens
            .saturating_add(other.cache_creation_input_tokens);
        self.cache_read_input_tokens = self
            .cache_read_input_tokens
            .saturating_add(other.cache_read_input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
    }
}
