/// Engine configuration
use lofty::{ParseOptions, ParsingMode};
use serde::{Deserialize, Serialize};

/// How strictly malformed tags are treated while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsingStrictness {
    /// Reject anything that does not follow the format
    Strict,
    /// Recover what can be recovered
    #[default]
    BestAttempt,
    /// Skip anything malformed
    Relaxed,
}

impl From<ParsingStrictness> for ParsingMode {
    fn from(strictness: ParsingStrictness) -> Self {
        match strictness {
            ParsingStrictness::Strict => ParsingMode::Strict,
            ParsingStrictness::BestAttempt => ParsingMode::BestAttempt,
            ParsingStrictness::Relaxed => ParsingMode::Relaxed,
        }
    }
}

/// Settings for [`LoftyEngine`](crate::LoftyEngine)
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub parsing_mode: ParsingStrictness,

    /// Also read audio properties (duration, bitrate); tags never need them
    #[serde(default)]
    pub read_properties: bool,
}

impl EngineConfig {
    pub(crate) fn parse_options(&self) -> ParseOptions {
        ParseOptions::new()
            .read_properties(self.read_properties)
            .parsing_mode(self.parsing_mode.into())
    }
}
