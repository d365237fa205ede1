#![forbid(unsafe_code)]

//! Width policy: how ambiguous characters and presentation selectors are measured.
//!
//! Terminals disagree on a handful of width questions. [`WidthConfig`] pins
//! down the answers so measurement is deterministic for a given policy:
//!
//! | Field | Default | Effect |
//! |-------|---------|--------|
//! | `ambiguous` | `Narrow` | East Asian Ambiguous characters take 1 (or 2) columns |
//! | `emoji_presentation` | `true` | VS16 makes the cluster 2 columns |
//! | `text_presentation` | `false` | VS15 makes a pictograph 1 column |
//!
//! # Environment
//!
//! [`WidthConfig::from_env`] reads:
//! - `TERMGLYPH_AMBIGUOUS_WIDTH`: `narrow`/`1` or `wide`/`2`
//! - `TERMGLYPH_EMOJI_PRESENTATION`: boolean
//! - `TERMGLYPH_TEXT_PRESENTATION`: boolean
//!
//! Unparsable values are logged at `warn` and ignored. Given the same
//! environment, detection always produces the same config.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variable selecting [`AmbiguousWidth`].
pub const ENV_AMBIGUOUS_WIDTH: &str = "TERMGLYPH_AMBIGUOUS_WIDTH";
/// Environment variable toggling [`WidthConfig::emoji_presentation`].
pub const ENV_EMOJI_PRESENTATION: &str = "TERMGLYPH_EMOJI_PRESENTATION";
/// Environment variable toggling [`WidthConfig::text_presentation`].
pub const ENV_TEXT_PRESENTATION: &str = "TERMGLYPH_TEXT_PRESENTATION";

/// Column count for East Asian Ambiguous characters (e.g. `±`, `α`, `①`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AmbiguousWidth {
    /// One column (most Western locales).
    #[default]
    Narrow,
    /// Two columns (CJK legacy behavior).
    Wide,
}

impl AmbiguousWidth {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Narrow => "narrow",
            Self::Wide => "wide",
        }
    }
}

impl fmt::Display for AmbiguousWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AmbiguousWidth {
    type Err = ParseWidthConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "narrow" | "single" | "1" => Ok(Self::Narrow),
            "wide" | "double" | "2" => Ok(Self::Wide),
            _ => Err(ParseWidthConfigError::AmbiguousWidth(s.to_string())),
        }
    }
}

/// Error returned when a width setting cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWidthConfigError {
    /// Not one of `narrow`, `single`, `1`, `wide`, `double`, `2`.
    AmbiguousWidth(String),
    /// Not a recognizable boolean.
    Flag {
        /// Setting name.
        key: &'static str,
        /// Rejected value.
        value: String,
    },
}

impl fmt::Display for ParseWidthConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousWidth(value) => write!(
                f,
                "invalid ambiguous width {value:?} (expected \"narrow\" or \"wide\")"
            ),
            Self::Flag { key, value } => {
                write!(f, "invalid boolean {value:?} for {key}")
            }
        }
    }
}

impl std::error::Error for ParseWidthConfigError {}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ParseWidthConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ParseWidthConfigError::Flag {
            key,
            value: value.to_string(),
        }),
    }
}

/// Raw environment values, captured once so detection is testable.
#[derive(Debug, Clone, Default)]
struct DetectInputs {
    ambiguous: Option<String>,
    emoji_presentation: Option<String>,
    text_presentation: Option<String>,
}

impl DetectInputs {
    fn from_env() -> Self {
        Self {
            ambiguous: env::var(ENV_AMBIGUOUS_WIDTH).ok(),
            emoji_presentation: env::var(ENV_EMOJI_PRESENTATION).ok(),
            text_presentation: env::var(ENV_TEXT_PRESENTATION).ok(),
        }
    }
}

/// Width measurement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidthConfig {
    /// Width of East Asian Ambiguous characters.
    pub ambiguous: AmbiguousWidth,
    /// VS16 forces a 2-column cluster.
    pub emoji_presentation: bool,
    /// VS15 forces a pictograph down to 1 column.
    pub text_presentation: bool,
}

impl WidthConfig {
    /// Narrow ambiguous characters, VS16 honored, VS15 ignored.
    pub const DEFAULT: Self = Self {
        ambiguous: AmbiguousWidth::Narrow,
        emoji_presentation: true,
        text_presentation: false,
    };

    /// [`DEFAULT`](Self::DEFAULT) with wide ambiguous characters.
    #[must_use]
    pub const fn cjk() -> Self {
        Self::DEFAULT.with_ambiguous(AmbiguousWidth::Wide)
    }

    /// Set the ambiguous-width policy.
    #[must_use]
    pub const fn with_ambiguous(mut self, ambiguous: AmbiguousWidth) -> Self {
        self.ambiguous = ambiguous;
        self
    }

    /// Honor (or ignore) VS16.
    #[must_use]
    pub const fn with_emoji_presentation(mut self, enabled: bool) -> Self {
        self.emoji_presentation = enabled;
        self
    }

    /// Honor (or ignore) VS15.
    #[must_use]
    pub const fn with_text_presentation(mut self, enabled: bool) -> Self {
        self.text_presentation = enabled;
        self
    }

    /// Detect the policy from `TERMGLYPH_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_inputs(&DetectInputs::from_env())
    }

    fn from_inputs(inputs: &DetectInputs) -> Self {
        let mut config = Self::DEFAULT;

        if let Some(raw) = inputs.ambiguous.as_deref() {
            match raw.parse::<AmbiguousWidth>() {
                Ok(ambiguous) => config.ambiguous = ambiguous,
                Err(err) => tracing::warn!(key = ENV_AMBIGUOUS_WIDTH, %err, "ignoring width setting"),
            }
        }
        if let Some(raw) = inputs.emoji_presentation.as_deref() {
            match parse_flag(ENV_EMOJI_PRESENTATION, raw) {
                Ok(enabled) => config.emoji_presentation = enabled,
                Err(err) => tracing::warn!(key = ENV_EMOJI_PRESENTATION, %err, "ignoring width setting"),
            }
        }
        if let Some(raw) = inputs.text_presentation.as_deref() {
            match parse_flag(ENV_TEXT_PRESENTATION, raw) {
                Ok(enabled) => config.text_presentation = enabled,
                Err(err) => tracing::warn!(key = ENV_TEXT_PRESENTATION, %err, "ignoring width setting"),
            }
        }

        tracing::debug!(
            ambiguous = %config.ambiguous,
            emoji_presentation = config.emoji_presentation,
            text_presentation = config.text_presentation,
            "width config detected"
        );
        config
    }
}

impl Default for WidthConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
