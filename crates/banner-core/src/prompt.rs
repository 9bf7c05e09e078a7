//! # Prompt Cache Key
//!
//! Stable dedup keys for AI artwork generation requests.
//!
//! ## Key Derivation
//! ```text
//! "A Banner for the  Mountain Sunset"
//!      │ lowercase, split on whitespace, drop stop words, sort
//!      ▼
//! "mountain sunset"
//!      │
//!      ▼
//! "mountain sunset|16:9|{\"mood\":\"calm\"}|1792x1024"
//!      │ SHA-256
//!      ▼
//! 64 lowercase hex chars
//! ```
//!
//! Reordered, re-cased or re-spaced prompts land on the same key. The key is
//! only as good as the inputs: callers pass the aspect ratio, style and size
//! they will actually send to the generator.
//!
//! Generation and selection ids are a separate concern: timestamp plus random
//! bytes, practically unique but never a substitute for the cache key.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// Words that carry no meaning for the generator.
pub const STOP_WORDS: [&str; 7] = ["banner", "background", "image", "for", "a", "an", "the"];

/// Separates key fields. Never produced by normalization, aspect ratios,
/// sizes or compact JSON of plain strings without a literal `|`.
pub const KEY_DELIMITER: char = '|';

// =============================================================================
// Normalization
// =============================================================================

/// Canonical token form of a prompt.
///
/// ## Example
/// ```rust
/// use banner_core::prompt::normalize_prompt;
///
/// assert_eq!(normalize_prompt("A Banner for the Mountain"), "mountain");
/// assert_eq!(normalize_prompt("  Sunset   OVER mountain "), "mountain over sunset");
/// ```
pub fn normalize_prompt(prompt: &str) -> String {
    let lowered = prompt.to_lowercase();
    let mut tokens: Vec<&str> = lowered
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

// =============================================================================
// Aspect Ratio & Size
// =============================================================================

/// Aspect ratios the generator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "3:2")]
    Photo,
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "2:3")]
    Portrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Standard,
        AspectRatio::Photo,
        AspectRatio::Wide,
        AspectRatio::Portrait,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Standard => "4:3",
            AspectRatio::Photo => "3:2",
            AspectRatio::Wide => "16:9",
            AspectRatio::Portrait => "2:3",
        }
    }

    /// Generator output size for this ratio.
    pub const fn default_size(&self) -> TargetSize {
        match self {
            AspectRatio::Square | AspectRatio::Standard => TargetSize::new(1024, 1024),
            AspectRatio::Photo | AspectRatio::Wide => TargetSize::new(1792, 1024),
            AspectRatio::Portrait => TargetSize::new(1024, 1792),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AspectRatio::ALL
            .into_iter()
            .find(|a| a.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnknownAspectRatio(s.to_string()))
    }
}

/// Pixel size requested from the generator, written `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    /// Size used for previews when the caller names none.
    pub const PREVIEW: TargetSize = TargetSize::new(768, 768);

    pub const fn new(width: u32, height: u32) -> Self {
        TargetSize { width, height }
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        TargetSize::PREVIEW
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for TargetSize {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidTargetSize(s.to_string());
        let (w, h) = s.trim().split_once('x').ok_or_else(invalid)?;
        let width: u32 = w.parse().map_err(|_| invalid())?;
        let height: u32 = h.parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(TargetSize { width, height })
    }
}

// =============================================================================
// Style Options
// =============================================================================

/// Style hints sent alongside the prompt. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StyleOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,
}

impl StyleOptions {
    /// Compact JSON with sorted keys. Absent or blank fields are omitted;
    /// no options at all is `{}`.
    pub fn canonical_json(&self) -> String {
        let mut map = Map::new();
        for (key, value) in [
            ("colorScheme", &self.color_scheme),
            ("mood", &self.mood),
            ("theme", &self.theme),
        ] {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                map.insert(key.to_string(), Value::String(v.to_string()));
            }
        }
        Value::Object(map).to_string()
    }
}

// =============================================================================
// Cache Key
// =============================================================================

/// SHA-256 hex digest identifying equivalent generation requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PromptCacheKey(String);

impl PromptCacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromptCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The string that gets hashed: `normalized|aspect|style|size`.
pub fn cache_key_material(
    prompt: &str,
    aspect: AspectRatio,
    style: &StyleOptions,
    size: TargetSize,
) -> String {
    let d = KEY_DELIMITER;
    format!(
        "{}{d}{}{d}{}{d}{}",
        normalize_prompt(prompt),
        aspect,
        style.canonical_json(),
        size
    )
}

/// Derives the cache key for a generation request.
///
/// ## Example
/// ```rust
/// use banner_core::prompt::{prompt_cache_key, AspectRatio, StyleOptions, TargetSize};
///
/// let style = StyleOptions::default();
/// let a = prompt_cache_key("A Banner for the Mountain", AspectRatio::Wide, &style, TargetSize::PREVIEW);
/// let b = prompt_cache_key("mountain banner", AspectRatio::Wide, &style, TargetSize::PREVIEW);
///
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 64);
/// ```
pub fn prompt_cache_key(
    prompt: &str,
    aspect: AspectRatio,
    style: &StyleOptions,
    size: TargetSize,
) -> PromptCacheKey {
    let material = cache_key_material(prompt, aspect, style, size);
    let digest = Sha256::digest(material.as_bytes());
    let key = PromptCacheKey(format!("{:x}", digest));
    tracing::trace!(key = %key, "Derived prompt cache key");
    key
}

// =============================================================================
// Request Identifiers
// =============================================================================

/// Bytes of a v4 UUID that carry no version or variant bits.
const RANDOM_UUID_BYTES: [usize; 8] = [0, 1, 2, 3, 4, 5, 7, 9];

fn random_hex(uuid: &Uuid) -> String {
    let bytes = uuid.as_bytes();
    RANDOM_UUID_BYTES
        .iter()
        .map(|&i| format!("{:02x}", bytes[i]))
        .collect()
}

fn timestamped_id(prefix: &str) -> String {
    let hex = random_hex(&Uuid::new_v4());
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), hex)
}

/// `gen_<unix millis>_<16 hex>`.
pub fn generation_id() -> String {
    timestamped_id("gen")
}

/// `sel_<unix millis>_<16 hex>`.
pub fn selection_id() -> String {
    timestamped_id("sel")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_stop_words_and_sorts() {
        assert_eq!(normalize_prompt("A Banner for the Mountain"), "mountain");
        assert_eq!(normalize_prompt("mountain banner"), "mountain");
        assert_eq!(normalize_prompt("Red\tFox  jumping\nHIGH"), "fox high jumping red");
        assert_eq!(normalize_prompt("   "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for prompt in ["The quick brown Fox", "an image for a banner", "zebra  apple Mango"] {
            let once = normalize_prompt(prompt);
            assert_eq!(normalize_prompt(&once), once);
        }
    }

    #[test]
    fn test_aspect_ratio_parse_and_sizes() {
        assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::Wide);
        assert_eq!(AspectRatio::Wide.default_size().to_string(), "1792x1024");
        assert_eq!(AspectRatio::Standard.default_size().to_string(), "1024x1024");
        assert_eq!(AspectRatio::Portrait.default_size().to_string(), "1024x1792");
        assert!(matches!(
            "21:9".parse::<AspectRatio>(),
            Err(CoreError::UnknownAspectRatio(_))
        ));
        assert_eq!(serde_json::to_string(&AspectRatio::Photo).unwrap(), "\"3:2\"");
    }

    #[test]
    fn test_target_size_parse() {
        assert_eq!("768x768".parse::<TargetSize>().unwrap(), TargetSize::PREVIEW);
        assert_eq!(TargetSize::default().to_string(), "768x768");
        for bad in ["768", "0x768", "axb", "768X768", ""] {
            assert!(bad.parse::<TargetSize>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_style_canonical_json() {
        assert_eq!(StyleOptions::default().canonical_json(), "{}");

        let style = StyleOptions {
            mood: Some("calm".to_string()),
            theme: None,
            color_scheme: Some("  blue ".to_string()),
        };
        assert_eq!(style.canonical_json(), r#"{"colorScheme":"blue","mood":"calm"}"#);
    }

    #[test]
    fn test_style_rejects_unknown_keys() {
        let parsed: StyleOptions = serde_json::from_str(r#"{"colorScheme": "warm"}"#).unwrap();
        assert_eq!(parsed.color_scheme.as_deref(), Some("warm"));
        assert!(serde_json::from_str::<StyleOptions>(r#"{"palette": "warm"}"#).is_err());
    }

    #[test]
    fn test_cache_key_material_layout() {
        let material = cache_key_material(
            "Sunset the Mountain",
            AspectRatio::Square,
            &StyleOptions::default(),
            TargetSize::PREVIEW,
        );
        assert_eq!(material, "mountain sunset|1:1|{}|768x768");
    }

    #[test]
    fn test_cache_key_is_sha256_of_material() {
        let key = prompt_cache_key("", AspectRatio::Square, &StyleOptions::default(), TargetSize::PREVIEW);
        let expected = format!("{:x}", Sha256::digest("|1:1|{}|768x768".as_bytes()));
        assert_eq!(key.as_str(), expected);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_cache_key_equivalence() {
        let style = StyleOptions::default();
        let size = TargetSize::PREVIEW;
        let a = prompt_cache_key("Mountain Sunset", AspectRatio::Wide, &style, size);
        let b = prompt_cache_key("  the sunset  MOUNTAIN ", AspectRatio::Wide, &style, size);
        assert_eq!(a, b);

        let other_aspect = prompt_cache_key("Mountain Sunset", AspectRatio::Square, &style, size);
        assert_ne!(a, other_aspect);

        let moody = StyleOptions {
            mood: Some("dramatic".to_string()),
            ..StyleOptions::default()
        };
        assert_ne!(a, prompt_cache_key("Mountain Sunset", AspectRatio::Wide, &moody, size));
    }

    #[test]
    fn test_ids_have_prefix_and_shape() {
        let id = generation_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "gen");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 16);

        assert!(selection_id().starts_with("sel_"));
        assert_ne!(generation_id(), generation_id());
    }

    #[test]
    fn test_random_hex_skips_version_and_variant_bytes() {
        let uuid = Uuid::from_bytes([
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x46, 0x07, 0x88, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
            0x0f,
        ]);
        assert_eq!(random_hex(&uuid), "0001020304050709");
    }
}
