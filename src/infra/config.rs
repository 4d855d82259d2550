// ============================================================
// Layer 7 — Pipeline Configuration
// ============================================================
// Every tunable threshold of the question pipeline in one place.
//
// Three presets reproduce the three model setups the pipeline
// was tuned with:
//
//   profile     first N  escalated N  min words  final check
//   ─────────   ───────  ───────────  ─────────  ────────────────
//   bert           3          5           15     lenient
//   distilbert     3          5            3     strict
//   roberta        5          7            3     lenient
//
// Precedence when building a config:
//   profile preset → JSON config file (--config) → CLI flags
//
// A config file only needs the fields it changes; the rest keep
// the profile's values:
//
//   { "min_answer_words": 5, "refusal": "I don't know" }
//
// Reference: serde crate documentation (field attributes)
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::validation::validator::DEFAULT_BOILERPLATE;

/// How the answer is judged after the escalated retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strictness {
    /// Refuse empty, boilerplate or irrelevant answers
    Strict,
    /// Refuse only empty or boilerplate answers
    Lenient,
}

/// Named presets for the pipeline thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    Bert,
    Distilbert,
    Roberta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Subject name that prefixes course numbers, e.g. "Computer Science"
    pub subject: String,

    /// Answers with fewer words trigger the escalated retry
    pub min_answer_words: usize,

    /// Passages ranked on the first attempt when a course code matched
    pub narrow_top_n: usize,

    /// Passages ranked on the first attempt over the whole store
    pub broad_top_n: usize,

    /// Passages ranked on the retry (both scopes)
    pub escalated_top_n: usize,

    /// Upper bound on answer length passed to the extractor
    pub max_answer_length: usize,

    /// Final check applied after the retry
    pub strictness: Strictness,

    /// Text returned when no acceptable answer was found
    pub refusal: String,

    /// Navigation phrases that make an answer unusable
    pub boilerplate_phrases: Vec<String>,

    /// Lowercase terms before BM25 ranking
    pub lowercase_ranking: bool,

    /// Deadline for one extractor call; 0 disables the guard
    pub extractor_timeout_secs: u64,
}

impl PipelineConfig {
    /// The preset thresholds for `profile`.
    pub fn for_profile(profile: Profile) -> Self {
        let base = Self::base();
        match profile {
            Profile::Bert => Self {
                min_answer_words: 15,
                strictness:       Strictness::Lenient,
                refusal:          "Sorry, I couldn't find an answer.".to_string(),
                ..base
            },
            Profile::Distilbert => base,
            Profile::Roberta => Self {
                narrow_top_n:    5,
                broad_top_n:     5,
                escalated_top_n: 7,
                strictness:      Strictness::Lenient,
                ..base
            },
        }
    }

    fn base() -> Self {
        Self {
            subject:                "Computer Science".to_string(),
            min_answer_words:       3,
            narrow_top_n:           3,
            broad_top_n:            3,
            escalated_top_n:        5,
            max_answer_length:      512,
            strictness:             Strictness::Strict,
            refusal:                "I don't know".to_string(),
            boilerplate_phrases:    DEFAULT_BOILERPLATE.iter().map(|s| s.to_string()).collect(),
            lowercase_ranking:      true,
            extractor_timeout_secs: 30,
        }
    }

    /// Start from `profile` and apply the fields present in `path`.
    pub fn load(profile: Profile, path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        Self::merge_json(Self::for_profile(profile), &json)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    /// Overlay the fields present in `json` onto `base`.
    fn merge_json(base: Self, json: &str) -> Result<Self> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(overrides) = overrides else {
            bail!("config must be a JSON object");
        };

        let mut merged = serde_json::to_value(base)?;
        if let serde_json::Value::Object(ref mut fields) = merged {
            for (key, value) in overrides {
                if !fields.contains_key(&key) {
                    bail!("unknown config field '{key}'");
                }
                fields.insert(key, value);
            }
        }
        Ok(serde_json::from_value(merged)?)
    }

    /// Reject settings the orchestrator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.narrow_top_n == 0 || self.broad_top_n == 0 || self.escalated_top_n == 0 {
            bail!("top_n values must be positive");
        }
        if self.escalated_top_n < self.narrow_top_n.max(self.broad_top_n) {
            bail!(
                "escalated_top_n ({}) must not be smaller than narrow_top_n ({}) or broad_top_n ({})",
                self.escalated_top_n,
                self.narrow_top_n,
                self.broad_top_n
            );
        }
        if self.subject.trim().is_empty() {
            bail!("subject must not be empty");
        }
        if self.max_answer_length == 0 {
            bail!("max_answer_length must be positive");
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::for_profile(Profile::Distilbert)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_profiles_match_preset_table() {
        let bert = PipelineConfig::for_profile(Profile::Bert);
        assert_eq!((bert.narrow_top_n, bert.escalated_top_n, bert.min_answer_words), (3, 5, 15));
        assert_eq!(bert.strictness, Strictness::Lenient);

        let distil = PipelineConfig::for_profile(Profile::Distilbert);
        assert_eq!((distil.narrow_top_n, distil.escalated_top_n, distil.min_answer_words), (3, 5, 3));
        assert_eq!(distil.strictness, Strictness::Strict);

        let roberta = PipelineConfig::for_profile(Profile::Roberta);
        assert_eq!((roberta.broad_top_n, roberta.escalated_top_n), (5, 7));
        assert_eq!(roberta.strictness, Strictness::Lenient);
    }

    #[test]
    fn test_every_profile_is_valid() {
        for p in [Profile::Bert, Profile::Distilbert, Profile::Roberta] {
            assert!(PipelineConfig::for_profile(p).validate().is_ok());
        }
    }

    #[test]
    fn test_file_overrides_only_given_fields() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"min_answer_words": 5, "strictness": "strict"}}"#).unwrap();

        let cfg = PipelineConfig::load(Profile::Roberta, f.path()).unwrap();
        assert_eq!(cfg.min_answer_words, 5);
        assert_eq!(cfg.strictness, Strictness::Strict);
        // Untouched fields keep the profile's values
        assert_eq!(cfg.escalated_top_n, 7);
        assert_eq!(cfg.subject, "Computer Science");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let r = PipelineConfig::merge_json(PipelineConfig::default(), r#"{"top_n": 4}"#);
        assert!(r.is_err());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let r = PipelineConfig::merge_json(PipelineConfig::default(), r#"{"narrow_top_n": "three"}"#);
        assert!(r.is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PipelineConfig::load(Profile::Bert, &dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_top_n() {
        let zero = PipelineConfig { narrow_top_n: 0, ..PipelineConfig::default() };
        assert!(zero.validate().is_err());

        let shrinking = PipelineConfig { escalated_top_n: 2, ..PipelineConfig::default() };
        assert!(shrinking.validate().is_err());
    }

    #[test]
    fn test_serialises_with_kebab_case_enums() {
        let json = serde_json::to_value(PipelineConfig::for_profile(Profile::Bert)).unwrap();
        assert_eq!(json["strictness"], "lenient");
    }
}
