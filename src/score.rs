//! Quality scoring for analysis results.
//!
//! The score is a coarse dashboard signal derived from the number of
//! detected defects only. Severity does not factor in.

use serde::{Deserialize, Serialize};

/// Default score for a snippet with no defects.
pub const DEFAULT_CLEAN_SCORE: u8 = 100;

/// Default starting point once at least one defect is found.
pub const DEFAULT_BASELINE: u8 = 90;

/// Default points deducted per defect.
pub const DEFAULT_PENALTY: u8 = 15;

/// Quality band thresholds.
pub mod bands {
    pub const GOOD_MIN: u8 = 80;
    pub const FAIR_MIN: u8 = 60;
}

/// Scoring parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score when nothing was detected.
    #[serde(default = "default_clean_score")]
    pub clean_score: u8,
    /// Score the per-defect penalty is subtracted from.
    #[serde(default = "default_baseline")]
    pub baseline: u8,
    /// Points deducted per defect.
    #[serde(default = "default_penalty")]
    pub penalty: u8,
}

fn default_clean_score() -> u8 {
    DEFAULT_CLEAN_SCORE
}

fn default_baseline() -> u8 {
    DEFAULT_BASELINE
}

fn default_penalty() -> u8 {
    DEFAULT_PENALTY
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            clean_score: DEFAULT_CLEAN_SCORE,
            baseline: DEFAULT_BASELINE,
            penalty: DEFAULT_PENALTY,
        }
    }
}

impl ScoringConfig {
    /// Check the invariants that keep scores in `[0, 100]` and monotone.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.clean_score > 100 {
            anyhow::bail!("clean_score {} exceeds 100", self.clean_score);
        }
        if self.baseline > self.clean_score {
            anyhow::bail!(
                "baseline {} must not exceed clean_score {}",
                self.baseline,
                self.clean_score
            );
        }
        Ok(())
    }

    /// Score a snippet with `defect_count` defects.
    ///
    /// Zero defects score `clean_score`; otherwise `baseline` minus `penalty`
    /// per defect, floored at zero.
    pub fn score(&self, defect_count: usize) -> u8 {
        if defect_count == 0 {
            return self.clean_score;
        }
        let deducted = (self.penalty as usize).saturating_mul(defect_count);
        (self.baseline as usize).saturating_sub(deducted) as u8
    }
}

/// Coarse rating used for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityBand {
    Good,
    Fair,
    Poor,
}

impl QualityBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= bands::GOOD_MIN => QualityBand::Good,
            s if s >= bands::FAIR_MIN => QualityBand::Fair,
            _ => QualityBand::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityBand::Good => "good",
            QualityBand::Fair => "fair",
            QualityBand::Poor => "poor",
        }
    }
}

impl std::fmt::Display for QualityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
