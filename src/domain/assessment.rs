//! Assessment result types.
//!
//! Represents the output of the rule-based PCOS pattern screening.

use serde::{Deserialize, Serialize};

/// Signal ceiling used to normalize per-signal display gauges.
///
/// The accumulation rules enforce no upper bound; this is a display
/// convention only, never a clamp.
pub const SIGNAL_DISPLAY_CEILING: u32 = 10;

/// Aggregate ceiling used to normalize the risk-score gauge and to derive
/// the confidence percentage. Also a display convention, not a clamp:
/// scores above it produce confidence above 100.
pub const RISK_DISPLAY_CEILING: u32 = 20;

/// Five independently accumulated symptom-cluster counters.
///
/// Counters start at zero and only ever increase; no answer decrements
/// another counter's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalVector {
    pub cycle: u32,
    pub stress: u32,
    pub insulin: u32,
    pub androgen: u32,
    pub inflammation: u32,
}

impl SignalVector {
    /// Sum of all five signals; this is the composite risk score.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.cycle + self.stress + self.insulin + self.androgen + self.inflammation
    }

    /// Signals as (name, score) pairs in fixed display order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, u32); 5] {
        [
            ("Cycle irregularity", self.cycle),
            ("Stress & adrenal", self.stress),
            ("Metabolic / insulin", self.insulin),
            ("Androgen-related", self.androgen),
            ("Inflammation", self.inflammation),
        ]
    }
}

/// Risk tier derived from the aggregate signal sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Aggregate score 0–6
    Low,
    /// Aggregate score 7–12
    Moderate,
    /// Aggregate score 13+
    High,
}

impl RiskLevel {
    /// Bucket a composite risk score into its tier.
    ///
    /// Boundaries are fixed: ≤6 low, 7–12 moderate, >12 high.
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        if score <= 6 {
            Self::Low
        } else if score <= 12 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// User-facing tier label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - Lifestyle-focused monitoring may be appropriate",
            Self::Moderate => "Moderate risk - Reassessment and tracking recommended",
            Self::High => "High risk - Medical consultation advised",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Best-matching PCOS symptom-cluster pattern.
///
/// Exactly five labels exist: four specific subtypes plus a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PcosPattern {
    Adrenal,
    InsulinResistant,
    Lean,
    Inflammatory,
    Unclear,
}

impl PcosPattern {
    /// Pattern label as shown to users and clinicians.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Adrenal => "Adrenal PCOS (Stress-driven)",
            Self::InsulinResistant => "Insulin-Resistant PCOS",
            Self::Lean => "Lean PCOS",
            Self::Inflammatory => "Inflammatory PCOS",
            Self::Unclear => "Low / Unclear PCOS Pattern",
        }
    }

    /// Fixed explanatory sentence for the pattern, non-diagnostic wording.
    #[must_use]
    pub fn explanation(&self) -> &'static str {
        match self {
            Self::Adrenal => {
                "Your symptoms indicate chronic stress and adrenal overload. \
                 This PCOS type is often overlooked in standard diagnosis."
            }
            Self::InsulinResistant => {
                "Your responses suggest metabolic stress and insulin resistance, \
                 one of the most common PCOS drivers."
            }
            Self::Lean => {
                "Despite limited metabolic symptoms, cycle irregularities suggest \
                 a hormonal imbalance typical of Lean PCOS."
            }
            Self::Inflammatory => {
                "Inflammation, pain, and fatigue dominate your symptom pattern."
            }
            Self::Unclear => {
                "Your current responses do not strongly match a specific PCOS subtype."
            }
        }
    }
}

impl std::fmt::Display for PcosPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one engine evaluation (pure output, no metadata).
///
/// Immutable once constructed; the engine never emits a partially
/// populated assessment. Identical answer records produce identical
/// assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Per-cluster sub-scores.
    pub signals: SignalVector,

    /// Composite score; always equals `signals.total()`.
    pub risk_score: u32,

    /// Tier derived from `risk_score`.
    pub risk_level: RiskLevel,

    /// Dominant pattern from the first-match rule chain.
    pub pattern: PcosPattern,

    /// Verbatim explanation for the matched pattern.
    pub explanation: String,

    /// Signal-strength percentage, `round(risk_score / 20 * 100, 1)`.
    /// Deliberately uncapped; scores above 20 exceed 100.
    pub confidence: f64,

    /// Whether professional follow-up is suggested.
    pub doctor_needed: bool,

    /// Reasons supporting `doctor_needed`, in evaluation order.
    pub doctor_reasons: Vec<String>,
}

/// A persisted screening: an assessment plus record metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningRecord {
    /// Unique identifier
    pub id: String,

    /// The engine output
    pub assessment: Assessment,

    /// Timestamp of the screening
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ScreeningRecord {
    /// Wrap an assessment in a new record.
    #[must_use]
    pub fn new(assessment: Assessment) -> Self {
        Self {
            id: uuid_v4(),
            assessment,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Generate a simple UUID v4 (random) using a CSPRNG.
///
/// ChaCha20Rng seeded from OS entropy guarantees unpredictable record IDs
/// on all platforms.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(6), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(7), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(12), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(13), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(32), RiskLevel::High);
    }

    #[test]
    fn test_labels() {
        assert_eq!(RiskLevel::Moderate.label(), "Moderate Risk");
        assert_eq!(PcosPattern::Unclear.label(), "Low / Unclear PCOS Pattern");
        assert_eq!(
            PcosPattern::Adrenal.to_string(),
            "Adrenal PCOS (Stress-driven)"
        );
    }

    #[test]
    fn test_signal_total() {
        let signals = SignalVector {
            cycle: 3,
            stress: 8,
            insulin: 0,
            androgen: 0,
            inflammation: 3,
        };
        assert_eq!(signals.total(), 14);
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36); // UUID format with dashes
    }
}
