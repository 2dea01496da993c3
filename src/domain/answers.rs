//! Questionnaire answer types.
//!
//! Each field is a canonical tagged enum. The upstream collector gathers
//! answers as strings; `FromStr` on each enum is the normalization
//! boundary, mapping every accepted spelling of a concept onto exactly
//! one variant so downstream scoring rules never match raw strings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Validation error raised at the answer boundary.
///
/// The engine refuses malformed input rather than defaulting or coercing:
/// a required field without a value, a string outside a field's enumerated
/// domain, or a number outside its range all fail before scoring starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field}: unrecognized value {value:?}")]
    UnknownValue { field: &'static str, value: String },

    #[error("{field}: {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Menstrual cycle regularity.
///
/// The source questionnaire offered both "Absent for months" and
/// "Absent or very irregular"; both mean the same concept and collapse
/// onto [`CycleLength::Absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleLength {
    Regular,
    Irregular,
    Absent,
}

impl CycleLength {
    /// Canonical questionnaire wording.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Regular => "Regular (25–35 days)",
            Self::Irregular => "Irregular (varies frequently)",
            Self::Absent => "Absent for months",
        }
    }
}

impl FromStr for CycleLength {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Regular (25–35 days)" | "Regular (25-35 days)" | "Regular" => Ok(Self::Regular),
            "Irregular (varies frequently)" | "Irregular" => Ok(Self::Irregular),
            "Absent for months" | "Absent or very irregular" | "Absent" => Ok(Self::Absent),
            other => Err(AnswerError::UnknownValue {
                field: "cycle_length",
                value: other.to_string(),
            }),
        }
    }
}

/// Severity of period pain.
///
/// "Sometimes"/"Occasionally" and "Often"/"Frequently" were used
/// interchangeably in the source; each pair is one canonical variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodPain {
    No,
    Occasional,
    Frequent,
}

impl PeriodPain {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Occasional => "Sometimes",
            Self::Frequent => "Often",
        }
    }
}

impl FromStr for PeriodPain {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "No" => Ok(Self::No),
            "Sometimes" | "Occasionally" => Ok(Self::Occasional),
            "Often" | "Frequently" => Ok(Self::Frequent),
            other => Err(AnswerError::UnknownValue {
                field: "period_pain",
                value: other.to_string(),
            }),
        }
    }
}

/// Sleep quality over the recent months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepQuality {
    Good,
    Disturbed,
    Insomnia,
}

impl SleepQuality {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Disturbed => "Disturbed",
            Self::Insomnia => "Insomnia / very poor",
        }
    }
}

impl FromStr for SleepQuality {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Good" => Ok(Self::Good),
            "Disturbed" => Ok(Self::Disturbed),
            "Insomnia / very poor" | "Poor/Insomnia" | "Insomnia" => Ok(Self::Insomnia),
            other => Err(AnswerError::UnknownValue {
                field: "sleep_quality",
                value: other.to_string(),
            }),
        }
    }
}

/// Shared No/Occasionally/Frequently scale (mood changes, sugar cravings,
/// anxiety).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    No,
    Occasionally,
    Frequently,
}

impl Frequency {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Occasionally => "Occasionally",
            Self::Frequently => "Frequently",
        }
    }

    fn parse(field: &'static str, s: &str) -> Result<Self, AnswerError> {
        match s.trim() {
            "No" => Ok(Self::No),
            "Occasionally" => Ok(Self::Occasionally),
            "Frequently" => Ok(Self::Frequently),
            other => Err(AnswerError::UnknownValue {
                field,
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for Frequency {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("frequency", s)
    }
}

/// Unexplained weight change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightChange {
    No,
    Gain,
    Loss,
    Fluctuates,
}

impl WeightChange {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Gain => "Weight gain",
            Self::Loss => "Weight loss",
            Self::Fluctuates => "Fluctuates",
        }
    }
}

impl FromStr for WeightChange {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "No" => Ok(Self::No),
            "Weight gain" => Ok(Self::Gain),
            "Weight loss" => Ok(Self::Loss),
            "Fluctuates" => Ok(Self::Fluctuates),
            other => Err(AnswerError::UnknownValue {
                field: "weight_change",
                value: other.to_string(),
            }),
        }
    }
}

/// Facial/body hair growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacialHair {
    No,
    Mild,
    Noticeable,
    Significant,
}

impl FacialHair {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Mild => "Mild",
            Self::Noticeable => "Noticeable",
            Self::Significant => "Significant",
        }
    }
}

impl FromStr for FacialHair {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "No" => Ok(Self::No),
            "Mild" => Ok(Self::Mild),
            "Noticeable" => Ok(Self::Noticeable),
            "Significant" => Ok(Self::Significant),
            other => Err(AnswerError::UnknownValue {
                field: "facial_hair",
                value: other.to_string(),
            }),
        }
    }
}

/// Missed periods in the last six months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissedPeriods {
    No,
    /// Once or twice.
    Occasional,
    /// Three or more times.
    Frequent,
    /// Hasn't had a period at all; prolonged absence is captured by
    /// `cycle_length`, so this variant adds no extra cycle score.
    Absent,
}

impl MissedPeriods {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Occasional => "Occasionally (once or twice)",
            Self::Frequent => "Frequently (three or more times)",
            Self::Absent => "Haven't had a period",
        }
    }
}

impl FromStr for MissedPeriods {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "No" => Ok(Self::No),
            "Occasionally (once or twice)" | "Occasionally" => Ok(Self::Occasional),
            "Frequently (three or more times)" | "Frequently" => Ok(Self::Frequent),
            "Haven't had a period" => Ok(Self::Absent),
            other => Err(AnswerError::UnknownValue {
                field: "missed_periods",
                value: other.to_string(),
            }),
        }
    }
}

/// Acne severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Acne {
    No,
    Mild,
    Moderate,
    Severe,
}

impl Acne {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}

impl FromStr for Acne {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "No" => Ok(Self::No),
            "Mild" => Ok(Self::Mild),
            "Moderate" => Ok(Self::Moderate),
            "Severe" => Ok(Self::Severe),
            other => Err(AnswerError::UnknownValue {
                field: "acne",
                value: other.to_string(),
            }),
        }
    }
}

/// Hair thinning or loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HairLoss {
    No,
    Mild,
    Noticeable,
}

impl HairLoss {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Mild => "Mild",
            Self::Noticeable => "Noticeable",
        }
    }
}

impl FromStr for HairLoss {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "No" => Ok(Self::No),
            "Mild" => Ok(Self::Mild),
            "Noticeable" => Ok(Self::Noticeable),
            other => Err(AnswerError::UnknownValue {
                field: "hair_loss",
                value: other.to_string(),
            }),
        }
    }
}

/// Physical activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

impl ActivityLevel {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary",
            Self::LightlyActive => "Lightly active",
            Self::ModeratelyActive => "Moderately active",
            Self::VeryActive => "Very active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Sedentary" => Ok(Self::Sedentary),
            "Lightly active" => Ok(Self::LightlyActive),
            "Moderately active" => Ok(Self::ModeratelyActive),
            "Very active" => Ok(Self::VeryActive),
            other => Err(AnswerError::UnknownValue {
                field: "activity_level",
                value: other.to_string(),
            }),
        }
    }
}

/// Typical diet pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietPattern {
    Balanced,
    HighSugar,
    LowCarb,
    Irregular,
}

impl DietPattern {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Balanced => "Balanced",
            Self::HighSugar => "High sugar / processed",
            Self::LowCarb => "Low-carb / controlled",
            Self::Irregular => "Irregular",
        }
    }
}

impl FromStr for DietPattern {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Balanced" => Ok(Self::Balanced),
            "High sugar / processed" | "High sugar/processed" => Ok(Self::HighSugar),
            "Low-carb / controlled" | "Low-carb" => Ok(Self::LowCarb),
            "Irregular" => Ok(Self::Irregular),
            other => Err(AnswerError::UnknownValue {
                field: "diet_pattern",
                value: other.to_string(),
            }),
        }
    }
}

/// Family history of PCOS/PCOD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilyHistory {
    No,
    NotSure,
    Yes,
}

impl FamilyHistory {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::NotSure => "Not sure",
            Self::Yes => "Yes",
        }
    }
}

impl FromStr for FamilyHistory {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "No" => Ok(Self::No),
            "Not sure" => Ok(Self::NotSure),
            "Yes" => Ok(Self::Yes),
            other => Err(AnswerError::UnknownValue {
                field: "family_history",
                value: other.to_string(),
            }),
        }
    }
}

/// Bounds for the self-reported stress slider.
pub const STRESS_RANGE: (u8, u8) = (0, 10);

/// Bounds for the optional age field (collector slider bounds).
pub const AGE_RANGE: (u8, u8) = (13, 50);

/// A complete, validated questionnaire submission.
///
/// Eight core fields are required; the rest are optional and contribute
/// nothing when absent. Construct via [`AnswersDraft::finalize`] (which
/// enforces presence and domains) or directly field-by-field; either way,
/// [`QuestionnaireAnswers::validate`] re-checks the numeric ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireAnswers {
    pub cycle_length: CycleLength,
    pub period_pain: PeriodPain,
    /// Average stress over the last 3 months, 0–10.
    pub stress_level: u8,
    pub sleep_quality: SleepQuality,
    pub mood_changes: Frequency,
    pub sugar_cravings: Frequency,
    pub weight_change: WeightChange,
    pub facial_hair: FacialHair,

    pub age: Option<u8>,
    pub missed_periods: Option<MissedPeriods>,
    pub acne: Option<Acne>,
    pub hair_loss: Option<HairLoss>,
    pub anxiety: Option<Frequency>,
    pub activity_level: Option<ActivityLevel>,
    pub diet_pattern: Option<DietPattern>,
    pub family_history: Option<FamilyHistory>,
}

impl QuestionnaireAnswers {
    /// Validate numeric ranges.
    ///
    /// # Errors
    /// Returns the first out-of-range field.
    pub fn validate(&self) -> Result<(), AnswerError> {
        if self.stress_level > STRESS_RANGE.1 {
            return Err(AnswerError::OutOfRange {
                field: "stress_level",
                value: i64::from(self.stress_level),
                min: i64::from(STRESS_RANGE.0),
                max: i64::from(STRESS_RANGE.1),
            });
        }
        if let Some(age) = self.age {
            if !(AGE_RANGE.0..=AGE_RANGE.1).contains(&age) {
                return Err(AnswerError::OutOfRange {
                    field: "age",
                    value: i64::from(age),
                    min: i64::from(AGE_RANGE.0),
                    max: i64::from(AGE_RANGE.1),
                });
            }
        }
        Ok(())
    }
}

/// Raw answers as collected from the user, before validation.
///
/// Every field is optional here; [`AnswersDraft::finalize`] is where
/// required-field presence is enforced. String fields hold whatever the
/// collector gathered and are normalized through `FromStr`.
#[derive(Debug, Clone, Default)]
pub struct AnswersDraft {
    pub cycle_length: Option<String>,
    pub period_pain: Option<String>,
    pub stress_level: Option<i64>,
    pub sleep_quality: Option<String>,
    pub mood_changes: Option<String>,
    pub sugar_cravings: Option<String>,
    pub weight_change: Option<String>,
    pub facial_hair: Option<String>,

    pub age: Option<i64>,
    pub missed_periods: Option<String>,
    pub acne: Option<String>,
    pub hair_loss: Option<String>,
    pub anxiety: Option<String>,
    pub activity_level: Option<String>,
    pub diet_pattern: Option<String>,
    pub family_history: Option<String>,
}

fn required<T: FromStr<Err = AnswerError>>(
    field: &'static str,
    value: Option<&String>,
) -> Result<T, AnswerError> {
    value
        .ok_or(AnswerError::MissingField(field))
        .and_then(|s| s.parse())
}

fn optional<T: FromStr<Err = AnswerError>>(value: Option<&String>) -> Result<Option<T>, AnswerError> {
    value.map(|s| s.parse()).transpose()
}

fn bounded(field: &'static str, value: i64, range: (u8, u8)) -> Result<u8, AnswerError> {
    if value < i64::from(range.0) || value > i64::from(range.1) {
        return Err(AnswerError::OutOfRange {
            field,
            value,
            min: i64::from(range.0),
            max: i64::from(range.1),
        });
    }
    // Bounds fit in u8, checked above.
    Ok(value as u8)
}

impl AnswersDraft {
    /// Validate and convert into a typed answer record.
    ///
    /// # Errors
    /// Fails on the first missing required field, unrecognized value, or
    /// out-of-range number. No partial record is ever produced.
    pub fn finalize(&self) -> Result<QuestionnaireAnswers, AnswerError> {
        let anxiety = match self.anxiety.as_ref() {
            Some(s) => Some(Frequency::parse("anxiety", s)?),
            None => None,
        };

        Ok(QuestionnaireAnswers {
            cycle_length: required("cycle_length", self.cycle_length.as_ref())?,
            period_pain: required("period_pain", self.period_pain.as_ref())?,
            stress_level: bounded(
                "stress_level",
                self.stress_level
                    .ok_or(AnswerError::MissingField("stress_level"))?,
                STRESS_RANGE,
            )?,
            sleep_quality: required("sleep_quality", self.sleep_quality.as_ref())?,
            mood_changes: self
                .mood_changes
                .as_ref()
                .ok_or(AnswerError::MissingField("mood_changes"))
                .and_then(|s| Frequency::parse("mood_changes", s))?,
            sugar_cravings: self
                .sugar_cravings
                .as_ref()
                .ok_or(AnswerError::MissingField("sugar_cravings"))
                .and_then(|s| Frequency::parse("sugar_cravings", s))?,
            weight_change: required("weight_change", self.weight_change.as_ref())?,
            facial_hair: required("facial_hair", self.facial_hair.as_ref())?,
            age: self.age.map(|a| bounded("age", a, AGE_RANGE)).transpose()?,
            missed_periods: optional(self.missed_periods.as_ref())?,
            acne: optional(self.acne.as_ref())?,
            hair_loss: optional(self.hair_loss.as_ref())?,
            anxiety,
            activity_level: optional(self.activity_level.as_ref())?,
            diet_pattern: optional(self.diet_pattern.as_ref())?,
            family_history: optional(self.family_history.as_ref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> AnswersDraft {
        AnswersDraft {
            cycle_length: Some("Irregular (varies frequently)".into()),
            period_pain: Some("Sometimes".into()),
            stress_level: Some(5),
            sleep_quality: Some("Disturbed".into()),
            mood_changes: Some("Occasionally".into()),
            sugar_cravings: Some("No".into()),
            weight_change: Some("No".into()),
            facial_hair: Some("Mild".into()),
            ..AnswersDraft::default()
        }
    }

    #[test]
    fn test_finalize_required_only() {
        let answers = full_draft().finalize().expect("Should validate");
        assert_eq!(answers.cycle_length, CycleLength::Irregular);
        assert_eq!(answers.stress_level, 5);
        assert!(answers.age.is_none());
        assert!(answers.acne.is_none());
    }

    #[test]
    fn test_missing_required_field() {
        let mut draft = full_draft();
        draft.sleep_quality = None;
        assert_eq!(
            draft.finalize().unwrap_err(),
            AnswerError::MissingField("sleep_quality")
        );
    }

    #[test]
    fn test_stress_out_of_range() {
        let mut draft = full_draft();
        draft.stress_level = Some(15);
        assert!(matches!(
            draft.finalize().unwrap_err(),
            AnswerError::OutOfRange {
                field: "stress_level",
                value: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_enum_value() {
        let mut draft = full_draft();
        draft.facial_hair = Some("Lots".into());
        assert!(matches!(
            draft.finalize().unwrap_err(),
            AnswerError::UnknownValue {
                field: "facial_hair",
                ..
            }
        ));
    }

    #[test]
    fn test_spelling_variants_normalize() {
        assert_eq!(
            "Absent or very irregular".parse::<CycleLength>().unwrap(),
            CycleLength::Absent
        );
        assert_eq!(
            "Absent for months".parse::<CycleLength>().unwrap(),
            CycleLength::Absent
        );
        assert_eq!(
            "Poor/Insomnia".parse::<SleepQuality>().unwrap(),
            SleepQuality::Insomnia
        );
        assert_eq!(
            "Insomnia / very poor".parse::<SleepQuality>().unwrap(),
            SleepQuality::Insomnia
        );
        assert_eq!(
            "Frequently".parse::<PeriodPain>().unwrap(),
            PeriodPain::Frequent
        );
        assert_eq!(
            "Occasionally".parse::<PeriodPain>().unwrap(),
            PeriodPain::Occasional
        );
    }

    #[test]
    fn test_age_bounds() {
        let mut draft = full_draft();
        draft.age = Some(12);
        assert!(matches!(
            draft.finalize().unwrap_err(),
            AnswerError::OutOfRange { field: "age", .. }
        ));

        draft.age = Some(22);
        let answers = draft.finalize().expect("Should validate");
        assert_eq!(answers.age, Some(22));
        answers.validate().expect("Typed record stays valid");
    }
}
