//! Scoring engine: deterministic signal scoring and classification.
//!
//! This is the heart of the crate. One pure, stateless pass maps a
//! validated answer record to an [`Assessment`]:
//!
//! 1. accumulate the five signal counters from independent per-field rules
//! 2. classify the dominant pattern via a fixed, ordered first-match chain
//! 3. bucket the aggregate score into a risk tier and derive confidence
//! 4. decide whether professional consultation is suggested, with reasons
//!
//! Every output is traceable to the inputs that produced it; there is no
//! randomness, no time dependence, and no hidden state.

use crate::domain::{
    Acne, ActivityLevel, AnswerError, Assessment, CycleLength, DietPattern, FacialHair, Frequency,
    HairLoss, MissedPeriods, PcosPattern, PeriodPain, QuestionnaireAnswers, RiskLevel,
    SignalVector, SleepQuality, WeightChange, RISK_DISPLAY_CEILING,
};

/// Evaluate a questionnaire submission.
///
/// The answer record is re-validated before scoring; post-validation the
/// computation cannot fail, so either a complete assessment is returned
/// or an error, never a partial result.
///
/// # Errors
/// Returns [`AnswerError`] if a numeric field is out of its domain.
pub fn evaluate(answers: &QuestionnaireAnswers) -> Result<Assessment, AnswerError> {
    answers.validate()?;

    let signals = accumulate_signals(answers);
    let risk_score = signals.total();
    let risk_level = RiskLevel::from_score(risk_score);
    let pattern = classify(&signals);
    let confidence = confidence_percent(risk_score);
    let doctor_reasons = consultation_reasons(answers, &signals, risk_level);

    Ok(Assessment {
        signals,
        risk_score,
        risk_level,
        pattern,
        explanation: pattern.explanation().to_string(),
        confidence,
        doctor_needed: !doctor_reasons.is_empty(),
        doctor_reasons,
    })
}

/// Convert each answer into additive contributions to the five counters.
///
/// Rule groups are independent and order-insensitive; contributions from
/// different fields accumulate, while tiers within one field are mutually
/// exclusive.
fn accumulate_signals(answers: &QuestionnaireAnswers) -> SignalVector {
    let mut s = SignalVector::default();

    // Cycle irregularity
    match answers.cycle_length {
        CycleLength::Irregular => s.cycle += 2,
        CycleLength::Absent => s.cycle += 3,
        CycleLength::Regular => {}
    }
    match answers.missed_periods {
        Some(MissedPeriods::Frequent) => s.cycle += 2,
        Some(MissedPeriods::Occasional) => s.cycle += 1,
        _ => {}
    }

    // Stress & adrenal
    if answers.stress_level >= 7 {
        s.stress += 4;
    } else if answers.stress_level >= 4 {
        s.stress += 2;
    }
    match answers.sleep_quality {
        SleepQuality::Disturbed => s.stress += 1,
        SleepQuality::Insomnia => s.stress += 2,
        SleepQuality::Good => {}
    }
    if answers.mood_changes == Frequency::Frequently {
        s.stress += 2;
    }
    match answers.anxiety {
        Some(Frequency::Frequently) => s.stress += 2,
        Some(Frequency::Occasionally) => s.stress += 1,
        _ => {}
    }

    // Insulin resistance
    match answers.sugar_cravings {
        Frequency::Frequently => s.insulin += 3,
        Frequency::Occasionally => s.insulin += 1,
        Frequency::No => {}
    }
    if matches!(
        answers.weight_change,
        WeightChange::Gain | WeightChange::Fluctuates
    ) {
        s.insulin += 2;
    }
    if answers.diet_pattern == Some(DietPattern::HighSugar) {
        s.insulin += 1;
    }
    if answers.activity_level == Some(ActivityLevel::Sedentary) {
        s.insulin += 1;
    }

    // Androgen excess
    match answers.facial_hair {
        FacialHair::Noticeable | FacialHair::Significant => s.androgen += 3,
        FacialHair::Mild => s.androgen += 1,
        FacialHair::No => {}
    }
    match answers.acne {
        Some(Acne::Severe | Acne::Moderate) => s.androgen += 2,
        Some(Acne::Mild) => s.androgen += 1,
        _ => {}
    }
    match answers.hair_loss {
        Some(HairLoss::Noticeable) => s.androgen += 2,
        Some(HairLoss::Mild) => s.androgen += 1,
        _ => {}
    }

    // Inflammation
    match answers.period_pain {
        PeriodPain::Frequent => s.inflammation += 2,
        PeriodPain::Occasional => s.inflammation += 1,
        PeriodPain::No => {}
    }
    if answers.sleep_quality != SleepQuality::Good {
        s.inflammation += 1;
    }

    s
}

/// Select the dominant pattern.
///
/// The chain is a strict first-match list; its order is part of the
/// contract. Boundary values are deliberate: adrenal tolerates insulin up
/// to 3, lean only up to 2, so insulin == 3 with cycle irregularity falls
/// through.
fn classify(signals: &SignalVector) -> PcosPattern {
    if signals.stress >= 7 && signals.insulin < 4 {
        PcosPattern::Adrenal
    } else if signals.insulin >= 6 {
        PcosPattern::InsulinResistant
    } else if signals.cycle >= 3 && signals.insulin <= 2 {
        PcosPattern::Lean
    } else if signals.inflammation >= 3 {
        PcosPattern::Inflammatory
    } else {
        PcosPattern::Unclear
    }
}

/// Linear signal-strength percentage, rounded to one decimal.
///
/// Not a probability: it reflects how strongly the signals fired, not
/// diagnostic certainty. Uncapped on purpose, so aggregate scores above
/// the display ceiling of 20 exceed 100.
fn confidence_percent(risk_score: u32) -> f64 {
    let raw = f64::from(risk_score) / f64::from(RISK_DISPLAY_CEILING) * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Independent consultation checks, each appending one reason when
/// triggered. `doctor_needed` is the OR across them: a non-empty list.
fn consultation_reasons(
    answers: &QuestionnaireAnswers,
    signals: &SignalVector,
    risk_level: RiskLevel,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if risk_level == RiskLevel::High {
        reasons.push("overall high risk pattern".to_string());
    }
    if signals.cycle >= 3 && signals.inflammation >= 3 {
        reasons.push("severe pain with cycle irregularity".to_string());
    }
    if signals.insulin >= 6 {
        reasons.push("strong metabolic indicators".to_string());
    }
    if answers.cycle_length == CycleLength::Absent {
        reasons.push("prolonged absence of periods".to_string());
    }
    if signals.androgen >= 5 {
        reasons.push("significant androgen-related symptoms".to_string());
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All required fields at their most benign value, optionals absent.
    fn benign() -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            cycle_length: CycleLength::Regular,
            period_pain: PeriodPain::No,
            stress_level: 0,
            sleep_quality: SleepQuality::Good,
            mood_changes: Frequency::No,
            sugar_cravings: Frequency::No,
            weight_change: WeightChange::No,
            facial_hair: FacialHair::No,
            age: None,
            missed_periods: None,
            acne: None,
            hair_loss: None,
            anxiety: None,
            activity_level: None,
            diet_pattern: None,
            family_history: None,
        }
    }

    #[test]
    fn test_benign_answers_score_zero() {
        let result = evaluate(&benign()).expect("Should evaluate");

        assert_eq!(result.signals, SignalVector::default());
        assert_eq!(result.risk_score, 0);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.pattern, PcosPattern::Unclear);
        assert!((result.confidence - 0.0).abs() < f64::EPSILON);
        assert!(!result.doctor_needed);
        assert!(result.doctor_reasons.is_empty());
    }

    #[test]
    fn test_adrenal_scenario() {
        let answers = QuestionnaireAnswers {
            cycle_length: CycleLength::Absent,
            period_pain: PeriodPain::Frequent,
            stress_level: 8,
            sleep_quality: SleepQuality::Insomnia,
            mood_changes: Frequency::Frequently,
            ..benign()
        };

        let result = evaluate(&answers).expect("Should evaluate");

        assert_eq!(result.signals.cycle, 3);
        assert_eq!(result.signals.stress, 8); // 4 + 2 + 2
        assert_eq!(result.signals.insulin, 0);
        assert_eq!(result.signals.androgen, 0);
        assert_eq!(result.signals.inflammation, 3); // 2 + 1
        assert_eq!(result.risk_score, 14);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.pattern, PcosPattern::Adrenal);
        assert!(result.doctor_needed);
        assert_eq!(
            result.doctor_reasons,
            vec![
                "overall high risk pattern",
                "severe pain with cycle irregularity",
                "prolonged absence of periods",
            ]
        );
    }

    #[test]
    fn test_metabolic_below_threshold_falls_back() {
        let answers = QuestionnaireAnswers {
            sugar_cravings: Frequency::Frequently,
            weight_change: WeightChange::Gain,
            ..benign()
        };

        let result = evaluate(&answers).expect("Should evaluate");

        assert_eq!(result.signals.insulin, 5); // 3 + 2, below the 6 cutoff
        assert_eq!(result.risk_score, 5);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.pattern, PcosPattern::Unclear);
        assert!(!result.doctor_needed);
    }

    #[test]
    fn test_insulin_resistant_pattern() {
        let answers = QuestionnaireAnswers {
            sugar_cravings: Frequency::Frequently,
            weight_change: WeightChange::Fluctuates,
            diet_pattern: Some(DietPattern::HighSugar),
            ..benign()
        };

        let result = evaluate(&answers).expect("Should evaluate");

        assert_eq!(result.signals.insulin, 6);
        assert_eq!(result.pattern, PcosPattern::InsulinResistant);
        // Metabolic check fires independently of the risk tier.
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.doctor_needed);
        assert_eq!(result.doctor_reasons, vec!["strong metabolic indicators"]);
    }

    #[test]
    fn test_adrenal_wins_over_insulin_when_insulin_low() {
        // Chain order: with high stress and insulin below 4, the adrenal
        // rule matches first even though other branches could fire later.
        let answers = QuestionnaireAnswers {
            cycle_length: CycleLength::Absent,
            stress_level: 10,
            sleep_quality: SleepQuality::Insomnia,
            mood_changes: Frequency::Frequently,
            anxiety: Some(Frequency::Frequently),
            sugar_cravings: Frequency::Occasionally,
            weight_change: WeightChange::Gain,
            ..benign()
        };

        let result = evaluate(&answers).expect("Should evaluate");

        assert_eq!(result.signals.stress, 10);
        assert_eq!(result.signals.insulin, 3);
        // cycle == 3 would also satisfy the lean rule's cycle arm.
        assert_eq!(result.pattern, PcosPattern::Adrenal);
    }

    #[test]
    fn test_high_stress_high_insulin_is_insulin_resistant() {
        let answers = QuestionnaireAnswers {
            stress_level: 10,
            sleep_quality: SleepQuality::Insomnia,
            mood_changes: Frequency::Frequently,
            sugar_cravings: Frequency::Frequently,
            weight_change: WeightChange::Gain,
            diet_pattern: Some(DietPattern::HighSugar),
            ..benign()
        };

        let result = evaluate(&answers).expect("Should evaluate");

        assert_eq!(result.signals.stress, 8);
        assert_eq!(result.signals.insulin, 6);
        // Adrenal requires insulin < 4, so the chain moves on.
        assert_eq!(result.pattern, PcosPattern::InsulinResistant);
    }

    #[test]
    fn test_lean_pattern_requires_insulin_at_most_two() {
        let lean = QuestionnaireAnswers {
            cycle_length: CycleLength::Absent,
            sugar_cravings: Frequency::Occasionally,
            ..benign()
        };
        let result = evaluate(&lean).expect("Should evaluate");
        assert_eq!(result.signals.insulin, 1);
        assert_eq!(result.pattern, PcosPattern::Lean);

        // insulin == 3 sits in the gap between lean (≤2) and adrenal (<4):
        // with low stress it falls through past both.
        let gap = QuestionnaireAnswers {
            cycle_length: CycleLength::Absent,
            sugar_cravings: Frequency::Occasionally,
            weight_change: WeightChange::Gain,
            ..benign()
        };
        let result = evaluate(&gap).expect("Should evaluate");
        assert_eq!(result.signals.insulin, 3);
        assert_eq!(result.pattern, PcosPattern::Unclear);
    }

    #[test]
    fn test_inflammatory_pattern() {
        let answers = QuestionnaireAnswers {
            period_pain: PeriodPain::Frequent,
            sleep_quality: SleepQuality::Disturbed,
            ..benign()
        };

        let result = evaluate(&answers).expect("Should evaluate");

        assert_eq!(result.signals.inflammation, 3); // 2 + 1
        assert_eq!(result.pattern, PcosPattern::Inflammatory);
    }

    #[test]
    fn test_androgen_contributions_accumulate() {
        let answers = QuestionnaireAnswers {
            facial_hair: FacialHair::Significant,
            acne: Some(Acne::Moderate),
            hair_loss: Some(HairLoss::Noticeable),
            ..benign()
        };

        let result = evaluate(&answers).expect("Should evaluate");

        assert_eq!(result.signals.androgen, 7); // 3 + 2 + 2
        assert!(result.doctor_needed);
        assert_eq!(
            result.doctor_reasons,
            vec!["significant androgen-related symptoms"]
        );
    }

    #[test]
    fn test_risk_score_equals_signal_sum() {
        let answers = QuestionnaireAnswers {
            cycle_length: CycleLength::Irregular,
            period_pain: PeriodPain::Occasional,
            stress_level: 5,
            sleep_quality: SleepQuality::Disturbed,
            sugar_cravings: Frequency::Occasionally,
            facial_hair: FacialHair::Mild,
            missed_periods: Some(MissedPeriods::Occasional),
            acne: Some(Acne::Mild),
            activity_level: Some(ActivityLevel::Sedentary),
            ..benign()
        };

        let result = evaluate(&answers).expect("Should evaluate");
        assert_eq!(result.risk_score, result.signals.total());
        assert!(
            (result.confidence - f64::from(result.risk_score) * 5.0).abs() < f64::EPSILON
        );
    }

    #[test]
    fn test_confidence_is_uncapped() {
        // Every field at its maximum contribution: 5+10+7+7+3 = 32.
        let answers = QuestionnaireAnswers {
            cycle_length: CycleLength::Absent,
            period_pain: PeriodPain::Frequent,
            stress_level: 10,
            sleep_quality: SleepQuality::Insomnia,
            mood_changes: Frequency::Frequently,
            sugar_cravings: Frequency::Frequently,
            weight_change: WeightChange::Gain,
            facial_hair: FacialHair::Significant,
            missed_periods: Some(MissedPeriods::Frequent),
            acne: Some(Acne::Severe),
            hair_loss: Some(HairLoss::Noticeable),
            anxiety: Some(Frequency::Frequently),
            activity_level: Some(ActivityLevel::Sedentary),
            diet_pattern: Some(DietPattern::HighSugar),
            ..benign()
        };

        let result = evaluate(&answers).expect("Should evaluate");

        assert_eq!(result.risk_score, 32);
        // Any future clamp to 100 is a behavior change this test must catch.
        assert!((result.confidence - 160.0).abs() < f64::EPSILON);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_high_risk_always_recommends_consultation() {
        let answers = QuestionnaireAnswers {
            cycle_length: CycleLength::Irregular,
            stress_level: 8,
            sleep_quality: SleepQuality::Insomnia,
            mood_changes: Frequency::Frequently,
            facial_hair: FacialHair::Noticeable,
            acne: Some(Acne::Mild),
            ..benign()
        };

        let result = evaluate(&answers).expect("Should evaluate");

        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(result.doctor_needed);
        assert_eq!(result.doctor_reasons[0], "overall high risk pattern");
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let answers = QuestionnaireAnswers {
            cycle_length: CycleLength::Irregular,
            period_pain: PeriodPain::Occasional,
            stress_level: 6,
            sleep_quality: SleepQuality::Disturbed,
            sugar_cravings: Frequency::Occasionally,
            ..benign()
        };

        let first = evaluate(&answers).expect("Should evaluate");
        let second = evaluate(&answers).expect("Should evaluate");
        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_range_stress_rejected() {
        let mut answers = benign();
        answers.stress_level = 15;
        assert!(matches!(
            evaluate(&answers).unwrap_err(),
            AnswerError::OutOfRange {
                field: "stress_level",
                ..
            }
        ));
    }
}
