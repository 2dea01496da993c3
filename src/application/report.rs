//! Report builder: plain-text summaries for users and clinicians.
//!
//! Formats a completed screening in clear, non-diagnostic language. The
//! renderer only reads the assessment and the original answers; it never
//! re-scores anything.

use std::fmt::Write as _;

use crate::domain::{
    Assessment, QuestionnaireAnswers, ScreeningRecord, SIGNAL_DISPLAY_CEILING,
};

const RULE_HEAVY: &str =
    "═══════════════════════════════════════════════════════════════";
const RULE_LIGHT: &str =
    "───────────────────────────────────────────────────────────────";

/// Both rendered summaries for one screening.
#[derive(Debug, Clone)]
pub struct SummaryReports {
    /// User-friendly summary
    pub user_report: String,
    /// Clinician-ready summary
    pub clinician_summary: String,
}

/// Render both summaries for a screening.
#[must_use]
pub fn generate_summary(
    record: &ScreeningRecord,
    answers: &QuestionnaireAnswers,
) -> SummaryReports {
    SummaryReports {
        user_report: user_report(record, answers),
        clinician_summary: clinician_summary(record, answers),
    }
}

/// Contributing-factor lines derived from signal thresholds.
///
/// Thresholds match the results page of the collector: they are display
/// callouts, independent of the classifier's own boundaries.
pub fn contributing_factors(assessment: &Assessment) -> Vec<&'static str> {
    let signals = &assessment.signals;
    let mut factors = Vec::new();

    if signals.cycle >= 3 {
        factors.push("Significant menstrual irregularity");
    }
    if signals.insulin >= 4 {
        factors.push("Strong metabolic/insulin-related signals");
    }
    if signals.stress >= 6 {
        factors.push("High stress and adrenal load");
    }
    if signals.androgen >= 3 {
        factors.push("Noticeable androgen-related symptoms");
    }
    if signals.inflammation >= 3 {
        factors.push("Pain and inflammation indicators");
    }

    factors
}

fn opt_label<T>(value: Option<T>, f: impl Fn(T) -> &'static str) -> &'static str {
    value.map_or("Not provided", f)
}

fn user_report(record: &ScreeningRecord, answers: &QuestionnaireAnswers) -> String {
    let a = &record.assessment;
    let generated = record.created_at.format("%B %d, %Y at %H:%M UTC");
    let mut out = String::new();

    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out, "CycleSense – Personal Health Summary");
    let _ = writeln!(out, "Generated: {generated}");
    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out);
    let _ = writeln!(out, "OVERALL ASSESSMENT");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "Risk Level: {}", a.risk_level);
    let _ = writeln!(out, "Detected Pattern: {}", a.pattern);
    let _ = writeln!(out, "Signal Confidence: {}%", a.confidence);
    let _ = writeln!(out);
    let _ = writeln!(out, "YOUR HEALTH SIGNALS");
    let _ = writeln!(out, "{RULE_LIGHT}");
    for (name, score) in a.signals.entries() {
        let _ = writeln!(out, "{name} score: {score}/{SIGNAL_DISPLAY_CEILING}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "EXPLANATION");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "{}", a.explanation);
    let _ = writeln!(out);
    let _ = writeln!(out, "CONTRIBUTING FACTORS");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let factors = contributing_factors(a);
    if factors.is_empty() {
        let _ = writeln!(out, "• No dominant contributing factors identified");
    } else {
        for factor in factors {
            let _ = writeln!(out, "• {factor}");
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "RECOMMENDATION");
    let _ = writeln!(out, "{RULE_LIGHT}");
    if a.doctor_needed {
        let _ = writeln!(
            out,
            "Medical consultation is recommended based on: {}",
            a.doctor_reasons.join(", ")
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Professional medical evaluation is advised for:");
        let _ = writeln!(out, "• Confirmation and comprehensive assessment");
        let _ = writeln!(out, "• Appropriate testing");
        let _ = writeln!(out, "• Personalized treatment plan");
    } else {
        let _ = writeln!(
            out,
            "Lifestyle-focused management and monitoring may be appropriate at this stage."
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Consider:");
        let _ = writeln!(out, "• Continuing to track symptoms and patterns");
        let _ = writeln!(out, "• Focusing on sleep, stress, nutrition, and activity");
        let _ = writeln!(out, "• Reassessing in 2-3 months or if symptoms change");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "YOUR RESPONSES (SUMMARY)");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let age = answers
        .age
        .map_or_else(|| "Not provided".to_string(), |v| v.to_string());
    let _ = writeln!(out, "Age: {age}");
    let _ = writeln!(out, "Cycle Regularity: {}", answers.cycle_length.label());
    let _ = writeln!(out, "Period Pain: {}", answers.period_pain.label());
    let _ = writeln!(out, "Stress Level: {}/10", answers.stress_level);
    let _ = writeln!(out, "Sleep Quality: {}", answers.sleep_quality.label());
    let _ = writeln!(
        out,
        "Activity Level: {}",
        opt_label(answers.activity_level, |v| v.label())
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out, "IMPORTANT DISCLAIMER");
    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(
        out,
        "This summary is generated for awareness and support only.\n\
         It is NOT a medical diagnosis.\n\
         \n\
         Always consult qualified healthcare professionals for medical\n\
         diagnosis, treatment recommendations, and urgent health concerns."
    );

    out.trim_end().to_string()
}

fn signal_callout(score: u32, threshold: u32, elevated: &str, normal: &str) -> String {
    if score >= threshold {
        format!("↑ {elevated}")
    } else {
        format!("→ {normal}")
    }
}

fn clinician_summary(record: &ScreeningRecord, answers: &QuestionnaireAnswers) -> String {
    let a = &record.assessment;
    let generated = record.created_at.format("%B %d, %Y at %H:%M UTC");
    let mut out = String::new();

    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out, "CycleSense – Clinical Summary for Healthcare Provider");
    let _ = writeln!(out, "Generated: {generated}");
    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out);
    let _ = writeln!(out, "PATIENT PRESENTATION");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(
        out,
        "Patient presents with a {} PCOS risk profile.",
        a.risk_level.label().to_lowercase()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "DETECTED PATTERN");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "Detected pattern: {}", a.pattern);
    let _ = writeln!(
        out,
        "Confidence score: {}% (transparent signal weighting, not diagnostic certainty)",
        a.confidence
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "CLINICAL SIGNALS");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let s = &a.signals;
    let _ = writeln!(
        out,
        "Cycle Irregularity: {}/10\n  {}",
        s.cycle,
        signal_callout(s.cycle, 3, "Elevated", "Within normal range")
    );
    let _ = writeln!(
        out,
        "Stress & Adrenal Load: {}/10\n  {}",
        s.stress,
        signal_callout(s.stress, 6, "Elevated", "Within manageable range")
    );
    let _ = writeln!(
        out,
        "Metabolic/Insulin Indicators: {}/10\n  {}",
        s.insulin,
        signal_callout(s.insulin, 4, "Elevated", "No strong indicators")
    );
    let _ = writeln!(
        out,
        "Androgen-Related Symptoms: {}/10\n  {}",
        s.androgen,
        signal_callout(s.androgen, 3, "Present", "Minimal")
    );
    let _ = writeln!(
        out,
        "Inflammation Indicators: {}/10\n  {}",
        s.inflammation,
        signal_callout(s.inflammation, 3, "Present", "Minimal")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "REPORTED SYMPTOMS");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let age = answers
        .age
        .map_or_else(|| "Not reported".to_string(), |v| v.to_string());
    let _ = writeln!(out, "Age: {age}");
    let _ = writeln!(out, "Menstrual Pattern: {}", answers.cycle_length.label());
    let _ = writeln!(out, "Period Pain: {}", answers.period_pain.label());
    let _ = writeln!(
        out,
        "Missed Periods: {}",
        opt_label(answers.missed_periods, |v| v.label())
    );
    let _ = writeln!(out, "Stress Level: {}/10", answers.stress_level);
    let _ = writeln!(out, "Sleep Quality: {}", answers.sleep_quality.label());
    let _ = writeln!(out, "Mood Changes: {}", answers.mood_changes.label());
    let _ = writeln!(out, "Sugar Cravings: {}", answers.sugar_cravings.label());
    let _ = writeln!(out, "Weight Changes: {}", answers.weight_change.label());
    let _ = writeln!(out, "Hair Growth: {}", answers.facial_hair.label());
    let _ = writeln!(out, "Acne: {}", opt_label(answers.acne, |v| v.label()));
    let _ = writeln!(
        out,
        "Hair Loss: {}",
        opt_label(answers.hair_loss, |v| v.label())
    );
    let _ = writeln!(
        out,
        "Anxiety: {}",
        opt_label(answers.anxiety, |v| v.label())
    );
    let _ = writeln!(
        out,
        "Activity Level: {}",
        opt_label(answers.activity_level, |v| v.label())
    );
    let _ = writeln!(
        out,
        "Diet Pattern: {}",
        opt_label(answers.diet_pattern, |v| v.label())
    );
    let _ = writeln!(
        out,
        "Family History of PCOS/PCOD: {}",
        opt_label(answers.family_history, |v| v.label())
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "CLINICAL RECOMMENDATION");
    let _ = writeln!(out, "{RULE_LIGHT}");
    if a.doctor_needed {
        let _ = writeln!(
            out,
            "Medical evaluation is advised based on: {}",
            a.doctor_reasons.join("; ")
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Suggested evaluation may include:");
        let _ = writeln!(out, "• Comprehensive history and physical examination");
        let _ = writeln!(out, "• Hormonal assessment (LH, FSH, testosterone, DHEA-S)");
        let _ = writeln!(out, "• Metabolic evaluation (fasting insulin, HbA1c)");
        let _ = writeln!(out, "• Consideration of Rotterdam diagnostic criteria");
    } else {
        let _ = writeln!(
            out,
            "Lifestyle-focused monitoring may be appropriate with reassessment\n\
             if symptoms evolve."
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "NOTES ON TOOL METHODOLOGY");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(
        out,
        "This summary was generated by a rule-based, explainable scoring\n\
         engine. All scoring is transparent: every sub-score is traceable\n\
         to specific reported answers, and no machine learning models were\n\
         used. It is one data point among many in clinical evaluation, not\n\
         a diagnosis."
    );

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::engine;
    use crate::domain::{
        CycleLength, FacialHair, Frequency, PeriodPain, SleepQuality, WeightChange,
    };

    fn sample_record() -> (ScreeningRecord, QuestionnaireAnswers) {
        let answers = QuestionnaireAnswers {
            cycle_length: CycleLength::Absent,
            period_pain: PeriodPain::Frequent,
            stress_level: 8,
            sleep_quality: SleepQuality::Insomnia,
            mood_changes: Frequency::Frequently,
            sugar_cravings: Frequency::No,
            weight_change: WeightChange::No,
            facial_hair: FacialHair::No,
            age: Some(24),
            missed_periods: None,
            acne: None,
            hair_loss: None,
            anxiety: None,
            activity_level: None,
            diet_pattern: None,
            family_history: None,
        };
        let assessment = engine::evaluate(&answers).expect("Should evaluate");
        (ScreeningRecord::new(assessment), answers)
    }

    #[test]
    fn test_user_report_content() {
        let (record, answers) = sample_record();
        let reports = generate_summary(&record, &answers);

        assert!(reports.user_report.contains("Risk Level: High Risk"));
        assert!(reports
            .user_report
            .contains("Adrenal PCOS (Stress-driven)"));
        assert!(reports
            .user_report
            .contains("overall high risk pattern, severe pain with cycle irregularity"));
        assert!(reports.user_report.contains("NOT a medical diagnosis"));
    }

    #[test]
    fn test_clinician_summary_content() {
        let (record, answers) = sample_record();
        let reports = generate_summary(&record, &answers);

        assert!(reports
            .clinician_summary
            .contains("a high risk PCOS risk profile"));
        assert!(reports
            .clinician_summary
            .contains("overall high risk pattern; severe pain with cycle irregularity"));
        assert!(reports.clinician_summary.contains("Stress & Adrenal Load: 8/10"));
        assert!(reports.clinician_summary.contains("Age: 24"));
        assert!(reports.clinician_summary.contains("Acne: Not provided"));
    }

    #[test]
    fn test_no_consultation_recommendation_path() {
        let answers = QuestionnaireAnswers {
            cycle_length: CycleLength::Regular,
            period_pain: PeriodPain::No,
            stress_level: 2,
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
        };
        let record = ScreeningRecord::new(engine::evaluate(&answers).expect("Should evaluate"));
        let reports = generate_summary(&record, &answers);

        assert!(reports
            .user_report
            .contains("Lifestyle-focused management"));
        assert!(reports
            .user_report
            .contains("No dominant contributing factors identified"));
        assert!(reports
            .clinician_summary
            .contains("Lifestyle-focused monitoring"));
    }
}
