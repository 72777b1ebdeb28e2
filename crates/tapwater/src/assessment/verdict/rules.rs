use super::super::action_level::ActionLevelStatus;
use super::super::policy::ViolationThresholds;
use super::signals::VerdictSignals;
use super::{SafetyVerdict, VerdictRule};
use crate::content::format::plural_suffix;

/// Sentence material shared by every narrator.
pub(crate) struct Narration<'a> {
    pub(crate) city: &'a str,
    pub(crate) signals: &'a VerdictSignals,
}

pub(crate) struct RuleEntry {
    pub(crate) rule: VerdictRule,
    pub(crate) verdict: SafetyVerdict,
    pub(crate) applies: fn(&VerdictSignals, &ViolationThresholds) -> bool,
    pub(crate) narrate: fn(&Narration<'_>) -> (String, Vec<String>),
}

/// Evaluated top to bottom; the first entry whose predicate holds decides the verdict.
/// Later predicates assume the earlier ones failed.
pub(crate) const VERDICT_RULES: [RuleEntry; 6] = [
    RuleEntry {
        rule: VerdictRule::AdministrativeBurden,
        verdict: SafetyVerdict::GenerallySafe,
        applies: administrative_burden,
        narrate: narrate_administrative_burden,
    },
    RuleEntry {
        rule: VerdictRule::Clean,
        verdict: SafetyVerdict::Safe,
        applies: clean,
        narrate: narrate_clean,
    },
    RuleEntry {
        rule: VerdictRule::Unsafe,
        verdict: SafetyVerdict::Unsafe,
        applies: unsafe_levels,
        narrate: narrate_unsafe,
    },
    RuleEntry {
        rule: VerdictRule::Concerns,
        verdict: SafetyVerdict::Concerns,
        applies: concerns,
        narrate: narrate_concerns,
    },
    RuleEntry {
        rule: VerdictRule::MinorHealthIssues,
        verdict: SafetyVerdict::GenerallySafe,
        applies: minor_health_issues,
        narrate: narrate_minor_health_issues,
    },
    RuleEntry {
        rule: VerdictRule::Fallback,
        verdict: SafetyVerdict::Safe,
        applies: always,
        narrate: narrate_fallback,
    },
];

pub(crate) fn first_match(
    signals: &VerdictSignals,
    thresholds: &ViolationThresholds,
) -> &'static RuleEntry {
    VERDICT_RULES
        .iter()
        .find(|entry| (entry.applies)(signals, thresholds))
        .unwrap_or(&VERDICT_RULES[VERDICT_RULES.len() - 1])
}

fn administrative_burden(signals: &VerdictSignals, thresholds: &ViolationThresholds) -> bool {
    signals.health_based == 0
        && !signals.has_lead_issue()
        && signals.monitoring >= thresholds.high_monitoring_volume
}

fn clean(signals: &VerdictSignals, _thresholds: &ViolationThresholds) -> bool {
    signals.health_based == 0 && !signals.has_lead_issue()
}

fn unsafe_levels(signals: &VerdictSignals, thresholds: &ViolationThresholds) -> bool {
    signals.has_lead_issue()
        || signals.health_per_system > thresholds.unsafe_per_system
        || (signals.health_based > thresholds.elevated_total
            && signals.health_per_system > thresholds.elevated_per_system)
}

fn concerns(signals: &VerdictSignals, thresholds: &ViolationThresholds) -> bool {
    signals.health_per_system >= thresholds.concerns_per_system
        || signals.health_based >= thresholds.concerns_total
}

fn minor_health_issues(signals: &VerdictSignals, _thresholds: &ViolationThresholds) -> bool {
    signals.health_based > 0
}

fn always(_signals: &VerdictSignals, _thresholds: &ViolationThresholds) -> bool {
    true
}

fn narrate_administrative_burden(narration: &Narration<'_>) -> (String, Vec<String>) {
    let signals = narration.signals;
    let summary = format!(
        "{} tap water meets EPA health standards, but the water utility has administrative compliance issues.",
        narration.city
    );

    let mut details = vec!["No health-based violations in the past 3 years.".to_string()];
    if let Some(line) = lead_within_limit_line(signals) {
        details.push(line);
    }
    details.push(format!(
        "{} monitoring/reporting violation{} (administrative issues like missed testing deadlines or late reports).",
        signals.monitoring,
        plural_suffix(u64::from(signals.monitoring))
    ));
    details.push(
        "While not directly health-related, frequent administrative violations may indicate operational issues with the water utility."
            .to_string(),
    );
    details.push("We recommend testing your water at home for complete peace of mind.".to_string());

    (summary, details)
}

fn narrate_clean(narration: &Narration<'_>) -> (String, Vec<String>) {
    let signals = narration.signals;
    let summary = format!(
        "{} tap water meets all EPA health standards and is safe to drink.",
        narration.city
    );

    let mut details = vec!["No health-based violations in the past 3 years.".to_string()];
    if let Some(line) = lead_within_limit_line(signals) {
        details.push(line);
    }
    if signals.monitoring > 0 {
        details.push(format!(
            "{} monitoring/reporting violation{} (administrative, not health-related).",
            signals.monitoring,
            plural_suffix(u64::from(signals.monitoring))
        ));
    }
    details.push(
        "For complete peace of mind, consider testing your home's water, since contaminants can enter through your plumbing."
            .to_string(),
    );

    (summary, details)
}

fn narrate_unsafe(narration: &Narration<'_>) -> (String, Vec<String>) {
    let signals = narration.signals;
    let summary = format!(
        "{} tap water has significant quality concerns that may require action.",
        narration.city
    );

    let mut details = Vec::new();
    if signals.has_lead_issue() {
        details.push(
            "Lead levels exceed the EPA action level. Consider using a certified lead filter."
                .to_string(),
        );
    }
    if signals.health_based > 0 {
        details.push(health_violation_line(signals));
    }
    details.push(
        "We strongly recommend testing your water at home and using a certified water filter."
            .to_string(),
    );

    (summary, details)
}

fn narrate_concerns(narration: &Narration<'_>) -> (String, Vec<String>) {
    let summary = format!(
        "{} tap water has some quality concerns but remains within acceptable limits.",
        narration.city
    );
    let details = vec![
        health_violation_line(narration.signals),
        "Consider testing your water at home and using a certified water filter for added safety."
            .to_string(),
    ];

    (summary, details)
}

fn narrate_minor_health_issues(narration: &Narration<'_>) -> (String, Vec<String>) {
    let signals = narration.signals;
    let summary = format!(
        "{} tap water is generally safe with minor compliance issues.",
        narration.city
    );

    let mut details = vec![health_violation_line(signals)];
    if signals.monitoring > 0 {
        details.push(format!(
            "{} monitoring/reporting violation{} (administrative).",
            signals.monitoring,
            plural_suffix(u64::from(signals.monitoring))
        ));
    }
    details.push("Consider testing your water at home for complete peace of mind.".to_string());

    (summary, details)
}

fn narrate_fallback(narration: &Narration<'_>) -> (String, Vec<String>) {
    (
        format!("{} tap water meets EPA health standards.", narration.city),
        Vec::new(),
    )
}

fn health_violation_line(signals: &VerdictSignals) -> String {
    let systems = if signals.water_system_count > 1 {
        format!(" across {} water systems", signals.water_system_count)
    } else {
        String::new()
    };

    format!(
        "{} health-based violation{} in the past 3 years{}.",
        signals.health_based,
        plural_suffix(u64::from(signals.health_based)),
        systems
    )
}

fn lead_within_limit_line(signals: &VerdictSignals) -> Option<String> {
    match signals.lead {
        ActionLevelStatus::Good => Some("Lead levels are below the EPA action level.".to_string()),
        ActionLevelStatus::Warning => Some(
            "Lead levels are within, but approaching, the EPA action level.".to_string(),
        ),
        ActionLevelStatus::Exceeded | ActionLevelStatus::Unknown => None,
    }
}
