mod rules;
mod signals;

pub use signals::VerdictSignals;

use serde::{Deserialize, Serialize};

use super::policy::ViolationThresholds;
use rules::{first_match, Narration};

/// Overall drinking-water verdict, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SafetyVerdict {
    Safe,
    GenerallySafe,
    Concerns,
    Unsafe,
}

impl SafetyVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "Meets EPA Standards",
            Self::GenerallySafe => "Generally Safe",
            Self::Concerns => "Some Concerns",
            Self::Unsafe => "Issues Detected",
        }
    }
}

/// Identifies the rule of the priority list that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictRule {
    AdministrativeBurden,
    Clean,
    Unsafe,
    Concerns,
    MinorHealthIssues,
    Fallback,
}

impl VerdictRule {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdministrativeBurden => "administrative_burden",
            Self::Clean => "clean",
            Self::Unsafe => "unsafe",
            Self::Concerns => "concerns",
            Self::MinorHealthIssues => "minor_health_issues",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    pub verdict: SafetyVerdict,
    pub summary: String,
    /// Most important fact first.
    pub details: Vec<String>,
    pub rule: VerdictRule,
}

/// Which rule fires for these signals, without building any text.
pub fn select_rule(signals: &VerdictSignals, thresholds: &ViolationThresholds) -> VerdictRule {
    first_match(signals, thresholds).rule
}

pub(crate) fn decide(
    city: &str,
    signals: &VerdictSignals,
    thresholds: &ViolationThresholds,
) -> SafetyAssessment {
    let entry = first_match(signals, thresholds);
    let (summary, details) = (entry.narrate)(&Narration { city, signals });

    SafetyAssessment {
        verdict: entry.verdict,
        summary,
        details,
        rule: entry.rule,
    }
}
