use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::analysis::AnalysisConfig;
use super::grouping::group_by_proximity;
use super::trends::Trend;
use super::wheel::Wheel;

/// Art des erkannten Einsatz-Triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    None,
    ConvergenceStrong,
    ConvergenceWeak,
    AreaConvergence,
    CleanDuel,
    TrendsOnly,
}

/// Trigger-Ergebnis mit Zielzahlen und Stärke 0-100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerVerdict {
    pub kind: TriggerKind,
    pub name: String,
    pub targets: Vec<u8>,
    pub strength: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl TriggerVerdict {
    fn none(name: &str) -> Self {
        Self {
            kind: TriggerKind::None,
            name: name.to_string(),
            targets: vec![],
            strength: 0,
            detail: None,
        }
    }
}

/// Prüft die aktiven Trends auf die Trigger-Bedingungen
///
/// Feste Prioritätsreihenfolge, der erste Treffer gewinnt:
/// Konvergenz (stark/schwach) -> Flächen-Konvergenz -> Duell -> nur Trends.
pub fn detect(wheel: &Wheel, config: &AnalysisConfig, active: &[&Trend]) -> TriggerVerdict {
    if active.is_empty() {
        return TriggerVerdict::none("No Trigger");
    }

    // Zählen wie viele Trends jedes Ziel anvisieren
    let mut target_counts: BTreeMap<u8, usize> = BTreeMap::new();
    for trend in active {
        for &target in &trend.targets {
            *target_counts.entry(target).or_insert(0) += 1;
        }
    }

    let distinct_targets = target_counts.len();

    let mut convergent: Vec<(u8, usize)> = target_counts
        .iter()
        .filter(|(_, &count)| count >= 2)
        .map(|(&target, &count)| (target, count))
        .collect();
    convergent.sort_by(|a, b| b.1.cmp(&a.1));

    if !convergent.is_empty() {
        let scattered = distinct_targets - convergent.len();
        let targets: Vec<u8> = convergent.iter().map(|&(target, _)| target).collect();

        if scattered > config.max_dispersion {
            return TriggerVerdict {
                kind: TriggerKind::ConvergenceWeak,
                name: "Convergence With Dispersion".to_string(),
                targets,
                strength: 60,
                detail: Some(format!(
                    "Convergence detected but {} other scattered targets",
                    scattered
                )),
            };
        }

        return TriggerVerdict {
            kind: TriggerKind::ConvergenceStrong,
            name: "Golden Convergence".to_string(),
            strength: 95,
            detail: Some(format!("{} trends converge with focus!", convergent[0].1)),
            targets,
        };
    }

    if active.len() >= 2 {
        let all_targets: Vec<u8> = active
            .iter()
            .flat_map(|trend| trend.targets.iter().copied())
            .collect();

        let groups = group_by_proximity(wheel, &all_targets, config.cluster_distance);
        let largest = groups
            .into_iter()
            .max_by_key(|group| group.len())
            .unwrap_or_default();

        let share = (largest.len() as f64 / all_targets.len() as f64) * 100.0;

        if share >= config.cluster_share_pct as f64 {
            let mut deduped = Vec::new();
            for target in largest {
                if !deduped.contains(&target) {
                    deduped.push(target);
                }
            }

            return TriggerVerdict {
                kind: TriggerKind::AreaConvergence,
                name: "Area Convergence".to_string(),
                targets: deduped,
                strength: 85,
                detail: Some(format!(
                    "{}% of targets in the same region!",
                    share.round() as u32
                )),
            };
        }
    }

    if active.len() == 2 {
        let (first, second) = (active[0], active[1]);

        if first.targets.len() == 1
            && second.targets.len() == 1
            && first.targets[0] != second.targets[0]
        {
            return TriggerVerdict {
                kind: TriggerKind::CleanDuel,
                name: "Perfect Clean Duel".to_string(),
                targets: vec![first.targets[0], second.targets[0]],
                strength: 90,
                detail: Some(format!(
                    "{}->{} vs {}->{}",
                    first.origin, first.targets[0], second.origin, second.targets[0]
                )),
            };
        }
    }

    if !active.is_empty() {
        return TriggerVerdict {
            kind: TriggerKind::TrendsOnly,
            name: "Active Trends".to_string(),
            targets: vec![],
            strength: 40,
            detail: Some(format!(
                "{} trend(s) without clear convergence",
                active.len()
            )),
        };
    }

    TriggerVerdict::none("Awaiting Trigger")
}
