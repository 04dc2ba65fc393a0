use serde::{Deserialize, Serialize};

use super::pattern::{self, PatternVerdict};
use super::pullers::PullerTable;
use super::trends::{Resolution, Trend, TrendTracker};
use super::trigger::{self, TriggerVerdict};
use super::wheel::Wheel;

/// Alle Schwellwerte der Analyse an einem Ort
///
/// Die Defaults sind die empirisch gewählten Konstanten der Strategie und
/// werden bewusst nicht hergeleitet, nur konfigurierbar gemacht.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Mindestanzahl Zahlen bevor überhaupt klassifiziert wird
    pub min_window: usize,
    /// Ab so vielen aktiven Trends gilt der Tisch als unberechenbar
    pub max_active_trends: usize,
    /// Maximaler Abstand Dominant/Zweiter für das Misch-Muster
    pub mixed_margin: usize,
    /// Anteil (gerundet, Prozent) ab dem ein Level trotz Nähe dominiert
    pub dominant_share_pct: u32,
    /// Fenster der letzten Zahlen für die Flächen-Wiederholung
    pub recent_window: usize,
    /// Gruppier-Distanz für die Flächen-Wiederholung
    pub repeat_area_distance: u32,
    /// Mindestanteil der größten Gruppe bei der Flächen-Wiederholung
    pub repeat_area_share_pct: u32,
    /// Gruppier-Distanz für die Flächen-Konvergenz der Trigger
    pub cluster_distance: u32,
    /// Mindestanteil der größten Zielgruppe für Flächen-Konvergenz
    pub cluster_share_pct: u32,
    /// Mehr verstreute Ziele als das stufen Konvergenz auf "schwach" ab
    pub max_dispersion: usize,
    /// Trigger-Stärke ab der das Gesamturteil spielbar wird
    pub playable_strength: u8,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_window: 3,
            max_active_trends: 3,
            mixed_margin: 1,
            dominant_share_pct: 60,
            recent_window: 5,
            repeat_area_distance: 4,
            repeat_area_share_pct: 60,
            cluster_distance: 3,
            cluster_share_pct: 70,
            max_dispersion: 2,
            playable_strength: 80,
        }
    }
}

/// Resolutions-Zähler pro Level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionBreakdown {
    pub exact: usize,
    pub neighbor_1: usize,
    pub neighbor_2: usize,
    pub neighbor_3: usize,
}

/// Zusammenfassende Statistik eines Analyse-Laufs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub numbers_analyzed: usize,
    pub active_trends: usize,
    pub resolved_trends: usize,
    /// Aufgelöste / Trends mit Zielen, gerundet in Prozent (0 bei leerem Nenner)
    pub resolution_rate: u32,
    pub resolutions: ResolutionBreakdown,
}

/// Trend-Listen des Ergebnisses: alle, offene und aufgelöste
///
/// Die Teilmengen sind aus `all` ableitbar, werden aber mitgeliefert, damit
/// Konsumenten nicht selbst über `resolved`/`targets` filtern müssen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendBreakdown {
    pub all: Vec<Trend>,
    pub active: Vec<Trend>,
    pub resolved: Vec<Trend>,
}

/// Vollständiges Analyse-Ergebnis für einen Historien-Schnappschuss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub history: Vec<u8>,
    pub trends: TrendBreakdown,
    pub resolutions: Vec<Resolution>,
    pub pattern: PatternVerdict,
    pub trigger: TriggerVerdict,
    /// Gesamturteil: Muster spielbar UND Trigger stark genug
    pub playable: bool,
    pub stats: AnalysisStats,
}

/// Orchestrator: Trend-Tracker -> Muster -> Trigger -> Gesamturteil
///
/// Hält nur die statischen Tabellen und die Konfiguration; jeder Aufruf ist
/// eine reine Funktion des übergebenen Schnappschusses.
#[derive(Debug, Clone)]
pub struct Analyzer {
    wheel: Wheel,
    pullers: PullerTable,
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            wheel: Wheel::new(),
            pullers: PullerTable::new(),
            config,
        }
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Komplette Analyse über die volle Historie
    pub fn analyze(&self, history: &[u8]) -> AnalysisResult {
        let tracker = TrendTracker::new(&self.wheel, &self.pullers);
        let report = tracker.analyze(history);

        let pattern = pattern::classify(&self.wheel, &self.config, history, &report);
        let trigger = trigger::detect(&self.wheel, &self.config, &report.active());

        let playable = pattern.playable && trigger.strength >= self.config.playable_strength;

        let trends_with_targets = report.trends_with_targets();
        let resolved_trends = report.resolved_count();
        let resolution_rate = if trends_with_targets > 0 {
            ((resolved_trends as f64 / trends_with_targets as f64) * 100.0).round() as u32
        } else {
            0
        };

        let counts = report.level_counts();
        let stats = AnalysisStats {
            numbers_analyzed: history.len(),
            active_trends: report.active_count(),
            resolved_trends,
            resolution_rate,
            resolutions: ResolutionBreakdown {
                exact: counts[0],
                neighbor_1: counts[1],
                neighbor_2: counts[2],
                neighbor_3: counts[3],
            },
        };

        let active: Vec<Trend> = report.active().into_iter().cloned().collect();
        let resolved: Vec<Trend> = report
            .trends
            .iter()
            .filter(|t| t.resolved)
            .cloned()
            .collect();

        AnalysisResult {
            history: history.to_vec(),
            trends: TrendBreakdown {
                all: report.trends,
                active,
                resolved,
            },
            resolutions: report.resolutions,
            pattern,
            trigger,
            playable,
            stats,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roulette::trigger::TriggerKind;

    #[test]
    fn test_empty_history() {
        let analyzer = Analyzer::default();
        let result = analyzer.analyze(&[]);

        assert_eq!(result.pattern.id, 0);
        assert_eq!(result.trigger.kind, TriggerKind::None);
        assert!(!result.playable);
        assert_eq!(result.stats.resolution_rate, 0);
    }

    #[test]
    fn test_golden_playable_scenario() {
        let analyzer = Analyzer::default();
        // zwei exakte Treffer vorab, danach konvergieren 6 und 13 auf 7/20
        let result = analyzer.analyze(&[17, 20, 7, 6, 13]);

        assert_eq!(result.pattern.id, 1);
        assert!(result.pattern.playable);
        assert_eq!(result.trigger.kind, TriggerKind::ConvergenceStrong);
        assert_eq!(result.trigger.strength, 95);
        assert_eq!(result.trigger.targets, vec![7, 20]);
        assert!(result.playable);

        assert_eq!(result.stats.active_trends, 2);
        assert_eq!(result.stats.resolved_trends, 3);
        assert_eq!(result.stats.resolution_rate, 60);
    }

    #[test]
    fn test_strong_trigger_alone_is_not_playable() {
        let analyzer = Analyzer::default();
        // Duell mit Stärke 90, aber Muster "Awaiting" (nur 2 Zahlen)
        let result = analyzer.analyze(&[2, 3]);

        assert_eq!(result.trigger.kind, TriggerKind::CleanDuel);
        assert_eq!(result.trigger.strength, 90);
        assert_eq!(result.trigger.targets, vec![22, 33]);
        assert_eq!(result.pattern.id, 0);
        assert!(!result.playable);
    }

    #[test]
    fn test_playable_pattern_with_weak_trigger_is_not_playable() {
        let analyzer = Analyzer::default();
        // Muster 1 spielbar, aber nur TrendsOnly-Trigger mit Stärke 40
        let result = analyzer.analyze(&[33, 3, 16, 33]);

        assert_eq!(result.pattern.id, 1);
        assert!(result.pattern.playable);
        assert_eq!(result.trigger.kind, TriggerKind::TrendsOnly);
        assert_eq!(result.trigger.strength, 40);
        assert!(!result.playable);
    }

    #[test]
    fn test_trend_breakdown_subsets() {
        let analyzer = Analyzer::default();
        let result = analyzer.analyze(&[17, 20, 7, 6, 13]);

        assert_eq!(result.trends.all.len(), 5);

        let active: Vec<u8> = result.trends.active.iter().map(|t| t.origin).collect();
        assert_eq!(active, vec![6, 13]);

        let resolved: Vec<u8> = result.trends.resolved.iter().map(|t| t.origin).collect();
        assert_eq!(resolved, vec![17, 20, 7]);
    }

    #[test]
    fn test_idempotence() {
        let analyzer = Analyzer::default();
        let history = [17u8, 20, 7, 6, 13];

        let first = analyzer.analyze(&history);
        let second = analyzer.analyze(&history);

        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_resolution_rate_rounding() {
        let analyzer = Analyzer::default();
        // 2 von 3 Trends aufgelöst -> 67%
        let result = analyzer.analyze(&[3, 16, 33]);

        assert_eq!(result.stats.resolved_trends, 2);
        assert_eq!(result.stats.resolution_rate, 67);
        assert_eq!(
            result.stats.resolutions,
            ResolutionBreakdown {
                exact: 1,
                neighbor_1: 1,
                neighbor_2: 0,
                neighbor_3: 0,
            }
        );
    }

    #[test]
    fn test_config_overrides_change_the_verdict() {
        let config = AnalysisConfig {
            playable_strength: 96,
            ..AnalysisConfig::default()
        };
        let analyzer = Analyzer::new(config);

        // Stärke 95 reicht mit angehobener Schwelle nicht mehr
        let result = analyzer.analyze(&[17, 20, 7, 6, 13]);
        assert!(result.pattern.playable);
        assert_eq!(result.trigger.strength, 95);
        assert!(!result.playable);
    }
}
