use prometheus::{CounterVec, Histogram, IntCounter, IntGauge, Registry, TextEncoder};

use crate::roulette::{AnalysisResult, TriggerKind};

/// Prometheus Metrics für Analysen, Trigger und Sitzungen
pub struct Metrics {
    pub registry: Registry,
    pub analyses_total: CounterVec,
    pub triggers_total: CounterVec,
    pub playable_signals: IntCounter,
    pub analysis_duration: Histogram,
    pub loaded_sessions: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let analyses_total = CounterVec::new(
            prometheus::Opts::new("analyses_total", "Total analysis runs by pattern id"),
            &["pattern"],
        )
        .expect("Failed to create analyses_total metric");

        let triggers_total = CounterVec::new(
            prometheus::Opts::new("triggers_total", "Detected triggers by kind"),
            &["kind"],
        )
        .expect("Failed to create triggers_total metric");

        let playable_signals = IntCounter::new(
            "playable_signals_total",
            "Analyses that ended with a playable verdict",
        )
        .expect("Failed to create playable_signals metric");

        let analysis_duration = Histogram::with_opts(prometheus::HistogramOpts::new(
            "analysis_duration_seconds",
            "Full analysis pass duration in seconds",
        ))
        .expect("Failed to create analysis_duration metric");

        let loaded_sessions = IntGauge::new("loaded_sessions", "Sessions currently in memory")
            .expect("Failed to create loaded_sessions metric");

        registry.register(Box::new(analyses_total.clone())).ok();
        registry.register(Box::new(triggers_total.clone())).ok();
        registry.register(Box::new(playable_signals.clone())).ok();
        registry.register(Box::new(analysis_duration.clone())).ok();
        registry.register(Box::new(loaded_sessions.clone())).ok();

        Self {
            registry,
            analyses_total,
            triggers_total,
            playable_signals,
            analysis_duration,
            loaded_sessions,
        }
    }

    /// Verbucht einen Analyse-Lauf
    pub fn record_analysis(&self, result: &AnalysisResult) {
        self.analyses_total
            .with_label_values(&[&result.pattern.id.to_string()])
            .inc();

        let kind = match result.trigger.kind {
            TriggerKind::None => "none",
            TriggerKind::ConvergenceStrong => "convergence_strong",
            TriggerKind::ConvergenceWeak => "convergence_weak",
            TriggerKind::AreaConvergence => "area_convergence",
            TriggerKind::CleanDuel => "clean_duel",
            TriggerKind::TrendsOnly => "trends_only",
        };
        self.triggers_total.with_label_values(&[kind]).inc();

        if result.playable {
            self.playable_signals.inc();
        }
    }

    /// Exportiert die Registry im Prometheus-Textformat
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        encoder
            .encode_to_string(&self.registry.gather())
            .unwrap_or_default()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roulette::Analyzer;

    #[test]
    fn test_record_and_export() {
        let metrics = Metrics::new();
        let analyzer = Analyzer::default();

        metrics.record_analysis(&analyzer.analyze(&[17, 20, 7, 6, 13]));
        metrics.record_analysis(&analyzer.analyze(&[2, 3]));

        assert_eq!(metrics.playable_signals.get(), 1);

        let exported = metrics.export();
        assert!(exported.contains("analyses_total"));
        assert!(exported.contains("triggers_total"));
    }
}
