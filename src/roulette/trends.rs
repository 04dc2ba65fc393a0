use serde::{Deserialize, Serialize};

use super::pullers::PullerTable;
use super::wheel::Wheel;

/// Wie eng eine Resolution das vorhergesagte Ziel getroffen hat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionLevel {
    #[serde(rename = "exact")]
    Exact,
    #[serde(rename = "neighbor_1")]
    Neighbor1,
    #[serde(rename = "neighbor_2")]
    Neighbor2,
    #[serde(rename = "neighbor_3")]
    Neighbor3,
}

impl ResolutionLevel {
    pub fn label(&self) -> &str {
        match self {
            ResolutionLevel::Exact => "EXACT",
            ResolutionLevel::Neighbor1 => "1 NEIGHBOR",
            ResolutionLevel::Neighbor2 => "2 NEIGHBORS",
            ResolutionLevel::Neighbor3 => "3 NEIGHBORS",
        }
    }
}

/// Ein Trend: Vorhersage, dass auf `origin` eines der `targets` folgt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trend {
    pub origin: u8,
    pub targets: Vec<u8>,
    pub resolved: bool,
    pub origin_index: usize,
}

impl Trend {
    /// Aktiv = unaufgelöst mit mindestens einem Ziel
    pub fn is_active(&self) -> bool {
        !self.resolved && !self.targets.is_empty()
    }
}

/// Protokoll-Eintrag: eine spätere Zahl hat einen Trend aufgelöst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub origin: u8,
    pub resolved_by: u8,
    pub level: ResolutionLevel,
    pub message: String,
}

/// Ergebnis eines Analyse-Durchlaufs über die komplette Historie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub trends: Vec<Trend>,
    pub resolutions: Vec<Resolution>,
}

impl TrendReport {
    /// Aktive Trends in Historien-Reihenfolge
    pub fn active(&self) -> Vec<&Trend> {
        self.trends.iter().filter(|t| t.is_active()).collect()
    }

    pub fn active_count(&self) -> usize {
        self.trends.iter().filter(|t| t.is_active()).count()
    }

    pub fn resolved_count(&self) -> usize {
        self.trends.iter().filter(|t| t.resolved).count()
    }

    /// Trends mit nicht-leerer Zielliste (Nenner der Auflösungsquote)
    pub fn trends_with_targets(&self) -> usize {
        self.trends.iter().filter(|t| !t.targets.is_empty()).count()
    }

    /// Resolutions-Zähler pro Level: [exact, n1, n2, n3]
    pub fn level_counts(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for resolution in &self.resolutions {
            let slot = match resolution.level {
                ResolutionLevel::Exact => 0,
                ResolutionLevel::Neighbor1 => 1,
                ResolutionLevel::Neighbor2 => 2,
                ResolutionLevel::Neighbor3 => 3,
            };
            counts[slot] += 1;
        }
        counts
    }
}

/// Trend-Tracker: baut Trends auf und prüft deren Auflösung
pub struct TrendTracker<'a> {
    wheel: &'a Wheel,
    pullers: &'a PullerTable,
}

impl<'a> TrendTracker<'a> {
    pub fn new(wheel: &'a Wheel, pullers: &'a PullerTable) -> Self {
        Self { wheel, pullers }
    }

    /// Kompletter Durchlauf: ein Trend pro Zahl, danach paarweiser
    /// Auflösungs-Scan (O(n²), für interaktive Historien unkritisch)
    pub fn analyze(&self, history: &[u8]) -> TrendReport {
        let mut trends: Vec<Trend> = history
            .iter()
            .enumerate()
            .map(|(index, &number)| Trend {
                origin: number,
                targets: self.pullers.trend_targets(number),
                resolved: false,
                origin_index: index,
            })
            .collect();

        let mut resolutions = Vec::new();

        for i in 1..history.len() {
            for j in 0..i {
                if trends[j].resolved || trends[j].targets.is_empty() {
                    continue;
                }

                if let Some(level) = self.resolution_level(&trends[j].targets, history[i]) {
                    trends[j].resolved = true;
                    resolutions.push(Resolution {
                        origin: trends[j].origin,
                        resolved_by: history[i],
                        level,
                        message: format!(
                            "{} -> {} ({})",
                            trends[j].origin,
                            history[i],
                            level.label()
                        ),
                    });
                }
            }
        }

        TrendReport {
            trends,
            resolutions,
        }
    }

    /// Prüft ob `candidate` eines der Ziele trifft
    ///
    /// Level-Priorität über ALLE Ziele: erst exakte Treffer, dann Radius 1,
    /// 2, 3 - ein exakter Treffer auf ein spätes Ziel schlägt den
    /// 1-Nachbar-Treffer auf ein früheres.
    fn resolution_level(&self, targets: &[u8], candidate: u8) -> Option<ResolutionLevel> {
        if targets.contains(&candidate) {
            return Some(ResolutionLevel::Exact);
        }

        for (radius, level) in [
            (1, ResolutionLevel::Neighbor1),
            (2, ResolutionLevel::Neighbor2),
            (3, ResolutionLevel::Neighbor3),
        ] {
            for &target in targets {
                if self
                    .wheel
                    .neighbors_within(target, radius)
                    .contains(&candidate)
                {
                    return Some(level);
                }
            }
        }

        None
    }
}
