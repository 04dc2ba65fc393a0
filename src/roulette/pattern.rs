use serde::{Deserialize, Serialize};

use super::analysis::AnalysisConfig;
use super::grouping::group_by_proximity;
use super::trends::TrendReport;
use super::wheel::Wheel;

/// Eines der sechs Tisch-Muster (id 0-5)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternVerdict {
    pub id: u8,
    pub name: String,
    pub description: String,
    pub playable: bool,
    /// Nur beim Muster "Area Repetition" gesetzt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Vec<u8>>,
}

impl PatternVerdict {
    fn new(id: u8, name: &str, description: String, playable: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            description,
            playable,
            area: None,
        }
    }
}

/// Kurz-Labels der Resolutions-Level in Tally-Reihenfolge
const LEVEL_SHORT: [&str; 4] = ["EXACT", "1 NBR", "2 NBR", "3 NBR"];
const LEVEL_LONG: [&str; 4] = ["EXACT", "1 NEIGHBOR", "2 NEIGHBORS", "3 NEIGHBORS"];

/// Ordnet der Historie plus Trend-Zustand genau ein Muster zu
///
/// Entscheidungsreihenfolge ist fix, der erste Treffer gewinnt.
pub fn classify(
    wheel: &Wheel,
    config: &AnalysisConfig,
    history: &[u8],
    report: &TrendReport,
) -> PatternVerdict {
    // 1. Zu wenig Daten
    if history.len() < config.min_window {
        return PatternVerdict::new(
            0,
            "Awaiting",
            format!("Add the last {} numbers from the table", config.min_window),
            false,
        );
    }

    let active_count = report.active_count();

    // 2. Zu viele offene Trends -> Tisch unberechenbar
    if active_count >= config.max_active_trends {
        return PatternVerdict::new(
            5,
            "Unpredictable Table",
            format!("{} active trends - DO NOT PLAY!", active_count),
            false,
        );
    }

    let counts = report.level_counts();
    let total_resolutions: usize = counts.iter().sum();

    // 3. Noch keine Resolutions
    if total_resolutions == 0 {
        if active_count > 0 {
            return PatternVerdict::new(
                4,
                "Awaiting First Resolutions",
                format!("{} active trend(s) - wait for resolutions", active_count),
                false,
            );
        }

        return PatternVerdict::new(
            0,
            "Starting Analysis",
            "Waiting for trends to form".to_string(),
            false,
        );
    }

    // 4. Dominantes Level bestimmen (stabil: bei Gleichstand gewinnt das
    //    engere Level)
    let mut ranked: Vec<(usize, usize)> = counts.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let (dominant_level, dominant_count) = ranked[0];
    let (second_level, second_count) = ranked[1];

    let dominant_share =
        ((dominant_count as f64 / total_resolutions as f64) * 100.0).round() as u32;

    let tie_or_close =
        second_count > 0 && dominant_count - second_count <= config.mixed_margin;

    if tie_or_close && dominant_share < config.dominant_share_pct {
        return PatternVerdict::new(
            4,
            "Mixed Pattern",
            format!(
                "Unstable table - {} ({}) vs {} ({})",
                LEVEL_SHORT[dominant_level],
                dominant_count,
                LEVEL_SHORT[second_level],
                second_count
            ),
            false,
        );
    }

    let confidence = confidence_label(total_resolutions);
    let resolution_info = format!(" ({}/{} resolutions)", dominant_count, total_resolutions);

    if dominant_count > 0 {
        // 5. Muster 1-3 je nach dominantem Level
        match dominant_level {
            0 | 1 => {
                return PatternVerdict::new(
                    1,
                    "Respecting Exact/1 Neighbor",
                    format!(
                        "BEST MOMENT - {} dominant{} - Confidence: {}",
                        LEVEL_LONG[dominant_level], resolution_info, confidence
                    ),
                    true,
                );
            }
            2 => {
                return PatternVerdict::new(
                    2,
                    "Respecting To 2 Neighbors",
                    format!(
                        "Good opportunity - 2 NEIGHBORS dominant{} - Confidence: {}",
                        resolution_info, confidence
                    ),
                    true,
                );
            }
            _ => {
                return PatternVerdict::new(
                    3,
                    "Respecting To 3 Neighbors",
                    format!(
                        "Moderate opportunity - 3 NEIGHBORS dominant{} - Confidence: {}",
                        resolution_info, confidence
                    ),
                    true,
                );
            }
        }
    }

    // 6. Defensiver Fallback ohne klares dominantes Level
    if active_count > 0 {
        if let Some(area) = repeated_area(wheel, config, history) {
            let mut verdict = PatternVerdict::new(
                4,
                "Area Repetition",
                "Numbers concentrated in the same region - bet the area".to_string(),
                true,
            );
            verdict.area = Some(area);
            return verdict;
        }

        return PatternVerdict::new(
            4,
            "Table In Transition",
            "Waiting for a pattern to settle".to_string(),
            false,
        );
    }

    PatternVerdict::new(0, "Analyzing", "Collecting more data...".to_string(), false)
}

/// Konfidenz-Label rein aus der Anzahl beobachteter Resolutions
fn confidence_label(total_resolutions: usize) -> &'static str {
    if total_resolutions >= 5 {
        "Very High"
    } else if total_resolutions >= 3 {
        "High"
    } else if total_resolutions >= 2 {
        "Medium"
    } else {
        "Low"
    }
}

/// Prüft ob die letzten Zahlen in derselben Kessel-Region liegen
fn repeated_area(wheel: &Wheel, config: &AnalysisConfig, history: &[u8]) -> Option<Vec<u8>> {
    let start = history.len().saturating_sub(config.recent_window);
    let recent = &history[start..];

    if recent.len() < 3 {
        return None;
    }

    let groups = group_by_proximity(wheel, recent, config.repeat_area_distance);
    let largest = groups.into_iter().max_by_key(|group| group.len())?;

    let share = (largest.len() as f64 / recent.len() as f64) * 100.0;
    if share >= config.repeat_area_share_pct as f64 {
        Some(largest)
    } else {
        None
    }
}
