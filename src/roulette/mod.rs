pub mod analysis;
pub mod grouping;
pub mod pattern;
pub mod pullers;
pub mod trends;
pub mod trigger;
pub mod wheel;

pub use analysis::{AnalysisConfig, AnalysisResult, AnalysisStats, Analyzer, TrendBreakdown};
pub use pattern::PatternVerdict;
pub use pullers::PullerTable;
pub use trends::{Resolution, ResolutionLevel, Trend, TrendReport, TrendTracker};
pub use trigger::{TriggerKind, TriggerVerdict};
pub use wheel::{Color, Wheel};
