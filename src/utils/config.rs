use crate::roulette::AnalysisConfig;

/// Hauptkonfiguration für das Rust Backend
#[derive(Debug, Clone)]
pub struct Config {
    pub api_port: u16,
    pub data_dir: String,
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Lade Config aus Environment Variablen
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut analysis = AnalysisConfig::default();
        if let Ok(value) = std::env::var("PLAYABLE_STRENGTH") {
            analysis.playable_strength = value
                .parse()
                .expect("PLAYABLE_STRENGTH muss eine Zahl 0-100 sein");
        }
        if let Ok(value) = std::env::var("MIN_WINDOW") {
            analysis.min_window = value.parse().expect("MIN_WINDOW muss eine Zahl sein");
        }
        if let Ok(value) = std::env::var("MAX_ACTIVE_TRENDS") {
            analysis.max_active_trends = value
                .parse()
                .expect("MAX_ACTIVE_TRENDS muss eine Zahl sein");
        }

        Self {
            api_port: std::env::var("ROULETTE_API_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("ROULETTE_API_PORT muss eine Zahl sein"),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            analysis,
        }
    }
}
