use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub data: DataConfig,
    pub analysis: AnalysisConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("HR_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = env::var("HR_DATA_DIR").unwrap_or_else(|_| "data/sample".to_string());
        let output_dir =
            env::var("HR_OUTPUT_DIR").unwrap_or_else(|_| "data/processed".to_string());

        let top_risk_listing = match env::var("HR_TOP_RISK") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidTopRisk(raw))?,
            Err(_) => AnalysisConfig::default().top_risk_listing,
        };

        let replacement_cost_ratio = match env::var("HR_REPLACEMENT_COST_RATIO") {
            Ok(raw) => match raw.trim().parse::<f64>() {
                Ok(ratio) if ratio.is_finite() && ratio >= 0.0 => ratio,
                _ => return Err(ConfigError::InvalidReplacementRatio(raw)),
            },
            Err(_) => AnalysisConfig::default().replacement_cost_ratio,
        };

        let log_level = env::var("HR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            data: DataConfig {
                data_dir: PathBuf::from(data_dir),
                output_dir: PathBuf::from(output_dir),
            },
            analysis: AnalysisConfig {
                top_risk_listing,
                replacement_cost_ratio,
                ..AnalysisConfig::default()
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Locations of the input datasets and processed outputs.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl DataConfig {
    pub const EMPLOYEE_FILE: &'static str = "employee_data.csv";
    pub const PERFORMANCE_FILE: &'static str = "performance_data.csv";
    pub const EXIT_SURVEY_FILE: &'static str = "exit_survey_data.csv";

    pub fn employee_path(&self) -> PathBuf {
        self.data_dir.join(Self::EMPLOYEE_FILE)
    }

    pub fn performance_path(&self) -> PathBuf {
        self.data_dir.join(Self::PERFORMANCE_FILE)
    }

    pub fn exit_survey_path(&self) -> PathBuf {
        self.data_dir.join(Self::EXIT_SURVEY_FILE)
    }
}

/// Presentation knobs for the analysis report. Scoring thresholds live as
/// constants beside the scoring code.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub top_risk_listing: usize,
    pub top_exit_reasons: usize,
    pub replacement_cost_ratio: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_risk_listing: 10,
            top_exit_reasons: 5,
            replacement_cost_ratio: 0.5,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTopRisk(String),
    InvalidReplacementRatio(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTopRisk(value) => {
                write!(f, "HR_TOP_RISK must be a non-negative integer, got '{value}'")
            }
            ConfigError::InvalidReplacementRatio(value) => write!(
                f,
                "HR_REPLACEMENT_COST_RATIO must be a non-negative number, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("HR_ENV");
        env::remove_var("HR_DATA_DIR");
        env::remove_var("HR_OUTPUT_DIR");
        env::remove_var("HR_LOG_LEVEL");
        env::remove_var("HR_TOP_RISK");
        env::remove_var("HR_REPLACEMENT_COST_RATIO");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.data.data_dir, PathBuf::from("data/sample"));
        assert_eq!(config.data.output_dir, PathBuf::from("data/processed"));
        assert_eq!(config.analysis, AnalysisConfig::default());
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn overrides_are_read_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("HR_ENV", "prod");
        env::set_var("HR_DATA_DIR", "/tmp/hr");
        env::set_var("HR_TOP_RISK", "25");
        env::set_var("HR_REPLACEMENT_COST_RATIO", "0.75");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(
            config.data.employee_path(),
            PathBuf::from("/tmp/hr").join("employee_data.csv")
        );
        assert_eq!(config.analysis.top_risk_listing, 25);
        assert_eq!(config.analysis.replacement_cost_ratio, 0.75);
    }

    #[test]
    fn rejects_invalid_listing_size() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("HR_TOP_RISK", "many");
        let error = AppConfig::load().expect_err("invalid listing size");
        reset_env();

        assert!(matches!(error, ConfigError::InvalidTopRisk(value) if value == "many"));
    }

    #[test]
    fn rejects_negative_replacement_ratio() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("HR_REPLACEMENT_COST_RATIO", "-1");
        let error = AppConfig::load().expect_err("negative ratio");
        reset_env();

        assert!(matches!(error, ConfigError::InvalidReplacementRatio(_)));
    }
}
