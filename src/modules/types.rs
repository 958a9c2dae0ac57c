use derive_more::with_trait::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
pub enum BotStatus {
    #[display("running")]
    Running,
    #[display("stopped")]
    Stopped,
    #[display("paused")]
    Paused,
    // Anything the server reports outside the known set lands here,
    // including its literal "not_initialized".
    #[serde(other)]
    #[display("uninitialized")]
    Uninitialized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Severity {
    #[display("success")]
    Success,
    #[display("danger")]
    Danger,
    #[display("warning")]
    Warning,
    #[display("neutral")]
    Neutral,
}

impl Severity {
    pub fn badge_class(&self) -> &'static str {
        match self {
            Severity::Success => "bg-success",
            Severity::Danger => "bg-danger",
            Severity::Warning => "bg-warning",
            Severity::Neutral => "bg-secondary",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct StatsSnapshot {
    pub session_duration: f64,
    pub fish_caught: u64,
    pub fish_per_hour: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StatusReport {
    pub status: BotStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsSnapshot>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Display)]
#[display("success={success}")]
pub struct ControlAck {
    pub success: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    #[display("color")]
    Color,
    #[display("motion")]
    Motion,
    #[display("sound")]
    Sound,
}

impl std::str::FromStr for DetectionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "color" => Ok(DetectionMethod::Color),
            "motion" => Ok(DetectionMethod::Motion),
            "sound" => Ok(DetectionMethod::Sound),
            other => Err(format!("unknown detection method: {other}")),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Display)]
#[serde(default)]
#[display("cast_interval={cast_interval}s detection={detection_method} sensitivity={sensitivity}%")]
pub struct SettingsDraft {
    pub cast_interval: u32,
    pub detection_method: DetectionMethod,
    pub sensitivity: u8,
}

impl Default for SettingsDraft {
    fn default() -> Self {
        Self {
            cast_interval: 30,
            detection_method: DetectionMethod::Color,
            sensitivity: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_maps_to_uninitialized() {
        let report: StatusReport =
            serde_json::from_str(r#"{"status": "not_initialized"}"#).unwrap();
        assert_eq!(report.status, BotStatus::Uninitialized);
        assert!(report.stats.is_none());
    }

    #[test]
    fn sparse_stats_default_to_zero() {
        let report: StatusReport =
            serde_json::from_str(r#"{"status": "running", "stats": {}}"#).unwrap();
        assert_eq!(report.status, BotStatus::Running);
        let stats = report.stats.unwrap();
        assert_eq!(stats.session_duration, 0.0);
        assert_eq!(stats.fish_caught, 0);
        assert_eq!(stats.fish_per_hour, 0.0);
    }

    #[test]
    fn full_report_keeps_fields() {
        let report: StatusReport = serde_json::from_str(
            r#"{"status": "paused", "stats": {"session_duration": 3725, "fish_caught": 12, "fish_per_hour": 3.14159}}"#,
        )
        .unwrap();
        assert_eq!(report.status, BotStatus::Paused);
        let stats = report.stats.unwrap();
        assert_eq!(stats.session_duration, 3725.0);
        assert_eq!(stats.fish_caught, 12);
        assert!((stats.fish_per_hour - 3.14159).abs() < 1e-9);
    }

    #[test]
    fn detection_method_parses_from_str() {
        assert_eq!("color".parse::<DetectionMethod>().unwrap(), DetectionMethod::Color);
        assert_eq!("Motion".parse::<DetectionMethod>().unwrap(), DetectionMethod::Motion);
        assert!("sonar".parse::<DetectionMethod>().is_err());
    }

    #[test]
    fn settings_draft_defaults_match_bot_config() {
        let draft = SettingsDraft::default();
        assert_eq!(draft.cast_interval, 30);
        assert_eq!(draft.detection_method, DetectionMethod::Color);
        assert_eq!(draft.sensitivity, 50);
    }
}
