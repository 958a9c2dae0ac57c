use chrono::{DateTime, Local};
use log::warn;

use crate::modules::client::BotApi;
use crate::modules::types::{
    BotStatus, DetectionMethod, SettingsDraft, Severity, StatsSnapshot, StatusReport,
};

#[derive(Debug, Clone)]
pub struct StatusBadge {
    pub label: String,
    pub severity: Severity,
}

// Mirrors the range controls and their adjacent value labels.
#[derive(Debug, Clone)]
pub struct PanelControls {
    pub cast_interval: u32,
    pub cast_interval_label: String,
    pub detection_method: DetectionMethod,
    pub sensitivity: u8,
    pub sensitivity_label: String,
}

impl PanelControls {
    fn new(initial: SettingsDraft) -> Self {
        Self {
            cast_interval: initial.cast_interval,
            cast_interval_label: initial.cast_interval.to_string(),
            detection_method: initial.detection_method,
            sensitivity: initial.sensitivity,
            sensitivity_label: format!("{}%", initial.sensitivity),
        }
    }
}

pub struct StatusPanel<C> {
    api: C,
    log: Vec<String>,
    pub badge: StatusBadge,
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub session_time: String,
    pub fish_caught: String,
    pub fish_per_hour: String,
    pub controls: PanelControls,
}

impl<C: BotApi> StatusPanel<C> {
    pub fn new(api: C, initial_settings: SettingsDraft) -> Self {
        Self {
            api,
            log: Vec::new(),
            badge: StatusBadge {
                label: "Not initialized".to_string(),
                severity: Severity::Neutral,
            },
            start_enabled: true,
            stop_enabled: false,
            session_time: "00:00:00".to_string(),
            fish_caught: "0".to_string(),
            fish_per_hour: "0.0".to_string(),
            controls: PanelControls::new(initial_settings),
        }
    }

    pub fn on_cast_interval_change(&mut self, value: u32) {
        self.controls.cast_interval = value;
        self.controls.cast_interval_label = value.to_string();
    }

    pub fn on_sensitivity_change(&mut self, value: u8) {
        self.controls.sensitivity = value;
        self.controls.sensitivity_label = format!("{value}%");
    }

    pub async fn start(&mut self) {
        match self.api.start().await {
            Ok(ack) if ack.success => {
                self.append_log("Bot started");
                self.refresh_status().await;
            }
            Ok(_) => self.append_log("Failed to start bot"),
            Err(err) => {
                warn!("start request failed: {err}");
                self.append_log("Failed to start bot");
            }
        }
    }

    pub async fn stop(&mut self) {
        match self.api.stop().await {
            Ok(ack) if ack.success => {
                self.append_log("Bot stopped");
                self.refresh_status().await;
            }
            Ok(_) => self.append_log("Failed to stop bot"),
            Err(err) => {
                warn!("stop request failed: {err}");
                self.append_log("Failed to stop bot");
            }
        }
    }

    // The control API has no settings endpoint yet, so the draft stays local.
    pub fn save_settings(&mut self) -> SettingsDraft {
        let draft = SettingsDraft {
            cast_interval: self.controls.cast_interval,
            detection_method: self.controls.detection_method,
            sensitivity: self.controls.sensitivity,
        };
        self.append_log("Settings saved");
        draft
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        self.append_log("Log cleared");
    }

    pub async fn refresh_status(&mut self) {
        match self.api.status().await {
            Ok(report) => self.apply_report(report),
            // A failed poll keeps the last rendered state.
            Err(err) => warn!("status poll failed: {err}"),
        }
    }

    pub fn apply_report(&mut self, report: StatusReport) {
        match report.status {
            BotStatus::Running => {
                self.badge.label = "Started".to_string();
                self.badge.severity = Severity::Success;
                self.start_enabled = false;
                self.stop_enabled = true;
            }
            BotStatus::Stopped => {
                self.badge.label = "Stopped".to_string();
                self.badge.severity = Severity::Danger;
                self.start_enabled = true;
                self.stop_enabled = false;
            }
            BotStatus::Paused => {
                self.badge.label = "Paused".to_string();
                self.badge.severity = Severity::Warning;
                self.start_enabled = false;
                self.stop_enabled = true;
            }
            // Button enablement is left as-is for unknown statuses.
            BotStatus::Uninitialized => {
                self.badge.label = "Not initialized".to_string();
                self.badge.severity = Severity::Neutral;
            }
        }

        if let Some(stats) = report.stats {
            self.apply_stats(&stats);
        }
    }

    fn apply_stats(&mut self, stats: &StatsSnapshot) {
        self.session_time = format_session_time(stats.session_duration);
        self.fish_caught = stats.fish_caught.to_string();
        self.fish_per_hour = format!("{:.1}", stats.fish_per_hour);
    }

    pub fn append_log(&mut self, message: &str) {
        self.append_log_at(Local::now(), message);
    }

    fn append_log_at(&mut self, at: DateTime<Local>, message: &str) {
        self.log.push(format!("[{}] {}", at.format("%H:%M:%S"), message));
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn render_log(&self) -> String {
        self.log.join("\n")
    }
}

pub fn format_session_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
