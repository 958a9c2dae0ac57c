use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::Json;
use clap::Parser;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use fishpanel::modules::client::HttpBotApi;
use fishpanel::modules::config::load_panel_config_or_default;
use fishpanel::modules::panel::StatusPanel;
use fishpanel::modules::poll::spawn_status_poll;
use fishpanel::modules::types::SettingsDraft;

#[derive(Clone)]
struct AppState {
    panel: Arc<Mutex<StatusPanel<HttpBotApi>>>,
}

#[derive(Parser)]
#[command(
    name = "panel_app",
    version,
    about = "fishpanel companion web UI",
    long_about = None
)]
struct Cli {
    #[arg(short = 'c', long = "config", default_value = "./panel.toml")]
    config: String,

    #[arg(short = 'u', long = "url", help = "Control API base URL override")]
    url: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config =
        load_panel_config_or_default(&cli.config).expect("failed to read panel config");
    if let Some(url) = cli.url {
        config.api_url = url;
    }

    let api = HttpBotApi::new(&config.api_url).expect("invalid control API URL");
    let panel = Arc::new(Mutex::new(StatusPanel::new(api, config.fishing)));
    panel.lock().await.append_log("Control panel initialized");

    let _poller = spawn_status_poll(
        panel.clone(),
        Duration::from_secs(config.poll_interval_secs),
    );

    let state = AppState { panel };
    let app = Router::new()
        .route("/", get(index))
        .route("/api/panel", get(panel_state))
        .route("/api/panel/start", post(start_bot))
        .route("/api/panel/stop", post(stop_bot))
        .route("/api/panel/settings", post(save_settings))
        .route("/api/panel/log/clear", post(clear_log))
        .with_state(state);

    let port = env::var("FISHPANEL_PORT")
        .ok()
        .and_then(|val| val.parse::<u16>().ok())
        .unwrap_or(7878);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    println!("Panel app running on http://{addr} (bot at {})", config.api_url);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind port");
    axum::serve(listener, app)
        .await
        .expect("server error");
}

async fn index() -> Html<String> {
    Html(index_html())
}

#[derive(serde::Serialize)]
struct PanelView {
    status_label: String,
    badge_class: &'static str,
    start_enabled: bool,
    stop_enabled: bool,
    session_time: String,
    fish_caught: String,
    fish_per_hour: String,
    cast_interval: u32,
    cast_interval_label: String,
    detection_method: String,
    sensitivity: u8,
    sensitivity_label: String,
    log: String,
    version: &'static str,
}

fn view(panel: &StatusPanel<HttpBotApi>) -> PanelView {
    PanelView {
        status_label: panel.badge.label.clone(),
        badge_class: panel.badge.severity.badge_class(),
        start_enabled: panel.start_enabled,
        stop_enabled: panel.stop_enabled,
        session_time: panel.session_time.clone(),
        fish_caught: panel.fish_caught.clone(),
        fish_per_hour: panel.fish_per_hour.clone(),
        cast_interval: panel.controls.cast_interval,
        cast_interval_label: panel.controls.cast_interval_label.clone(),
        detection_method: panel.controls.detection_method.to_string(),
        sensitivity: panel.controls.sensitivity,
        sensitivity_label: panel.controls.sensitivity_label.clone(),
        log: panel.render_log(),
        version: env!("CARGO_PKG_VERSION"),
    }
}

async fn panel_state(State(state): State<AppState>) -> Json<PanelView> {
    let panel = state.panel.lock().await;
    Json(view(&panel))
}

async fn start_bot(State(state): State<AppState>) -> Json<PanelView> {
    let mut panel = state.panel.lock().await;
    panel.start().await;
    Json(view(&panel))
}

async fn stop_bot(State(state): State<AppState>) -> Json<PanelView> {
    let mut panel = state.panel.lock().await;
    panel.stop().await;
    Json(view(&panel))
}

async fn save_settings(
    State(state): State<AppState>,
    Json(draft): Json<SettingsDraft>,
) -> Result<Json<PanelView>, ApiError> {
    if draft.sensitivity > 100 {
        return Err(ApiError::bad_request("sensitivity must be 0-100"));
    }

    let mut panel = state.panel.lock().await;
    panel.on_cast_interval_change(draft.cast_interval);
    panel.on_sensitivity_change(draft.sensitivity);
    panel.controls.detection_method = draft.detection_method;
    panel.save_settings();
    Ok(Json(view(&panel)))
}

async fn clear_log(State(state): State<AppState>) -> Json<PanelView> {
    let mut panel = state.panel.lock().await;
    panel.clear_log();
    Json(view(&panel))
}

#[derive(Debug)]
struct ApiError {
    code: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: &str) -> Self {
        Self {
            code: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.code, self.message).into_response()
    }
}

fn index_html() -> String {
    let html = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Fishing Bot Panel</title>
  <style>
    :root {
      --bg: #0f172a;
      --panel: #0b1324;
      --card: #0f1c33;
      --accent: #38bdf8;
      --text: #e2e8f0;
      --muted: #94a3b8;
      --border: rgba(148, 163, 184, 0.2);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      font-family: "Trebuchet MS", "Verdana", "Geneva", sans-serif;
      color: var(--text);
      background: radial-gradient(circle at top, #1e293b, #0b1020 55%, #090c18);
      min-height: 100vh;
    }

    header { padding: 24px 20px 12px; }
    header h1 { margin: 0 0 6px; font-size: 26px; }
    header p { margin: 0; color: var(--muted); font-size: 13px; }

    .shell { padding: 0 16px 32px; max-width: 860px; margin: 0 auto; }

    .card {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 16px;
      padding: 16px;
      margin-bottom: 16px;
    }

    .card h3 { margin: 0 0 12px; font-size: 15px; color: var(--accent); }

    .badge {
      display: inline-block;
      padding: 6px 14px;
      border-radius: 999px;
      font-weight: 600;
    }
    .bg-success { background: #22c55e; color: #052e16; }
    .bg-danger { background: #ef4444; color: #450a0a; }
    .bg-warning { background: #f59e0b; color: #451a03; }
    .bg-secondary { background: #475569; color: #e2e8f0; }

    .stats { display: flex; gap: 24px; flex-wrap: wrap; color: var(--muted); }
    .stats b { color: var(--text); }

    .actions { display: flex; gap: 10px; margin-top: 12px; }

    .btn {
      border: 1px solid transparent;
      padding: 10px 18px;
      border-radius: 12px;
      cursor: pointer;
      font-weight: 600;
      background: var(--accent);
      color: #0c4a6e;
    }
    .btn.danger { background: #ef4444; color: #111827; }
    .btn.secondary { background: transparent; color: var(--text); border-color: var(--border); }
    .btn:disabled { opacity: 0.4; cursor: default; }

    .field { margin-bottom: 12px; }
    .field label { display: block; font-size: 12px; color: var(--muted); margin-bottom: 6px; }
    .field input[type="range"] { width: 100%; }
    .field select {
      width: 100%;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid var(--border);
      background: var(--panel);
      color: var(--text);
    }

    .log-box {
      background: #0b1020;
      border-radius: 12px;
      padding: 14px;
      border: 1px solid var(--border);
      color: #d1d5db;
      font-family: "Courier New", monospace;
      font-size: 12px;
      white-space: pre-wrap;
      max-height: 320px;
      overflow-y: auto;
    }

    footer { color: var(--muted); font-size: 12px; text-align: right; }
  </style>
</head>
<body>
  <header>
    <div class="shell">
      <h1>Fishing Bot Panel</h1>
      <p>Start and stop the bot, tune detection, watch the session.</p>
    </div>
  </header>
  <div class="shell">
    <div class="card">
      <h3>Status</h3>
      <span class="badge bg-secondary" id="status-value">Not initialized</span>
      <div class="stats" style="margin-top: 12px;">
        <span>Session time: <b id="session-time">00:00:00</b></span>
        <span>Fish caught: <b id="fish-caught">0</b></span>
        <span>Fish per hour: <b id="fish-per-hour">0.0</b></span>
      </div>
      <div class="actions">
        <button class="btn" id="start-btn">Start</button>
        <button class="btn danger" id="stop-btn" disabled>Stop</button>
      </div>
    </div>

    <div class="card">
      <h3>Settings</h3>
      <div class="field">
        <label>Cast interval (seconds): <span id="cast-interval-value">30</span></label>
        <input type="range" id="cast-interval" min="5" max="120" value="30" />
      </div>
      <div class="field">
        <label>Detection method</label>
        <select id="detection-method">
          <option value="color">Color</option>
          <option value="motion">Motion</option>
          <option value="sound">Sound</option>
        </select>
      </div>
      <div class="field">
        <label>Sensitivity: <span id="sensitivity-value">50%</span></label>
        <input type="range" id="sensitivity" min="0" max="100" value="50" />
      </div>
      <div class="actions">
        <button class="btn secondary" id="save-settings-btn">Save settings</button>
      </div>
    </div>

    <div class="card">
      <h3>Log</h3>
      <div class="log-box" id="log-output"></div>
      <div class="actions">
        <button class="btn secondary" id="clear-log-btn">Clear log</button>
      </div>
    </div>

    <footer>fishpanel <span id="version"></span></footer>
  </div>

  <script>
    const statusValue = document.getElementById("status-value");
    const startBtn = document.getElementById("start-btn");
    const stopBtn = document.getElementById("stop-btn");
    const castInterval = document.getElementById("cast-interval");
    const castIntervalValue = document.getElementById("cast-interval-value");
    const detectionMethod = document.getElementById("detection-method");
    const sensitivity = document.getElementById("sensitivity");
    const sensitivityValue = document.getElementById("sensitivity-value");
    const saveSettingsBtn = document.getElementById("save-settings-btn");
    const sessionTime = document.getElementById("session-time");
    const fishCaught = document.getElementById("fish-caught");
    const fishPerHour = document.getElementById("fish-per-hour");
    const logOutput = document.getElementById("log-output");
    const clearLogBtn = document.getElementById("clear-log-btn");
    const version = document.getElementById("version");

    let controlsLoaded = false;

    castInterval.addEventListener("input", function () {
      castIntervalValue.textContent = this.value;
    });

    sensitivity.addEventListener("input", function () {
      sensitivityValue.textContent = this.value + "%";
    });

    function render(view) {
      statusValue.textContent = view.status_label;
      statusValue.className = "badge " + view.badge_class;
      startBtn.disabled = !view.start_enabled;
      stopBtn.disabled = !view.stop_enabled;
      sessionTime.textContent = view.session_time;
      fishCaught.textContent = view.fish_caught;
      fishPerHour.textContent = view.fish_per_hour;
      version.textContent = view.version;

      if (!controlsLoaded) {
        castInterval.value = view.cast_interval;
        castIntervalValue.textContent = view.cast_interval_label;
        detectionMethod.value = view.detection_method;
        sensitivity.value = view.sensitivity;
        sensitivityValue.textContent = view.sensitivity_label;
        controlsLoaded = true;
      }

      if (logOutput.textContent !== view.log) {
        logOutput.textContent = view.log;
        logOutput.scrollTop = logOutput.scrollHeight;
      }
    }

    async function apiGet(path) {
      const res = await fetch(path);
      if (!res.ok) throw new Error(await res.text());
      return res.json();
    }

    async function apiPost(path, payload) {
      const res = await fetch(path, {
        method: "POST",
        headers: payload ? { "Content-Type": "application/json" } : {},
        body: payload ? JSON.stringify(payload) : undefined
      });
      if (!res.ok) throw new Error(await res.text());
      return res.json();
    }

    startBtn.addEventListener("click", async () => {
      render(await apiPost("/api/panel/start"));
    });

    stopBtn.addEventListener("click", async () => {
      render(await apiPost("/api/panel/stop"));
    });

    saveSettingsBtn.addEventListener("click", async () => {
      render(await apiPost("/api/panel/settings", {
        cast_interval: Number.parseInt(castInterval.value, 10),
        detection_method: detectionMethod.value,
        sensitivity: Number.parseInt(sensitivity.value, 10)
      }));
    });

    clearLogBtn.addEventListener("click", async () => {
      render(await apiPost("/api/panel/log/clear"));
    });

    async function refresh() {
      render(await apiGet("/api/panel"));
    }

    refresh();
    setInterval(refresh, 2000);
  </script>
</body>
</html>"#;

    html.to_string()
}
