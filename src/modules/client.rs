use std::future::Future;
use std::time::Duration;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use url::Url;
use crate::modules::types::{ControlAck, StatusReport};

pub type ApiError = Box<dyn std::error::Error + Send + Sync>;

pub trait BotApi {
    fn start(&self) -> impl Future<Output = Result<ControlAck, ApiError>> + Send;
    fn stop(&self) -> impl Future<Output = Result<ControlAck, ApiError>> + Send;
    fn status(&self) -> impl Future<Output = Result<StatusReport, ApiError>> + Send;
}

pub struct HttpBotApi {
    base: Url,
    client: Client,
}

impl HttpBotApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("fishpanel/1.0"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }
}

impl BotApi for HttpBotApi {
    async fn start(&self) -> Result<ControlAck, ApiError> {
        let ack = self
            .client
            .post(self.endpoint("/api/start")?)
            .send()
            .await?
            .error_for_status()?
            .json::<ControlAck>()
            .await?;
        Ok(ack)
    }

    async fn stop(&self) -> Result<ControlAck, ApiError> {
        let ack = self
            .client
            .post(self.endpoint("/api/stop")?)
            .send()
            .await?
            .error_for_status()?
            .json::<ControlAck>()
            .await?;
        Ok(ack)
    }

    async fn status(&self) -> Result<StatusReport, ApiError> {
        let report = self
            .client
            .get(self.endpoint("/api/status")?)
            .send()
            .await?
            .error_for_status()?
            .json::<StatusReport>()
            .await?;
        Ok(report)
    }
}
