use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{Handler, HandlerError, HandlerRequest, Reply};

const CLARIFICATION: &str = "Please specify a city for weather information.";
const CITY_NOT_FOUND: &str = "City not found.";

/// Looks up current conditions on OpenWeatherMap for the captured city.
///
/// "City not found" is an answered-negatively reply, not a failure; only
/// transport errors and unreadable payloads fail the handler.
pub struct WeatherHandler {
    http_client: Client,
    api_key: String,
    base_url: String,
    units: String,
}

impl WeatherHandler {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        units: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            units: units.into(),
        }
    }

    async fn fetch(&self, city: &str) -> Result<Reply, HandlerError> {
        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[
                ("appid", self.api_key.as_str()),
                ("q", city),
                ("units", self.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| HandlerError::Upstream(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Reply::new(CITY_NOT_FOUND));
        }
        if !status.is_success() {
            return Err(HandlerError::Upstream(format!(
                "weather upstream returned {status}"
            )));
        }

        let body: WeatherBody = response
            .json()
            .await
            .map_err(|e| HandlerError::Malformed(e.to_string()))?;

        Ok(describe(city, &body))
    }
}

#[async_trait]
impl Handler for WeatherHandler {
    async fn execute(&self, request: &HandlerRequest) -> Result<Reply, HandlerError> {
        // Structurally matched rule with a missing or blank capture still
        // lands here; answering is the handler's job, not the table's.
        let city = request
            .capture
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();

        if city.is_empty() {
            return Ok(Reply::new(CLARIFICATION));
        }

        self.fetch(city).await
    }
}

fn describe(city: &str, body: &WeatherBody) -> Reply {
    // The API also carries "cod": "404" in the body for unknown cities
    if body.cod_is_not_found() {
        return Reply::new(CITY_NOT_FOUND);
    }

    let desc = body
        .weather
        .first()
        .map(|w| w.description.as_str())
        .unwrap_or("no description");

    Reply::new(format!(
        "The current temperature in {} is {}°C with {}.",
        city, body.main.temp, desc
    ))
}

#[derive(Debug, Deserialize)]
struct WeatherBody {
    /// Status code; the API returns it as a number or a string
    #[serde(default)]
    cod: Option<serde_json::Value>,
    main: WeatherMain,
    #[serde(default)]
    weather: Vec<WeatherDesc>,
}

impl WeatherBody {
    fn cod_is_not_found(&self) -> bool {
        match &self.cod {
            Some(serde_json::Value::String(s)) => s == "404",
            Some(serde_json::Value::Number(n)) => n.as_u64() == Some(404),
            _ => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherDesc {
    description: String,
}
