use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use crate::{
    config::Endpoints,
    credentials::Credentials,
    error::{GEOCODE_NOT_FOUND, WEATHER_NOT_FOUND, WeatherError},
    model::{GeocodeResult, SnapshotShape, UnitPreference, WeatherTarget},
    snapshot::{FlatSnapshot, OneCallSnapshot, WeatherSnapshot},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    endpoints: Endpoints,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints, http: Client::new() }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
        credentials: &Credentials,
        not_found: &str,
    ) -> Result<String, WeatherError> {
        tracing::debug!(url, ?params, "Sending OpenWeather request");

        let res = self
            .http
            .get(url)
            .query(params)
            .query(&[("appid", credentials.api_key())])
            .send()
            .await?;

        read_success(res, not_found).await
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn geocode(
        &self,
        city: &str,
        credentials: &Credentials,
    ) -> Result<Vec<GeocodeResult>, WeatherError> {
        let params = [("q", city.to_string()), ("limit", "1".to_string())];
        let body =
            self.get(&self.endpoints.geocode_url, &params, credentials, GEOCODE_NOT_FOUND).await?;

        serde_json::from_str(&body).map_err(|e| WeatherError::decode("geocode response", e))
    }

    async fn weather(
        &self,
        target: &WeatherTarget,
        units: UnitPreference,
        shape: SnapshotShape,
        credentials: &Credentials,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let mut params: Vec<(&str, String)> = match target {
            WeatherTarget::Coordinates(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
            WeatherTarget::City(city) => {
                if shape == SnapshotShape::CurrentHourly {
                    return Err(WeatherError::InvalidRequest(
                        "Hourly forecasts need coordinates; resolve the city first.".to_string(),
                    ));
                }
                vec![("q", city.clone())]
            }
        };
        params.push(("units", units.as_query().to_string()));

        match shape {
            SnapshotShape::Flat => {
                let body = self
                    .get(&self.endpoints.weather_url, &params, credentials, WEATHER_NOT_FOUND)
                    .await?;
                let parsed: FlatSnapshot = serde_json::from_str(&body)
                    .map_err(|e| WeatherError::decode("current weather response", e))?;
                Ok(WeatherSnapshot::Flat(parsed))
            }
            SnapshotShape::CurrentHourly => {
                let body = self
                    .get(&self.endpoints.onecall_url, &params, credentials, WEATHER_NOT_FOUND)
                    .await?;
                let parsed: OneCallSnapshot = serde_json::from_str(&body)
                    .map_err(|e| WeatherError::decode("One Call response", e))?;
                Ok(WeatherSnapshot::CurrentHourly(parsed))
            }
        }
    }
}

/// Body of a successful response, or the error its status maps to.
async fn read_success(res: Response, not_found: &str) -> Result<String, WeatherError> {
    let status = res.status();
    let body = res.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    tracing::debug!(%status, body = %truncate_body(&body), "OpenWeather request failed");

    Err(match status {
        StatusCode::UNAUTHORIZED => WeatherError::Unauthorized,
        StatusCode::NOT_FOUND => WeatherError::NotFound(not_found.to_string()),
        _ => WeatherError::Provider { status: status.as_u16(), detail: failure_detail(status, &body) },
    })
}

/// Status reason text, else the body, else the bare code.
fn failure_detail(status: StatusCode, body: &str) -> String {
    if let Some(reason) = status.canonical_reason() {
        return reason.to_string();
    }
    let body = body.trim();
    if !body.is_empty() {
        return truncate_body(body);
    }
    format!("HTTP {}", status.as_u16())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
