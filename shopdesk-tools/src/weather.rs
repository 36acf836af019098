use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;
use shopdesk_core::{FieldSpec, InputSchema, Tool, ToolError, ToolInput};

use crate::format::title_case;

const MOCK_CONDITIONS: [&str; 5] = ["sunny", "rainy", "cloudy", "snowy", "windy"];

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    city: String,
}

/// Current weather for a city, from OpenWeatherMap when a key is configured
/// and from a deterministic mock otherwise.
pub struct WeatherTool {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    api_key: Option<SecretString>,
    #[cfg(feature = "http")]
    base_url: String,
    #[cfg(feature = "http")]
    http: reqwest::Client,
}

impl WeatherTool {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openweathermap.org";

    pub fn new(api_key: Option<SecretString>) -> Self {
        Self {
            api_key,
            #[cfg(feature = "http")]
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            #[cfg(feature = "http")]
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(5))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Weather from the mock only, regardless of configuration.
    pub fn mock() -> Self {
        Self::new(None)
    }

    #[cfg(feature = "http")]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[cfg(feature = "http")]
    async fn live(&self, city: &str, api_key: &SecretString) -> String {
        use secrecy::ExposeSecret;

        #[derive(Deserialize)]
        struct Report {
            weather: Vec<Condition>,
            main: Main,
        }
        #[derive(Deserialize)]
        struct Condition {
            description: String,
        }
        #[derive(Deserialize)]
        struct Main {
            temp: f64,
        }

        let url = format!("{}/data/2.5/weather", self.base_url.trim_end_matches('/'));
        let response = match self
            .http
            .get(url)
            .query(&[
                ("q", city),
                ("appid", api_key.expose_secret().as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let err = err.without_url();
                tracing::warn!(city, error = %err, "weather lookup failed");
                return format!("RESULT: Error getting weather information: {err}");
            }
        };

        if !response.status().is_success() {
            tracing::warn!(city, status = %response.status(), "weather lookup rejected");
            return format!("RESULT: Could not get weather information for {city}.");
        }

        match response.json::<Report>().await {
            Ok(report) => {
                let description = report
                    .weather
                    .first()
                    .map(|c| c.description.clone())
                    .unwrap_or_default();
                let good = description.contains("clear") || description.contains("cloud");
                report_line(city, &title_case(&description), report.main.temp, good)
            }
            Err(err) => format!(
                "RESULT: Error getting weather information: {}",
                err.without_url()
            ),
        }
    }
}

fn report_line(city: &str, condition: &str, temp: impl std::fmt::Display, good: bool) -> String {
    let outlook = if good {
        "Good conditions for shipping."
    } else {
        "Potential shipping delays due to weather."
    };
    format!("RESULT: Weather in {city}: {condition}, {temp}°C. {outlook}")
}

/// Stable pseudo-weather derived from the city name.
pub(crate) fn mock_report(city: &str) -> String {
    let seed: u32 = city.bytes().map(u32::from).sum();
    let condition = MOCK_CONDITIONS[(seed as usize) % MOCK_CONDITIONS.len()];
    let temp = 15 + seed % 30;
    let good = matches!(condition, "sunny" | "cloudy");
    report_line(city, &title_case(condition), temp, good)
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get current weather information for a city. Use this for shipping estimates or weather-based product recommendations."
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new().field(FieldSpec::string("city", "City name to get weather for"))
    }

    async fn invoke(&self, input: ToolInput) -> Result<String, ToolError> {
        let args: WeatherArgs = input.deserialize()?;
        let city = args.city.trim();
        if city.is_empty() {
            return Err(ToolError::InvalidInput("city must not be empty".to_string()));
        }

        #[cfg(feature = "http")]
        if let Some(api_key) = &self.api_key {
            return Ok(self.live(city, api_key).await);
        }

        tracing::debug!(city, "weather API key not configured, using mock weather");
        Ok(mock_report(city))
    }
}
