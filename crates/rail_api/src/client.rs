use std::{env, time::Duration};

use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{model::Response, ApiError};

pub const DEFAULT_API_URL: &str = "https://api.comuline.com";

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub base_url: String,
    pub proxy: Option<String>,
    /// Timeout of a whole request. `None` waits forever.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            proxy: None,
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn env() -> Self {
        let base_url =
            env::var("RAIL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let proxy = env::var("RAIL_API_PROXY").ok();
        let timeout_secs = env::var("RAIL_API_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| match secs.trim().parse() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    log::warn!("Ignoring invalid RAIL_API_TIMEOUT_SECS '{}'.", secs);
                    None
                }
            });

        Self {
            base_url,
            proxy,
            timeout_secs,
        }
    }
}

pub struct RailApiClient {
    pub config: ApiConfig,
    client: reqwest::Client,
}

impl RailApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(proxy_url) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            config: config.clone(),
            client: builder.build()?,
        })
    }

    /// Fetch the payload of an endpoint given by its path segments, e.g.
    /// `["v1", "station"]`.
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = endpoint_url(&self.config.base_url, segments)?.to_string();
        match &self.config.proxy {
            Some(proxy_url) => {
                log::debug!("Requesting Endpoint '{url}' using proxy '{proxy_url}'.")
            }
            None => log::debug!("Requesting Endpoint '{url}'."),
        }

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let text = response.text().await?;
                parse_response(&url, &text)
            }
            other => match response.text().await {
                Ok(val) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url,
                    response: Some(val),
                }),
                Err(_) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url,
                    response: None,
                }),
            },
        }
    }
}

/// Appends `segments` to `base_url`, escaping each of them.
pub(crate) fn endpoint_url(base_url: &str, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = Url::parse(base_url)
        .map_err(|why| ApiError::InvalidUrl(format!("{}: {}", base_url, why)))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(base_url.to_owned()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Unwraps the `{ metadata, data }` envelope.
pub(crate) fn parse_response<T: DeserializeOwned>(
    url: &str,
    text: &str,
) -> Result<T, ApiError> {
    let response: Response<T> = serde_json::from_str(text)?;
    if !response.metadata.success {
        return Err(ApiError::Unsuccessful {
            url: url.to_owned(),
            message: response.metadata.message,
        });
    }
    response
        .data
        .ok_or_else(|| ApiError::MissingData(url.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_is_unwrapped() {
        let data: Vec<u32> =
            parse_response("v1/test", r#"{"metadata":{"success":true},"data":[1,2]}"#)
                .unwrap();
        assert_eq!(data, vec![1, 2]);
    }

    #[test]
    fn unsuccessful_envelope_is_an_error() {
        let result: Result<Vec<u32>, _> = parse_response(
            "v1/test",
            r#"{"metadata":{"success":false,"message":"station not found"}}"#,
        );
        match result {
            Err(ApiError::Unsuccessful { message, .. }) => {
                assert_eq!(message.as_deref(), Some("station not found"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_data_is_an_error() {
        let result: Result<Vec<u32>, _> =
            parse_response("v1/test", r#"{"metadata":{"success":true}}"#);
        assert!(matches!(result, Err(ApiError::MissingData(_))));

        let result: Result<Vec<u32>, _> =
            parse_response("v1/test", r#"{"metadata":{"success":true},"data":null}"#);
        assert!(matches!(result, Err(ApiError::MissingData(_))));
    }

    #[test]
    fn garbage_is_a_json_error() {
        let result: Result<Vec<u32>, _> = parse_response("v1/test", "<html>");
        assert!(matches!(result, Err(ApiError::JsonError(_))));
    }

    #[test]
    fn endpoint_segments_are_escaped() {
        let url = endpoint_url("https://api.example.com", &["v1", "route", "a/b?c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/route/a%2Fb%3Fc");

        let url = endpoint_url("https://api.example.com/rail/", &["v1", "station"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/rail/v1/station");
    }

    #[test]
    fn malformed_base_url_is_an_error() {
        assert!(matches!(
            endpoint_url("not a url", &["v1", "station"]),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn client_is_built_with_proxy_and_timeout() {
        let config = ApiConfig {
            proxy: Some("http://localhost:3128".to_owned()),
            timeout_secs: Some(5),
            ..ApiConfig::default()
        };
        assert!(RailApiClient::new(&config).is_ok());
    }
}
