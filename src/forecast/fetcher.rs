use crate::cache::MemoCache;
use crate::forecast::error::ForecastError;
use crate::forecast::request::ForecastRequest;
use crate::forecast::response::ForecastResponse;
use log::{info, warn};
use reqwest::Client;
use std::sync::Arc;

/// Memoized forecast payloads, keyed by the complete request.
pub type ForecastCache = MemoCache<ForecastRequest, ForecastResponse>;

pub struct ForecastFetcher {
    client: Client,
    url: String,
    cache: Arc<ForecastCache>,
}

impl ForecastFetcher {
    pub fn new(client: Client, url: impl Into<String>, cache: Arc<ForecastCache>) -> Self {
        Self {
            client,
            url: url.into(),
            cache,
        }
    }

    /// Retrieves the hourly and current forecast described by `request`.
    ///
    /// An identical request is answered from the cache. No retries are made.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::NetworkRequest`] if the service is unreachable
    /// or times out, [`ForecastError::HttpStatus`] for a non-2xx answer and
    /// [`ForecastError::Decode`] if the body does not match [`ForecastResponse`].
    pub async fn get_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, ForecastError> {
        self.cache
            .get_or_try_load(request.clone(), || self.download(request))
            .await
    }

    async fn download(&self, request: &ForecastRequest) -> Result<ForecastResponse, ForecastError> {
        info!(
            "Fetching forecast for {} from {} ({} to {})",
            request.coordinate(),
            self.url,
            request.start_date,
            request.end_date
        );

        let response = self
            .client
            .get(&self.url)
            .query(&request.to_query())
            .send()
            .await
            .map_err(|e| ForecastError::NetworkRequest(self.url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", self.url, e);
                return Err(if let Some(status) = e.status() {
                    ForecastError::HttpStatus {
                        url: self.url.clone(),
                        status,
                        source: e,
                    }
                } else {
                    ForecastError::NetworkRequest(self.url.clone(), e)
                });
            }
        };

        let forecast: ForecastResponse = response
            .json()
            .await
            .map_err(|e| ForecastError::Decode(self.url.clone(), e))?;

        info!(
            "Received {} hourly entries (timezone {})",
            forecast.hourly.time.len(),
            forecast.timezone.as_deref().unwrap_or("unknown")
        );
        Ok(forecast)
    }
}
