use gloo_net::http::Request;
use models::{classify_response, AnomalyRecords, FetchError};

use crate::log_fn;

async fn request_anomalies(url: &str) -> Result<AnomalyRecords, FetchError> {
    let response = Request::get(url).send().await.map_err(|err| {
        log::error!("Request to {} failed: {:?}", url, err);
        FetchError::TransportOrStatus
    })?;

    if !response.ok() {
        log::error!("Request to {} returned status {}", url, response.status());
        return classify_response(false, None);
    }

    let body = response
        .text()
        .await
        .map_err(|err| log::error!("Reading body from {} failed: {:?}", url, err))
        .ok();
    let anomalies = classify_response(true, body.as_deref())?;
    log::debug!("Anomalies from backend: {:#?}", anomalies);
    Ok(anomalies)
}

/// Fetches the anomaly list once. Transport failures and non-success
/// statuses are not distinguished.
pub async fn fetch_anomalies(url: &str) -> Result<AnomalyRecords, FetchError> {
    log_fn!(format!("fetch_anomalies(`{}`)", url), {
        request_anomalies(url).await
    })
}
