use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared_constants::USGS_GAGE_HEIGHT_PARAMETER;

use crate::{
    series::{merge_sites, parse_time_series, Sites},
    Error,
};

/// Envelope of the NWIS instantaneous values JSON format, reduced to what
/// the detector reads.
#[derive(Deserialize, Debug)]
pub struct IvResponse {
    pub value: IvValue,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct IvValue {
    #[serde(default)]
    pub time_series: Vec<TimeSeries>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub source_info: SourceInfo,
    #[serde(default)]
    pub values: Vec<SeriesValues>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub site_name: String,
    #[serde(default)]
    pub site_code: Vec<SiteCode>,
}

#[derive(Deserialize, Debug)]
pub struct SiteCode {
    pub value: String,
}

#[derive(Deserialize, Debug)]
pub struct SeriesValues {
    #[serde(default)]
    pub value: Vec<RawReading>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    pub value: String,
    pub date_time: String,
}

pub struct UsgsClient {
    client: Client,
    base_url: String,
    period: String,
}

impl UsgsClient {
    pub fn new(base_url: impl Into<String>, period: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            period: period.into(),
        }
    }

    pub async fn fetch_state_data(&self, state: &str) -> Result<IvResponse, Error> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("format", "json"),
                ("stateCd", state),
                ("period", self.period.as_str()),
                ("siteStatus", "all"),
                ("parameterCd", USGS_GAGE_HEIGHT_PARAMETER),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(Error::Status {
                state: state.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.json::<IvResponse>().await?)
    }

    /// Fetches the given states one after another and merges their sites.
    pub async fn fetch_and_combine(&self, states: &[String]) -> Result<Sites, Error> {
        let mut combined = Sites::new();
        for state in states {
            log::info!("Fetching data for {}", state);
            let data = self.fetch_state_data(state).await?;
            let sites = parse_time_series(data);
            log::info!("Fetched {} sites for {}", sites.len(), state);
            merge_sites(&mut combined, sites);
        }
        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_iv_response() {
        let body = json!({
            "name": "ns1:timeSeriesResponseType",
            "value": {
                "queryInfo": {},
                "timeSeries": [{
                    "sourceInfo": {
                        "siteName": "COLORADO RV AT AUSTIN, TX",
                        "siteCode": [{"value": "08158000", "network": "NWIS", "agencyCode": "USGS"}]
                    },
                    "variable": {},
                    "values": [{
                        "value": [
                            {"value": "4.12", "qualifiers": ["P"], "dateTime": "2024-05-01T00:00:00.000-05:00"}
                        ]
                    }]
                }]
            }
        })
        .to_string();

        let response: IvResponse = serde_json::from_str(&body).expect("to decode");

        let series = &response.value.time_series[0];
        assert_eq!(series.source_info.site_name, "COLORADO RV AT AUSTIN, TX");
        assert_eq!(series.source_info.site_code[0].value, "08158000");
        assert_eq!(series.values[0].value[0].value, "4.12");
        assert_eq!(
            series.values[0].value[0].date_time,
            "2024-05-01T00:00:00.000-05:00"
        );
    }

    #[test]
    fn test_decode_iv_response_without_series() {
        let response: IvResponse =
            serde_json::from_str(r#"{"value": {}}"#).expect("to decode");

        assert!(response.value.time_series.is_empty());
    }
}
