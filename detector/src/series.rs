use std::collections::BTreeMap;

use crate::usgs::IvResponse;

#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: String,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteReadings {
    pub site_name: String,
    /// Ascending by timestamp
    pub readings: Vec<Sample>,
}

impl SiteReadings {
    fn extend_sorted(&mut self, samples: Vec<Sample>) {
        self.readings.extend(samples);
        self.readings.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    }
}

/// Sites keyed by USGS site id.
pub type Sites = BTreeMap<String, SiteReadings>;

/// Groups the readings of a response per site.
///
/// Series without a site code or without values are skipped, as are
/// readings whose value is not a decimal number.
pub fn parse_time_series(data: IvResponse) -> Sites {
    let mut sites = Sites::new();
    for series in data.value.time_series {
        let site_name = series.source_info.site_name;
        let Some(site_id) = series.source_info.site_code.into_iter().next() else {
            log::warn!("Ignoring series of `{}` without site code", site_name);
            continue;
        };
        let Some(values) = series.values.into_iter().next() else {
            log::warn!("Ignoring series of `{}` without values", site_name);
            continue;
        };

        let samples = values
            .value
            .into_iter()
            .filter_map(|reading| match reading.value.trim().parse::<f64>() {
                Ok(value) => Some(Sample {
                    timestamp: reading.date_time,
                    value,
                }),
                Err(e) => {
                    log::warn!(
                        "Ignoring reading `{}` of site {} at {}: {}",
                        reading.value,
                        site_id.value,
                        reading.date_time,
                        e
                    );
                    None
                }
            })
            .collect();

        sites
            .entry(site_id.value)
            .or_insert_with(|| SiteReadings {
                site_name,
                readings: Vec::new(),
            })
            .extend_sorted(samples);
    }
    sites
}

/// Merges `other` into `combined`. Readings of a site present in both are
/// concatenated and sorted again.
pub fn merge_sites(combined: &mut Sites, other: Sites) {
    for (site_id, site) in other {
        match combined.get_mut(&site_id) {
            Some(existing) => {
                log::debug!("Site {} reported more than once, merging readings", site_id);
                existing.extend_sorted(site.readings);
            }
            None => {
                combined.insert(site_id, site);
            }
        }
    }
}
