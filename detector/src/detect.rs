use models::{AnomalyRecord, Direction};

use crate::series::Sites;

/// Flags every pair of consecutive readings whose values differ by more than
/// `threshold`. Sites are visited in ascending id order.
pub fn find_anomalies(sites: &Sites, threshold: f64) -> Vec<AnomalyRecord> {
    let mut anomalies = Vec::new();
    for (site_id, site) in sites {
        for pair in site.readings.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            if (curr.value - prev.value).abs() > threshold {
                anomalies.push(AnomalyRecord {
                    site_id: site_id.clone(),
                    site_name: site.site_name.clone(),
                    direction: Direction::between(prev.value, curr.value).to_string(),
                    timestamp: curr.timestamp.clone(),
                    prev_value: Some(prev.value),
                    curr_value: Some(curr.value),
                });
            }
        }
    }
    anomalies
}
