pub const ANOMALIES_URL: &str =
    "https://usgs-water-anomaly-backend-a96b06d0f571.herokuapp.com/anomalies";

pub const USGS_IV_URL: &str = "https://waterservices.usgs.gov/nwis/iv/";
/// Gage height, feet
pub const USGS_GAGE_HEIGHT_PARAMETER: &str = "00065";
pub const USGS_DEFAULT_PERIOD: &str = "P3D";

pub const DEFAULT_STATES: &[&str] = &["tx", "ok"];
pub const DEFAULT_JUMP_THRESHOLD: f64 = 5.0;
