use std::env;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// How donor-to-school distances are resolved
#[derive(Clone, Debug, PartialEq)]
pub enum DistanceMode {
    /// Geocode both addresses with Nominatim and use the haversine distance
    Nominatim,
    /// Same distance for every pair (offline/dev)
    Fixed(f64),
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub geocoder_url: String,
    pub geocoder_user_agent: String,
    pub distance_mode: DistanceMode,
    pub operator_username: Option<String>,
    pub operator_password: Option<String>,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let distance_mode = parse_distance_mode(
            env::var("DISTANCE_PROVIDER").ok().as_deref(),
            env::var("FIXED_DISTANCE_KM").ok().as_deref(),
        )?;

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://books4all.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| parse_origins(&s))
                .unwrap_or_else(Vec::new),
            geocoder_url: env::var("GEOCODER_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string()),
            geocoder_user_agent: env::var("GEOCODER_USER_AGENT").unwrap_or_else(|_| {
                format!("books4all/{}", env!("CARGO_PKG_VERSION"))
            }),
            distance_mode,
            operator_username: env::var("OPERATOR_USERNAME").ok(),
            operator_password: env::var("OPERATOR_PASSWORD").ok(),
            seed_demo: env::var("SEED_DEMO").is_ok(),
        })
    }
}

/// Comma-separated origins; blank entries are dropped.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Unset or unknown providers use Nominatim. A fixed distance must be a
/// non-negative number of kilometres (missing means 0).
pub fn parse_distance_mode(
    provider: Option<&str>,
    fixed_km: Option<&str>,
) -> Result<DistanceMode, String> {
    match provider.map(str::trim) {
        Some("fixed") => {
            let km = match fixed_km.map(str::trim) {
                None | Some("") => 0.0,
                Some(raw) => raw
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid FIXED_DISTANCE_KM '{}'", raw))?,
            };
            if !km.is_finite() || km < 0.0 {
                return Err(format!(
                    "Invalid FIXED_DISTANCE_KM '{}': must be a non-negative number",
                    km
                ));
            }
            Ok(DistanceMode::Fixed(km))
        }
        None | Some("") | Some("nominatim") => Ok(DistanceMode::Nominatim),
        Some(other) => {
            tracing::warn!(
                "Unknown DISTANCE_PROVIDER '{}', falling back to nominatim",
                other
            );
            Ok(DistanceMode::Nominatim)
        }
    }
}
