use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use birdbrain_algo::sanitize::validate_params;
use birdbrain_algo::BktParams;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_EXERCISES_PATH: &str = "data/exercises.json";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub exercises_path: PathBuf,
    pub cors_origins: CorsOrigins,
    pub bkt_params: BktParams,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let exercises_path = std::env::var("EXERCISES_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXERCISES_PATH));

        let cors_origins = parse_cors_origins(
            std::env::var("CORS_ORIGINS")
                .ok()
                .as_deref()
                .unwrap_or(DEFAULT_CORS_ORIGINS),
        );

        Self {
            host,
            port,
            log_level,
            exercises_path,
            cors_origins,
            bkt_params: bkt_params_from_env(),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// BKT parameters from the environment, or the defaults if they are out of range.
    /// Call after tracing is initialised so the warning is not lost.
    pub fn validated_bkt_params(&self) -> BktParams {
        match validate_params(&self.bkt_params) {
            Ok(()) => self.bkt_params,
            Err(err) => {
                tracing::warn!(error = %err, "invalid BKT parameters in environment, using defaults");
                BktParams::default()
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            exercises_path: PathBuf::from(DEFAULT_EXERCISES_PATH),
            cors_origins: parse_cors_origins(DEFAULT_CORS_ORIGINS),
            bkt_params: BktParams::default(),
        }
    }
}

pub fn parse_cors_origins(raw: &str) -> CorsOrigins {
    let trimmed = raw.trim();
    if trimmed == "*" {
        return CorsOrigins::Any;
    }

    let origins: Vec<String> = trimmed
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect();

    if origins.is_empty() {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok()?.trim().parse::<f64>().ok()
}

fn bkt_params_from_env() -> BktParams {
    let defaults = BktParams::default();
    BktParams {
        l0: env_f64("BKT_L0").unwrap_or(defaults.l0),
        t: env_f64("BKT_T").unwrap_or(defaults.t),
        s: env_f64("BKT_S").unwrap_or(defaults.s),
        g: env_f64("BKT_G").unwrap_or(defaults.g),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cors_origins_list() {
        assert_eq!(
            parse_cors_origins(" http://localhost:5173/ , http://localhost:3000 ,"),
            CorsOrigins::List(vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ])
        );
    }

    #[test]
    fn test_parse_cors_origins_wildcard() {
        assert_eq!(parse_cors_origins("*"), CorsOrigins::Any);
        assert_eq!(parse_cors_origins("  "), CorsOrigins::Any);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_addr().port(), 8000);
        assert_eq!(config.bkt_params, BktParams::default());
    }

    #[test]
    fn test_out_of_range_params_fall_back() {
        let config = Config {
            bkt_params: BktParams {
                g: 1.0,
                ..BktParams::default()
            },
            ..Config::default()
        };
        assert_eq!(config.validated_bkt_params(), BktParams::default());
    }
}
