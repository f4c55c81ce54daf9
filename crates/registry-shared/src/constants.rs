//! Application-wide constants

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TOKEN_PATH: &str = ".registry/session.json";
pub const DEFAULT_NOTICE_TTL_SECONDS: u64 = 5;

pub const ENV_PREFIX: &str = "REGISTRY";
