use std::env;

use crate::session::MAX_CAPACITY;

/// 初期容量のデフォルト
pub const DEFAULT_CAPACITY: usize = 16;

pub struct Config {
    pub capacity: usize,
    pub production: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        let production = env::var("RINGSLOT_ENV")
            .map(|v| matches!(v.to_lowercase().as_str(), "production" | "prod"))
            .unwrap_or(false);

        // 0 と上限超えはデフォルトに戻す
        let capacity = env::var("RINGSLOT_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&c: &usize| c > 0 && c <= MAX_CAPACITY)
            .unwrap_or(DEFAULT_CAPACITY);

        let default_log_level = if production { "info" } else { "debug" };
        let log_level =
            env::var("RINGSLOT_LOG_LEVEL").unwrap_or_else(|_| default_log_level.to_string());

        Self {
            capacity,
            production,
            log_level,
        }
    }
}
