//! Application constants
//!
//! Centralized location for domain-level defaults.

// Server and storage defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_PATH: &str = "data/keystone.db";
pub const DEFAULT_POOL_SIZE: u32 = 8;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Client behaviour
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 30;

// Record defaults applied on create
pub const LEAD_DEFAULT_STATUS: &str = "New";
pub const LEAD_DEFAULT_PRIORITY: &str = "Medium";
pub const DEAL_DEFAULT_STAGE: &str = "Prospecting";
pub const DEAL_DEFAULT_PROBABILITY: i64 = 0;
pub const EMAIL_DEFAULT_STATUS: &str = "Draft";
pub const TASK_DEFAULT_STATUS: &str = "Pending";
pub const TASK_DEFAULT_PRIORITY: &str = "Medium";
pub const PROJECT_DEFAULT_STATUS: &str = "Planning";
pub const PROJECT_DEFAULT_PROGRESS: i64 = 0;
pub const PROJECT_TASK_DEFAULT_STATUS: &str = "To Do";
pub const PROJECT_TASK_DEFAULT_PRIORITY: &str = "Medium";

// Percentages (deal probability, project progress)
pub const PERCENT_MIN: i64 = 0;
pub const PERCENT_MAX: i64 = 100;
