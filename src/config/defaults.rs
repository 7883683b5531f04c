pub const DEFAULT_RUST_LOG: &str = "info,sqlx=warn";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_MIN_IDLE: u32 = 2;
pub const DEFAULT_DB_SYNC_SCHEMA: bool = true;
pub const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_DB_LOG_STATEMENTS: bool = false;
pub const DEFAULT_OTP_TTL_MINUTES: i64 = 10;
pub const DEFAULT_OTP_LENGTH: usize = 6;
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

pub const MIN_OTP_LENGTH: usize = 4;
pub const MAX_OTP_LENGTH: usize = 12;
