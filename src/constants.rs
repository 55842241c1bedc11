pub const MARKETS_ENDPOINT: &str = "https://api.coingecko.com/api/v3/coins/markets";
pub const VS_CURRENCY: &str = "usd";
pub const SNAPSHOT_SIZE: u32 = 100;
pub const HTTP_TIMEOUT_SECS: u64 = 10;
pub const CACHE_TTL_SECS: u64 = 300;
pub const TOP_N: usize = 10;
pub const DEFAULT_MIN_VOLUME_MILLIONS: f64 = 10.0;
pub const DEFAULT_MIN_ABS_CHANGE_PCT: f64 = 3.0;
pub const DEFAULT_MIN_VOLATILITY_PCT: f64 = 5.0;
pub const WATCH_INTERVAL_SECS: u64 = 30;
