// Reference canvas for the world map (2:1 plate carrée)
pub const MAP_WIDTH: f64 = 800.0;
pub const MAP_HEIGHT: f64 = 400.0;

// Geographic domains
pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LNG_MIN: f64 = -180.0;
pub const LNG_MAX: f64 = 180.0;

// Server configuration
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_SESSION_IDLE_MINUTES: u32 = 30;
pub const SESSION_SWEEP_INTERVAL_SECS: u64 = 60;

// Page copy
pub const PAGE_TITLE: &str = "IQI Global Office";
pub const PAGE_SUBTITLE: &str = "Click locations to explore live camera feeds";
