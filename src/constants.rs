/// Route prefix shared by every JSON endpoint
pub const API_PREFIX: &str = "/api/v1.0";

/// Format of every date in the dataset and in request paths
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the "recent" temperature window, counted back from the newest measurement
pub const RECENT_WINDOW_DAYS: u64 = 365;

/// Default location of the daily measurements table
pub const DEFAULT_MEASUREMENTS_PATH: &str = "Resources/hawaii_measurements.csv";

/// Default location of the station metadata table
pub const DEFAULT_STATIONS_PATH: &str = "Resources/hawaii_stations.csv";

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;
