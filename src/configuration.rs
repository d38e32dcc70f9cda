use std::env;
use std::path::PathBuf;

/// Process-wide settings, loaded once at startup and passed around as an
/// immutable value. The conflict and filter logic never sees this; it
/// operates on whatever values appear in records.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub labs: Vec<String>,
    pub locations: Vec<String>,
    pub timeslots: Vec<String>,
    pub admin_password: String,
    pub port: u16,
    pub bookings_file: PathBuf,
}

const DEFAULT_LABS: [&str; 4] = ["CS018", "CC898", "AI201", "NET404"];
const DEFAULT_LOCATIONS: [&str; 2] = ["Pune", "Bangalore"];
const DEFAULT_TIMESLOTS: [&str; 4] = [
    "09:00-11:00",
    "11:30-13:30",
    "14:00-16:00",
    "16:30-18:30",
];

impl Default for Configuration {
    fn default() -> Self {
        Self {
            labs: to_strings(&DEFAULT_LABS),
            locations: to_strings(&DEFAULT_LOCATIONS),
            timeslots: to_strings(&DEFAULT_TIMESLOTS),
            admin_password: "admin123".into(),
            port: 3000,
            bookings_file: PathBuf::from("bookings.csv"),
        }
    }
}

impl Configuration {
    /// Defaults, overridden by environment variables, overridden by CLI
    /// arguments.
    pub fn load(port: Option<u16>, bookings_file: Option<PathBuf>) -> Self {
        let mut configuration = Self::default();

        if let Ok(labs) = env::var("LAB_BOOKING_LABS") {
            configuration.labs = split_list(&labs);
        }
        if let Ok(locations) = env::var("LAB_BOOKING_LOCATIONS") {
            configuration.locations = split_list(&locations);
        }
        if let Ok(timeslots) = env::var("LAB_BOOKING_TIMESLOTS") {
            configuration.timeslots = split_list(&timeslots);
        }
        if let Ok(password) = env::var("LAB_BOOKING_ADMIN_PASSWORD") {
            configuration.admin_password = password;
        }
        if let Ok(value) = env::var("LAB_BOOKING_PORT") {
            match value.parse() {
                Ok(parsed) => configuration.port = parsed,
                Err(_) => tracing::warn!(%value, "ignoring unparseable LAB_BOOKING_PORT"),
            }
        }
        if let Ok(path) = env::var("LAB_BOOKING_FILE") {
            configuration.bookings_file = PathBuf::from(path);
        }

        if let Some(port) = port {
            configuration.port = port;
        }
        if let Some(path) = bookings_file {
            configuration.bookings_file = path;
        }
        configuration
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
