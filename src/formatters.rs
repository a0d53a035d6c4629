use crate::constants::API_PREFIX;

/// Route templates advertised on the welcome page
const ROUTE_TEMPLATES: &[&str] = &["precipitation", "stations", "tobs", "<start>", "<start>/<end>"];

/// Formats the welcome page listing every available route
pub fn format_welcome() -> String {
    let mut output = String::from("Welcome to the Honolulu Weather API!<br/>Available Routes:");
    for route in ROUTE_TEMPLATES {
        output.push_str(&format!("<br/>{}/{}", API_PREFIX, route));
    }
    output
}
