use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Address of a running hotelservice_bookings, overridable with HOTELSERVICE_BOOKINGS_URL
pub fn bookings_url() -> String {
    std::env::var("HOTELSERVICE_BOOKINGS_URL").unwrap_or("http://127.0.0.1:8080".to_string())
}

/// Email that is not yet taken on a shared server
pub fn unique_email(name: &str) -> String {
    let suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();
    format!("{}.{}@example.com", name, suffix.to_lowercase())
}
