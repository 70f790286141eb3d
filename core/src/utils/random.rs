//! Random test-data generators

use rand::distributions::{Alphanumeric, Uniform};
use rand::Rng;

use crate::domain::value_objects::{NewProfile, NewRole};

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Random lowercase ASCII string of length `n`
pub fn random_string(n: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| LOWERCASE[rng.gen_range(0..LOWERCASE.len())] as char)
        .collect()
}

/// Random integer in `min..=max`
pub fn random_int(min: i64, max: i64) -> i64 {
    rand::thread_rng().sample(Uniform::new_inclusive(min, max))
}

pub fn random_username() -> String {
    random_string(8)
}

pub fn random_email() -> String {
    format!("{}@{}.com", random_string(8), random_string(5))
}

/// Alphanumeric password long enough to pass request validation
pub fn random_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

/// Profile with every field filled in
pub fn random_profile() -> NewProfile {
    NewProfile {
        first_name: random_string(6),
        last_name: random_string(6),
        business_name: random_string(10),
        street_address: format!("{} {} St", random_int(1, 999), random_string(6)),
        city: random_string(7),
        state: random_string(2).to_uppercase(),
        zip: format!("{:05}", random_int(0, 99_999)),
        country_code: "US".to_string(),
    }
}

pub fn random_role() -> NewRole {
    NewRole::default()
}
