//! Shared fixtures: a seeded synthetic listing generator whose prices
//! follow a noisy log-linear function of the features, so a trained model
//! has real signal to recover.

use carprice_core::CarListing;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CATALOG: &[(&str, &[&str])] = &[
    ("Ford", &["F150", "Focus"]),
    ("Honda", &["Accord", "Civic"]),
    ("Kia", &["Rio", "Sorento"]),
    ("Toyota", &["Camry", "Corolla"]),
];

fn make_offset(make: &str) -> f64 {
    match make {
        "Ford" => 0.10,
        "Honda" => 0.05,
        "Kia" => -0.10,
        _ => 0.15,
    }
}

fn model_offset(model: &str) -> f64 {
    match model {
        "F150" => 0.20,
        "Accord" | "Camry" => 0.10,
        "Sorento" => 0.05,
        _ => -0.05,
    }
}

pub fn synthetic_listings(n: usize, seed: u64) -> Vec<CarListing> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let (make, models) = CATALOG[rng.gen_range(0..CATALOG.len())];
            let model = models[rng.gen_range(0..models.len())];
            let year: u32 = rng.gen_range(2000..=2020);
            let mileage: f64 = rng.gen_range(5_000.0..180_000.0);

            let log_price = 9.2 + 0.05 * f64::from(year - 2000) - 6e-6 * mileage
                + make_offset(make)
                + model_offset(model)
                + rng.gen_range(-0.05..0.05);

            CarListing {
                year,
                mileage,
                make: make.to_string(),
                model: model.to_string(),
                price: log_price.exp_m1(),
            }
        })
        .collect()
}
