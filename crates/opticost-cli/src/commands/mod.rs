use std::path::Path;

use opticost::scenario::{parse_scenario, Scenario};

pub mod diff;
pub mod equations;
pub mod metrics;
pub mod steps;
pub mod sweep;
pub mod validate;

/// Load a scenario file, or the built-in defaults when none is given.
pub fn load_scenario(path: Option<&Path>) -> Result<Scenario, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(parse_scenario(p)?),
        None => Ok(Scenario::default()),
    }
}
