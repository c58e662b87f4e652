use std::path::Path;

use opticost::error::Severity;
use opticost::scenario::{parse_scenario, validate_scenario};

pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = parse_scenario(path)?;
    let violations = validate_scenario(&scenario);

    let errors: Vec<_> = violations
        .iter()
        .filter(|v| v.severity == Severity::Error)
        .collect();
    let warnings: Vec<_> = violations
        .iter()
        .filter(|v| v.severity == Severity::Warning)
        .collect();

    for v in &violations {
        println!("{v}");
    }

    println!(
        "\n{} error(s), {} warning(s)",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        println!("Scenario is valid.");
        Ok(())
    } else {
        Err(format!("Scenario has {} validation error(s)", errors.len()).into())
    }
}
