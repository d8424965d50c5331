//! CSV-based assumption override loader
//!
//! Reads `field,value` rows so a saved scenario file can replace any subset
//! of the default plan.

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use super::Assumptions;

/// Load field overrides from a `field,value` CSV file.
///
/// The file may carry a header row (`field,value`); it is skipped if present.
pub fn load_overrides(path: &Path) -> Result<HashMap<String, f64>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(file);

    let mut overrides = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let name = record[0].trim();
        if name.is_empty() || name == "field" {
            continue;
        }
        let value: f64 = record[1].trim().parse()?;
        overrides.insert(name.to_string(), value);
    }

    Ok(overrides)
}

/// Load a full assumption set: the default plan with file overrides applied.
pub fn load_plan(path: &Path) -> Result<Assumptions, Box<dyn Error>> {
    let overrides = load_overrides(path)?;
    let plan = Assumptions::default_plan().with_overrides(&overrides)?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_overrides_applies_on_top_of_defaults() {
        let dir = std::env::temp_dir();
        let path = dir.join("orchard_system_overrides_test.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "field,value").unwrap();
        writeln!(file, "olive_oil_price_bulk,13.5").unwrap();
        writeln!(file, "phase2_year,2030").unwrap();

        let plan = load_plan(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(plan.olive_oil_price_bulk, 13.5);
        assert_eq!(plan.phase2_year, 2030);
        assert_eq!(plan.ha_per_phase, 16.0);
    }

    #[test]
    fn test_unknown_field_in_file_is_an_error() {
        let dir = std::env::temp_dir();
        let path = dir.join("orchard_system_bad_overrides_test.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "not_a_field,1.0").unwrap();

        let result = load_plan(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}
