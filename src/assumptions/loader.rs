//! File-based assumption loader
//!
//! CSV files hold one `field,value` pair per row; JSON files hold a single object.
//! Fields missing from either format keep their default values.

use super::{Assumptions, AssumptionsError};
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default path to the shipped assumptions file
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions.csv";

/// Raw CSV row matching the assumptions.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    field: String,
    value: String,
}

/// Parse `field,value` rows on top of the defaults
pub fn parse_csv<R: Read>(reader: R) -> Result<Assumptions, AssumptionsError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut assumptions = Assumptions::default();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let value: f64 = row.value.parse().map_err(|_| AssumptionsError::InvalidValue {
            field: row.field.clone(),
            value: row.value.clone(),
        })?;
        assumptions.set_field(&row.field, value)?;
    }

    Ok(assumptions)
}

/// Parse a JSON object on top of the defaults
pub fn parse_json<R: Read>(reader: R) -> Result<Assumptions, AssumptionsError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load assumptions from a CSV file
pub fn load_csv(path: &Path) -> Result<Assumptions, AssumptionsError> {
    let file = File::open(path)?;
    let assumptions = parse_csv(file)?;
    info!("Loaded assumptions from {}", path.display());
    Ok(assumptions)
}

/// Load assumptions from a JSON file
pub fn load_json(path: &Path) -> Result<Assumptions, AssumptionsError> {
    let file = File::open(path)?;
    let assumptions = parse_json(BufReader::new(file))?;
    info!("Loaded assumptions from {}", path.display());
    Ok(assumptions)
}

/// Write assumptions as `field,value` rows
pub fn write_csv<W: std::io::Write>(
    assumptions: &Assumptions,
    writer: W,
) -> Result<(), AssumptionsError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["field", "value"])?;
    for name in super::FIELD_NAMES {
        if let Some(value) = assumptions.get_field(name) {
            writer.write_record([name, value.to_string().as_str()])?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_assumptions() {
        let result = Assumptions::from_csv();
        assert!(result.is_ok(), "Failed to load assumptions: {:?}", result.err());

        // The shipped file must match the in-memory defaults
        assert_eq!(result.unwrap(), Assumptions::default());
    }

    #[test]
    fn test_parse_csv_overrides_defaults() {
        let data = "field,value\n# comment line\nmonthly_sales, 1200000\nemployee_count,5\n";
        let a = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(a.monthly_sales, 1_200_000.0);
        assert_eq!(a.employee_count, 5.0);
        assert_eq!(a.monthly_purchase, 10_000_000.0);
    }

    #[test]
    fn test_parse_csv_rejects_bad_rows() {
        let unknown = "field,value\nturnover,100\n";
        assert!(matches!(
            parse_csv(unknown.as_bytes()),
            Err(AssumptionsError::UnknownField(_))
        ));

        let bad_number = "field,value\nmargin,ten percent\n";
        assert!(matches!(
            parse_csv(bad_number.as_bytes()),
            Err(AssumptionsError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_csv_write_then_parse() {
        let mut a = Assumptions::default();
        a.margin = 0.125;
        a.gross_wage = 61_500.0;

        let mut buf = Vec::new();
        write_csv(&a, &mut buf).unwrap();
        let parsed = parse_csv(buf.as_slice()).unwrap();

        assert_eq!(parsed, a);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{ "initial_cash": 0.0, "collection_90_days": 0.0 }"#;
        let a = parse_json(json.as_bytes()).unwrap();
        assert_eq!(a.initial_cash, 0.0);
        assert_eq!(a.collection_90_days, 0.0);
        assert_eq!(a.margin, 0.10);

        assert!(matches!(
            parse_json("{ not json".as_bytes()),
            Err(AssumptionsError::Json(_))
        ));
    }
}
