use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use super::{SlippageReading, StrandEnd};
use crate::error::{ScResult, StrandCutError};
use crate::strands::StrandId;

pub fn readings_from_json(content: &str) -> ScResult<Vec<SlippageReading>> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_readings_json<P: AsRef<Path>>(path: P) -> ScResult<Vec<SlippageReading>> {
    let path = path.as_ref();
    let readings = readings_from_json(&fs::read_to_string(path)?)?;
    info!("Loaded {} slippage readings from {}", readings.len(), path.display());
    Ok(readings)
}

/// Reads a `strand,end,value,exceeds` sheet, one row per strand end.
///
/// Trailing cells may be left off: a missing `value` is blank and a missing
/// `exceeds` is false. `exceeds` accepts `true`, `yes`, `y`, `x`, `1` or `>1`
/// (any case); anything else, including an empty cell, is false.
pub fn readings_from_csv<R: Read>(reader: R) -> ScResult<Vec<SlippageReading>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut readings = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = row_idx + 1;
        let cell = |i: usize| rec.get(i).unwrap_or("");

        if rec.len() < 2 {
            return Err(StrandCutError::Validation(format!(
                "Row {}: expected at least strand and end, got {} cell(s)",
                row,
                rec.len()
            )));
        }

        let strand: StrandId = cell(0).parse()?;
        let end: StrandEnd = cell(1).parse().map_err(|_| {
            StrandCutError::Validation(format!(
                "Row {}: '{}' is not a strand end (E1/E2)",
                row,
                cell(1)
            ))
        })?;

        readings.push(SlippageReading {
            strand,
            end,
            raw_text: cell(2).to_string(),
            exceeds_one: is_truthy(cell(3)),
        });
    }

    debug!("Parsed {} slippage rows from CSV", readings.len());
    Ok(readings)
}

pub fn load_readings_csv<P: AsRef<Path>>(path: P) -> ScResult<Vec<SlippageReading>> {
    let path = path.as_ref();
    let readings = readings_from_csv(File::open(path)?)?;
    info!("Loaded {} slippage readings from {}", readings.len(), path.display());
    Ok(readings)
}

/// Picks the reader by file extension; anything but `.csv` is JSON.
pub fn load_readings<P: AsRef<Path>>(path: P) -> ScResult<Vec<SlippageReading>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        load_readings_csv(path)
    } else {
        load_readings_json(path)
    }
}

fn is_truthy(cell: &str) -> bool {
    matches!(
        cell.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "x" | "1" | ">1"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_rows() {
        let sheet = "strand,end,value,exceeds\nB1,E1,1/4,\nB1,e2,,yes\n";
        let readings = readings_from_csv(sheet.as_bytes()).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].raw_text, "1/4");
        assert!(!readings[0].exceeds_one);
        assert_eq!(readings[1].end, StrandEnd::E2);
        assert!(readings[1].exceeds_one);
    }

    #[test]
    fn test_bad_end_is_validation_error() {
        let sheet = "strand,end,value,exceeds\nB1,E3,1/4,\n";
        let err = readings_from_csv(sheet.as_bytes()).unwrap_err();
        assert!(matches!(err, StrandCutError::Validation(_)));
    }
}
