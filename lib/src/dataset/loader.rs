use crate::dataset::{Dataset, Observation};
use crate::error::{RegressionError, Result};
use csv::ReaderBuilder;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Header names accepted for the mileage column (case-insensitive).
pub const MILEAGE_COLUMNS: &[&str] = &["km", "mileage", "kilometers", "kilometres"];

/// Header names accepted for the price column (case-insensitive).
pub const PRICE_COLUMNS: &[&str] = &["price"];

/// CSV loader for mileage/price training data.
///
/// The file must have a header row. Columns are resolved by name, so their
/// order and any extra columns do not matter.
///
/// # Example
///
/// ```no_run
/// use price_estimator::dataset::CsvLoader;
///
/// let dataset = CsvLoader::new().load("data.csv").unwrap();
/// println!("{} observations", dataset.len());
/// ```
#[derive(Debug, Clone)]
pub struct CsvLoader {
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Loads a dataset from a file.
    ///
    /// # Errors
    /// - [`RegressionError::MissingInput`] if the file does not exist or has no data rows
    /// - [`RegressionError::MissingColumn`] if the mileage or price column is absent
    /// - [`RegressionError::InvalidValue`] if a cell is not a number
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RegressionError::MissingInput(format!(
                "training data file {} not found",
                path.display()
            )),
            _ => RegressionError::Io(e),
        })?;

        let dataset = self.from_reader(BufReader::new(file)).map_err(|e| match e {
            RegressionError::MissingInput(_) => RegressionError::MissingInput(format!(
                "training data file {} contains no observations",
                path.display()
            )),
            other => other,
        })?;
        debug!("loaded {} observations from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Loads a dataset from any reader producing CSV text.
    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(RegressionError::MissingInput(
                "no header row".to_string(),
            ));
        }
        let mileage_idx = resolve_column(&headers, MILEAGE_COLUMNS)?;
        let price_idx = resolve_column(&headers, PRICE_COLUMNS)?;

        let mut observations = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result?;
            // Header is line 1.
            let line = row + 2;
            let mileage = parse_cell(record.get(mileage_idx), &headers[mileage_idx], line)?;
            let price = parse_cell(record.get(price_idx), &headers[price_idx], line)?;
            if mileage < 0.0 {
                warn!("line {}: negative mileage {}", line, mileage);
            }
            observations.push(Observation::new(mileage, price));
        }

        Dataset::new(observations)
    }
}

fn resolve_column(headers: &[String], candidates: &'static [&'static str]) -> Result<usize> {
    headers
        .iter()
        .position(|h| candidates.iter().any(|c| h.eq_ignore_ascii_case(c)))
        .ok_or_else(|| RegressionError::MissingColumn {
            expected: candidates,
            found: headers.to_vec(),
        })
}

fn parse_cell(cell: Option<&str>, column: &str, line: usize) -> Result<f64> {
    let raw = cell.unwrap_or("");
    let value: f64 = raw.parse().map_err(|_| {
        RegressionError::InvalidValue(format!(
            "line {}: column '{}' holds '{}', expected a number",
            line, column, raw
        ))
    })?;
    if !value.is_finite() {
        return Err(RegressionError::InvalidValue(format!(
            "line {}: column '{}' is not finite",
            line, column
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_km_price_columns() {
        let text = "km,price\n240000,3650\n139800,3800\n";
        let dataset = CsvLoader::new().from_reader(text.as_bytes()).unwrap();

        assert_eq!(dataset.mileages().to_vec(), vec![240_000.0, 139_800.0]);
        assert_eq!(dataset.prices().to_vec(), vec![3_650.0, 3_800.0]);
    }

    #[test]
    fn test_load_resolves_columns_by_name() {
        let text = "Price,Model,Mileage\n5000, foo ,10000\n";
        let dataset = CsvLoader::new().from_reader(text.as_bytes()).unwrap();

        assert_eq!(dataset.mileages().to_vec(), vec![10_000.0]);
        assert_eq!(dataset.prices().to_vec(), vec![5_000.0]);
    }

    #[test]
    fn test_load_custom_delimiter() {
        let text = "km;price\n1000;2000\n";
        let dataset = CsvLoader::new()
            .delimiter(b';')
            .from_reader(text.as_bytes())
            .unwrap();

        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_load_missing_price_column() {
        let text = "km,cost\n1,2\n";
        let err = CsvLoader::new().from_reader(text.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            RegressionError::MissingColumn { expected, .. } if expected == PRICE_COLUMNS
        ));
    }

    #[test]
    fn test_load_non_numeric_cell() {
        let text = "km,price\n1000,abc\n";
        let err = CsvLoader::new().from_reader(text.as_bytes()).unwrap_err();

        match err {
            RegressionError::InvalidValue(msg) => assert!(msg.contains("line 2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_header_only_is_missing_input() {
        let text = "km,price\n";
        let err = CsvLoader::new().from_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, RegressionError::MissingInput(_)));
    }

    #[test]
    fn test_load_empty_text_is_missing_input() {
        let err = CsvLoader::new().from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, RegressionError::MissingInput(_)));
    }

    #[test]
    fn test_load_missing_file_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvLoader::new()
            .load(dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, RegressionError::MissingInput(_)));
    }

    #[test]
    fn test_load_from_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "km,price\n10000,8000\n20000,7000\n")?;

        let dataset = CsvLoader::new().load(&path)?;
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.max_mileage(), 20_000.0);
        Ok(())
    }
}
