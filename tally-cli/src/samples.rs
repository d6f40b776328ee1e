//! Load labeled training samples from a `merchant,category` CSV export.
//!
//! The backend normally feeds the trainer straight from its receipt
//! history; this loader is the operator-facing equivalent for ad-hoc
//! retrains. A leading header row is detected and skipped.

use anyhow::{Context, Result};
use std::path::Path;
use tally_engine::TrainingSample;

/// Parse a samples CSV. Blank rows and rows missing either column are
/// skipped rather than failing the whole file.
pub fn parse_samples_csv(path: impl AsRef<Path>) -> Result<Vec<TrainingSample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;

    let mut samples = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let merchant = record.get(0).unwrap_or("").trim();
        let category = record.get(1).unwrap_or("").trim();

        if row == 0 && merchant.eq_ignore_ascii_case("merchant") {
            continue;
        }
        if merchant.is_empty() || category.is_empty() {
            continue;
        }
        samples.push(TrainingSample::new(merchant, category));
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parses_rows() {
        let file = write_csv("Trader Joe's,Food & Drink\nShell Station,Transportation\n");
        let samples = parse_samples_csv(file.path()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].merchant, "Trader Joe's");
        assert_eq!(samples[1].category, "Transportation");
    }

    #[test]
    fn test_skips_header_row() {
        let file = write_csv("merchant,category\nTrader Joe's,Food & Drink\n");
        let samples = parse_samples_csv(file.path()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].merchant, "Trader Joe's");
    }

    #[test]
    fn test_skips_incomplete_rows() {
        let file = write_csv("Trader Joe's,Food & Drink\nMissing Category\n,Shopping\n");
        let samples = parse_samples_csv(file.path()).unwrap();
        assert_eq!(samples.len(), 1);
    }
}
