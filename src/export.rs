//! CSV export of scrape results

use crate::error::ExportError;
use crate::scrape::ScrapeResult;
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Column headers used for the exported table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvLayout {
    /// `Website,Email`
    #[default]
    Standard,
    /// `URL,Emails Found`, used for social-media profile batches
    Social,
}

impl CsvLayout {
    /// Header row for this layout
    pub fn headers(&self) -> [&'static str; 2] {
        match self {
            CsvLayout::Standard => ["Website", "Email"],
            CsvLayout::Social => ["URL", "Emails Found"],
        }
    }
}

impl fmt::Display for CsvLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvLayout::Standard => write!(f, "standard"),
            CsvLayout::Social => write!(f, "social"),
        }
    }
}

impl FromStr for CsvLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(CsvLayout::Standard),
            "social" => Ok(CsvLayout::Social),
            other => Err(format!("unknown layout '{}': expected standard or social", other)),
        }
    }
}

/// One exported row, as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    /// Website column
    pub website: String,
    /// Email column
    pub email: String,
}

impl From<&ScrapeResult> for ExportRow {
    fn from(result: &ScrapeResult) -> Self {
        Self {
            website: result.url.clone(),
            email: result.outcome.to_string(),
        }
    }
}

/// Write results as UTF-8 CSV with the layout's header row
pub fn write_csv<W: Write>(
    writer: W,
    results: &[ScrapeResult],
    layout: CsvLayout,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv_writer.write_record(layout.headers())?;
    for result in results {
        let row = ExportRow::from(result);
        csv_writer.write_record([row.website.as_str(), row.email.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write results to a CSV file, replacing any existing file
pub fn write_csv_file(
    path: impl AsRef<Path>,
    results: &[ScrapeResult],
    layout: CsvLayout,
) -> crate::Result<()> {
    let file = File::create(path)?;
    write_csv(file, results, layout)?;
    Ok(())
}

/// Results as CSV bytes, ready to save or download
pub fn to_csv_bytes(results: &[ScrapeResult], layout: CsvLayout) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, results, layout)?;
    Ok(buf)
}

/// Parse a previously exported CSV back into rows
///
/// The header row is skipped whichever layout wrote it.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ExportRow>, ExportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(ExportRow {
            website: record.get(0).unwrap_or_default().to_string(),
            email: record.get(1).unwrap_or_default().to_string(),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::{Outcome, NO_EMAIL_MARKER};
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<ScrapeResult> {
        vec![
            ScrapeResult {
                url: "https://acme.com".to_string(),
                outcome: Outcome::Found(vec![
                    "info@acme.com".to_string(),
                    "sales@acme.com".to_string(),
                ]),
            },
            ScrapeResult {
                url: "https://quiet.io".to_string(),
                outcome: Outcome::NoneFound,
            },
        ]
    }

    #[test]
    fn test_standard_layout() {
        let bytes = to_csv_bytes(&sample(), CsvLayout::Standard).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let expected = format!(
            "Website,Email\nhttps://acme.com,\"info@acme.com, sales@acme.com\"\nhttps://quiet.io,{}\n",
            NO_EMAIL_MARKER
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_social_layout_header() {
        let bytes = to_csv_bytes(&[], CsvLayout::Social).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "URL,Emails Found\n");
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!("Social".parse::<CsvLayout>(), Ok(CsvLayout::Social));
        assert_eq!("standard".parse::<CsvLayout>(), Ok(CsvLayout::Standard));
        assert!("tsv".parse::<CsvLayout>().is_err());
    }

    #[test]
    fn test_write_file_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("emails.csv");
        let err = write_csv_file(&path, &sample(), CsvLayout::Standard).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn test_read_back() {
        let bytes = to_csv_bytes(&sample(), CsvLayout::Standard).unwrap();
        let rows = read_csv(bytes.as_slice()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].email, "info@acme.com, sales@acme.com");
        assert_eq!(rows[1].website, "https://quiet.io");
    }
}
