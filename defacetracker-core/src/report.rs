// Output serialization for scraped records

use crate::error::{Result, TrackerError};
use crate::target::Target;
use chrono::NaiveDate;
use defacetracker_scanner::DefacementRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Like [`OutputFormat::from_str`], but unknown names are an error.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| TrackerError::UnsupportedFormat(s.to_string()))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
        }
    }
}

/// `DDMMYYYY_<identifier>.<ext>`, e.g. `02012024_mz.csv`.
pub fn default_output_name(target: &Target, format: OutputFormat, date: NaiveDate) -> String {
    format!(
        "{}_{}.{}",
        date.format("%d%m%Y"),
        target.identifier(),
        format.extension()
    )
}

/// CSV with a `Date,Attacker,Team,URL,Mirror` header. The header is written
/// even when there are no records.
pub fn generate_csv_report(records: &[DefacementRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(["Date", "Attacker", "Team", "URL", "Mirror"])?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// JSON array of record objects, indented by four spaces.
pub fn generate_json_report(records: &[DefacementRecord]) -> Result<String> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), formatter);
    records.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&serializer.into_inner()).into_owned())
}

pub fn generate_report(records: &[DefacementRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Csv => generate_csv_report(records),
        OutputFormat::Json => generate_json_report(records),
    }
}

pub fn save_report(content: &str, path: &Path) -> Result<()> {
    let write = |path: &Path| -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()
    };

    write(path).map_err(|source| TrackerError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `records` and write them to `path`.
pub fn write_records(records: &[DefacementRecord], format: OutputFormat, path: &Path) -> Result<()> {
    let content = generate_report(records, format)?;
    save_report(&content, path)?;
    info!(
        "Data successfully written to {} in {} format",
        path.display(),
        format.name()
    );
    Ok(())
}

/// Read back a CSV produced by [`generate_csv_report`].
pub fn parse_csv_report(content: &str) -> Result<Vec<DefacementRecord>> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<DefacementRecord>, csv::Error>>()?;
    Ok(records)
}

/// Read back a JSON document produced by [`generate_json_report`].
pub fn parse_json_report(content: &str) -> Result<Vec<DefacementRecord>> {
    Ok(serde_json::from_str(content)?)
}
