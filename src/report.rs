//! Run report: how many beaches were kept plus a sample of them.
//!
//! Presentation only; extraction results are passed in as a slice and never
//! modified.

use crate::beach::BeachRecord;
use crate::common::{Error, Result};
use std::io::Write;

/// Number of records printed when no sample size is given.
pub const DEFAULT_SAMPLE_SIZE: usize = 2;

/// Serialization used for the record sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, two-space indent, non-ASCII kept as-is
    #[default]
    Json,
    /// YAML sequence of mappings
    Yaml,
}

/// Summary of an extraction run.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    records: &'a [BeachRecord],
    sample_size: usize,
    format: OutputFormat,
}

impl<'a> Report<'a> {
    pub fn new(records: &'a [BeachRecord], sample_size: usize, format: OutputFormat) -> Self {
        Self {
            records,
            sample_size,
            format,
        }
    }

    /// The records that will be printed.
    pub fn sample(&self) -> &'a [BeachRecord] {
        &self.records[..self.sample_size.min(self.records.len())]
    }

    /// Render the report text.
    ///
    /// ```
    /// use beach_kml::report::{OutputFormat, Report};
    ///
    /// let text = Report::new(&[], 2, OutputFormat::Json).render()?;
    /// assert_eq!(text, "Total beaches extracted: 0\n[]\n");
    /// # Ok::<(), beach_kml::Error>(())
    /// ```
    pub fn render(&self) -> Result<String> {
        let sample = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(self.sample())?,
            OutputFormat::Yaml => serde_saphyr::to_string(&self.sample())
                .map_err(|e| Error::Serialization(format!("Failed to serialize records to YAML: {}", e)))?,
        };
        Ok(format!(
            "Total beaches extracted: {}\n{}\n",
            self.records.len(),
            sample.trim_end()
        ))
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(self.render()?.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beach::{BeachRecordBuilder, ExtendedField};
    use crate::kml::Coordinates;

    fn records() -> Vec<BeachRecord> {
        vec![
            BeachRecordBuilder::new()
                .name("Playa del Sol")
                .coordinates(Coordinates::new(-58.1234, -34.5678))
                .extended(ExtendedField::ImageUrl, "http://x/img.jpg")
                .build()
                .unwrap(),
            BeachRecordBuilder::new()
                .name("Platja de Llevant")
                .coordinates(Coordinates::new(2.2, 41.39))
                .extended(ExtendedField::MoreInfoUrl, "https://redcanina.es/playa/llevant")
                .build()
                .unwrap(),
            BeachRecordBuilder::new()
                .name("Third")
                .coordinates(Coordinates::new(0.0, 0.0))
                .build()
                .unwrap(),
        ]
    }

    #[test]
    fn test_sample_is_capped() {
        let records = records();
        assert_eq!(Report::new(&records, 2, OutputFormat::Json).sample().len(), 2);
        assert_eq!(Report::new(&records, 10, OutputFormat::Json).sample().len(), 3);
        assert!(Report::new(&records, 0, OutputFormat::Json).sample().is_empty());
    }

    #[test]
    fn test_json_report() {
        let records = records();
        let text = Report::new(&records, DEFAULT_SAMPLE_SIZE, OutputFormat::Json)
            .render()
            .unwrap();

        let (header, body) = text.split_once('\n').unwrap();
        assert_eq!(header, "Total beaches extracted: 3");

        let sample: serde_json::Value = serde_json::from_str(body).unwrap();
        let sample = sample.as_array().unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample[0]["name"], "Playa del Sol");
        assert_eq!(sample[1]["name"], "Platja de Llevant");
        assert!(sample[0].get("address").is_none());
        assert!(body.starts_with("[\n  {\n    \"name\""));
    }

    #[test]
    fn test_json_keeps_non_ascii() {
        let records = vec![
            BeachRecordBuilder::new()
                .name("Playa La Picòrdia")
                .coordinates(Coordinates::new(2.65, 41.56))
                .build()
                .unwrap(),
        ];
        let text = Report::new(&records, 2, OutputFormat::Json).render().unwrap();
        assert!(text.contains("Playa La Picòrdia"));
    }

    #[test]
    fn test_yaml_report() {
        let records = records();
        let text = Report::new(&records, 1, OutputFormat::Yaml).render().unwrap();
        assert!(text.starts_with("Total beaches extracted: 3\n"));
        assert!(text.contains("Playa del Sol"));
        assert!(!text.contains("Platja de Llevant"));
    }

    #[test]
    fn test_write_to() {
        let records = records();
        let mut out = Vec::new();
        Report::new(&records, 0, OutputFormat::Json).write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Total beaches extracted: 3\n[]\n");
    }
}
