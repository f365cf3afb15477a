//! Batch CSV intake: one customer inquiry per row, classified and stored.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{info, warn};

use crate::profile::{
    FormData, ProfileStore, SessionData, VeteranProfile, VeteranProfileEngine,
};

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to read intake file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid intake CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Result of one batch: stored profiles in row order plus the rows left out.
#[derive(Debug, Clone, Default)]
pub struct IntakeReport {
    pub profiles: Vec<VeteranProfile>,
    pub skipped_rows: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct IntakeRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default)]
    text: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    budget: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    timeline: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    project_type: Option<String>,
}

impl IntakeRow {
    fn form(&self) -> Option<FormData> {
        if self.budget.is_none() && self.timeline.is_none() && self.project_type.is_none() {
            return None;
        }
        Some(FormData {
            budget_range: self.budget.clone(),
            timeline: self.timeline.clone(),
            project_type: self.project_type.clone(),
            ..FormData::default()
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub struct CsvIntake;

impl CsvIntake {
    pub fn from_path<P, S>(
        path: P,
        engine: &VeteranProfileEngine<S>,
    ) -> Result<IntakeReport, IntakeError>
    where
        P: AsRef<Path>,
        S: ProfileStore + 'static,
    {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, engine)
    }

    /// Rows are 1-based data rows; the header is not counted.
    pub fn from_reader<R, S>(
        reader: R,
        engine: &VeteranProfileEngine<S>,
    ) -> Result<IntakeReport, IntakeError>
    where
        R: Read,
        S: ProfileStore + 'static,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut report = IntakeReport::default();

        for (index, record) in csv_reader.deserialize::<IntakeRow>().enumerate() {
            let row_number = index + 1;
            let row = record?;
            if row.text.trim().is_empty() {
                warn!(row = row_number, "skipping intake row without text");
                report.skipped_rows.push(row_number);
                continue;
            }

            let session = row.id.clone().map(|user_id| SessionData {
                user_id: Some(user_id),
            });
            let form = row.form();
            let profile =
                engine.analyze_and_create_profile(&row.text, form.as_ref(), session.as_ref());
            report.profiles.push(profile);
        }

        info!(
            imported = report.profiles.len(),
            skipped = report.skipped_rows.len(),
            "csv intake finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::tests::common::engine;
    use crate::profile::{BudgetRange, ProfileId};
    use std::io::Cursor;

    #[test]
    fn rows_become_stored_profiles() {
        let engine = engine();
        let csv = "id,text,budget,timeline,project_type\n\
vet-1,army combat veteran,$50K-$100K,,Bathroom Remodel\n\
vet-2,my spouse is active duty navy,,,\n";

        let report = CsvIntake::from_reader(Cursor::new(csv), &engine).expect("import succeeds");
        assert_eq!(report.profiles.len(), 2);
        assert!(report.skipped_rows.is_empty());

        let stored = engine
            .get_profile(&ProfileId("vet-1".to_string()))
            .expect("stored");
        assert!(stored.is_veteran);
        assert_eq!(stored.budget_range, Some(BudgetRange::From50KTo100K));
        assert!(stored
            .construction_priorities
            .contains(&"Bathroom Remodel".to_string()));

        let family = engine
            .get_profile(&ProfileId("vet-2".to_string()))
            .expect("stored");
        assert!(!family.is_veteran);
    }

    #[test]
    fn blank_text_rows_are_skipped() {
        let engine = engine();
        let csv = "id,text,budget,timeline,project_type\n\
a,,,,\n\
b,navy veteran,,,\n\
c,   ,,,\n";

        let report = CsvIntake::from_reader(Cursor::new(csv), &engine).expect("import succeeds");
        assert_eq!(report.profiles.len(), 1);
        assert_eq!(report.skipped_rows, vec![1, 3]);
        assert_eq!(engine.all_profiles().len(), 1);
    }

    #[test]
    fn missing_id_falls_back_to_digest() {
        let engine = engine();
        let csv = "text\nmarine veteran\n";

        let report = CsvIntake::from_reader(Cursor::new(csv), &engine).expect("import succeeds");
        assert!(report.profiles[0].id.0.starts_with("veteran-"));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let engine = engine();
        let error = CsvIntake::from_path("./does-not-exist.csv", &engine)
            .expect_err("expected io error");
        assert!(matches!(error, IntakeError::Io(_)));
    }
}
