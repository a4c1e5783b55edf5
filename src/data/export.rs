use std::path::Path;

use crate::error::DemoError;

use super::model::SampleFrame;

/// Write the frame as CSV with a `feature_1,feature_2,category,target` header.
pub fn write_csv(frame: &SampleFrame, path: &Path) -> Result<(), DemoError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in &frame.records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    log::info!("exported {} rows to {}", frame.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate::generate_frame;

    #[test]
    fn csv_has_header_and_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.csv");
        let frame = generate_frame(12, 42);

        write_csv(&frame, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(headers, ["feature_1", "feature_2", "category", "target"]);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].get(2), Some(frame.records[0].category.to_string().as_str()));
        assert_eq!(rows[0].get(3), Some(frame.records[0].target.to_string().as_str()));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/frame.csv");
        assert!(write_csv(&generate_frame(3, 1), &path).is_err());
    }
}
