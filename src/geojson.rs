//! Feature collection input and output.
//!
//! The county boundary file is ISO-8859-1 encoded. Every byte maps to the
//! Unicode code point of the same value, so decoding is a direct widening.
//! Output is compact UTF-8 JSON.

use crate::error::{Result, TrendsError};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Decode ISO-8859-1 bytes into a string
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Read and parse an ISO-8859-1 encoded feature collection
pub fn read_feature_collection(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(TrendsError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path)?;
    let text = decode_latin1(&bytes);
    let document: Value = serde_json::from_str(&text)?;

    if !document.get("features").is_some_and(Value::is_array) {
        return Err(TrendsError::invalid_document(format!(
            "{} has no 'features' array",
            path.display()
        )));
    }

    debug!("Read feature collection from {} ({} bytes)", path.display(), bytes.len());
    Ok(document)
}

/// Write a feature collection as compact JSON, creating parent directories
pub fn write_feature_collection(path: &Path, document: &Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, document)?;
    writer.flush()?;

    info!("Wrote feature collection to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_decode_latin1() {
        // "Doña Ana" with ñ as the single byte 0xF1
        let bytes = b"Do\xf1a Ana";
        assert_eq!(decode_latin1(bytes), "Doña Ana");
    }

    #[test]
    fn test_read_latin1_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counties.json");
        let mut bytes = br#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"GEO_ID":"0500000US35013","NAME":"Do"#.to_vec();
        bytes.push(0xf1);
        bytes.extend_from_slice(br#"a Ana"},"geometry":null}]}"#);
        std::fs::write(&path, bytes).unwrap();

        let document = read_feature_collection(&path).unwrap();
        assert_eq!(
            document["features"][0]["properties"]["NAME"],
            json!("Doña Ana")
        );
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_feature_collection(Path::new("/nonexistent/counties.json")).unwrap_err();
        assert!(matches!(err, TrendsError::InputNotFound { .. }));
    }

    #[test]
    fn test_read_without_features() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counties.json");
        std::fs::write(&path, r#"{"type":"FeatureCollection"}"#).unwrap();

        let err = read_feature_collection(&path).unwrap_err();
        assert!(matches!(err, TrendsError::InvalidDocument { .. }));
    }

    #[test]
    fn test_write_creates_parent_and_is_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("county-cases.json");
        let document = json!({"features": [{"properties": {"NAME": "Doña Ana", "cases": 3}}]});

        write_feature_collection(&path, &document).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            r#"{"features":[{"properties":{"NAME":"Doña Ana","cases":3}}]}"#
        );
    }
}
