// src/file/mod.rs
use anyhow::{Result, Context, anyhow};
use std::path::{Path, PathBuf};
use std::fs;

/// A CSV file picked for upload. The bytes are sent as-is; the preview is
/// only shown next to the picker.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub preview: CsvPreview,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvPreview {
    pub headers: Vec<String>,
    pub row_count: usize,
}

impl SelectedFile {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(anyhow!("CSV file not found: {}", path.display()));
        }

        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());

        Ok(Self::from_bytes(name, path.to_path_buf(), bytes))
    }

    pub fn from_bytes(name: String, path: PathBuf, bytes: Vec<u8>) -> Self {
        let preview = match CsvPreview::scan(&bytes) {
            Ok(preview) => preview,
            Err(e) => {
                // The backend is the authority on CSV validity
                tracing::warn!("Could not preview {}: {}", name, e);
                CsvPreview::default()
            }
        };
        tracing::debug!(
            file = %name,
            rows = preview.row_count,
            columns = preview.headers.len(),
            "Selected CSV file"
        );

        Self { name, path, bytes, preview }
    }

    pub fn size_label(&self) -> String {
        let size = self.bytes.len() as f64;
        if size >= 1024.0 * 1024.0 {
            format!("{:.1} MB", size / (1024.0 * 1024.0))
        } else if size >= 1024.0 {
            format!("{:.1} KB", size / 1024.0)
        } else {
            format!("{} B", self.bytes.len())
        }
    }
}

impl CsvPreview {
    pub fn scan(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);

        let headers = reader.headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut row_count = 0;
        for record in reader.records() {
            record.context("Malformed CSV record")?;
            row_count += 1;
        }

        Ok(Self { headers, row_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_counts_rows() {
        let csv = b"date,clicks,calls,emails,revenue\n2024-01-01,3,1,0,12.5\n2024-01-02,5,0,2,20\n";
        let preview = CsvPreview::scan(csv).unwrap();
        assert_eq!(preview.headers, vec!["date", "clicks", "calls", "emails", "revenue"]);
        assert_eq!(preview.row_count, 2);
    }

    #[test]
    fn test_unreadable_preview_still_selects() {
        let file = SelectedFile::from_bytes(
            "broken.csv".to_string(),
            PathBuf::from("broken.csv"),
            vec![0xff, 0xfe, b'\n', 0xff],
        );
        assert_eq!(file.bytes.len(), 4);
        assert_eq!(file.preview.row_count, 0);
    }

    #[test]
    fn test_size_label() {
        let file = SelectedFile::from_bytes("a.csv".into(), PathBuf::from("a.csv"), vec![b'a'; 2048]);
        assert_eq!(file.size_label(), "2.0 KB");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(SelectedFile::load(Path::new("/definitely/not/here.csv")).is_err());
    }
}
