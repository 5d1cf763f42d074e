//! HTTP access to the analysis service.

use reqwest::blocking::{multipart, Client};
use serde_json::Value;

use super::{AnalysisBackend, AnalyzeRequest, ApiError, DateRange};
use crate::config::BackendConfig;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Talks to `POST {base_url}/analyze`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    analyze_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        // Blocking clients default to a 30s timeout; only apply one when configured.
        let client = Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            analyze_url: config.analyze_url(),
        })
    }

    #[cfg(test)]
    fn with_client(client: Client, config: &BackendConfig) -> Self {
        Self { client, analyze_url: config.analyze_url() }
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }
}

impl AnalysisBackend for HttpBackend {
    fn analyze(&self, request: &AnalyzeRequest) -> Result<Value, ApiError> {
        let file_part = multipart::Part::bytes(request.file.bytes.clone())
            .file_name(request.file.name.clone())
            .mime_str("text/csv")?;

        let mut form = multipart::Form::new().part("file", file_part);
        for (name, value) in date_fields(request.date_range) {
            form = form.text(name, value);
        }

        tracing::debug!(url = %self.analyze_url, file = %request.file.name, "Posting analysis request");

        let response = self.client.post(&self.analyze_url).multipart(form).send()?;
        let status = response.status();
        let body = response.text()?;
        tracing::debug!(%status, bytes = body.len(), "Analysis response received");

        Ok(serde_json::from_str(&body)?)
    }
}

/// Optional form fields accompanying the upload.
fn date_fields(range: Option<DateRange>) -> Vec<(&'static str, String)> {
    match range {
        Some(range) => vec![
            ("start_date", range.start.format(DATE_FORMAT).to_string()),
            ("end_date", range.end.format(DATE_FORMAT).to_string()),
        ],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{interpret_response, AnalyzeOutcome};
    use crate::file::SelectedFile;
    use chrono::NaiveDate;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::path::PathBuf;
    use std::thread::{self, JoinHandle};

    /// Accepts one connection, answers with `body` and hands back the raw request.
    fn serve_once(content_type: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                content_type,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });

        (base_url, handle)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            let Some(header_end) = text.find("\r\n\r\n") else {
                continue;
            };
            let headers = text[..header_end].to_lowercase();
            let content_length = headers.lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|len| len.trim().parse::<usize>().ok());

            let complete = match content_length {
                Some(len) => buf.len() >= header_end + 4 + len,
                None => text.ends_with("0\r\n\r\n"),
            };
            if complete {
                break;
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    fn backend_for(base_url: String) -> HttpBackend {
        let config = BackendConfig { base_url, timeout_secs: Some(10) };
        let client = Client::builder()
            .no_proxy()
            .timeout(config.timeout())
            .build()
            .unwrap();
        HttpBackend::with_client(client, &config)
    }

    fn request(date_range: Option<DateRange>) -> AnalyzeRequest {
        AnalyzeRequest {
            file: SelectedFile::from_bytes(
                "leads.csv".to_string(),
                PathBuf::from("leads.csv"),
                b"date,clicks\n2024-02-01,3\n".to_vec(),
            ),
            date_range,
        }
    }

    #[test]
    fn test_analyze_posts_multipart_upload() {
        let (base_url, server) = serve_once(
            "application/json",
            r#"{"ok":true,"available_date_range":{"min":"2024-02-01","max":"2024-02-01"}}"#,
        );
        let backend = backend_for(base_url);

        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        };
        let body = backend.analyze(&request(Some(range))).unwrap();
        let captured = server.join().unwrap();
        let lowered = captured.to_lowercase();

        assert!(captured.starts_with("POST /analyze HTTP/1.1"), "{}", captured);
        assert!(lowered.contains("content-type: multipart/form-data; boundary="));
        assert!(captured.contains(r#"name="file"; filename="leads.csv""#), "{}", captured);
        assert!(lowered.contains("content-type: text/csv"));
        assert!(captured.contains("date,clicks\n2024-02-01,3\n"));
        assert!(captured.contains(r#"name="start_date""#));
        assert!(captured.contains("2024-02-01"));
        assert!(captured.contains(r#"name="end_date""#));
        assert!(captured.contains("2024-02-29"));

        assert!(matches!(interpret_response(body).unwrap(), AnalyzeOutcome::Success(_)));
    }

    #[test]
    fn test_analyze_omits_dates_without_range() {
        let (base_url, server) = serve_once("application/json", r#"{"ok":false,"error":"Empty file"}"#);
        let backend = backend_for(base_url);

        let body = backend.analyze(&request(None)).unwrap();
        let captured = server.join().unwrap();

        assert!(captured.contains(r#"name="file""#));
        assert!(!captured.contains("start_date"));
        assert!(!captured.contains("end_date"));
        assert_eq!(
            interpret_response(body).unwrap(),
            AnalyzeOutcome::Rejected("Empty file".to_string())
        );
    }

    #[test]
    fn test_analyze_rejects_non_json_body() {
        let (base_url, server) = serve_once("text/html", "<html><body>Bad Gateway</body></html>");
        let backend = backend_for(base_url);

        let err = backend.analyze(&request(None)).unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, ApiError::InvalidResponse(_)), "{:?}", err);
    }

    #[test]
    fn test_date_fields_present_only_with_range() {
        assert!(date_fields(None).is_empty());

        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        };
        assert_eq!(
            date_fields(Some(range)),
            vec![
                ("start_date", "2024-02-01".to_string()),
                ("end_date", "2024-03-09".to_string()),
            ]
        );
    }

    #[test]
    fn test_backend_uses_configured_url() {
        let config = BackendConfig {
            base_url: "http://127.0.0.1:9000".to_string(),
            timeout_secs: Some(5),
        };
        let backend = HttpBackend::new(&config).unwrap();
        assert_eq!(backend.analyze_url(), "http://127.0.0.1:9000/analyze");
    }
}
