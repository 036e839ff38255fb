use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use trace_client::client::BackendClient;
use trace_client::error::ClientError;
use trace_core::models::patient::{NewPatient, Treatment};
use trace_core::models::scoring::ImageSubmission;

/// Serve exactly one HTTP response on a loopback port. The join handle
/// yields the raw request (head + body) the client sent.
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            head.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();

        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        head + &String::from_utf8(body).unwrap()
    });

    (base_url, handle)
}

#[test]
fn lists_patients_from_envelope() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"success": true, "data": [{"id": "p1", "fName": "Ada", "lName": "Lovelace"}]}"#,
    );
    let patients = BackendClient::new(base).list_patients().unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].last_name, "Lovelace");

    let request = server.join().unwrap();
    assert!(request.starts_with("GET /patient HTTP/1.1"));
}

#[test]
fn find_patient_encodes_name_segments() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"success": true, "data": {"id": "p1", "fName": "Mary Ann", "lName": "Smith"}}"#,
    );
    let patient = BackendClient::new(base).find_patient("Mary Ann", "Smith").unwrap();
    assert_eq!(patient.first_name, "Mary Ann");

    let request = server.join().unwrap();
    assert!(request.starts_with("GET /patient/name/Mary%20Ann/Smith HTTP/1.1"));
}

#[test]
fn unsuccessful_envelope_is_rejected() {
    let (base, server) = serve_once("200 OK", r#"{"success": false, "error": "no such patient"}"#);
    let err = BackendClient::new(base).get_patient("missing").unwrap_err();
    assert_eq!(err.to_string(), "backend rejected request: no such patient");
    server.join().unwrap();
}

#[test]
fn error_status_surfaces_backend_message() {
    let (base, server) = serve_once("500 Internal Server Error", r#"{"message": "database down"}"#);
    let err = BackendClient::new(base).recent_assessments().unwrap_err();
    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    server.join().unwrap();
}

#[test]
fn error_status_without_body_uses_generic_message() {
    let (base, server) = serve_once("404 Not Found", "");
    let err = BackendClient::new(base).list_assessments("p1").unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 404, ref message } if message == "API error: 404"));
    server.join().unwrap();
}

#[test]
fn submit_images_posts_camel_case_json() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"severityScore": 2.0, "meanTremor": 0.4, "dtwDistance": 97.5}"#,
    );
    let submission = ImageSubmission {
        trace_image: "data:image/png;base64,AAAA".to_string(),
        template_image: "data:image/png;base64,BBBB".to_string(),
        age: 68,
        patient_name: "Ada Lovelace".to_string(),
    };
    let result = BackendClient::new(base).submit_images(&submission).unwrap();
    assert_eq!(result.dtw_distance, 97.5);

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /submit-images HTTP/1.1"));
    assert!(request.contains(r#""traceImage":"data:image/png;base64,AAAA""#));
    assert!(request.contains(r#""patientName":"Ada Lovelace""#));
    assert!(request.contains(r#""age":68"#));
}

#[test]
fn add_note_sends_query_parameters() {
    let (base, server) = serve_once("200 OK", r#"{"success": true}"#);
    BackendClient::new(base)
        .add_note("p1", "tremor worse in the morning")
        .unwrap();

    let request = server.join().unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("POST /add_note?id=p1&note=tremor"));
    assert!(request_line.ends_with(" HTTP/1.1"));
}

#[test]
fn add_treatment_sends_iso_date() {
    let (base, server) = serve_once("200 OK", r#"{"success": true, "data": {}}"#);
    let treatment = Treatment {
        date: jiff::civil::date(2024, 3, 1),
        t_desc: "Levodopa".to_string(),
        provider: "Dr. Johnson".to_string(),
    };
    BackendClient::new(base).add_treatment("p1", &treatment).unwrap();

    let request = server.join().unwrap();
    assert!(request.contains("date=2024-03-01"));
    assert!(request.contains("t_desc=Levodopa"));
}

#[test]
fn add_patient_validates_before_sending() {
    let client = BackendClient::new("http://127.0.0.1:9");
    let patient = NewPatient::new("", "Lovelace", jiff::civil::date(1950, 1, 1), "female");
    let err = client.add_patient(&patient).unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(ref m) if m == "fName is required"));
}

#[test]
fn empty_note_is_rejected_locally() {
    let client = BackendClient::new("http://127.0.0.1:9");
    assert!(matches!(
        client.add_note("p1", "  "),
        Err(ClientError::InvalidRequest(_))
    ));
}

#[test]
fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = BackendClient::new(base).list_patients().unwrap_err();
    assert!(matches!(err, ClientError::Transport { .. }));
}
