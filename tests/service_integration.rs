use keypoint_highlight::service::{Action, HttpSummarizer, ServiceOutcome, ServiceRequest, Summarizer};
use keypoint_highlight::{DomTree, ElementNode, HighlightError, HighlightOptions, PageSession, ServiceOptions};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A captured request: request line and JSON body
struct Captured {
    request_line: String,
    body: serde_json::Value,
}

/// Serve one canned response per entry, then stop
fn stub_service(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<Captured>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let mut captured = Vec::new();
        for (status, body) in responses {
            let (stream, _) = listener.accept().unwrap();
            captured.push(answer(stream, status, body));
        }
        captured
    });

    (base_url, handle)
}

fn answer(mut stream: TcpStream, status: u16, body: &str) -> Captured {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut content_length = 0;
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).unwrap();
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap();
            }
        }
    }

    let mut raw = vec![0; content_length];
    reader.read_exact(&mut raw).unwrap();

    let reason = if status == 200 { "OK" } else { "Error" };
    write!(
        stream,
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    )
    .unwrap();
    stream.flush().unwrap();

    Captured {
        request_line: request_line.trim_end().to_string(),
        body: if raw.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&raw).unwrap()
        },
    }
}

fn options(base_url: &str) -> ServiceOptions {
    ServiceOptions::new().base_url(base_url).timeout(Duration::from_secs(5))
}

fn unused_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}

#[test]
fn test_keypoints_request() {
    let (base_url, handle) = stub_service(vec![(200, r#"{"keypoints": ["quick brown fox", "lazy dog"]}"#)]);
    let client = HttpSummarizer::new(&options(&base_url).language("en"));

    let request = ServiceRequest::new("The  quick brown fox.\n").with_language(Some("en".to_string()));
    let keypoints = client.keypoints(&request).unwrap();

    assert_eq!(keypoints, vec!["quick brown fox", "lazy dog"]);

    let captured = handle.join().unwrap();
    assert_eq!(captured[0].request_line, "POST /keypoints HTTP/1.1");
    assert_eq!(captured[0].body, serde_json::json!({"text": "The quick brown fox.", "language": "en"}));
}

#[test]
fn test_each_action_hits_its_endpoint() {
    let (base_url, handle) = stub_service(vec![
        (200, r#"{"summary": "Short."}"#),
        (200, r#"{"bulletPoints": ["one", "two"]}"#),
    ]);
    let client = HttpSummarizer::new(&options(&base_url));
    let request = ServiceRequest::new("Some text.");

    assert_eq!(
        client.request(Action::Summarize, &request).unwrap(),
        ServiceOutcome::Summary("Short.".to_string())
    );
    assert_eq!(
        client.request(Action::Bullet, &request).unwrap(),
        ServiceOutcome::BulletPoints(vec!["one".to_string(), "two".to_string()])
    );

    let captured = handle.join().unwrap();
    assert_eq!(captured[0].request_line, "POST /summarize HTTP/1.1");
    assert_eq!(captured[1].request_line, "POST /bullet HTTP/1.1");
}

#[test]
fn test_rejected_request_carries_service_error() {
    let (base_url, handle) = stub_service(vec![(400, r#"{"error": "Missing 'text' field"}"#)]);
    let client = HttpSummarizer::new(&options(&base_url));

    let err = client.request(Action::Summarize, &ServiceRequest::new("x")).unwrap_err();

    match err {
        HighlightError::ServiceRejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Missing 'text' field");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    handle.join().unwrap();
}

#[test]
fn test_wrong_response_shape() {
    let (base_url, handle) = stub_service(vec![(200, r#"{"summary": "not keypoints"}"#)]);
    let client = HttpSummarizer::new(&options(&base_url));

    let err = client.keypoints(&ServiceRequest::new("x")).unwrap_err();

    assert!(matches!(err, HighlightError::UnexpectedResponse(_)));
    handle.join().unwrap();
}

#[test]
fn test_health_check() {
    let (base_url, handle) = stub_service(vec![(200, r#"{"status": "ok", "model": "gemini-1.5-flash"}"#)]);
    let client = HttpSummarizer::new(&options(&base_url));

    let health = client.health().unwrap();

    assert!(health.is_ok());
    assert_eq!(health.model.as_deref(), Some("gemini-1.5-flash"));

    let captured = handle.join().unwrap();
    assert_eq!(captured[0].request_line, "GET /health HTTP/1.1");
    assert!(captured[0].body.is_null());
}

#[test]
fn test_health_check_unreachable() {
    let client = HttpSummarizer::new(&options(&unused_port_url()));

    assert!(matches!(client.health().unwrap_err(), HighlightError::ServiceFailed(_)));
}

#[test]
fn test_unreachable_service() {
    let client = HttpSummarizer::new(&options(&unused_port_url()));

    let err = client.request(Action::Keypoints, &ServiceRequest::new("x")).unwrap_err();

    assert!(matches!(err, HighlightError::ServiceFailed(_)));
}

#[test]
fn test_session_fetches_and_highlights() {
    let (base_url, handle) = stub_service(vec![(200, r#"{"keypoints": ["brown fox", "not on the page"]}"#)]);
    let mut session = PageSession::new(options(&base_url), HighlightOptions::default());
    session.load_tree(DomTree::new(
        ElementNode::new("body").with_child(ElementNode::new("p").with_text("The quick brown fox jumps.")),
    ));

    let (keypoints, report) = session.fetch_and_highlight().unwrap();

    assert_eq!(keypoints.len(), 2);
    assert_eq!(report.applied_count, 1);
    assert_eq!(report.skipped_keypoints().collect::<Vec<_>>(), vec!["not on the page"]);
    assert_eq!(
        session.to_html(),
        "<body><p>The quick <span class=\"highlight\">brown fox</span> jumps.</p></body>"
    );

    let captured = handle.join().unwrap();
    assert_eq!(captured[0].body["text"], "The quick brown fox jumps.");
}

#[test]
fn test_simulated_fallback_when_unreachable() {
    let options = options(&unused_port_url()).simulate_on_failure(true);
    let mut session = PageSession::new(options, HighlightOptions::default());
    session.load_tree(DomTree::new(
        ElementNode::new("body").with_child(ElementNode::new("p").with_text("First point. Second point.")),
    ));

    let (keypoints, report) = session.fetch_and_highlight().unwrap();

    assert_eq!(keypoints, vec!["First point.", "Second point."]);
    assert_eq!(report.applied_count, 2);
}
