// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::test_helper::vehicle::{get_location, get_status, get_vehicle_id};
use location::http::HttpLocationFetcher;
use location::{FetchError, GENERIC_FETCH_ERROR, LocationFetcher};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

struct LocationServer {
    socket: TcpListener,
}

impl LocationServer {
    pub async fn new(addr: &str) -> LocationServer {
        let listener = TcpListener::bind(addr).await;
        LocationServer {
            socket: listener.expect("Failed to bind location test server on localhost"),
        }
    }

    /// Accepts one client, answers it with a canned response and returns
    /// the received request head.
    pub async fn respond_once(&mut self, status: &str, body: &str) -> String {
        let (mut client, _) = match self.socket.accept().await {
            Ok(accepted) => accepted,
            Err(e) => panic!("Client connection failed. Error: {:?}", e),
        };
        let mut buf = vec![0u8; 2048];
        let read = client
            .read(&mut buf)
            .await
            .expect("Failed to read the request head");
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        client
            .write_all(response.as_bytes())
            .await
            .expect("Failed to send canned response");
        String::from_utf8_lossy(&buf[..read]).to_string()
    }
}

const REPORT_BODY: &str = r#"{
    "bus": {
        "busNumber": "TN01AB1234",
        "driverName": "Kumar",
        "lastUpdated": "2026-08-23T10:15:30.000Z",
        "isStale": false,
        "location": { "latitude": 13.0827, "longitude": 80.2707 }
    }
}"#;

#[tokio::test]
#[test_log::test]
pub async fn fetch_success_returns_report() {
    let mut server = LocationServer::new("127.0.0.1:38700").await;
    let fetcher = HttpLocationFetcher::new("http://127.0.0.1:38700")
        .expect("Failed to create the fetcher");
    let vehicle_id = get_vehicle_id();
    let (request, result) = tokio::join!(
        server.respond_once("200 OK", REPORT_BODY),
        fetcher.fetch(&vehicle_id)
    );
    assert!(request.starts_with("GET /TN01AB1234 "));
    let report = result.unwrap_or_else(|e| panic!("Fetch failed. Reason: {e:?}"));
    assert_eq!(report.status, get_status());
    assert_eq!(report.location, get_location());
}

#[tokio::test]
#[test_log::test]
pub async fn remote_error_message_surfaced_verbatim() {
    let mut server = LocationServer::new("127.0.0.1:38701").await;
    let fetcher = HttpLocationFetcher::new("http://127.0.0.1:38701")
        .expect("Failed to create the fetcher");
    let vehicle_id = get_vehicle_id();
    let (_, result) = tokio::join!(
        server.respond_once("404 Not Found", r#"{"error":"Bus not found"}"#),
        fetcher.fetch(&vehicle_id)
    );
    let error = result.unwrap_err();
    assert!(matches!(error, FetchError::Remote(_)));
    assert_eq!(error.to_string(), "Bus not found");
}

#[tokio::test]
pub async fn non_success_without_message_uses_fallback() {
    let mut server = LocationServer::new("127.0.0.1:38702").await;
    let fetcher = HttpLocationFetcher::new("http://127.0.0.1:38702")
        .expect("Failed to create the fetcher");
    let vehicle_id = get_vehicle_id();
    let (_, result) = tokio::join!(
        server.respond_once("500 Internal Server Error", "upstream exploded"),
        fetcher.fetch(&vehicle_id)
    );
    let error = result.unwrap_err();
    assert!(matches!(error, FetchError::Remote(_)));
    assert_eq!(error.to_string(), GENERIC_FETCH_ERROR);
}

#[tokio::test]
pub async fn malformed_body_is_a_decode_error() {
    let mut server = LocationServer::new("127.0.0.1:38703").await;
    let fetcher = HttpLocationFetcher::new("http://127.0.0.1:38703")
        .expect("Failed to create the fetcher");
    let vehicle_id = get_vehicle_id();
    let (_, result) = tokio::join!(
        server.respond_once("200 OK", r#"{"bus": {"busNumber": "TN01AB1234"}}"#),
        fetcher.fetch(&vehicle_id)
    );
    let error = result.unwrap_err();
    assert!(matches!(error, FetchError::Decode(_)));
    assert_eq!(error.to_string(), GENERIC_FETCH_ERROR);
}

#[tokio::test]
pub async fn out_of_range_coordinates_are_rejected() {
    let body = r#"{
        "bus": {
            "busNumber": "TN01AB1234",
            "driverName": "Kumar",
            "lastUpdated": "2026-08-23T10:15:30.000Z",
            "isStale": false,
            "location": { "latitude": 113.0, "longitude": 80.2707 }
        }
    }"#;
    let mut server = LocationServer::new("127.0.0.1:38704").await;
    let fetcher = HttpLocationFetcher::new("http://127.0.0.1:38704")
        .expect("Failed to create the fetcher");
    let vehicle_id = get_vehicle_id();
    let (_, result) = tokio::join!(
        server.respond_once("200 OK", body),
        fetcher.fetch(&vehicle_id)
    );
    assert!(matches!(result.unwrap_err(), FetchError::Decode(_)));
}

#[tokio::test]
pub async fn unreachable_service_is_a_transport_error() {
    // Nothing listens on this port.
    let fetcher = HttpLocationFetcher::new("http://127.0.0.1:38799")
        .expect("Failed to create the fetcher");
    let error = fetcher.fetch(&get_vehicle_id()).await.unwrap_err();
    assert!(matches!(error, FetchError::Transport(_)));
    assert_eq!(error.to_string(), GENERIC_FETCH_ERROR);
}
