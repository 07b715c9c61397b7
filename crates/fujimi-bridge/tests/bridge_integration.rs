//! End-to-end tests for ScoreBridge against a mock Open-Meteo server.

use fujimi_bridge::{InboundMessage, OutboundMessage, ScoreBridge};
use fujimi_forecast::{OpenMeteoClient, Region, TimeWindow};
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Forecast body echoing the requested point with constant conditions.
fn forecast_body(latitude: f64, longitude: f64, cloud_cover_low: f64) -> serde_json::Value {
    let hours = 6;
    serde_json::json!({
        "latitude": latitude,
        "longitude": longitude,
        "hourly": {
            "time": (0..hours).map(|h| format!("2026-08-27T{:02}:00", 6 + h)).collect::<Vec<_>>(),
            "relative_humidity_2m": vec![40.0; hours],
            "precipitation": vec![0.0; hours],
            "cloud_cover_low": vec![cloud_cover_low; hours],
            "weather_code": vec![0; hours]
        }
    })
}

/// Mount one mock per observation point of every region, all with the same
/// cloud cover.
async fn mount_all_points(server: &MockServer, cloud_cover_low: f64) {
    for region in Region::ALL {
        for point in region.points() {
            Mock::given(method("GET"))
                .and(path("/v1/forecast"))
                .and(query_param("latitude", point.latitude.to_string()))
                .and(query_param("longitude", point.longitude.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(
                    point.latitude,
                    point.longitude,
                    cloud_cover_low,
                )))
                .mount(server)
                .await;
        }
    }
}

fn bridge(
    server: &MockServer,
) -> (ScoreBridge<OpenMeteoClient>, mpsc::Receiver<OutboundMessage>) {
    let client = OpenMeteoClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let (tx, rx) = mpsc::channel(8);
    (ScoreBridge::new(client, tx), rx)
}

#[tokio::test]
async fn test_update_single_reports_one_cell() {
    let server = MockServer::start().await;
    // 0% low cloud, dry, clear: every hour scores 10
    mount_all_points(&server, 0.0).await;

    let (bridge, mut rx) = bridge(&server);
    bridge
        .handle(InboundMessage::UpdateSingle {
            region: Region::North,
            time: TimeWindow::Morning,
        })
        .await;

    let message = rx.recv().await.unwrap();
    assert_eq!(
        message,
        OutboundMessage::NewScore {
            region: Region::North,
            time: TimeWindow::Morning,
            score: 10,
        }
    );
    assert!(rx.try_recv().is_err(), "only one report expected");
}

#[tokio::test]
async fn test_update_all_reports_all_cells_once() {
    let server = MockServer::start().await;
    // 40% low cloud: every hour scores 6 in the north; the south dampens
    // 6.0 * 0.75 = 4.5 which rounds to 5 (hence a 5 in the south cells)
    mount_all_points(&server, 40.0).await;

    let (bridge, mut rx) = bridge(&server);
    bridge.handle(InboundMessage::UpdateAll).await;

    let message = rx.recv().await.unwrap();
    assert_eq!(
        message,
        OutboundMessage::NewScores {
            north_morning: 6,
            north_afternoon: 6,
            south_morning: 5,
            south_afternoon: 5,
        }
    );
    assert!(rx.try_recv().is_err(), "combined report must be emitted once");
}

#[tokio::test]
async fn test_update_single_with_all_points_down_withholds_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (bridge, mut rx) = bridge(&server);
    bridge
        .handle(InboundMessage::UpdateSingle {
            region: Region::South,
            time: TimeWindow::Afternoon,
        })
        .await;

    assert!(rx.try_recv().is_err(), "no report without data");
}

#[tokio::test]
async fn test_update_all_tolerates_a_failing_point() {
    let server = MockServer::start().await;
    mount_all_points(&server, 0.0).await;

    // Knock out the north approach point; its mount above is shadowed by
    // this later, more specific 500 response
    let approach = &Region::North.points()[2];
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", approach.latitude.to_string()))
        .and(query_param("longitude", approach.longitude.to_string()))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&server)
        .await;

    let (bridge, mut rx) = bridge(&server);
    bridge.handle(InboundMessage::UpdateAll).await;

    // The remaining two north points still carry the cell to a 10
    let message = rx.recv().await.unwrap();
    assert_eq!(
        message,
        OutboundMessage::NewScores {
            north_morning: 10,
            north_afternoon: 10,
            south_morning: 8,
            south_afternoon: 8,
        }
    );
}

#[tokio::test]
async fn test_ready_handshake() {
    let server = MockServer::start().await;
    let (bridge, mut rx) = bridge(&server);

    bridge.announce_ready().await;
    assert_eq!(rx.recv().await.unwrap(), OutboundMessage::Ready);

    // Inbound ready is acknowledged in logs only
    bridge.handle(InboundMessage::Ready).await;
    assert!(rx.try_recv().is_err());
}
