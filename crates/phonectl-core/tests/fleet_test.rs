#![allow(clippy::unwrap_used)]
// Fleet orchestration scenarios against mock devices.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use secrecy::SecretString;
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use phonectl_core::{
    Action, Address, CommentedResult, Connector, Credentials, FleetOperation, FleetReport,
    TransportConfig, drain,
};

// ── Helpers ─────────────────────────────────────────────────────────

/// A device that accepts the credentials and the logout.
async fn ok_device() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-123" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    server
}

/// A device that rejects every login with 403.
async fn denied_device() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Login"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Logout"))
        .respond_with(ResponseTemplate::new(401).set_body_string("no token"))
        .mount(&server)
        .await;
    server
}

fn connector() -> Connector {
    Connector::new(
        Credentials::new("admin", SecretString::from("pw".to_owned())),
        TransportConfig::default(),
    )
}

/// A no-op per-device action (login/logout probe).
fn probe() -> FleetOperation {
    FleetOperation::new(Action::Login, |session, _| Box::pin(async move { session }))
}

/// Run the fleet and collect both the live stream and the final report.
async fn run_fleet(
    addresses: Vec<Address>,
    operation: FleetOperation,
) -> (FleetReport, Vec<CommentedResult>) {
    let mut live = Vec::new();
    let (tx, rx) = mpsc::channel(1);
    let connector = connector();
    let (report, run) = tokio::join!(
        drain(rx, |result: &CommentedResult| live.push(result.clone())),
        connector.run(addresses, operation, tx),
    );
    run.unwrap();
    (report, live)
}

// ── Scenarios ───────────────────────────────────────────────────────

#[tokio::test]
async fn summary_has_one_sorted_group_per_address() {
    let servers = (ok_device().await, ok_device().await, ok_device().await);
    let addresses = vec![
        Address::new(servers.0.uri()),
        Address::new(servers.1.uri()),
        Address::new(servers.2.uri()),
    ];

    let (report, _) = run_fleet(addresses.clone(), probe()).await;

    assert_eq!(report.group_count(), addresses.len());
    let order: Vec<String> = report.addresses().map(ToString::to_string).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
}

#[tokio::test]
async fn login_failure_skips_action_but_reports_logout() {
    let server = denied_device().await;
    let address = Address::new(server.uri());

    let invoked = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&invoked);
    let operation = FleetOperation::new(Action::DownloadPhoneBook, move |session, _| {
        flag.store(true, Ordering::SeqCst);
        Box::pin(async move { session })
    });

    let (report, _) = run_fleet(vec![address.clone()], operation).await;

    assert!(!invoked.load(Ordering::SeqCst), "action ran despite login failure");
    let comments = report.comments(&address).unwrap();
    assert_eq!(comments.len(), 2);
    assert!(comments[0].starts_with("Login failed:"), "got: {}", comments[0]);
    assert!(comments[0].contains("403"));
    assert!(comments[1].starts_with("Logout failed:"), "got: {}", comments[1]);
}

#[tokio::test]
async fn operation_failure_still_logs_out() {
    let server = ok_device().await;
    Mock::given(method("GET"))
        .and(path("/Parameters"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let address = Address::new(server.uri());

    let operation = FleetOperation::new(Action::DownloadParameters, |session, reporter| {
        Box::pin(async move {
            let outcome = session.download_parameters().await.map(|_| ());
            reporter.report(Action::DownloadParameters, outcome).await;
            session
        })
    });

    let (report, _) = run_fleet(vec![address.clone()], operation).await;

    let comments = report.comments(&address).unwrap();
    assert_eq!(comments[0], "Login successful");
    assert!(comments[1].starts_with("Parameter download failed:"), "got: {}", comments[1]);
    assert_eq!(comments[2], "Logout successful");
}

#[tokio::test]
async fn reset_class_suppresses_logout_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-123" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/FactoryReset"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    // The device reboots after a reset; the trailing logout meets a dead session.
    Mock::given(method("POST"))
        .and(path("/Logout"))
        .respond_with(ResponseTemplate::new(401).set_body_string("session gone"))
        .mount(&server)
        .await;
    let address = Address::new(server.uri());

    let operation = FleetOperation::new(Action::Reset, |session, reporter| {
        Box::pin(async move {
            let outcome = session.factory_reset().await;
            reporter.report(Action::Reset, outcome).await;
            session
        })
    })
    .suppress_logout();

    let (report, _) = run_fleet(vec![address.clone()], operation).await;

    let comments = report.comments(&address).unwrap();
    assert_eq!(comments, ["Login successful", "Factory reset successful"]);
}

#[tokio::test]
async fn mixed_fleet_report_scenario() {
    // A logs in and its operation succeeds; B is rejected with 403.
    let server_a = ok_device().await;
    let server_b = denied_device().await;
    let addr_a = Address::new(server_a.uri());
    let addr_b = Address::new(server_b.uri());

    let operation = FleetOperation::new(Action::DownloadPhoneBook, |session, reporter| {
        Box::pin(async move {
            reporter.report(Action::DownloadPhoneBook, Ok(())).await;
            session
        })
    });

    let (report, live) =
        run_fleet(vec![addr_a.clone(), addr_b.clone()], operation).await;

    assert_eq!(report.group_count(), 2);

    let comments_a = report.comments(&addr_a).unwrap();
    assert_eq!(
        comments_a,
        ["Login successful", "Phone book download successful", "Logout successful"]
    );

    let comments_b = report.comments(&addr_b).unwrap();
    assert_eq!(comments_b.len(), 2);
    assert!(comments_b[0].starts_with("Login failed:"));
    assert!(comments_b[1].starts_with("Logout failed:"));

    // Live arrival order is deterministic within one address's own steps.
    let live_a: Vec<&str> = live
        .iter()
        .filter(|r| r.address == addr_a)
        .map(|r| r.comment.as_str())
        .collect();
    assert_eq!(
        live_a,
        ["Login successful", "Phone book download successful", "Logout successful"]
    );
}

#[tokio::test]
async fn unreachable_device_does_not_affect_the_rest() {
    let good = ok_device().await;
    let good_addr = Address::new(good.uri());
    // Port 1 refuses connections.
    let dead_addr = Address::new("http://127.0.0.1:1");

    let (report, _) = run_fleet(vec![good_addr.clone(), dead_addr.clone()], probe()).await;

    assert_eq!(report.group_count(), 2);
    assert_eq!(
        report.comments(&good_addr).unwrap(),
        ["Login successful", "Logout successful"]
    );
    let dead_comments = report.comments(&dead_addr).unwrap();
    assert!(dead_comments[0].starts_with("Login failed:"));
}

#[tokio::test]
async fn duplicate_addresses_share_one_group() {
    // The expander passes duplicates through; the report groups by address,
    // so both runs land under the same key.
    let server = ok_device().await;
    let address = Address::new(server.uri());

    let (report, _) = run_fleet(vec![address.clone(), address.clone()], probe()).await;

    assert_eq!(report.group_count(), 1);
    assert_eq!(report.comments(&address).unwrap().len(), 4);
}
