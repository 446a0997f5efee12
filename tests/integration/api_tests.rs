//! API integration tests
//!
//! Require a running server with a seeded admin account.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@fleettrack.local",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "fleettrack-server");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@fleettrack.local",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_list_devices_requires_auth() {
    let client = Client::new();

    let response = client
        .get(format!("{}/devices", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_device_lifecycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Create a device
    let response = client
        .post(format!("{}/devices", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "brand": "Teltonika",
            "model": "FMB920",
            "imei": "356307042441013",
            "ownership": "LEASING"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let device: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(device["status"], "AVAILABLE");
    let device_id = device["id"].as_str().expect("No device id").to_string();

    // Duplicate IMEI is rejected
    let response = client
        .post(format!("{}/devices", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "brand": "Teltonika",
            "model": "FMB920",
            "imei": "356307042441013"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    // Delete it again
    let response = client
        .delete(format!("{}/devices/{}", BASE_URL, device_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_assignment_rejects_unavailable_device() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Create prerequisites
    let device: Value = client
        .post(format!("{}/devices", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "brand": "Queclink",
            "model": "GV300",
            "imei": "356307042441099"
        }))
        .send()
        .await
        .expect("device create failed")
        .json()
        .await
        .expect("parse failed");

    let vehicle: Value = client
        .post(format!("{}/vehicles", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "make": "Toyota",
            "model": "Hilux",
            "plate_number": "DXB-A-99887"
        }))
        .send()
        .await
        .expect("vehicle create failed")
        .json()
        .await
        .expect("parse failed");

    let client_row: Value = client
        .post(format!("{}/clients", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "name": "Gulf Logistics LLC" }))
        .send()
        .await
        .expect("client create failed")
        .json()
        .await
        .expect("parse failed");

    let assignment_body = json!({
        "job_type": "NEW_INSTALLATION",
        "device_id": device["id"],
        "vehicle_id": vehicle["id"],
        "client_id": client_row["id"],
        "platform": "Wialon"
    });

    // First installation succeeds
    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .bearer_auth(&token)
        .json(&assignment_body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    // Second installation of the same device conflicts
    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .bearer_auth(&token)
        .json(&assignment_body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_assignment_creates_renewal_and_releases_leased_device() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let device: Value = client
        .post(format!("{}/devices", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "brand": "Teltonika",
            "model": "FMC130",
            "imei": "356307042441155",
            "ownership": "LEASING"
        }))
        .send()
        .await
        .expect("device create failed")
        .json()
        .await
        .expect("parse failed");

    let vehicle: Value = client
        .post(format!("{}/vehicles", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "make": "Nissan",
            "model": "Patrol",
            "plate_number": "DXB-B-44556"
        }))
        .send()
        .await
        .expect("vehicle create failed")
        .json()
        .await
        .expect("parse failed");

    let fleet_client: Value = client
        .post(format!("{}/clients", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "name": "Desert Freight FZE" }))
        .send()
        .await
        .expect("client create failed")
        .json()
        .await
        .expect("parse failed");

    // Create the installation with an explicit expiry
    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "job_type": "NEW_INSTALLATION",
            "device_id": device["id"],
            "vehicle_id": vehicle["id"],
            "client_id": fleet_client["id"],
            "platform": "Navixy",
            "subscription_expiry": "2030-05-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    // The create response carries the related records, not just ids
    let assignment: Value = response.json().await.expect("Failed to parse response");
    let assignment_id = assignment["id"].as_str().expect("No assignment id").to_string();
    assert_eq!(assignment["device"]["imei"], "356307042441155");
    assert_eq!(assignment["client"]["name"], "Desert Freight FZE");

    // Exactly one renewal row mirrors the assignment
    let renewals: Value = client
        .get(format!(
            "{}/renewals?client_id={}",
            BASE_URL,
            fleet_client["id"].as_str().expect("No client id")
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("renewal list failed")
        .json()
        .await
        .expect("parse failed");

    let renewals = renewals.as_array().expect("Expected renewal array");
    assert_eq!(renewals.len(), 1);
    assert_eq!(renewals[0]["assignment_id"], assignment["id"]);
    assert_eq!(renewals[0]["platform"], "Navixy");
    assert_eq!(renewals[0]["status"], "UPCOMING");
    assert!(renewals[0]["subscription_expiry"]
        .as_str()
        .expect("No expiry")
        .starts_with("2030-05-01"));

    // Deleting the assignment returns the leased device to the pool
    let response = client
        .delete(format!("{}/assignments/{}", BASE_URL, assignment_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    let device: Value = client
        .get(format!(
            "{}/devices/{}",
            BASE_URL,
            device["id"].as_str().expect("No device id")
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("device get failed")
        .json()
        .await
        .expect("parse failed");

    assert_eq!(device["status"], "AVAILABLE");
    assert!(device["client_id"].is_null());

    // A second delete of the same assignment finds nothing
    let response = client
        .delete(format!("{}/assignments/{}", BASE_URL, assignment_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_overdue_renewal_swept_to_expired() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let device: Value = client
        .post(format!("{}/devices", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "brand": "Queclink",
            "model": "GV500",
            "imei": "356307042441200"
        }))
        .send()
        .await
        .expect("device create failed")
        .json()
        .await
        .expect("parse failed");

    let vehicle: Value = client
        .post(format!("{}/vehicles", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "make": "Mitsubishi",
            "model": "Canter",
            "plate_number": "SHJ-C-10203"
        }))
        .send()
        .await
        .expect("vehicle create failed")
        .json()
        .await
        .expect("parse failed");

    let fleet_client: Value = client
        .post(format!("{}/clients", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "name": "Coastal Couriers LLC" }))
        .send()
        .await
        .expect("client create failed")
        .json()
        .await
        .expect("parse failed");

    // Install with a subscription that has already lapsed
    let response = client
        .post(format!("{}/assignments", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "job_type": "NEW_INSTALLATION",
            "device_id": device["id"],
            "vehicle_id": vehicle["id"],
            "client_id": fleet_client["id"],
            "platform": "Wialon",
            "subscription_expiry": "2020-01-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    // Listing sweeps the overdue row into EXPIRED
    let renewals: Value = client
        .get(format!(
            "{}/renewals?client_id={}",
            BASE_URL,
            fleet_client["id"].as_str().expect("No client id")
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("renewal list failed")
        .json()
        .await
        .expect("parse failed");

    let renewals = renewals.as_array().expect("Expected renewal array");
    assert_eq!(renewals.len(), 1);
    assert_eq!(renewals[0]["status"], "EXPIRED");
}

#[tokio::test]
#[ignore]
async fn test_dashboard_stats() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/analytics/dashboard", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_devices"].is_number());
    assert!(body["total_clients"].is_number());
}
