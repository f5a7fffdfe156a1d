// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Web QR-code login flow tests against a mock passport server

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use biliapi::{ApiClient, QrLogin, QrLoginState};

async fn mount_generate(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/qrcode/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {
                "url": "https://passport.bilibili.com/h5-app/passport/login/scan?qrcode_key=abc",
                "qrcode_key": "abc"
            }
        })))
        .mount(server)
        .await;
}

fn login_against<'a>(client: &'a ApiClient, server: &MockServer) -> QrLogin<'a> {
    QrLogin::new(client).endpoints(
        format!("{}/qrcode/generate", server.uri()),
        format!("{}/qrcode/poll", server.uri()),
    )
}

#[tokio::test]
async fn full_login_flow_yields_credential() {
    let server = MockServer::start().await;
    mount_generate(&server).await;
    Mock::given(method("GET"))
        .and(path("/qrcode/poll"))
        .and(query_param("qrcode_key", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {
                "code": 0,
                "url": "https://passport.biligame.com/crossDomain?DedeUserID=42&SESSDATA=sess&bili_jct=tok",
                "refresh_token": "r",
                "timestamp": 1
            }
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new();
    let mut login = login_against(&client, &server);
    assert!(!login.has_qrcode());

    let qr_url = login.generate().await.unwrap().to_string();
    assert!(qr_url.contains("qrcode_key=abc"));
    assert!(login.has_qrcode());
    assert!(!login.is_done());

    let state = login.poll().await.unwrap();
    assert_eq!(state, QrLoginState::Done);
    assert!(login.is_done());

    let credential = login.credential().unwrap();
    assert_eq!(credential.sessdata.as_deref(), Some("sess"));
    assert_eq!(credential.bili_jct.as_deref(), Some("tok"));
    assert_eq!(credential.dedeuserid.as_deref(), Some("42"));
}

#[tokio::test]
async fn pending_scan_states_map_to_enum() {
    let server = MockServer::start().await;
    mount_generate(&server).await;
    Mock::given(method("GET"))
        .and(path("/qrcode/poll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {"code": 86101, "url": "", "refresh_token": "", "timestamp": 0}
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new();
    let mut login = login_against(&client, &server);
    login.generate().await.unwrap();

    assert_eq!(login.poll().await.unwrap(), QrLoginState::WaitingScan);
    assert!(!login.is_done());
}

#[tokio::test]
async fn expired_qrcode_maps_to_expired() {
    let server = MockServer::start().await;
    mount_generate(&server).await;
    Mock::given(method("GET"))
        .and(path("/qrcode/poll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {"code": 86038, "url": "", "refresh_token": "", "timestamp": 0}
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new();
    let mut login = login_against(&client, &server);
    login.generate().await.unwrap();

    assert_eq!(login.poll().await.unwrap(), QrLoginState::Expired);
    assert!(login.credential().is_none());
}

#[tokio::test]
async fn scanned_but_unconfirmed_maps_to_waiting_confirm() {
    let server = MockServer::start().await;
    mount_generate(&server).await;
    Mock::given(method("GET"))
        .and(path("/qrcode/poll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {"code": 86090, "url": "", "refresh_token": "", "timestamp": 0}
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new();
    let mut login = login_against(&client, &server);
    login.generate().await.unwrap();

    assert_eq!(login.poll().await.unwrap(), QrLoginState::WaitingConfirm);
}
