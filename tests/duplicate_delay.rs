//! Consecutive duplicate throttling observed from the client side.

use std::time::{Duration, Instant};

use reqwest::StatusCode;

mod common;

async fn post(client: &reqwest::Client, url: String, body: &'static str) -> StatusCode {
    client
        .post(url)
        .header("Content-Type", "application/json")
        .body(body)
        .send()
        .await
        .expect("proxy unreachable")
        .status()
}

#[tokio::test]
async fn consecutive_duplicates_are_delayed_each_time() {
    let backend = common::start_mock_backend(201, "{}").await;
    let mut config = common::config_for(format!("http://{backend}"));
    config.throttle.request_delay_secs = 1;
    let (proxy, shutdown) = common::start_proxy(config).await;
    let client = common::client();
    let url = format!("http://{proxy}/posts");

    let start = Instant::now();
    assert_eq!(post(&client, url.clone(), r#"{"body": "good_message"}"#).await, StatusCode::CREATED);
    assert!(start.elapsed() < Duration::from_secs(1), "first request is not delayed");

    assert_eq!(post(&client, url.clone(), r#"{"body": "good_message"}"#).await, StatusCode::CREATED);
    assert_eq!(post(&client, url.clone(), r#"{"body": "good_message"}"#).await, StatusCode::CREATED);
    assert!(
        start.elapsed() >= Duration::from_secs(2),
        "second and third requests are each delayed, took {:?}",
        start.elapsed()
    );

    shutdown.trigger();
}

#[tokio::test]
async fn intervening_request_resets_the_chain() {
    let backend = common::start_mock_backend(201, "{}").await;
    let mut config = common::config_for(format!("http://{backend}"));
    config.throttle.request_delay_secs = 2;
    let (proxy, shutdown) = common::start_proxy(config).await;
    let client = common::client();

    let start = Instant::now();
    post(&client, format!("http://{proxy}/posts"), r#"{"body": "a"}"#).await;
    post(&client, format!("http://{proxy}/posts"), r#"{"body": "b"}"#).await;
    post(&client, format!("http://{proxy}/posts"), r#"{"body": "a"}"#).await;
    post(&client, format!("http://{proxy}/posts/1"), r#"{"body": "a"}"#).await;
    assert!(
        start.elapsed() < Duration::from_secs(2),
        "no request should be delayed, took {:?}",
        start.elapsed()
    );

    shutdown.trigger();
}

#[tokio::test]
async fn rejected_requests_do_not_update_the_snapshot() {
    let backend = common::start_mock_backend(201, "{}").await;
    let mut config = common::config_for(format!("http://{backend}"));
    config.throttle.request_delay_secs = 1;
    config.filter.reject_with = "bad_message".into();
    let (proxy, shutdown) = common::start_proxy(config).await;
    let client = common::client();
    let url = format!("http://{proxy}/posts");

    post(&client, url.clone(), r#"{"body": "ok"}"#).await;
    let status = post(&client, url.clone(), r#"{"body": "bad_message"}"#).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let start = Instant::now();
    post(&client, url.clone(), r#"{"body": "ok"}"#).await;
    assert!(
        start.elapsed() >= Duration::from_secs(1),
        "the filtered request never reached the detector, so this is still a duplicate"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn delay_does_not_block_other_requests() {
    let backend = common::start_mock_backend(200, "{}").await;
    let mut config = common::config_for(format!("http://{backend}"));
    config.throttle.request_delay_secs = 2;
    let (proxy, shutdown) = common::start_proxy(config).await;
    let client = common::client();
    let url = format!("http://{proxy}/posts");

    post(&client, url.clone(), r#"{"body": "same"}"#).await;

    let delayed = {
        let client = client.clone();
        let url = url.clone();
        tokio::spawn(async move {
            let start = Instant::now();
            post(&client, url, r#"{"body": "same"}"#).await;
            start.elapsed()
        })
    };
    tokio::time::sleep(Duration::from_millis(200)).await;

    let start = Instant::now();
    assert_eq!(post(&client, url.clone(), r#"{"body": "other"}"#).await, StatusCode::OK);
    assert!(start.elapsed() < Duration::from_secs(1), "unrelated request must not wait");

    let delayed_for = delayed.await.unwrap();
    assert!(delayed_for >= Duration::from_secs(2));

    shutdown.trigger();
}

#[tokio::test]
async fn delayed_duplicate_to_unresponsive_upstream_is_bad_gateway() {
    let backend = common::start_hung_backend().await;
    let mut config = common::config_for(format!("http://{backend}"));
    config.upstream.timeout_secs = 1;
    config.throttle.request_delay_secs = 1;
    config.timeouts.request_secs = 3;
    assert!(proxy_service::config::validate_config(&config).is_ok());
    let (proxy, shutdown) = common::start_proxy(config).await;
    let client = common::client();
    let url = format!("http://{proxy}/posts");

    assert_eq!(post(&client, url.clone(), r#"{"body": "slow"}"#).await, StatusCode::BAD_GATEWAY);

    let start = Instant::now();
    assert_eq!(post(&client, url.clone(), r#"{"body": "slow"}"#).await, StatusCode::BAD_GATEWAY);
    assert!(start.elapsed() >= Duration::from_secs(2), "delay then upstream deadline");

    shutdown.trigger();
}
