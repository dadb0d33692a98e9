#![cfg(test)]
use quote_ingestor::{
    FetchError,
    models::symbol::Symbol,
    providers::{
        DataProvider, ProviderInitError,
        alpha_vantage::{AlphaVantageParams, AlphaVantageProvider},
    },
};
use secrecy::SecretString;
use serial_test::serial;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

const TEST_KEY: &str = "test-secret-key";

/// Serves exactly one HTTP response on a local port and hands back the raw
/// request it received.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/query", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });

    (url, handle)
}

fn local_provider(base_url: String) -> AlphaVantageProvider {
    let params = AlphaVantageParams {
        base_url,
        ..Default::default()
    };
    AlphaVantageProvider::with_api_key(params, SecretString::from(TEST_KEY)).unwrap()
}

#[tokio::test]
async fn error_status_becomes_api_error() {
    let (url, server) = serve_once("503 Service Unavailable", "down").await;
    let provider = local_provider(url);

    let result = provider.fetch_daily(&Symbol::parse("IBM").unwrap()).await;

    match result {
        Err(FetchError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "down");
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    let request = server.await.unwrap();
    assert!(request.contains("function=TIME_SERIES_DAILY"));
    assert!(request.contains("symbol=IBM"));
    assert!(request.contains("outputsize=compact"));
}

#[tokio::test]
async fn non_json_body_is_a_transport_error_without_the_key() {
    let (url, server) = serve_once("200 OK", "<html>maintenance</html>").await;
    let provider = local_provider(url);

    let err = provider
        .fetch_daily(&Symbol::parse("IBM").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
    assert_eq!(err.kind(), "transport");
    let text = err.to_string();
    assert!(!text.contains("apikey"), "key parameter leaked: {text}");
    assert!(!text.contains(TEST_KEY), "key leaked: {text}");

    // The key does go out on the wire.
    assert!(server.await.unwrap().contains(&format!("apikey={TEST_KEY}")));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error_without_the_key() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/query", listener.local_addr().unwrap());
    drop(listener);

    let err = local_provider(url)
        .fetch_daily(&Symbol::parse("IBM").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
    assert!(!format!("{err:?}").contains(TEST_KEY));
}

#[tokio::test]
async fn sentinel_body_over_http_is_classified() {
    let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#;
    let (url, _server) = serve_once("200 OK", body).await;

    let result = local_provider(url)
        .fetch_daily(&Symbol::parse("ZZZZ").unwrap())
        .await;

    assert!(
        matches!(result, Err(FetchError::InvalidSymbol { .. })),
        "unexpected result: {result:?}"
    );
}

#[test]
#[serial]
fn missing_api_key_fails_construction() {
    let params = AlphaVantageParams {
        api_key_env: "QUOTE_INGESTOR_TEST_UNSET_KEY".to_string(),
        ..Default::default()
    };
    unsafe { std::env::remove_var(&params.api_key_env) };

    let err = AlphaVantageProvider::new(params).err().expect("construction should fail");
    assert!(matches!(err, ProviderInitError::MissingEnvVar { .. }));
    assert!(err.to_string().contains("QUOTE_INGESTOR_TEST_UNSET_KEY"));
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_alpha_vantage_provider_fetch_daily() {
    // This test requires ALPHAVANTAGE_API_KEY to be set in the environment or a .env file.
    dotenvy::dotenv().ok();
    if std::env::var("ALPHAVANTAGE_API_KEY").is_err() {
        println!("Skipping test_alpha_vantage_provider_fetch_daily: API key not set.");
        return;
    }

    let provider = AlphaVantageProvider::new(AlphaVantageParams::default())
        .expect("Failed to create provider");

    let series = provider
        .fetch_daily(&Symbol::parse("IBM").unwrap())
        .await
        .expect("fetch_daily returned an error");

    assert_eq!(series.symbol().as_str(), "IBM");
    assert!(!series.is_empty(), "Expected at least one bar for IBM");
    assert!(series.len() <= 100, "compact output is capped at 100 bars");
    assert!(
        series.bars().windows(2).all(|pair| pair[0].date < pair[1].date),
        "bars must be strictly ascending"
    );
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_alpha_vantage_unknown_symbol() {
    dotenvy::dotenv().ok();
    if std::env::var("ALPHAVANTAGE_API_KEY").is_err() {
        println!("Skipping test_alpha_vantage_unknown_symbol: API key not set.");
        return;
    }

    let provider = AlphaVantageProvider::new(AlphaVantageParams::default())
        .expect("Failed to create provider");

    let result = provider.fetch_daily(&Symbol::parse("ZZZZZZZZ").unwrap()).await;
    assert!(
        matches!(
            result,
            Err(FetchError::InvalidSymbol { .. }) | Err(FetchError::RateLimited { .. })
        ),
        "unexpected result: {result:?}"
    );
}
