use mockito::{Matcher, Server};
use std::io::Write;
use webtrends_reporting::{Config, ConfigError, ReportClient, ReportQuery};

// base64("user:pass")
const BASIC_AUTH: &str = "Basic dXNlcjpwYXNz";

fn config() -> Config {
    Config::from_json(
        r#"{
            "proxies": {},
            "verify": true,
            "analytics": {
                "format_": "json",
                "profile": "12345",
                "language": "en-GB",
                "auth": ["user", "pass"]
            }
        }"#,
    )
    .unwrap()
}

fn client(server: &Server) -> ReportClient {
    ReportClient::with_base_url(&config(), &format!("{}/v3/Reporting/", server.url())).unwrap()
}

#[tokio::test]
async fn mock_profiles_sent_once_with_basic_auth() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/v3/Reporting/profiles/".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("format".into(), "json".into()),
            Matcher::UrlEncoded("language".into(), "en-GB".into()),
        ]))
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"ID":"12345","name":"Site"}]"#)
        .expect(1)
        .create_async()
        .await;

    let client = client(&server);
    let resp = client.get_profiles().await.unwrap();

    mock.assert_async().await;
    assert_eq!(resp.status().as_u16(), 200);
    let profiles: serde_json::Value = resp.json().unwrap();
    assert_eq!(profiles[0]["ID"], "12345");
    assert!(client.last_profiles().await.is_some());
}

#[tokio::test]
async fn mock_unauthorized_is_retried_exactly_once() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v3/Reporting/profiles/12345/reports")
        .match_header("authorization", BASIC_AUTH)
        .with_status(401)
        .expect(2)
        .create_async()
        .await;

    let resp = client(&server).get_reports(None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn mock_key_metrics_path() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v3/Reporting/profiles/12345/KeyMetrics/")
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let resp = client(&server).fetch_report(ReportQuery::key_metrics()).await.unwrap();

    mock.assert_async().await;
    assert!(resp.is_success());
}

#[tokio::test]
async fn mock_named_report_passes_body_through() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/v3/Reporting/profiles/12345/reports/abc/".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("format".into(), "csv".into()),
            Matcher::UrlEncoded("start_period".into(), "CURRENT_MONTH-1".into()),
            Matcher::UrlEncoded("search".into(), "front page".into()),
        ]))
        .with_status(200)
        .with_body("Page,Visits\nfront page,3\n")
        .expect(1)
        .create_async()
        .await;

    let query = ReportQuery::report("abc").format("csv").start("CURRENT_MONTH-1").search("front page");
    let resp = client(&server).fetch_report(query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(resp.text(), "Page,Visits\nfront page,3\n");
}

#[test]
fn missing_config_is_a_typed_error() {
    let dir = tempfile::tempdir().unwrap();
    let res = ReportClient::from_config_file(dir.path().join("secrets/config.json"));
    assert!(matches!(res, Err(ConfigError::Missing(_))));
}

#[test]
fn unusable_ca_bundle_is_rejected() {
    let mut pem = tempfile::NamedTempFile::new().unwrap();
    pem.write_all(b"not a certificate").unwrap();
    let raw = format!(
        r#"{{
            "proxies": {{}},
            "verify": {},
            "analytics": {{ "profile": "1", "auth": ["u", "p"] }}
        }}"#,
        serde_json::to_string(&pem.path()).unwrap()
    );
    let config = Config::from_json(&raw).unwrap();
    assert!(matches!(ReportClient::new(&config), Err(ConfigError::InvalidCertificate(_))));
}

#[test]
fn unknown_proxy_scheme_is_rejected() {
    let config = Config::from_json(
        r#"{
            "proxies": { "ftp": "http://proxy.local:21" },
            "verify": true,
            "analytics": { "profile": "1", "auth": ["u", "p"] }
        }"#,
    )
    .unwrap();
    assert!(matches!(
        ReportClient::new(&config),
        Err(ConfigError::UnsupportedProxyScheme(scheme)) if scheme == "ftp"
    ));
}

#[tokio::test]
async fn mock_scheme_proxy_wins_over_all() {
    let mut all_proxy = Server::new_async().await;
    let mut http_proxy = Server::new_async().await;
    let all_mock = all_proxy
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_body("ALL")
        .expect(0)
        .create_async()
        .await;
    let http_mock = http_proxy
        .mock("GET", Matcher::Any)
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_body("HTTP")
        .expect(20)
        .create_async()
        .await;

    let raw = format!(
        r#"{{
            "proxies": {{ "all": "{}", "http": "{}" }},
            "verify": true,
            "analytics": {{ "profile": "12345", "auth": ["user", "pass"] }}
        }}"#,
        all_proxy.url(),
        http_proxy.url()
    );
    let config = Config::from_json(&raw).unwrap();
    for _ in 0..20 {
        let client = ReportClient::with_base_url(&config, "http://ws.invalid/v3/Reporting/").unwrap();
        let resp = client.get_profiles().await.unwrap();
        assert_eq!(resp.text(), "HTTP");
    }

    http_mock.assert_async().await;
    all_mock.assert_async().await;
}

#[tokio::test]
async fn mock_all_proxy_is_used_alone() {
    let mut proxy = Server::new_async().await;
    let mock = proxy
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_body("ALL")
        .expect(1)
        .create_async()
        .await;

    let raw = format!(
        r#"{{
            "proxies": {{ "all": "{}" }},
            "verify": true,
            "analytics": {{ "profile": "12345", "auth": ["user", "pass"] }}
        }}"#,
        proxy.url()
    );
    let config = Config::from_json(&raw).unwrap();
    let client = ReportClient::with_base_url(&config, "http://ws.invalid/v3/Reporting/").unwrap();
    let resp = client.fetch_report(ReportQuery::key_metrics()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(resp.text(), "ALL");
}
