//! 抓取器与完整运行测试（本地模拟HTTP服务）
use std::time::{Duration, Instant};

use rscategorize::{ConfigManager, PageFetcher, run};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_HTML: &str = r#"<html><head><script>var l = "vless://hidden@h:1#Hidden";</script></head>
<body>
  <div class="tgme_widget_message_text">
    <code>vless://uuid@1.2.3.4:443?security=tls#%F0%9F%87%A9%F0%9F%87%AA%20Germany%2001</code>
  </div>
  <div><pre>vmess://eyJwcyI6Ikdlcm1hbnkgMSJ9</pre></div>
</body></html>"#;

async fn mock_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channel"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_HTML))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("trojan://pw@5.6.7.8:443#US"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_fetch_all_isolates_failures_and_keeps_order() {
    let server = mock_server().await;
    let config = ConfigManager::custom().concurrency(2).http_timeout(5).build();
    let fetcher = PageFetcher::new(&config).unwrap();

    let urls = vec![
        format!("{}/missing", server.uri()),
        format!("{}/channel", server.uri()),
        format!("{}/plain", server.uri()),
        "http://127.0.0.1:1/unreachable".to_string(),
    ];
    let pages = fetcher.fetch_all(&urls).await;

    assert_eq!(pages.len(), 4);
    assert_eq!(pages.iter().map(|p| p.url.as_str()).collect::<Vec<_>>(), urls);
    assert_eq!(pages[0].text, None);
    assert_eq!(pages[3].text, None);

    let channel = pages[1].text.as_deref().unwrap();
    assert!(channel.contains("vless://uuid@1.2.3.4:443?security=tls#%F0%9F%87%A9%F0%9F%87%AA%20Germany%2001"));
    assert!(channel.contains("vmess://eyJwcyI6Ikdlcm1hbnkgMSJ9"));
    assert!(!channel.contains("hidden@h"));

    // 无内容标签时回退为整页文本
    assert_eq!(pages[2].text.as_deref(), Some("trojan://pw@5.6.7.8:443#US"));
}

#[tokio::test]
async fn test_fetch_all_respects_concurrency_limit() {
    let delay = Duration::from_millis(300);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ss://a@h:1").set_delay(delay))
        .expect(6)
        .mount(&server)
        .await;

    let config = ConfigManager::custom().concurrency(2).http_timeout(5).build();
    let fetcher = PageFetcher::new(&config).unwrap();
    let urls: Vec<_> = (0..6).map(|i| format!("{}/slow?n={}", server.uri(), i)).collect();

    let started = Instant::now();
    let pages = fetcher.fetch_all(&urls).await;
    let elapsed = started.elapsed();

    assert!(pages.iter().all(|p| p.text.is_some()));
    // 6个请求、最多2个同时进行 => 至少3轮延迟
    assert!(elapsed >= delay * 3, "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_full_run_writes_outputs_and_report() {
    let server = mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let urls_file = dir.path().join("urls.txt");
    let keywords_file = dir.path().join("keywords.json");
    let output_dir = dir.path().join("output_configs");
    let readme_file = dir.path().join("README.md");

    std::fs::write(
        &urls_file,
        format!("{0}/channel\n\n{0}/plain\n{0}/missing\n", server.uri()),
    )
    .unwrap();
    std::fs::write(
        &keywords_file,
        r#"{
            "Vmess": ["vmess://[A-Za-z0-9+/=_-]+"],
            "Vless": ["vless://[^\\s<>]+"],
            "Trojan": ["trojan://[^\\s<>]+"],
            "Germany": ["Germany", "DE", "🇩🇪"],
            "UnitedStates": ["United States", "US", "🇺🇸"]
        }"#,
    )
    .unwrap();

    let config = ConfigManager::custom()
        .urls_file(urls_file)
        .keywords_file(keywords_file)
        .output_dir(output_dir.clone())
        .readme_file(readme_file.clone())
        .build();

    let summary = run(&config).await.unwrap();

    assert_eq!(summary.protocol_counts.get("Vmess"), Some(&1));
    assert_eq!(summary.protocol_counts.get("Vless"), Some(&1));
    assert_eq!(summary.protocol_counts.get("Trojan"), Some(&1));
    assert_eq!(summary.country_counts.get("Germany"), Some(&2));
    assert_eq!(summary.country_counts.get("UnitedStates"), Some(&1));

    let germany = std::fs::read_to_string(output_dir.join("Germany.txt")).unwrap();
    let lines: Vec<_> = germany.lines().collect();
    assert_eq!(
        lines,
        vec![
            "vless://uuid@1.2.3.4:443?security=tls#%F0%9F%87%A9%F0%9F%87%AA%20Germany%2001",
            "vmess://eyJwcyI6Ikdlcm1hbnkgMSJ9",
        ]
    );

    let report = std::fs::read_to_string(readme_file).unwrap();
    assert!(report.contains("| Vmess | 1 |"));
    assert!(report.contains("| 🇩🇪 Germany | 2 |"));
}

#[tokio::test]
async fn test_missing_inputs_abort_before_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigManager::custom()
        .urls_file(dir.path().join("nope.txt"))
        .keywords_file(dir.path().join("nope.json"))
        .output_dir(dir.path().join("out"))
        .build();

    assert!(run(&config).await.is_err());
    assert!(!dir.path().join("out").exists());
}

#[tokio::test]
async fn test_report_write_failure_does_not_fail_run() {
    let server = mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let urls_file = dir.path().join("urls.txt");
    let keywords_file = dir.path().join("keywords.json");
    let output_dir = dir.path().join("output_configs");

    std::fs::write(&urls_file, format!("{}/plain\n", server.uri())).unwrap();
    std::fs::write(&keywords_file, r#"{"Trojan": ["trojan://[^\\s<>]+"], "UnitedStates": ["US"]}"#)
        .unwrap();

    let config = ConfigManager::custom()
        .urls_file(urls_file)
        .keywords_file(keywords_file)
        .output_dir(output_dir.clone())
        .readme_file(dir.path().join("no-such-dir").join("README.md"))
        .build();

    let summary = run(&config).await.unwrap();

    assert_eq!(summary.protocol_counts.get("Trojan"), Some(&1));
    assert_eq!(summary.country_counts.get("UnitedStates"), Some(&1));
    assert!(output_dir.join("Trojan.txt").exists());
    assert!(!dir.path().join("no-such-dir").exists());
}
