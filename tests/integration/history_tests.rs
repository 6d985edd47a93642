//! Integration tests for a full history run
//!
//! These tests use wiremock to stand in for the Kattis login form, the
//! solved-problem listing, and the submission pages of two mirrors.

use chrono::NaiveDate;
use kattis_historian::config::Config;
use kattis_historian::history::run_history;
use kattis_historian::output::write_timeline_csv;
use kattis_historian::session::Credentials;
use kattis_historian::HistorianError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_FORM: &str = r#"<html><body><form method="post">
    <input type="hidden" name="csrf_token" value="9999999999888888888877777777776666666666">
    <input name="user"><input name="password" type="password"><input type="submit" name="submit">
    </form></body></html>"#;

const LOGGED_IN: &str = r#"<html><body>
    <div class="user-infobox-name">Jane Doe <a href="/users/jane-doe">profile</a></div>
    </body></html>"#;

/// Creates a configuration pointing at the mock servers
fn create_test_config(site: &MockServer, mirrors: &[&MockServer]) -> Config {
    let mut config = Config::default();
    config.site.login_url = format!("{}/login/email", site.uri());
    config.site.problems_url = format!("{}/problems", site.uri());
    config.site.mirrors = mirrors.iter().map(|m| m.uri()).collect();
    config.fetch.max_retries = 1;
    config.fetch.retry_delay_ms = 1;
    config.fetch.timeout_secs = 5;
    config.fetch.max_concurrent_problems = 2;
    config
}

fn listing(entries: &[(&str, &str)]) -> String {
    let rows: String = entries
        .iter()
        .map(|(id, difficulty)| {
            format!(
                r#"<tr><td><a href="/problems/{id}">{id}</a></td><td>1</td><td>2</td><td>3</td><td>4</td><td>5</td><td>6</td><td>7</td><td>{difficulty}</td></tr>"#
            )
        })
        .collect();
    format!("<html><body><table><tbody>{}</tbody></table></body></html>", rows)
}

fn submissions(rows: &[(&str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(timestamp, status)| {
            format!(
                r#"<tr><td>42</td><td>{timestamp}</td><td>problem</td><td>{status}</td><td>Python 3</td></tr>"#
            )
        })
        .collect();
    format!("<html><body><table><tbody>{}</tbody></table></body></html>", rows)
}

async fn mount_login(server: &MockServer, response: &str) {
    Mock::given(method("GET"))
        .and(path("/login/email"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_FORM))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/login/email"))
        .respond_with(ResponseTemplate::new(200).set_body_string(response))
        .mount(server)
        .await;
}

async fn mount_listing_page(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/problems"))
        .and(query_param("show_solved", "on"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_submissions(server: &MockServer, problem: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/users/jane-doe/submissions/{}", problem)))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_history_across_two_mirrors() {
    let open = MockServer::start().await;
    let nus = MockServer::start().await;

    mount_login(&open, LOGGED_IN).await;
    mount_listing_page(
        &open,
        "0",
        listing(&[("hello", "1.0"), ("carrots", "2.0 - 5.0")]),
    )
    .await;
    mount_listing_page(&open, "1", listing(&[("tarifa", "3.2")])).await;
    mount_listing_page(&open, "2", listing(&[])).await;

    // hello: accepted on both mirrors, nus is earlier
    mount_submissions(
        &open,
        "hello",
        submissions(&[
            ("2020-02-01 12:00:00", "Accepted"),
            ("2020-01-20 12:00:00", "Accepted"),
        ]),
    )
    .await;
    mount_submissions(
        &nus,
        "hello",
        submissions(&[("2020-01-01 08:30:00", "Accepted (100)")]),
    )
    .await;

    // carrots: only solved on open, after a wrong answer
    mount_submissions(
        &open,
        "carrots",
        submissions(&[
            ("2020-01-04 10:00:00", "Accepted"),
            ("2020-01-03 10:00:00", "Wrong Answer"),
        ]),
    )
    .await;

    // tarifa: not hosted on nus at all
    mount_submissions(
        &open,
        "tarifa",
        submissions(&[("2020-01-07 23:59:59", "Accepted")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/users/jane-doe/submissions/tarifa"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&nus)
        .await;

    // Everything else on nus is an empty history
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(submissions(&[])))
        .with_priority(10)
        .mount(&nus)
        .await;

    let config = create_test_config(&open, &[&open, &nus]);
    let credentials = Credentials::new("jane@example.com", "secret");

    let report = run_history(&config, &credentials)
        .await
        .expect("History run failed");

    assert_eq!(report.handle, "jane-doe");
    assert_eq!(report.catalog_size, 3);
    assert!(report.resolution.failed.is_empty());
    assert_eq!(report.resolution.solved_count(), 3);

    let day = |d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap();
    let points: Vec<_> = report
        .timeline
        .iter()
        .map(|p| (p.date, p.cumulative_score))
        .collect();
    assert_eq!(
        points,
        vec![(day(1), 2.0), (day(4), 7.0), (day(7), 10.2)]
    );

    // Export the timeline
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("jane-doe.csv");
    write_timeline_csv(&csv_path, &report.timeline).expect("Failed to write CSV");

    let csv = std::fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert_eq!(
        csv,
        "Date,Cumulative Score\n2020-01-01,2.0\n2020-01-04,7.0\n2020-01-07,10.2\n"
    );
}

#[tokio::test]
async fn test_rejected_login_stops_before_scraping() {
    let site = MockServer::start().await;

    mount_login(
        &site,
        "<html><body><div class=\"alert\">Unknown Username/Password</div></body></html>",
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/problems"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&[])))
        .expect(0)
        .mount(&site)
        .await;

    let config = create_test_config(&site, &[&site]);
    let credentials = Credentials::new("jane@example.com", "wrong");

    let result = run_history(&config, &credentials).await;

    assert!(matches!(result, Err(HistorianError::Authentication(_))));
}

#[tokio::test]
async fn test_unfetchable_problem_does_not_abort_run() {
    let site = MockServer::start().await;

    mount_login(&site, LOGGED_IN).await;
    mount_listing_page(&site, "0", listing(&[("good", "2.0"), ("broken", "4.0")])).await;
    mount_listing_page(&site, "1", listing(&[])).await;

    mount_submissions(
        &site,
        "good",
        submissions(&[("2021-06-15 09:00:00", "Accepted")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/users/jane-doe/submissions/broken"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&site)
        .await;

    let config = create_test_config(&site, &[&site]);
    let credentials = Credentials::new("jane@example.com", "secret");

    let report = run_history(&config, &credentials)
        .await
        .expect("History run failed");

    assert_eq!(report.catalog_size, 2);
    assert_eq!(report.resolution.failed.len(), 1);
    assert_eq!(report.resolution.failed[0].entry.id, "broken");
    assert_eq!(report.timeline.len(), 1);
    assert_eq!(report.timeline[0].cumulative_score, 3.0);
}

#[tokio::test]
async fn test_user_with_no_solved_problems() {
    let site = MockServer::start().await;

    mount_login(&site, LOGGED_IN).await;
    mount_listing_page(&site, "0", listing(&[])).await;

    let config = create_test_config(&site, &[&site]);
    let credentials = Credentials::new("jane@example.com", "secret");

    let report = run_history(&config, &credentials)
        .await
        .expect("History run failed");

    assert_eq!(report.catalog_size, 0);
    assert!(report.timeline.is_empty());
}
