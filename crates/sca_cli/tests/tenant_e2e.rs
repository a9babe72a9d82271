//! End-to-end tests for network commands against a mocked tenant.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{bearer_token, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROJECT: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const SCAN: &str = "0068cba5-ed9f-4168-b4fb-dec07fe81448";

struct Tenant {
    server: MockServer,
    dir: TempDir,
}

impl Tenant {
    async fn start() -> Self {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/identity/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})))
            .mount(&server)
            .await;

        Self {
            server,
            dir: TempDir::new().unwrap(),
        }
    }

    async fn get(&self, route: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .and(bearer_token("tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    fn sca(&self) -> Command {
        let uri = self.server.uri();
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_sca"));
        cmd.current_dir(self.dir.path())
            .env("SCA_PASSWORD", "pw")
            .env_remove("SCA_API_URL")
            .env_remove("SCA_AC_URL")
            .args(["--tenant", "acme", "--username", "alice", "--api-url", &uri, "--ac-url", &uri]);
        cmd
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn projects_lists_names_and_ids() {
    let tenant = Tenant::start().await;
    tenant
        .get(
            "/risk-management/projects",
            json!([{"id": PROJECT, "name": "webgoat"}, {"id": "00000000-0000-0000-0000-000000000001", "name": "juice-shop"}]),
        )
        .await;

    tenant
        .sca()
        .arg("projects")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 projects"))
        .stdout(predicate::str::contains("webgoat"))
        .stdout(predicate::str::contains(PROJECT));
}

#[tokio::test(flavor = "multi_thread")]
async fn projects_json_is_machine_readable() {
    let tenant = Tenant::start().await;
    tenant
        .get("/risk-management/projects", json!([{"id": PROJECT, "name": "webgoat"}]))
        .await;

    let output = tenant.sca().args(["projects", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["name"], "webgoat");
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_credentials_exit_with_error_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/identity/connect/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let uri = server.uri();

    Command::new(env!("CARGO_BIN_EXE_sca"))
        .current_dir(dir.path())
        .env("SCA_PASSWORD", "wrong")
        .args(["--tenant", "acme", "--username", "alice", "--api-url", &uri, "--ac-url", &uri, "teams"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid_grant"));
}

#[tokio::test(flavor = "multi_thread")]
async fn scans_hide_unsuccessful_by_default() {
    let tenant = Tenant::start().await;

    Mock::given(method("GET"))
        .and(path("/risk-management/scans"))
        .and(query_param("projectId", PROJECT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"scanId": SCAN, "status": {"name": "Done"}},
            {"scanId": "00000000-0000-0000-0000-00000000000f", "status": {"name": "Failed"}}
        ])))
        .mount(&tenant.server)
        .await;

    tenant
        .sca()
        .args(["scans", PROJECT])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 scan"))
        .stdout(predicate::str::contains(SCAN))
        .stdout(predicate::str::contains("Failed").not());

    tenant
        .sca()
        .args(["scans", PROJECT, "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 scans"));
}

#[tokio::test(flavor = "multi_thread")]
async fn dev_packages_lists_development_ids() {
    let tenant = Tenant::start().await;
    tenant
        .get(
            &format!("/risk-management/risk-reports/{SCAN}/packages"),
            json!([
                {"id": "Npm-jest-29.0.0", "name": "jest", "isDevelopment": true},
                {"id": "Npm-react-18.2.0", "name": "react", "isDevelopment": false}
            ]),
        )
        .await;

    tenant
        .sca()
        .args(["packages", SCAN, "--dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Npm-jest-29.0.0"))
        .stdout(predicate::str::contains("Npm-react-18.2.0").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn secure_reports_number_of_updates() {
    let tenant = Tenant::start().await;
    tenant
        .get(&format!("/risk-management/projects/{PROJECT}"), json!({"id": PROJECT, "name": "webgoat"}))
        .await;

    Mock::given(method("GET"))
        .and(path("/risk-management/scans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"scanId": SCAN, "status": {"name": "Done"}}])))
        .mount(&tenant.server)
        .await;

    tenant
        .get(
            &format!("/risk-management/risk-reports/{SCAN}/vulnerabilities"),
            json!([
                {"id": "CVE-2022-1471", "packageId": "Maven-org.yaml:snakeyaml-1.26"},
                {"id": "CVE-2022-25857", "packageId": "Maven-org.yaml:snakeyaml-1.26"},
                {"id": "CVE-2021-44228", "packageId": "Maven-log4j-2.14.1"}
            ]),
        )
        .await;

    Mock::given(method("POST"))
        .and(path("/risk-management/risk-state"))
        .and(body_partial_json(json!({"state": "NotExploitable"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&tenant.server)
        .await;

    tenant
        .sca()
        .args(["secure", PROJECT, "Maven-org.yaml:snakeyaml-1.26"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked 2 vulnerabilities"));
}

#[tokio::test(flavor = "multi_thread")]
async fn activity_writes_semicolon_report() {
    let tenant = Tenant::start().await;
    let created = chrono::Utc::now().to_rfc3339();

    tenant
        .get("/Users", json!([{"id": 7, "userName": "alice", "firstName": "Alice", "lastName": "Smith"}]))
        .await;
    tenant
        .get(
            "/risk-management/projects",
            json!([{"id": PROJECT, "name": "webgoat", "createdOn": created, "assignedTeams": ["/CxServer/A"]}]),
        )
        .await;

    Mock::given(method("GET"))
        .and(path("/risk-management/scans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"scanId": SCAN, "createdOn": created, "status": {"name": "Done"}, "username": "ALICE"}
        ])))
        .mount(&tenant.server)
        .await;

    tenant
        .sca()
        .args(["activity", "--output", "activity.csv"])
        .assert()
        .success();

    let report = std::fs::read_to_string(tenant.dir.path().join("activity.csv")).unwrap();
    let mut lines = report.lines();

    assert_eq!(lines.next(), Some("sep=;"));
    assert_eq!(lines.next(), Some("Id;Name;Teams;CreationDate;User;Username"));

    let row = lines.next().unwrap();
    assert!(row.starts_with(&format!("\"{PROJECT}\";\"webgoat\";\"/CxServer/A\"")));
    assert!(row.ends_with("\"Alice Smith\";\"ALICE\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn users_active_filters_disabled_accounts() {
    let tenant = Tenant::start().await;
    tenant
        .get(
            "/Users",
            json!([
                {"id": 1, "userName": "alice", "firstName": "Alice", "lastName": "Smith", "active": true},
                {"id": 2, "userName": "bob", "firstName": "Bob", "lastName": "Jones", "active": false}
            ]),
        )
        .await;

    tenant
        .sca()
        .args(["users", "--active"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("bob").not());
}
