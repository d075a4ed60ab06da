//! Config -> metrics -> exposition, end to end.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use expect_test::expect;
use promtext_core::exposition;
use promtext_kinds::{config, AnyMetric};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/http.yaml");

#[test]
fn renders_fixture() {
    let cfg = config::load_from_file(FIXTURE).unwrap();
    let metrics = cfg.build().unwrap();
    assert_eq!(
        metrics.iter().map(AnyMetric::full_name).collect::<Vec<_>>(),
        ["http_server_requests", "__build_info", "http_server_duration_seconds"]
    );

    let body = exposition::render_all(metrics.iter().map(AnyMetric::serialize));
    expect![[r#"
        # HELP http_server_requests Total requests
        # TYPE http_server_requests counter
        http_server_requests{method="GET"} 7
        http_server_requests{method="POST"} 1
        # HELP __build_info Build metadata
        # TYPE __build_info gauge
        __build_info{version="1.0 \"beta\""} 1
        # HELP http_server_duration_seconds Request duration
        # TYPE http_server_duration_seconds histogram
        http_server_duration_seconds_bucket{le="0.25"} 0
        http_server_duration_seconds_bucket{le="1"} 1
        http_server_duration_seconds_bucket{le="+Inf"} 2
        http_server_duration_seconds_sum{} 2.5
        http_server_duration_seconds_count{} 2"#]]
    .assert_eq(&body);
}

#[test]
fn rejected_observation_fails_build() {
    let cfg = config::load_from_str(
        r#"
version: 1
metrics:
  - kind: counter
    name: requests
    help: h
    observations:
      - value: -1
"#,
    )
    .unwrap();
    let err = cfg.build().err().expect("must fail");
    assert_eq!(err.kind().as_str(), "INVALID_OBSERVATION");
}
