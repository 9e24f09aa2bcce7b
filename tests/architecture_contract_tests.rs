//! Architecture contract tests.

mod support;

use support::architecture::{
    find_lines_containing, find_lines_containing_except_files, find_non_export_lines_in_mod_files,
    path_exists, read_relative,
};

#[test]
fn cli_has_no_direct_outbound_adapter_imports() {
    let hits = find_lines_containing(
        "src/adapter/inbound/cli",
        &["crate::adapter::outbound::molit::client", "crate::adapter::outbound::file"],
    );

    assert!(
        hits.is_empty(),
        "inbound CLI should reach sources through bootstrap wiring: {hits:#?}"
    );
}

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "reqwest::",
            "tracing::",
            "async_trait",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain_and_error() {
    let hits = find_lines_containing(
        "src/port",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "reqwest::",
        ],
    );

    assert!(hits.is_empty(), "ports must not reach outward: {hits:#?}");
}

#[test]
fn application_does_not_know_concrete_sources() {
    let hits = find_lines_containing(
        "src/application",
        &["crate::adapter", "crate::infrastructure", "reqwest::"],
    );

    assert!(
        hits.is_empty(),
        "application layer should depend on ports only: {hits:#?}"
    );
}

#[test]
fn http_client_is_confined_to_molit_adapter() {
    let hits = find_lines_containing_except_files(
        "src",
        &["reqwest::Client", "reqwest::ClientBuilder"],
        &["src/adapter/outbound/molit/client.rs"],
    );

    assert!(
        hits.is_empty(),
        "only the MOLIT client may construct HTTP clients: {hits:#?}"
    );
}

#[test]
fn mod_rs_is_export_only() {
    let violations = find_non_export_lines_in_mod_files("src");
    assert!(
        violations.is_empty(),
        "found non-export content in mod.rs files: {violations:#?}"
    );
}

#[test]
fn analyzer_depends_on_injected_ports() {
    let source = read_relative("src/application/analysis/service.rs");
    assert!(
        source.contains("source: Arc<dyn TransactionSource>"),
        "analyzer should hold the transaction source behind the port trait"
    );
    assert!(
        source.contains("cache: Arc<dyn RateCache>"),
        "analyzer should hold the cache behind the port trait"
    );
}

#[test]
fn port_contracts_live_under_outbound() {
    assert!(path_exists("src/port/outbound/source.rs"));
    assert!(path_exists("src/port/outbound/cache.rs"));
}
