//! Integration tests for fetching country data over HTTP.

use astro_biblio::country::{
    AffiliationResolver, AliasTable, CountryError, CountrySource, HttpTimeouts,
    RestCountriesSource, load_country_table,
};
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COUNTRIES: &str = include_str!("fixtures/countries.json");

fn source_for(server: &MockServer) -> RestCountriesSource {
    RestCountriesSource::with_url(format!("{}/v2/all", server.uri()), HttpTimeouts::default())
        .unwrap()
}

#[tokio::test]
async fn test_rest_source_fetches_and_decodes_countries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/all"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(COUNTRIES, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let table = load_country_table(&source_for(&server)).await.unwrap();
    assert_eq!(table.len(), 20);
    assert_eq!(table.get("United Kingdom").unwrap().alpha3_code, "GBR");

    let resolver = AffiliationResolver::new(table, &AliasTable::builtin()).unwrap();
    assert_eq!(
        resolver.resolve("Dept. of Physics, UK").unwrap().canonical_name,
        "United Kingdom"
    );
}

#[tokio::test]
async fn test_rest_source_sends_identifying_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/all"))
        .and(header_regex("user-agent", r"^astro-biblio/.+research-tool"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(COUNTRIES, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    assert!(source_for(&server).fetch().await.is_ok());
}

#[tokio::test]
async fn test_rest_source_server_error_is_fatal_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/all"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = source_for(&server).fetch().await.unwrap_err();
    assert!(
        matches!(err, CountryError::HttpStatus { status: 503, .. }),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_rest_source_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/all"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"message": "moved"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = source_for(&server).fetch().await.unwrap_err();
    assert!(matches!(err, CountryError::Decode { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn test_rest_source_empty_list_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/all"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;

    let err = load_country_table(&source_for(&server)).await.unwrap_err();
    assert!(matches!(err, CountryError::Empty { .. }));
}

#[tokio::test]
async fn test_rest_source_unreachable_host_is_fetch_error() {
    let server = MockServer::start().await;
    let url = format!("{}/v2/all", server.uri());
    drop(server);

    let source = RestCountriesSource::with_url(
        url,
        HttpTimeouts {
            connect_timeout_secs: 1,
            read_timeout_secs: 1,
        },
    )
    .unwrap();
    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, CountryError::FetchFailed { .. }), "unexpected error: {err}");
}
