//! Integration tests for the lookup-to-result pipeline using a SerpApi fixture.

use price_scout::config::Config;
use price_scout::lookup::response::SearchResponse;
use price_scout::lookup::{Engine, OfferLookup, SerpApiClient};
use price_scout::{aggregate, FanOut};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHOPPING_FIXTURE: &str = include_str!("fixtures/shopping_results.json");

#[test]
fn test_aggregate_fixture() {
    let response: SearchResponse = serde_json::from_str(SHOPPING_FIXTURE).unwrap();
    let raw = response.into_raw_offers(Engine::GoogleShopping, "us");
    assert_eq!(raw.len(), 7);

    let result = aggregate("Apple AirPods Pro 2", "us", &raw);

    // Second eBay listing is a duplicate site; "See website" and the
    // price range do not parse
    let sites: Vec<&str> = result.offers.iter().map(|o| o.site.as_str()).collect();
    assert_eq!(sites, vec!["eBay - houstoncellphones", "Amazon.com", "Best Buy", "Walmart"]);

    let keys: Vec<&str> = result.offers.iter().map(|o| o.site_key.as_str()).collect();
    assert_eq!(keys, vec!["eBay", "Amazon", "Best", "Walmart"]);

    let amazon = &result.offers[1];
    assert_eq!(amazon.price, 199.0);
    assert_eq!(amazon.link.as_deref(), Some("https://www.google.com/shopping/product/5678"));

    let lowest = result.lowest.as_ref().unwrap();
    assert_eq!(lowest.site, "Walmart");
    assert_eq!(lowest.price, 179.0);
    assert_eq!(lowest.display_price(), "$179.00");
}

#[tokio::test]
async fn test_fanout_against_mock_serpapi() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("gl", "us"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SHOPPING_FIXTURE))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("gl", "in"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = Config { api_key: Some("test-key".to_string()), ..Config::default() };
    let client = SerpApiClient::with_base_url(&config, mock_server.uri()).unwrap();
    let lookup: &dyn OfferLookup = &client;

    let products = vec!["Apple AirPods Pro 2".to_string()];
    let regions = vec!["us".to_string(), "in".to_string()];
    let results = FanOut::new(lookup, 5).run(&products, &regions).await;

    assert_eq!(results.len(), 2);

    let us = results.get("Apple AirPods Pro 2", "us").unwrap();
    assert_eq!(us.count(), 4);
    assert_eq!(us.lowest_price(), Some(179.0));

    let india = results.get("Apple AirPods Pro 2", "in").unwrap();
    assert!(india.offers.is_empty());
    assert!(india.lowest.is_none());
}

#[tokio::test]
async fn test_lowest_across_engines() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("engine", "google_shopping"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SHOPPING_FIXTURE))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("engine", "amazon"))
        .and(query_param("k", "Apple AirPods Pro 2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"organic_results": [
                {"title": "AirPods Pro 2", "price": "$169.00"},
                {"title": "AirPods Pro 2 (Renewed)", "price": "$149.00"}
            ]}"#,
        ))
        .mount(&mock_server)
        .await;

    let config = Config {
        api_key: Some("test-key".to_string()),
        engines: vec![Engine::Amazon, Engine::GoogleShopping],
        ..Config::default()
    };
    let client = SerpApiClient::with_base_url(&config, mock_server.uri()).unwrap();

    let products = vec!["Apple AirPods Pro 2".to_string()];
    let regions = vec!["us".to_string()];
    let results = FanOut::new(&client, 5).run(&products, &regions).await;

    let us = results.get("Apple AirPods Pro 2", "us").unwrap();
    let keys: Vec<&str> = us.offers.iter().map(|o| o.site_key.as_str()).collect();

    // Amazon is queried first and claims its key with its first listing;
    // Google's "Amazon.com" listing is a later duplicate
    assert_eq!(keys, vec!["Amazon", "eBay", "Best", "Walmart"]);
    assert_eq!(us.offers[0].site, "Amazon");
    assert_eq!(us.offers[0].price, 169.0);

    let lowest = us.lowest.as_ref().unwrap();
    assert_eq!(lowest.site, "Amazon");
    assert_eq!(lowest.price, 169.0);
}
