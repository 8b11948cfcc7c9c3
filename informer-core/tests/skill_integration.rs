//! End-to-end tests: platform JSON in, platform JSON out, upstreams mocked.

use std::sync::Arc;

use informer_core::{Config, RequestEnvelope, Skill};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WEATHER_UNAVAILABLE: &str =
    "I am unable to access the weather at the moment. Please try again later.";

fn skill_for(server: &MockServer) -> Skill {
    let config = Config {
        geocoding_url: format!("{}/v1/search", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        ..Config::default()
    };
    Skill::from_config(Arc::new(config)).unwrap()
}

fn weather_event(city: Option<&str>) -> RequestEnvelope {
    let mut slots = serde_json::Map::new();
    if let Some(city) = city {
        slots.insert(
            "City".to_string(),
            serde_json::json!({ "name": "City", "value": city, "confirmationStatus": "NONE" }),
        );
    }

    serde_json::from_value(serde_json::json!({
        "version": "1.0",
        "session": { "new": false, "sessionId": "amzn1.echo-api.session.abc" },
        "request": {
            "type": "IntentRequest",
            "requestId": "amzn1.echo-api.request.abc",
            "timestamp": "2024-06-01T15:04:05Z",
            "locale": "en-US",
            "intent": { "name": "GetWeatherIntent", "confirmationStatus": "NONE", "slots": slots }
        }
    }))
    .unwrap()
}

async fn mount_geocoding(server: &MockServer, body: serde_json::Value, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, template: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(template)
        .expect(expected)
        .mount(server)
        .await;
}

fn atlanta_results() -> serde_json::Value {
    serde_json::json!({ "results": [ { "name": "Atlanta", "latitude": 33.749, "longitude": -84.38798 } ] })
}

#[tokio::test]
async fn test_atlanta_weather_is_spoken() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Atlanta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(atlanta_results()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "33.749"))
        .and(query_param("longitude", "-84.38798"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": { "temperature_2m": 81.3, "precipitation": 0.12 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = skill_for(&mock_server).invoke(&weather_event(Some("Atlanta"))).await;

    assert_eq!(
        response.speech_text(),
        "The current weather in Atlanta is 81.3°F with 0.12mm of precipitation."
    );
    assert!(response.keeps_session_open());
}

#[tokio::test]
async fn test_missing_city_makes_no_calls() {
    let mock_server = MockServer::start().await;
    mount_geocoding(&mock_server, atlanta_results(), 0).await;
    mount_forecast(&mock_server, ResponseTemplate::new(200), 0).await;

    let response = skill_for(&mock_server).invoke(&weather_event(None)).await;

    assert_eq!(
        response.speech_text(),
        "Please tell me the city you would like to check the weather for."
    );
}

#[tokio::test]
async fn test_unsupported_city_makes_no_calls() {
    let mock_server = MockServer::start().await;
    mount_geocoding(&mock_server, atlanta_results(), 0).await;
    mount_forecast(&mock_server, ResponseTemplate::new(200), 0).await;

    let response = skill_for(&mock_server)
        .invoke(&weather_event(Some("Nowhereville")))
        .await;

    assert!(
        response.speech_text().contains("certain cities"),
        "unexpected speech: {}",
        response.speech_text()
    );
}

#[tokio::test]
async fn test_geocoding_miss_never_calls_forecast() {
    let mock_server = MockServer::start().await;
    mount_geocoding(&mock_server, serde_json::json!({ "results": [] }), 1).await;
    mount_forecast(&mock_server, ResponseTemplate::new(200), 0).await;

    let response = skill_for(&mock_server).invoke(&weather_event(Some("Atlanta"))).await;

    assert_eq!(response.speech_text(), WEATHER_UNAVAILABLE);
}

#[tokio::test]
async fn test_forecast_error_is_generic_apology() {
    let mock_server = MockServer::start().await;
    mount_geocoding(&mock_server, atlanta_results(), 1).await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(503).set_body_string("maintenance"),
        1,
    )
    .await;

    let response = skill_for(&mock_server).invoke(&weather_event(Some("Atlanta"))).await;

    assert_eq!(response.speech_text(), WEATHER_UNAVAILABLE);
    assert!(response.reprompt.is_none());
}

#[tokio::test]
async fn test_launch_and_session_end_envelopes() {
    let mock_server = MockServer::start().await;
    let skill = skill_for(&mock_server);

    let launch: RequestEnvelope = serde_json::from_value(serde_json::json!({
        "version": "1.0",
        "request": { "type": "LaunchRequest", "requestId": "r1", "locale": "en-US" }
    }))
    .unwrap();
    let out = serde_json::to_value(skill.invoke_envelope(&launch).await).unwrap();
    assert_eq!(
        out["response"]["outputSpeech"]["ssml"],
        "<speak>Welcome to Weather Informer!</speak>"
    );
    assert!(out["response"]["reprompt"]["outputSpeech"]["ssml"].is_string());
    assert_eq!(out["response"]["shouldEndSession"], false);

    let ended: RequestEnvelope = serde_json::from_value(serde_json::json!({
        "version": "1.0",
        "request": { "type": "SessionEndedRequest", "requestId": "r2", "reason": "USER_INITIATED" }
    }))
    .unwrap();
    let out = serde_json::to_value(skill.invoke_envelope(&ended).await).unwrap();
    assert_eq!(out, serde_json::json!({ "version": "1.0", "response": {} }));
}

#[tokio::test]
async fn test_unmatched_intent_gets_error_responder() {
    let mock_server = MockServer::start().await;
    let skill = skill_for(&mock_server);

    for intent in ["AMAZON.NavigateHomeIntent", "OrderPizzaIntent", ""] {
        let response = skill.invoke(&RequestEnvelope::intent(intent)).await;
        assert_eq!(
            response.speech_text(),
            "Sorry, I had trouble doing what you asked. Please try again."
        );
    }
}
