//! Integration tests for the search pipeline against a mock Open-Meteo server.

use meteo_core::{
    Config, WeatherApp, WeatherError, WeatherSource, html::HtmlPage, pipeline,
    provider::openmeteo::OpenMeteoProvider, render, source_from_config,
};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    let mut cfg = Config::default();
    cfg.endpoints.geocoding_url = server.uri();
    cfg.endpoints.forecast_url = server.uri();
    cfg
}

fn lisbon_results() -> Value {
    json!({
        "results": [{
            "id": 2267057,
            "name": "Lisbon",
            "latitude": 38.71667,
            "longitude": -9.13333,
            "country": "Portugal",
            "timezone": "Europe/Lisbon"
        }],
        "generationtime_ms": 0.7
    })
}

/// Forecast body with `days` days and 24 hours per day.
///
/// Hourly humidity is `40 + 5 * day + hour`, so noon of day 2 reads 62.
fn forecast_body(days: u32) -> Value {
    let dates: Vec<String> = (0..days).map(|d| format!("2026-10-{:02}", 18 + d)).collect();

    let mut time = Vec::new();
    let mut humidity = Vec::new();
    let mut wind = Vec::new();
    let mut pressure = Vec::new();
    let mut precipitation = Vec::new();
    for (d, date) in dates.iter().enumerate() {
        for h in 0..24 {
            time.push(format!("{date}T{h:02}:00"));
            humidity.push(40 + 5 * d + h);
            wind.push(10.0 * d as f64 + h as f64 / 2.0);
            pressure.push(1000.0 + d as f64 + h as f64 / 10.0);
            precipitation.push(10 * d + h);
        }
    }
    let hours = time.len();

    json!({
        "latitude": 38.72,
        "longitude": -9.14,
        "timezone": "Europe/Lisbon",
        "current": {
            "time": "2026-10-18T15:00",
            "temperature_2m": 21.6,
            "weather_code": 1,
            "relative_humidity_2m": 68,
            "apparent_temperature": 20.5,
            "pressure_msl": 1018.6,
            "wind_speed_10m": 14.4
        },
        "hourly": {
            "time": time,
            "temperature_2m": vec![18.0; hours],
            "weather_code": vec![2; hours],
            "precipitation_probability": precipitation,
            "relative_humidity_2m": humidity,
            "wind_speed_10m": wind,
            "pressure_msl": pressure
        },
        "daily": {
            "time": dates,
            "temperature_2m_max": (0..days).map(|d| 20.4 + d as f64).collect::<Vec<_>>(),
            "temperature_2m_min": (0..days).map(|d| 12.5 + d as f64).collect::<Vec<_>>(),
            "weather_code": vec![3; days as usize],
            "precipitation_probability_max": (0..days).map(|d| 10 * d + 5).collect::<Vec<_>>()
        }
    })
}

async fn mount_geocode(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("count", "1"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, days: u32) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "38.71667"))
        .and(query_param("longitude", "-9.13333"))
        .and(query_param("temperature_unit", "celsius"))
        .and(query_param("wind_speed_unit", "kmh"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(days)))
        .expect(1)
        .mount(server)
        .await;
}

async fn expect_no_forecast(server: &MockServer) {
    Mock::given(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn lisboa_end_to_end() {
    let server = MockServer::start().await;
    mount_geocode(&server, lisbon_results()).await;
    mount_forecast(&server, 7).await;

    let source = source_from_config(&config_for(&server)).unwrap();
    let mut app = WeatherApp::new(source);
    let mut page = HtmlPage::new();

    app.search("Lisboa", &mut page).await.unwrap();
    let html = page.render().unwrap();

    assert!(html.contains("📍 Lisbon, Portugal"));
    assert!(html.contains("22°C"));
    assert_eq!(html.matches("data-index=").count(), 5);
    assert_eq!(app.state().snapshot().map(|s| s.day_count()), Some(7));
}

#[tokio::test]
async fn geocode_request_carries_the_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "São Paulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let source = source_from_config(&config_for(&server)).unwrap();
    let places = source.search_places("São Paulo").await.unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn zero_results_is_city_not_found_without_forecast_request() {
    let server = MockServer::start().await;
    mount_geocode(&server, json!({ "generationtime_ms": 0.3 })).await;
    expect_no_forecast(&server).await;

    let source = source_from_config(&config_for(&server)).unwrap();
    let err = pipeline::run(source.as_ref(), "Atlantis").await.unwrap_err();

    assert_eq!(err, WeatherError::CityNotFound { query: "Atlantis".into() });
}

#[tokio::test]
async fn blank_input_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let source = source_from_config(&config_for(&server)).unwrap();
    let mut app = WeatherApp::new(source);
    let mut page = HtmlPage::new();

    let err = app.search(" \t ", &mut page).await.unwrap_err();

    assert_eq!(err, WeatherError::InputEmpty);
    assert!(page.render().unwrap().contains("Please enter a city name."));
}

#[tokio::test]
async fn geocode_server_error() {
    let server = MockServer::start().await;
    Mock::given(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;
    expect_no_forecast(&server).await;

    let source = source_from_config(&config_for(&server)).unwrap();
    let err = pipeline::run(source.as_ref(), "Lisboa").await.unwrap_err();

    assert_eq!(err.to_string(), "Error fetching city");
    assert!(err.detail().unwrap_or_default().contains("503"));
}

#[tokio::test]
async fn forecast_server_error_clears_the_strip() {
    let server = MockServer::start().await;
    mount_geocode(&server, lisbon_results()).await;
    Mock::given(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = source_from_config(&config_for(&server)).unwrap();
    let mut app = WeatherApp::new(source);
    let mut page = HtmlPage::new();

    let err = app.search("Lisboa", &mut page).await.unwrap_err();
    let html = page.render().unwrap();

    assert_eq!(err.to_string(), "Error fetching weather data");
    assert!(html.contains("❌ Error: Error fetching weather data"));
    assert!(!html.contains("data-index="));
    assert!(app.state().snapshot().is_none());
}

#[tokio::test]
async fn misaligned_forecast_is_rejected() {
    let server = MockServer::start().await;
    let mut body = forecast_body(3);
    body["daily"]["temperature_2m_max"] = json!([20.0]);
    Mock::given(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let cfg = config_for(&server);
    let provider = OpenMeteoProvider::from_endpoints(&cfg.endpoints).unwrap();
    let place = meteo_core::Place {
        name: "Lisbon".into(),
        country: Some("Portugal".into()),
        latitude: 38.71667,
        longitude: -9.13333,
    };

    let err = pipeline::forecast_stage(&provider, &place).await.unwrap_err();
    assert!(matches!(err, WeatherError::ForecastTransport { .. }));
    assert!(err.detail().unwrap_or_default().contains("not aligned"));
}

#[tokio::test]
async fn null_daily_reading_still_renders() {
    let server = MockServer::start().await;
    mount_geocode(&server, lisbon_results()).await;
    let mut body = forecast_body(7);
    body["daily"]["temperature_2m_max"][6] = Value::Null;
    body["daily"]["temperature_2m_max"][1] = Value::Null;
    Mock::given(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let source = source_from_config(&config_for(&server)).unwrap();
    let mut app = WeatherApp::new(source);
    let mut page = HtmlPage::new();

    app.search("Lisboa", &mut page).await.unwrap();
    let html = page.render().unwrap();

    assert_eq!(html.matches("data-index=").count(), 5);
    assert!(html.contains("14° - —"));
    assert!(app.select_day(5, &mut page).is_none());
    assert!(app.select_day(6, &mut page).is_none());
}

#[tokio::test]
async fn detail_for_today_reads_current_fields() {
    let server = MockServer::start().await;
    mount_geocode(&server, lisbon_results()).await;
    mount_forecast(&server, 7).await;

    let source = source_from_config(&config_for(&server)).unwrap();
    let mut app = WeatherApp::new(source);
    let mut page = HtmlPage::new();
    app.search("Lisboa", &mut page).await.unwrap();

    let today = app.select_day(0, &mut page).unwrap();

    // Noon of day 0 would give 52% / 6 km/h / 1001 hPa.
    assert_eq!(today.details.humidity_pct, Some(68));
    assert_eq!(today.details.wind_kmh, Some(14));
    assert_eq!(today.details.pressure_hpa, Some(1019));
    assert_eq!(today.details.precipitation_pct, Some(5));
}

#[tokio::test]
async fn detail_for_day_two_reads_noon() {
    let server = MockServer::start().await;
    mount_geocode(&server, lisbon_results()).await;
    mount_forecast(&server, 7).await;

    let source = source_from_config(&config_for(&server)).unwrap();
    let mut app = WeatherApp::new(source);
    let mut page = HtmlPage::new();
    app.search("Lisboa", &mut page).await.unwrap();

    let day = app.select_day(2, &mut page).unwrap();

    assert_eq!(day.title, "Tuesday, October 20, 2026");
    assert_eq!(day.details.humidity_pct, Some(62));
    assert_eq!(day.details.wind_kmh, Some(26));
    assert_eq!(day.details.pressure_hpa, Some(1003));
    assert_eq!(day.details.precipitation_pct, Some(32));

    let html = page.render().unwrap();
    assert!(html.contains("class=\"forecast-day selected\" data-index=\"2\""));
    assert_eq!(html.matches("forecast-day selected").count(), 1);
}

#[test]
fn strip_labels_match_the_daily_dates() {
    let snapshot: meteo_core::WeatherSnapshot =
        serde_json::from_value(forecast_body(7)).unwrap();
    let strip = render::forecast_strip(&snapshot, None);

    let labels: Vec<&str> = strip.days.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, ["Sun 18", "Mon 19", "Tue 20", "Wed 21", "Thu 22"]);
}
