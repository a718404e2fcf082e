use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use fertilizer_tui::common::{ApiClient, HealthStatus};
use fertilizer_tui::config::Config;
use fertilizer_tui::form::{FormField, PredictionView};
use fertilizer_tui::{App, AppView, check_health};
use ratatui::{Terminal, backend::TestBackend};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn form_app(base_url: &str) -> App {
    let config = Config {
        api_url: base_url.to_string(),
        ..Config::default()
    };
    let api = ApiClient::new(base_url);
    App::new_at_view(config, api, AppView::Form)
}

fn fill_form(app: &mut App) {
    let form = &mut app.state.form;
    form.set_value(FormField::DistrictName, "Kolhapur");
    form.set_value(FormField::SoilColor, "Black");
    form.set_value(FormField::Nitrogen, "75");
    form.set_value(FormField::Phosphorus, "50");
    form.set_value(FormField::Potassium, "100");
    form.set_value(FormField::Ph, "6.5");
    form.set_value(FormField::Rainfall, "1000");
    form.set_value(FormField::Temperature, "25");
    form.set_value(FormField::Crop, "Sugarcane");
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

/// Render the app and return the screen contents, one line per row.
fn render(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| app.draw(frame)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut screen = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            screen.push_str(buffer[(x, y)].symbol());
        }
        screen.push('\n');
    }
    screen
}

/// Apply the result of the prediction in flight, failing the test if none arrives.
async fn settle(app: &mut App) {
    tokio::time::timeout(Duration::from_secs(10), app.settle_next_prediction())
        .await
        .expect("no prediction result arrived");
}

async fn mock_predict(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_submit_success() {
    let server = mock_predict(
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "fertilizer": "Urea", "confidence": 87 })),
    )
    .await;

    let mut app = form_app(&server.uri());
    fill_form(&mut app);

    press(&mut app, KeyCode::Enter);
    assert!(app.state.form.view.is_loading_visible());
    assert!(!app.state.form.view.is_results_visible());
    assert!(render(&mut app).contains("Predicting..."));

    settle(&mut app).await;
    assert!(app.state.form.view.is_results_visible());
    assert!(!app.state.form.view.is_loading_visible());

    let screen = render(&mut app);
    assert!(screen.contains("Urea"));
    assert!(screen.contains("87%"));
    assert!(!screen.contains("Predicting..."));

    // exactly one request, carrying the nine form fields
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let mut keys: Vec<&str> = body
        .as_object()
        .unwrap()
        .keys()
        .map(|k| k.as_str())
        .collect();
    keys.sort();
    let mut expected: Vec<&str> = FormField::ALL.iter().map(|f| f.id()).collect();
    expected.sort();
    assert_eq!(keys, expected);
}

#[tokio::test]
async fn test_submit_service_error() {
    let server = mock_predict(
        ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "Validation error",
            "message": "Invalid crop"
        })),
    )
    .await;

    let mut app = form_app(&server.uri());
    fill_form(&mut app);
    app.submit_prediction();
    settle(&mut app).await;

    assert_eq!(
        app.state.form.view,
        PredictionView::Error("Invalid crop".to_string())
    );
    assert!(!app.state.form.view.is_loading_visible());

    let screen = render(&mut app);
    assert!(screen.contains("Prediction Error"));
    assert!(screen.contains("Invalid crop"));
}

#[tokio::test]
async fn test_submit_server_failure_without_body() {
    let server = mock_predict(ResponseTemplate::new(500)).await;

    let mut app = form_app(&server.uri());
    fill_form(&mut app);
    app.submit_prediction();
    settle(&mut app).await;

    let PredictionView::Error(message) = &app.state.form.view else {
        panic!("expected error view, got {:?}", app.state.form.view);
    };
    assert_eq!(message, "Prediction failed");
    assert!(!message.contains("500"));
}

#[tokio::test]
async fn test_submit_unreachable() {
    let base_url = "http://127.0.0.1:1";
    let mut app = form_app(base_url);
    fill_form(&mut app);
    app.submit_prediction();
    settle(&mut app).await;

    // same message the client produces for the failed call
    let expected = ApiClient::new(base_url)
        .predict(&app.state.form.request())
        .await
        .unwrap_err()
        .to_string();

    assert_eq!(app.state.form.view, PredictionView::Error(expected));
    assert!(!app.state.form.view.is_loading_visible());
}

#[tokio::test]
async fn test_blank_numbers_sent_as_null() {
    let server = mock_predict(
        ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "Invalid input data"
        })),
    )
    .await;

    let mut app = form_app(&server.uri());
    fill_form(&mut app);
    app.state.form.set_value(FormField::Nitrogen, "");
    app.state.form.set_value(FormField::Rainfall, "heavy");
    app.submit_prediction();
    settle(&mut app).await;

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["Nitrogen"].is_null());
    assert!(body["Rainfall"].is_null());
    assert_eq!(body["Phosphorus"], 50.0);
}

#[tokio::test]
async fn test_typing_into_fields() {
    let mut app = form_app("http://127.0.0.1:1");

    for c in "Pune".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('R'));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('4'));
    press(&mut app, KeyCode::Char('2'));
    press(&mut app, KeyCode::Backspace);

    let form = &app.state.form;
    assert_eq!(form.value(FormField::DistrictName), "Pune");
    assert_eq!(form.value(FormField::SoilColor), "R");
    assert_eq!(form.value(FormField::Nitrogen), "4");
    assert_eq!(form.selected, FormField::Nitrogen);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.view, AppView::Menu);
}

#[tokio::test]
async fn test_startup_health_check_is_not_shown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "model_loaded": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = form_app(&server.uri());
    let before = render(&mut app);

    let health = app.spawn_health_check().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert!(!health.model_loaded);

    // only logged, the form is untouched
    assert_eq!(app.state.form.view, PredictionView::Idle);
    assert_eq!(render(&mut app), before);
    assert!(!before.contains("healthy"));
}

#[tokio::test]
async fn test_check_health_unreachable() {
    let health = check_health(&ApiClient::new("http://127.0.0.1:1")).await;
    assert_eq!(health, HealthStatus::degraded());
}
