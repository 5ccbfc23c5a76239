//! Integration tests for the planning service client
//!
//! Runs a stub planning service on a local port and drives the client,
//! the dispatcher and the view state against it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use tripplan::audio::AmbientAudio;
use tripplan::data::{SearchCriteria, VacationType};
use tripplan::runtime::Runtime;
use tripplan::service::{Dispatcher, PlannerClient, ServiceError};
use tripplan::state::{Effect, Event, FormEdit, Screen, ViewState};

/// Canned responses plus a log of every request body received
#[derive(Clone)]
struct Stub {
    plan: (StatusCode, String),
    choose: (StatusCode, String),
    received: Arc<Mutex<Vec<(&'static str, Value)>>>,
}

impl Stub {
    fn new(plan: (StatusCode, String), choose: (StatusCode, String)) -> Self {
        Self {
            plan,
            choose,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn bodies(&self, path: &str) -> Vec<Value> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| *p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

async fn plan_trip(State(stub): State<Stub>, Json(body): Json<Value>) -> (StatusCode, String) {
    stub.received.lock().unwrap().push(("plan_trip", body));
    stub.plan.clone()
}

async fn choose_trip(State(stub): State<Stub>, Json(body): Json<Value>) -> (StatusCode, String) {
    stub.received.lock().unwrap().push(("choose_trip", body));
    stub.choose.clone()
}

/// Starts the stub on an ephemeral port and returns its base URL
async fn serve(stub: Stub) -> String {
    let app = Router::new()
        .route("/plan_trip", post(plan_trip))
        .route("/choose_trip", post(choose_trip))
        .with_state(stub);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn ok(body: Value) -> (StatusCode, String) {
    (StatusCode::OK, body.to_string())
}

fn option_json(destination: &str, total: f64) -> Value {
    json!({
        "destination": destination,
        "total_price": total,
        "flight": {"airline": "Swiss", "price": 420.0},
        "hotel": {"name": "Hotel Alpina", "price": total - 420.0}
    })
}

fn details_json() -> Value {
    json!({
        "destination": "Zurich (ZRH)",
        "total_price": 1480.0,
        "flight": {
            "airline": "Swiss",
            "price": 420.0,
            "departure": "Ben Gurion Airport",
            "arrival": "Zurich Airport",
            "duration": 255,
            "flight_number": "LX 253"
        },
        "hotel": {"name": "Hotel Alpina", "price": 1060.0, "rating": 4.4},
        "daily_plan": "Day 1: Old Town walk\nDay 2: Lake Zurich cruise",
        "image_urls": ["https://img.example/zurich.png"]
    })
}

fn criteria() -> SearchCriteria {
    SearchCriteria {
        vacation_type: VacationType::Ski,
        start_date: NaiveDate::from_ymd_opt(2030, 1, 10).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2030, 1, 17).unwrap(),
        budget: 1500.0,
    }
}

#[tokio::test]
async fn test_plan_trip_returns_options_in_order() {
    let stub = Stub::new(
        ok(json!([option_json("Zurich (ZRH)", 1480.0), option_json("Geneva (GVA)", 1320.0)])),
        ok(details_json()),
    );
    let url = serve(stub.clone()).await;
    let client = PlannerClient::new(url);

    let options = client.plan_trip(&criteria()).await.unwrap();

    assert_eq!(options.len(), 2);
    assert_eq!(options[0].destination, "Zurich (ZRH)");
    assert_eq!(options[1].destination, "Geneva (GVA)");
    assert_eq!(options[1].hotel.price, 900.0);

    let bodies = stub.bodies("plan_trip");
    assert_eq!(
        bodies,
        vec![json!({
            "vacation_type": "ski",
            "start_date": "2030-01-10",
            "end_date": "2030-01-17",
            "budget": 1500.0
        })]
    );
}

#[tokio::test]
async fn test_plan_trip_empty_list() {
    let stub = Stub::new(ok(json!([])), ok(details_json()));
    let url = serve(stub).await;

    let options = PlannerClient::new(url).plan_trip(&criteria()).await.unwrap();

    assert!(options.is_empty());
}

#[tokio::test]
async fn test_choose_trip_sends_choice_and_parses_details() {
    let stub = Stub::new(ok(json!([])), ok(details_json()));
    let url = serve(stub.clone()).await;

    let details = PlannerClient::new(url).choose_trip(2).await.unwrap();

    assert_eq!(stub.bodies("choose_trip"), vec![json!({"choice": 2})]);
    assert_eq!(details.destination, "Zurich (ZRH)");
    assert_eq!(details.flight.duration_label().as_deref(), Some("4h 15m"));
    assert_eq!(details.hotel.rating, Some(4.4));
    assert_eq!(
        details.daily_plan_items(),
        vec!["Day 1: Old Town walk", "Day 2: Lake Zurich cruise"]
    );
}

#[tokio::test]
async fn test_error_status_carries_detail() {
    let stub = Stub::new(
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"detail": "flight search unavailable"}).to_string(),
        ),
        (
            StatusCode::BAD_REQUEST,
            json!({"detail": "No trip options available. Please plan a trip first."})
                .to_string(),
        ),
    );
    let url = serve(stub).await;
    let client = PlannerClient::new(url);

    match client.plan_trip(&criteria()).await {
        Err(ServiceError::Status { status, detail }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(detail, "flight search unavailable");
        }
        other => panic!("expected status error, got {:?}", other),
    }

    match client.choose_trip(1).await {
        Err(ServiceError::Status { status, detail }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(detail.contains("plan a trip first"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let stub = Stub::new(
        (StatusCode::OK, "{\"unexpected\": true}".to_string()),
        ok(details_json()),
    );
    let url = serve(stub).await;

    let result = PlannerClient::new(url).plan_trip(&criteria()).await;

    assert!(matches!(result, Err(ServiceError::Decode(_))));
}

async fn next_event(runtime: &mut Runtime) -> Event {
    tokio::time::timeout(Duration::from_secs(5), runtime.recv())
        .await
        .expect("service should answer")
        .expect("dispatcher channel open")
}

fn requests(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::SearchTrips { .. } | Effect::ChooseTrip { .. }))
        .count()
}

#[tokio::test]
async fn test_search_and_choose_end_to_end() {
    let stub = Stub::new(
        ok(json!([option_json("Geneva (GVA)", 1320.0), option_json("Zurich (ZRH)", 1480.0)])),
        ok(details_json()),
    );
    let url = serve(stub.clone()).await;
    let mut runtime = Runtime::new(
        Dispatcher::new(PlannerClient::new(url)),
        AmbientAudio::silent(),
    );
    let mut view = ViewState::default();

    runtime.execute_all(view.startup_effects());
    runtime.execute_all(view.apply(Event::Start));
    for text in ["2030-01-10", "2030-01-17", "1500"] {
        for c in text.chars() {
            view.apply(Event::Form(FormEdit::Insert(c)));
        }
        view.apply(Event::Form(FormEdit::NextField));
    }
    view.apply(Event::Form(FormEdit::SetType(VacationType::Ski)));

    let effects = view.apply(Event::SubmitForm {
        today: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
    });
    assert_eq!(requests(&effects), 1);
    assert_eq!(view.screen(), Screen::Loading);
    runtime.execute_all(effects);

    let event = next_event(&mut runtime).await;
    runtime.execute_all(view.apply(event));
    assert_eq!(view.screen(), Screen::Results);
    assert_eq!(view.options().len(), 2);

    let effects = view.apply(Event::SelectOption(1));
    assert_eq!(requests(&effects), 1);
    runtime.execute_all(effects);

    let event = next_event(&mut runtime).await;
    runtime.execute_all(view.apply(event));

    assert_eq!(view.screen(), Screen::Details);
    assert_eq!(
        view.selected().map(|d| d.destination.as_str()),
        Some("Zurich (ZRH)")
    );
    assert_eq!(stub.bodies("choose_trip"), vec![json!({"choice": 2})]);
}

#[tokio::test]
async fn test_failed_search_returns_to_form() {
    let stub = Stub::new(
        (StatusCode::BAD_GATEWAY, "upstream down".to_string()),
        ok(details_json()),
    );
    let url = serve(stub).await;
    let mut runtime = Runtime::new(
        Dispatcher::new(PlannerClient::new(url)),
        AmbientAudio::silent(),
    );
    let mut view = ViewState::new(true, true);

    view.apply(Event::Start);
    for text in ["2030-01-10", "2030-01-17", "1500"] {
        for c in text.chars() {
            view.apply(Event::Form(FormEdit::Insert(c)));
        }
        view.apply(Event::Form(FormEdit::NextField));
    }
    view.apply(Event::Form(FormEdit::SetType(VacationType::City)));
    runtime.execute_all(view.apply(Event::SubmitForm {
        today: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
    }));

    let event = next_event(&mut runtime).await;
    let effects = view.apply(event);

    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::ReportFailure(_))));
    assert_eq!(view.screen(), Screen::Form);
    let failure = view.last_failure().expect("failure is surfaced");
    assert!(failure.to_string().contains("upstream down"));
}
