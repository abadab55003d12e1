use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};

use hrm_seeder::utils::facts::FactGenerator;
use hrm_seeder::{
    Delay, Dispatcher, HttpReply, Pipeline, PipelineOutcome, RetryPolicy, SeedError, SeedReport,
    Transport,
};

const BASE: &str = "http://api.test/api/dsm44";

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    /// Every call answers 201 echoing the body plus an incrementing id.
    Echo,
    /// Employee creation never gets through; other endpoints echo.
    EmployeesDown,
    /// Production replies with 500; other endpoints echo.
    ProductionRejects,
}

/// In-memory stand-in for the remote API that records every call.
#[derive(Clone)]
struct StubApi {
    mode: Mode,
    next_id: Arc<AtomicI64>,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl StubApi {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            next_id: Arc::new(AtomicI64::new(100)),
            calls: Arc::default(),
        }
    }

    fn calls_to(&self, suffix: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(url, _)| url.ends_with(suffix))
            .map(|(_, body)| body.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for StubApi {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpReply, SeedError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));

        let path = url.trim_start_matches(BASE);
        if self.mode == Mode::EmployeesDown && path == "/empleados" {
            return Err(SeedError::Transport {
                url: url.to_string(),
                message: "connection refused".into(),
            });
        }
        if self.mode == Mode::ProductionRejects && path == "/empleados/create-produccion" {
            return Ok(HttpReply {
                status: 500,
                body: r#"{"message": "Internal Server Error"}"#.into(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut reply = body.clone();
        let key = match path {
            "/empleados" => "id_empleado",
            "/empleados/create-asistencia" => "id_reg_a",
            _ => "id_reg_p",
        };
        reply[key] = json!(id);

        Ok(HttpReply {
            status: 201,
            body: reply.to_string(),
        })
    }
}

#[derive(Clone, Default)]
struct CountingDelay {
    waits: Arc<Mutex<usize>>,
}

#[async_trait]
impl Delay for CountingDelay {
    async fn wait(&self, _duration: Duration) {
        *self.waits.lock().unwrap() += 1;
    }
}

fn pipeline(api: &StubApi, delay: &CountingDelay, employees: usize, concurrency: usize) -> Pipeline {
    let dispatcher = Dispatcher::new(
        BASE,
        Box::new(api.clone()),
        Box::new(delay.clone()),
        RetryPolicy::default(),
    );
    Pipeline::new(dispatcher, FactGenerator::seeded(2025), employees, 2025, concurrency)
}

fn completed(outcome: PipelineOutcome) -> SeedReport {
    match outcome {
        PipelineOutcome::Completed(report) => report,
        other => panic!("expected a completed run, got {other:?}"),
    }
}

fn two_days() -> Vec<NaiveDate> {
    vec![
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
    ]
}

#[tokio::test]
async fn seeds_every_date_for_every_employee() {
    let api = StubApi::new(Mode::Echo);
    let delay = CountingDelay::default();

    let outcome = pipeline(&api, &delay, 2, 1)
        .run_with_calendar(&two_days())
        .await;

    assert_eq!(
        outcome,
        PipelineOutcome::Completed(SeedReport {
            employees_requested: 2,
            employees_created: 2,
            attendance_created: 4,
            attendance_failed: 0,
            production_created: 4,
            production_failed: 0,
        })
    );

    assert_eq!(api.calls_to("/empleados").len(), 2);
    let attendance = api.calls_to("/create-asistencia");
    let production = api.calls_to("/create-produccion");
    assert_eq!(attendance.len(), 4);
    assert_eq!(production.len(), 4);

    // the first two ids handed out belong to the employees
    let captured = [json!(100), json!(101)];
    for body in attendance.iter().chain(production.iter()) {
        assert!(captured.contains(&body["empleado"]), "unknown employee in {body}");
    }
    for body in &attendance {
        assert_eq!(body["horasTrabajadas"], json!(9.0));
    }
    assert_eq!(*delay.waits.lock().unwrap(), 0);
}

#[tokio::test]
async fn dates_outer_employees_inner_attendance_first() {
    let api = StubApi::new(Mode::Echo);
    let delay = CountingDelay::default();

    pipeline(&api, &delay, 2, 1)
        .run_with_calendar(&two_days())
        .await;

    let order: Vec<(String, Value, Value)> = api
        .calls
        .lock()
        .unwrap()
        .iter()
        .skip(2)
        .map(|(url, body)| {
            let kind = url.rsplit('/').next().unwrap().to_string();
            (kind, body["fecha"].clone(), body["empleado"].clone())
        })
        .collect();

    let expected: Vec<(String, Value, Value)> = [
        ("create-asistencia", "2025-01-01", 100),
        ("create-produccion", "2025-01-01", 100),
        ("create-asistencia", "2025-01-01", 101),
        ("create-produccion", "2025-01-01", 101),
        ("create-asistencia", "2025-01-02", 100),
        ("create-produccion", "2025-01-02", 100),
        ("create-asistencia", "2025-01-02", 101),
        ("create-produccion", "2025-01-02", 101),
    ]
    .into_iter()
    .map(|(kind, fecha, id)| (kind.to_string(), json!(fecha), json!(id)))
    .collect();

    assert_eq!(order, expected);
}

#[tokio::test]
async fn empty_population_stops_before_dependent_records() {
    let api = StubApi::new(Mode::EmployeesDown);
    let delay = CountingDelay::default();

    let outcome = pipeline(&api, &delay, 3, 1)
        .run_with_calendar(&two_days())
        .await;

    assert_eq!(outcome, PipelineOutcome::EmptyPopulation);
    assert_eq!(api.calls_to("/empleados").len(), 3 * 10);
    assert!(api.calls_to("/create-asistencia").is_empty());
    assert!(api.calls_to("/create-produccion").is_empty());
    assert_eq!(*delay.waits.lock().unwrap(), 3 * 9);
}

/// Shared buffer the fmt subscriber writes into.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes).lines().map(str::to_owned).collect()
    }
}

#[tokio::test]
async fn empty_population_is_reported_once() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let api = StubApi::new(Mode::EmployeesDown);
    let outcome = pipeline(&api, &CountingDelay::default(), 2, 1)
        .run_with_calendar(&two_days())
        .await;

    assert_eq!(outcome, PipelineOutcome::EmptyPopulation);
    let lines = logs.lines();
    let aborts: Vec<&String> = lines.iter().filter(|l| l.contains("aborted")).collect();
    assert_eq!(aborts.len(), 1, "{lines:#?}");
    assert!(aborts[0].contains("ERROR"));
    assert!(aborts[0].contains("No se generaron empleados"));
    assert!(!lines.iter().any(|l| l.contains("Seeding finished")));
}

#[tokio::test]
async fn rejected_records_are_counted_not_fatal() {
    let api = StubApi::new(Mode::ProductionRejects);
    let delay = CountingDelay::default();

    let outcome = pipeline(&api, &delay, 2, 1)
        .run_with_calendar(&two_days())
        .await;

    let report = completed(outcome);
    assert_eq!(report.attendance_created, 4);
    assert_eq!(report.production_created, 0);
    assert_eq!(report.production_failed, 4);
    // error statuses are answers, not transport failures
    assert_eq!(api.calls_to("/create-produccion").len(), 4);
}

#[tokio::test]
async fn bounded_concurrency_submits_the_same_matrix() {
    let api = StubApi::new(Mode::Echo);
    let delay = CountingDelay::default();

    let outcome = pipeline(&api, &delay, 5, 3)
        .run_with_calendar(&two_days())
        .await;

    let report = completed(outcome);
    assert_eq!(report.attendance_created, 10);
    assert_eq!(report.production_created, 10);

    let mut pairs: Vec<(Value, Value)> = api
        .calls_to("/create-asistencia")
        .iter()
        .map(|b| (b["fecha"].clone(), b["empleado"].clone()))
        .collect();
    pairs.sort_by_key(|(f, e)| (f.to_string(), e.as_i64()));
    pairs.dedup();
    assert_eq!(pairs.len(), 10);
}

#[tokio::test]
async fn run_uses_the_full_year() {
    let api = StubApi::new(Mode::Echo);
    let delay = CountingDelay::default();

    let outcome = pipeline(&api, &delay, 1, 1).run().await;

    let report = completed(outcome);
    assert_eq!(report.attendance_created, 365);
    assert_eq!(report.production_created, 365);

    let attendance = api.calls_to("/create-asistencia");
    assert_eq!(attendance.first().unwrap()["fecha"], json!("2025-01-01"));
    assert_eq!(attendance.last().unwrap()["fecha"], json!("2025-12-31"));
}
