//! Two-phase seeding run.
//!
//! ```text
//! Populate ──(0 ids)──> EmptyPopulation
//!    │
//!    └─(n ids)──> Generate history: for date in calendar, for id in ids
//!                   └─ attendance, then production
//! ```
//!
//! Phase 2 pairs are independent of each other, so up to `concurrency`
//! employees of the same date may be in flight at once. Results are still
//! reported in capture order.

use chrono::NaiveDate;
use futures::StreamExt;
use tracing::{error, info};

use crate::api::{employee, records};
use crate::dispatch::Dispatcher;
use crate::models::RemoteId;
use crate::utils::calendar::calendar_for;
use crate::utils::facts::FactGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub employees_requested: usize,
    pub employees_created: usize,
    pub attendance_created: usize,
    pub attendance_failed: usize,
    pub production_created: usize,
    pub production_failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Phase 1 captured no ids; phase 2 never ran.
    EmptyPopulation,
    Completed(SeedReport),
}

pub struct Pipeline {
    dispatcher: Dispatcher,
    facts: FactGenerator,
    total_employees: usize,
    year: i32,
    concurrency: usize,
}

impl Pipeline {
    pub fn new(
        dispatcher: Dispatcher,
        facts: FactGenerator,
        total_employees: usize,
        year: i32,
        concurrency: usize,
    ) -> Self {
        Self {
            dispatcher,
            facts,
            total_employees,
            year,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn run(&self) -> PipelineOutcome {
        let calendar = calendar_for(self.year).await;
        self.run_with_calendar(&calendar).await
    }

    pub async fn run_with_calendar(&self, calendar: &[NaiveDate]) -> PipelineOutcome {
        info!("--- REGISTRANDO EMPLEADOS ---");
        let employees =
            employee::register_employees(&self.dispatcher, &self.facts, self.total_employees).await;

        if employees.is_empty() {
            error!(requested = self.total_employees, "No se generaron empleados, run aborted");
            return PipelineOutcome::EmptyPopulation;
        }

        let mut report = SeedReport {
            employees_requested: self.total_employees,
            employees_created: employees.len(),
            ..SeedReport::default()
        };

        info!("--- REGISTRANDO ASISTENCIAS & PRODUCCIÓN ---");
        for &date in calendar {
            self.generate_day(date, &employees, &mut report).await;
        }

        info!(
            employees = report.employees_created,
            skipped = report.employees_requested - report.employees_created,
            attendance = report.attendance_created,
            attendance_failed = report.attendance_failed,
            production = report.production_created,
            production_failed = report.production_failed,
            "Seeding finished"
        );

        PipelineOutcome::Completed(report)
    }

    async fn generate_day(&self, date: NaiveDate, employees: &[RemoteId], report: &mut SeedReport) {
        let mut pairs = futures::stream::iter(employees)
            .map(|id| async move {
                let pair = records::register(&self.dispatcher, &self.facts, date, id).await;
                (id, pair)
            })
            .buffered(self.concurrency);

        while let Some((id, pair)) = pairs.next().await {
            let status = pair.report(date, id);

            if status.attendance_ok {
                report.attendance_created += 1;
            } else {
                report.attendance_failed += 1;
            }

            if status.production_ok {
                report.production_created += 1;
            } else {
                report.production_failed += 1;
            }
        }
    }
}
