use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::dispatch::{Dispatcher, HttpReply};
use crate::model::attendance::{AttendanceCreated, NewAttendance};
use crate::model::production::{NewProduction, ProductionCreated};
use crate::models::RemoteId;
use crate::routes::Endpoint;
use crate::utils::facts::FactGenerator;

/// Replies for one (date, employee) pair. `None` means that submission never
/// reached the API.
#[derive(Debug, Clone, Default)]
pub struct RecordPair {
    pub attendance: Option<HttpReply>,
    pub production: Option<HttpReply>,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PairStatus {
    pub attendance_ok: bool,
    pub production_ok: bool,
}

pub fn attendance_for(facts: &FactGenerator, fecha: NaiveDate, empleado: RemoteId) -> NewAttendance {
    NewAttendance::standard_day(fecha, empleado, facts.attendance_status())
}

pub fn production_for(facts: &FactGenerator, fecha: NaiveDate, empleado: RemoteId) -> NewProduction {
    NewProduction {
        fecha,
        turno: facts.shift(),
        unidades_producidas: facts.quantity(),
        empleado,
    }
}

/// Phase 2 unit of work: submit the attendance record, then the production
/// record, for `employee` on `date`. A failed attendance does not stop the
/// production submission.
pub async fn register(
    dispatcher: &Dispatcher,
    facts: &FactGenerator,
    date: NaiveDate,
    employee: &RemoteId,
) -> RecordPair {
    let attendance = attendance_for(facts, date, employee.clone());
    let attendance = dispatcher.submit(Endpoint::CreateAttendance, &attendance).await;

    let production = production_for(facts, date, employee.clone());
    let production = dispatcher.submit(Endpoint::CreateProduction, &production).await;

    RecordPair {
        attendance,
        production,
    }
}

impl RecordPair {
    /// Log each half of the pair and tell which ones the API accepted.
    pub fn report(&self, date: NaiveDate, employee: &RemoteId) -> PairStatus {
        let attendance_ok = match read::<AttendanceCreated>(&self.attendance, Endpoint::CreateAttendance) {
            Some(a) => {
                info!("Asistencia {} -> {} {} {}", a.id_reg_a, employee, a.fecha, a.hora_entrada);
                true
            }
            None => {
                warn!(%date, %employee, "Attendance record not created");
                false
            }
        };

        let production_ok = match read::<ProductionCreated>(&self.production, Endpoint::CreateProduction) {
            Some(p) => {
                info!(
                    "Producción {} -> {} {} {}",
                    p.id_reg_p, employee, p.fecha, p.unidades_producidas
                );
                true
            }
            None => {
                warn!(%date, %employee, "Production record not created");
                false
            }
        };

        PairStatus {
            attendance_ok,
            production_ok,
        }
    }
}

fn read<T: serde::de::DeserializeOwned>(reply: &Option<HttpReply>, endpoint: Endpoint) -> Option<T> {
    let reply = reply.as_ref()?;
    reply
        .parse(endpoint)
        .map_err(|e| error!(error = %e, "Unusable reply"))
        .ok()
}
