use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::models::RemoteId;

pub const CLOCK_IN_HOUR: u32 = 8;
pub const CLOCK_OUT_HOUR: u32 = 17;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    EnTurno,
    Finalizado,
}

/// Body of `POST /empleados/create-asistencia`.
///
/// The remote API reads the instants under both `horaEntrada`/`horaSalida` and
/// `entrada`/`salida`, so both spellings are sent.
#[derive(Debug, Clone, Serialize)]
pub struct NewAttendance {
    pub fecha: NaiveDate,
    #[serde(rename = "horaEntrada")]
    pub hora_entrada: NaiveDateTime,
    #[serde(rename = "horaSalida")]
    pub hora_salida: NaiveDateTime,
    pub entrada: NaiveDateTime,
    pub salida: NaiveDateTime,
    pub status: AttendanceStatus,
    pub empleado: RemoteId,
    #[serde(rename = "horasTrabajadas")]
    pub horas_trabajadas: f64,
}

impl NewAttendance {
    /// Standard 08:00–17:00 day for `empleado` on `fecha`.
    pub fn standard_day(fecha: NaiveDate, empleado: RemoteId, status: AttendanceStatus) -> Self {
        let entrada = fecha.and_time(at_hour(CLOCK_IN_HOUR));
        let salida = fecha.and_time(at_hour(CLOCK_OUT_HOUR));

        Self {
            fecha,
            hora_entrada: entrada,
            hora_salida: salida,
            entrada,
            salida,
            status,
            empleado,
            horas_trabajadas: elapsed_hours(entrada, salida),
        }
    }
}

fn at_hour(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
}

/// Real-valued hours between two instants.
pub fn elapsed_hours(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceCreated {
    pub id_reg_a: RemoteId,
    pub fecha: String,
    #[serde(rename = "horaEntrada")]
    pub hora_entrada: String,
}
