use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::employee::Shift;
use crate::models::RemoteId;

pub const MAX_UNITS_PRODUCED: u32 = 3000;

/// Body of `POST /empleados/create-produccion`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduction {
    pub fecha: NaiveDate,
    pub turno: Shift,
    #[serde(rename = "unidadesProducidas")]
    pub unidades_producidas: u32,
    pub empleado: RemoteId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionCreated {
    pub id_reg_p: RemoteId,
    pub fecha: String,
    #[serde(rename = "unidadesProducidas")]
    pub unidades_producidas: u32,
}
