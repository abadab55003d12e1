use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::models::RemoteId;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Area {
    Oficina,
    Produccion,
    Inventario,
}

/// Work shift; shared by employee profiles and production records.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shift {
    Matutino,
    Vespertino,
    Nocturno,
    Mixto,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName {
    pub first: String,
    pub paternal: String,
    pub maternal: String,
}

/// Body of `POST /empleados`.
#[derive(Debug, Clone, Serialize)]
pub struct NewEmployee {
    pub nombre: String,
    pub apellido_p: String,
    pub apellido_m: String,
    pub area: Area,
    pub turno: Shift,
    #[serde(rename = "salarioDiario")]
    pub salario_diario: f64,
    pub activo: bool,
}

impl NewEmployee {
    pub fn new(name: FullName, area: Area, turno: Shift, salario_diario: f64) -> Self {
        Self {
            nombre: name.first,
            apellido_p: name.paternal,
            apellido_m: name.maternal,
            area,
            turno,
            salario_diario,
            activo: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeCreated {
    pub id_empleado: RemoteId,
    pub nombre: String,
    pub apellido_p: String,
    pub apellido_m: String,
}
