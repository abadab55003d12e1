/// Write endpoints of the remote HRM API, relative to the configured base.
//
// POST {base}/empleados
//  └─ returns id_empleado
//
// POST {base}/empleados/create-asistencia   (needs id_empleado)
// POST {base}/empleados/create-produccion   (needs id_empleado)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Endpoint {
    CreateEmployee,
    CreateAttendance,
    CreateProduction,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::CreateEmployee => "/empleados",
            Endpoint::CreateAttendance => "/empleados/create-asistencia",
            Endpoint::CreateProduction => "/empleados/create-produccion",
        }
    }

    pub fn url(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}
