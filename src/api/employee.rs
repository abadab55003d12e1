use tracing::{error, info, warn};

use crate::dispatch::Dispatcher;
use crate::model::employee::EmployeeCreated;
use crate::models::RemoteId;
use crate::routes::Endpoint;
use crate::utils::facts::FactGenerator;

/// Phase 1: create `total` employees, one after another.
///
/// Returns the server-issued ids in request order. Employees whose dispatch
/// failed outright, or whose reply could not be read, are skipped.
pub async fn register_employees(
    dispatcher: &Dispatcher,
    facts: &FactGenerator,
    total: usize,
) -> Vec<RemoteId> {
    let mut ids = Vec::with_capacity(total);

    for index in 1..=total {
        let payload = facts.employee();

        let Some(reply) = dispatcher.submit(Endpoint::CreateEmployee, &payload).await else {
            warn!(index, total, "Employee skipped, request never reached the API");
            continue;
        };

        match reply.parse::<EmployeeCreated>(Endpoint::CreateEmployee) {
            Ok(created) => {
                info!(
                    "Empleado registrado: {} - {} {} {}",
                    created.id_empleado, created.nombre, created.apellido_p, created.apellido_m
                );
                ids.push(created.id_empleado);
            }
            Err(e) => {
                error!(error = %e, index, total, "Employee skipped");
            }
        }
    }

    ids
}
