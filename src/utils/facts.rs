//! Random but schema-valid field values for seeded records.
//!
//! Every draw goes through one shared [`StdRng`]; seeding it makes a whole run
//! reproducible.

use std::sync::{Mutex, MutexGuard};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use strum::IntoEnumIterator;

use crate::model::attendance::AttendanceStatus;
use crate::model::employee::{Area, FullName, NewEmployee, Shift};
use crate::model::production::MAX_UNITS_PRODUCED;

pub const FIRST_NAMES: &[&str] = &[
    "Juan", "Carlos", "Luis", "Miguel", "Jose", "Jorge", "Felipe", "Hector", "Marco", "Ricardo",
    "Fernando", "Pablo", "Rafael", "Alberto", "Andres", "Roberto", "Eduardo", "Cristian", "Mario",
    "Diego", "Omar", "Sergio", "Francisco", "Adrian", "Hernan", "Erick", "Kevin", "Oscar",
    "Manuel", "Víctor", "Alan", "Emilio", "Ramiro", "Leonardo", "Esteban", "Bruno", "Mauricio",
    "Gustavo", "Elías", "Tomás",
];

pub const SURNAMES: &[&str] = &[
    "Hernandez", "Martinez", "Gomez", "Perez", "Lopez", "Garcia", "Rodriguez", "Sanchez",
    "Ramirez", "Cruz", "Torres", "Rivera", "Gonzalez", "Flores", "Vargas", "Castillo", "Ortega",
    "Ruiz", "Aguilar", "Chavez", "Dominguez", "Silva", "Navarro", "Salazar", "Mendoza", "Ponce",
    "Morales", "Soto", "Camacho", "Cortés", "Arias", "Palacios", "Estrada", "Valdez", "Montoya",
    "Ramos",
];

pub const DAILY_RATE_MIN: f64 = 200.0;
pub const DAILY_RATE_SPAN: f64 = 350.0;

pub struct FactGenerator {
    rng: Mutex<StdRng>,
}

impl FactGenerator {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // a panic while holding the lock cannot leave the rng in a bad state
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Uniform pick from a non-empty candidate set.
    pub fn pick<T: Clone>(&self, candidates: &[T]) -> T {
        candidates
            .choose(&mut *self.rng())
            .cloned()
            .expect("candidate sets are non-empty constants")
    }

    pub fn pick_variant<E: IntoEnumIterator + Clone>(&self) -> E {
        let variants: Vec<E> = E::iter().collect();
        self.pick(&variants)
    }

    /// Daily rate in `[200, 550)`.
    pub fn daily_rate(&self) -> f64 {
        DAILY_RATE_MIN + self.rng().r#gen::<f64>() * DAILY_RATE_SPAN
    }

    /// Units produced in `[0, 3000]`.
    pub fn quantity(&self) -> u32 {
        self.rng().gen_range(0..=MAX_UNITS_PRODUCED)
    }

    pub fn full_name(&self) -> FullName {
        FullName {
            first: self.pick(FIRST_NAMES).to_string(),
            paternal: self.pick(SURNAMES).to_string(),
            maternal: self.pick(SURNAMES).to_string(),
        }
    }

    pub fn shift(&self) -> Shift {
        self.pick_variant()
    }

    pub fn attendance_status(&self) -> AttendanceStatus {
        self.pick_variant()
    }

    pub fn employee(&self) -> NewEmployee {
        let name = self.full_name();
        let area: Area = self.pick_variant();
        let turno = self.shift();
        NewEmployee::new(name, area, turno, self.daily_rate())
    }
}
