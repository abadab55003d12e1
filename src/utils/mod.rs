pub mod calendar;
pub mod facts;
