pub mod employee;
pub mod records;
