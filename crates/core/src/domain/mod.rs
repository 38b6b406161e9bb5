pub mod catalog;
pub mod report;
