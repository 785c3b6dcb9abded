pub mod netting;
pub mod report;
pub mod schedule;
