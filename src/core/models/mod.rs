pub mod audit;
pub mod autopay;
pub mod budget;
pub mod emi;
pub mod expense;
pub mod group;
pub mod share;
pub mod transaction;
pub mod user;
