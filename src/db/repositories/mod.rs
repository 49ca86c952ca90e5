pub mod alert;
pub mod dashboard;
pub mod machine;
pub mod product;
pub mod production;
pub mod report;
pub mod role;
pub mod statistics;
pub mod user;
