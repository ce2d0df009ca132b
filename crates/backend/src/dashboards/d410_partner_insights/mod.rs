pub mod error;
pub mod markup;
pub mod repository;
pub mod service;
pub mod tables;
pub mod testdata;

pub use error::InsightsError;
