//! D410 Partner Insights: shared contracts for the customer and supplier
//! insights dashboards.
//!
//! Both dashboards are one implementation keyed by [`PartnerRole`].

pub mod dto;
pub mod filter;
pub mod role;

pub use dto::*;
pub use filter::*;
pub use role::*;
