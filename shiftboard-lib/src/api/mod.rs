//! Backend endpoints
//!
//! Every endpoint is a method on [`ShiftboardClient`](crate::ShiftboardClient);
//! this module holds their parameter and response helpers.

mod auth;
mod dashboard;
mod employees;
mod params;
mod reports;
mod request;
mod shifts;
mod solver;
mod watch;

pub use auth::*;
pub use dashboard::*;
pub use params::*;
pub use watch::*;
