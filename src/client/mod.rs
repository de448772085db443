//! HTTP client for the message board and the charge-adjustment workflow
//! built on top of it.

mod api;
mod charge;
mod error;

pub use api::ApiClient;
pub use charge::{ChargeApi, ChargeWorkflow, Controls, ControlsGuard};
pub use error::ClientError;
