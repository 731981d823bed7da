//! Application state management for Rose Bedsheet
//!
//! This crate provides observable state containers, the session check seam
//! used at startup, and the view models that hold fetched backend data.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod observable;
pub mod seller;
pub mod session;

pub use observable::Published;
pub use seller::{AttributeList, FetchFailure, FetchFailurePolicy, SellerViewModel};
pub use session::{AuthCheck, AuthCheckError, StaticAuthCheck};
