//! License selection form and pull request driver.
//!
//! A user picks a license, the form asks the backend which parameters the
//! license needs, renders an input per parameter, keeps the submit triggers
//! disabled until every input is filled, and finally asks the backend to open
//! a pull request applying the filled license to the trigger's repository.
//!
//! The form logic lives in [`controller`] and talks to the page only through
//! the [`dom::Document`] capability and to the network only through
//! [`api::LicenseBackend`].

pub mod actions;
pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod controller;
pub mod display;
pub mod dom;
pub mod error;
pub mod logging;
pub mod models;
pub mod page;

pub use api::{HttpBackend, LicenseBackend};
pub use controller::{Event, LicenseFormController, Outcome};
pub use dom::{Document, ElementId, EventKind, MemoryDocument};
pub use error::{ApiError, AppError, FormError};
pub use models::{PullRequest, SubmissionPayload};
