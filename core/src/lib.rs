//! Client-side data access for the travel booking backend.
//!
//! # Overview
//! The backend is inconsistent: the same concept arrives under different
//! keys (`nama`, `name`, `nama_paket`), lists come bare, under `data`, or
//! under a paginated `results`, and write endpoints disagree on field names.
//! This crate absorbs all of that. Callers get one canonical shape per
//! entity and hand over one canonical payload per write.
//!
//! # Design
//! - [`raw`] and [`entities`] turn untyped records into entities through
//!   declarative field tables; normalization never fails.
//! - [`encode`] renames outgoing fields per endpoint and switches to
//!   multipart when a file is attached.
//! - [`transport::Transport`] builds requests and classifies failures into
//!   the three [`ApiError`] kinds. The actual round-trip is behind
//!   [`HttpExecutor`] (host-does-IO), with [`UreqExecutor`] as the
//!   production implementation.
//! - [`TravelApi`] composes the above into the operations a UI calls.
//! - The signed-in state is an explicit [`Session`] handle passed in at
//!   construction; nothing here is global.

pub mod api;
pub mod config;
pub mod date;
pub mod encode;
pub mod entities;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod http;
pub mod raw;
pub mod routes;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

pub use api::TravelApi;
pub use config::ClientConfig;
pub use encode::{Attachment, MultipartForm};
pub use error::{ApiError, ApiResult, ExecutorError};
pub use executor::UreqExecutor;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use routes::Routes;
pub use session::{Session, SessionState};
pub use transport::{HttpExecutor, Transport};
