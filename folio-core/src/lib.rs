//! # Folio Core
//!
//! Core library for the Folio studio backend: the persistence layer behind
//! student portfolios and the Google Drive media reconciler.
//!
//! ## Overview
//!
//! - **Media reconciliation**: [`reconcile::MediaReconciler`] makes a
//!   project's Drive-backed media records match the live contents of a
//!   Drive folder (upsert every listed file, then delete what disappeared)
//! - **Service enrollments**: [`reconcile::EnrollmentReconciler`] applies
//!   the same upsert/delete-by-exclusion pattern to service↔student links
//! - **Drive integration**: [`drive::GoogleDriveClient`] lists folders with
//!   a read-only service-account token
//! - **Persistence**: repository ports in [`database::ports`] with
//!   PostgreSQL adapters built on SQLx
//!
//! ## Feature Flags
//!
//! - `test-utils`: in-memory repositories and a scripted Drive listing
//! - `pg-tests`: enables the PostgreSQL adapter test-suite

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Versioned HTTP paths and request/response payloads
pub mod api;

/// Unit of work aggregating repository ports
pub mod application;

/// Bearer session validation
pub mod auth;

/// Repository ports and PostgreSQL adapters
pub mod database;

/// Google Drive folder listing
pub mod drive;

/// Error types and error handling utilities
pub mod error;

/// Convergence routines for Drive media and service enrollments
pub mod reconcile;

/// In-memory adapters for tests
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod testing;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use error::{FolioError, Result};
