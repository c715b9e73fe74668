//! Signs and submits a B12 job application.
//!
//! # Overview
//!
//! A submission is a small JSON [`Payload`] built from a [`SubmitterConfig`] and the current UTC
//! time. The payload is serialized to canonical JSON (sorted keys, no whitespace, ASCII-only
//! escaping), signed with HMAC-SHA256 using a shared secret, and POSTed to the submission
//! endpoint with the signature in the `X-Signature-256` header. A successful submission yields a
//! [`Receipt`].
//!
//! ```no_run
//! # use b12_apply::SubmitterConfig;
//! let submitter = SubmitterConfig::from_env()?.to_submitter()?;
//! let receipt = submitter.submit()?;
//! println!("{receipt}");
//! # Ok::<(), b12_apply::Error>(())
//! ```
//!
//! # Configuration
//!
//! [`SubmitterConfig::from_env`] reads `FULL_NAME`, `CV_LINK`, `EMAIL`, `REPOSITORY_LINK`,
//! `ACTION_RUN_LINK` and `SIGNING_SECRET`. All of them are required and must be non-empty.
//!
//! # Error Handling
//!
//! Errors are represented by the [`Error`] enum. Nothing is retried: every error is final and is
//! meant to be reported by the caller. [`Error::is_configuration`] tells apart problems detected
//! before any request was made.
//!
//! # Logging
//!
//! The crate uses the [`log`](https://docs.rs/log/latest/log/) crate with the `b12` target. The
//! signing secret is never logged.

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

pub mod canonical;
mod config;
mod error;
mod payload;
pub mod signature;
mod submitter;

pub use config::{
    SubmitterConfig, ACTION_RUN_LINK, CV_LINK, EMAIL, FULL_NAME, REPOSITORY_LINK,
    REQUIRED_VARIABLES, SIGNING_SECRET,
};
pub use error::{Error, Result};
pub use payload::{format_timestamp, Payload};
pub use submitter::{Receipt, Submitter};
