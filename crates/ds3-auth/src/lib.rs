//! Request signing for the DS3 client.
//!
//! DS3 authenticates every request with the legacy S3 HMAC-SHA1 scheme. The
//! `Authorization` header has the format:
//!
//! ```text
//! AWS <AccessId>:<Signature>
//! ```
//!
//! where `Signature = Base64(HMAC-SHA1(SecretKey, StringToSign))`.
//!
//! # Usage
//!
//! ```rust
//! use ds3_auth::{Credentials, SignatureInput, authorization_header, sign};
//!
//! let creds = Credentials::new("AKID", "secret");
//! let signature = sign(
//!     creds.secret_key(),
//!     &SignatureInput::new("GET", "/mybucket", "Sat, 28 Feb 2026 12:00:00 GMT"),
//! )
//! .unwrap();
//!
//! let header = authorization_header(&creds, &signature);
//! assert!(header.starts_with("AWS AKID:"));
//! ```
//!
//! # Modules
//!
//! - [`credentials`] - Access id / secret key pair
//! - [`date`] - `Date` header formatting
//! - [`error`] - Signing error types
//! - [`signer`] - String-to-sign construction and HMAC-SHA1 signing

pub mod credentials;
pub mod date;
pub mod error;
pub mod signer;

pub use credentials::Credentials;
pub use date::{http_date, http_date_now};
pub use error::AuthError;
pub use signer::{
    SignatureInput, authorization_header, build_string_to_sign, canonicalize_amz_headers, sign,
};
