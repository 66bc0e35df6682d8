//! Synchronous client for the Form3 organisation accounts API.
//!
//! # Overview
//! Every call runs the same linear pipeline: the request builder resolves a
//! relative path against the configured base URL and encodes the JSON body,
//! a `Transport` performs the round-trip, the classifier turns non-2xx
//! statuses into `ApiError`, and the decoder fills the caller's target type.
//!
//! # Design
//! - `Client` is immutable configuration (base URL, user agent, transport);
//!   services such as `AccountService` borrow it.
//! - Build and parse halves are public, so a host can do its own I/O and
//!   still reuse the classification rules.
//! - `Envelope<T>` is the `{data, links}` wrapper shared by every resource.
//! - No retries, authentication, pagination or caching.
//!
//! ```no_run
//! use form3_core::{AccountData, Client};
//!
//! let client = Client::new().with_base_url("http://localhost:8080");
//! let (root, response) = client.accounts().fetch("ad27e265-9605-4b4b-a0e5-3003ea9cc4dc")?;
//! println!("{} -> {:?}", response.status, root.data.map(|a: AccountData| a.id));
//! # Ok::<(), form3_core::ClientError>(())
//! ```

pub mod accounts;
pub mod client;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub use accounts::{AccountService, ACCOUNTS_PATH};
pub use client::Client;
pub use error::{ApiError, BoxError, ClientError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Response};
pub use transport::{Transport, UreqTransport};
pub use types::{AccountAttributes, AccountData, AccountRoot, Envelope, Links};
