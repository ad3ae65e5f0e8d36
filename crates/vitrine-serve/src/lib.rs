//! # vitrine-serve
//!
//! Two read-only HTTP routes for the demo catalogue:
//!
//! - `GET /inline/<page>` serves one of three allow-listed HTML pages with
//!   its stylesheet and script inlined.
//! - `GET /markdown?file=<name>` streams a markdown file from a fixed
//!   directory, refusing anything that would leave it.
//!
//! ```rust,no_run
//! use vitrine_serve::{serve, ServeConfig};
//!
//! #[tokio::main]
//! async fn main() -> vitrine_serve::Result<()> {
//!     let config = ServeConfig {
//!         markdown_dir: "docs".into(),
//!         ..Default::default()
//!     };
//!     serve(config).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod routes;
mod server;

pub use config::ServeConfig;
pub use error::{Result, ServeError};
pub use http::{Request, Response, Status};
pub use server::{serve, Server};
