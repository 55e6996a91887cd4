//! Azure AD Graph client.
//!
//! Every REST operation is described by a static [`Endpoint`] descriptor.
//! One builder turns a descriptor plus call [`Params`] into a
//! [`PreparedRequest`], and one executor sends it and normalizes the reply
//! into an [`Envelope`]:
//!
//! ```no_run
//! use aadgraph_sdk::{ClientConfig, GraphClient, Params, endpoints};
//!
//! # async fn run() -> Result<(), aadgraph_sdk::GraphError> {
//! let client = GraphClient::new(
//!     ClientConfig::new("https://graph.windows.net")
//!         .with_tenant_id("contoso.onmicrosoft.com")
//!         .with_bearer_token("eyJ0eXAi..."),
//! )?;
//! let envelope = client
//!     .call(&endpoints::GET_USER, Params::new().text("userId", "alice@contoso.com"))
//!     .await?;
//! println!("{:?}", envelope.json());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod descriptor;
pub mod endpoints;
pub mod error;
pub mod params;
pub mod request;
pub mod response;

pub use client::{ClientConfig, DEFAULT_API_VERSION, DEFAULT_GRAPH_URL, GraphClient};
pub use descriptor::{Endpoint, HttpMethod, Param, ParamLocation};
pub use error::{GraphError, Result};
pub use params::{ParamValue, Params};
pub use request::{PreparedRequest, RequestBody, build_request};
pub use response::{Body, Envelope, ResponseMeta, is_json_media_type};
