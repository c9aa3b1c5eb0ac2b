//! modexec — call server-side module functions through a dispenser endpoint.
//!
//! A call posts `use_module`, `call_function` and JSON `args` as a form to the
//! dispenser and classifies the JSON reply: an object with a truthy `errcode`
//! is a [`Failure`], anything else is the success payload.
//!
//! ```no_run
//! use modexec::{ModExec, ModExecConfig};
//! use serde_json::json;
//!
//! # async fn demo() -> Result<(), modexec::ModExecError> {
//! let config = ModExecConfig::default().with_origin("http://localhost:8080");
//! let modexec = ModExec::new(config, false);
//! match modexec.call("Inventory", "list_items", Some(&json!({ "page": 1 }))).await? {
//!     Some(Ok(payload)) => println!("{payload}"),
//!     Some(Err(failure)) => eprintln!("{failure}"),
//!     None => eprintln!("no reply"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod reply;
pub mod transport;

pub use client::{Exchange, ModExec, Phase};
pub use config::{ModExecConfig, Timeouts};
pub use error::{ErrorCode, ModExecError};
pub use reply::{Failure, Reply};
pub use transport::{Connector, FormRequest, HttpConnector, RawResponse, StateChange, Transport};
