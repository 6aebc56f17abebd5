//! Entry gate for CyberChat
//!
//! Pure state machine and generic runtime deciding whether the user may leave
//! the entry screen for device discovery or a chat session. The radio adapter
//! has to be powered on and the OS has to have granted the runtime
//! permissions for the running platform release.
//!
//! # Components
//!
//! - [`GateController`]: gate state machine (adapter state, permission
//!   requests, navigation gating)
//! - [`HostQuery`]: synchronous host queries the controller reads
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver
//! - [`SimHost`]: Deterministic host for tests and simulation

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod config;
mod controller;
mod driver;
mod error;
mod event;
mod host;
mod notice;
mod permission;
mod runtime;
mod sim;
mod state;

pub use action::{Destination, GateAction};
pub use config::GateConfig;
pub use controller::GateController;
pub use driver::Driver;
pub use error::GateError;
pub use event::{GateEvent, UserIntent};
pub use host::{HostQuery, PermissionHost, PlatformVersion, RadioHardwareQuery};
pub use notice::{Notice, NoticeDuration};
pub use permission::{Permission, PermissionGrants, PermissionSet};
pub use runtime::Runtime;
pub use sim::SimHost;
pub use state::{AdapterState, EnableLabel, GateStatus, GateView, PendingRequest, RequestId};
