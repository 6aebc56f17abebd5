//! Driver trait for abstracting host I/O.
//!
//! The [`Driver`] trait decouples the gate runtime from a specific platform.
//! Each front end implements it to supply host queries, deliver events and
//! carry out the controller's actions, while the generic [`crate::Runtime`]
//! handles all orchestration.

use std::future::Future;

use crate::{
    Destination, GateEvent, GateView, HostQuery, Notice, NoticeDuration, PermissionSet, RequestId,
};

/// Abstracts the host platform for the gate runtime.
///
/// The query half comes from the [`HostQuery`] supertraits. The methods here
/// are the outbound half: requests are fire-and-forget and their results come
/// back later through [`Driver::poll_event`].
///
/// # Implementations
///
/// - **Simulation**: [`crate::SimHost`], scripted and fully deterministic
/// - **Terminal**: `cyberchat-sim`, ratatui rendering and crossterm input
pub trait Driver: HostQuery + Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next event.
    ///
    /// Returns `None` once the host has closed the screen.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<GateEvent>, Self::Error>> + Send;

    /// Draw the entry screen.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, view: &GateView) -> Result<(), Self::Error>;

    /// Show the adapter enable dialog. Answer with
    /// [`GateEvent::EnableAdapterResult`] carrying `id`.
    fn request_enable_adapter(&mut self, id: RequestId) -> Result<(), Self::Error>;

    /// Show one permission dialog for every permission in `set`. Answer with
    /// [`GateEvent::PermissionResult`] carrying `id`.
    fn request_permissions(&mut self, id: RequestId, set: PermissionSet) -> Result<(), Self::Error>;

    /// Open a downstream screen.
    fn navigate(&mut self, target: Destination) -> Result<(), Self::Error>;

    /// Show a transient notification.
    fn notify(&mut self, notice: &Notice, duration: NoticeDuration) -> Result<(), Self::Error>;
}
