//! Generic runtime for the entry screen.
//!
//! The Runtime drives the event loop for one screen session, coordinating
//! between:
//! - [`GateController`]: gate state machine
//! - [`Driver`]: platform-specific I/O

use crate::{Driver, GateAction, GateConfig, GateController};

/// Generic runtime that orchestrates a [`GateController`] and a [`Driver`].
pub struct Runtime<D: Driver> {
    driver: D,
    config: GateConfig,
    /// Controller of the current or most recent session. `None` before the
    /// first [`Runtime::run`].
    controller: Option<GateController>,
    /// Sessions started so far.
    sessions: u64,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime with the given driver and configuration.
    pub fn new(driver: D, config: GateConfig) -> Self {
        Self { driver, config, controller: None, sessions: 0 }
    }

    /// Run one screen session.
    ///
    /// Each call builds a fresh controller, initializes it against the host
    /// and then loops:
    /// 1. Polls the next event from the driver
    /// 2. Feeds it to the controller
    /// 3. Executes the resulting actions through the driver
    ///
    /// The session ends when the driver returns `None` or a
    /// [`crate::GateEvent::TornDown`] has been processed.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        self.sessions += 1;
        tracing::info!(session = self.sessions, "entry screen activated");

        let controller =
            self.controller.insert(GateController::new(self.config.clone(), self.sessions));
        let actions = controller.initialize(&self.driver);
        self.process_actions(actions)?;

        while let Some(event) = self.driver.poll_event().await? {
            let Some(controller) = self.controller.as_mut() else {
                break;
            };
            let actions = controller.handle(&self.driver, event);
            let torn_down = controller.is_torn_down();
            self.process_actions(actions)?;

            if torn_down {
                break;
            }
        }

        if let Some(controller) = self.controller.as_mut().filter(|c| !c.is_torn_down()) {
            controller.teardown();
        }
        Ok(())
    }

    /// Execute actions returned by the controller.
    fn process_actions(&mut self, actions: Vec<GateAction>) -> Result<(), D::Error> {
        for action in actions {
            match action {
                GateAction::Render(view) => self.driver.render(&view)?,
                GateAction::RequestEnableAdapter { id } => self.driver.request_enable_adapter(id)?,
                GateAction::RequestPermissions { id, set } => {
                    self.driver.request_permissions(id, set)?;
                },
                GateAction::Navigate(target) => self.driver.navigate(target)?,
                GateAction::Notify { notice, duration } => self.driver.notify(&notice, duration)?,
            }
        }
        Ok(())
    }

    /// Controller of the current or most recent session.
    ///
    /// `None` until [`Runtime::run`] has started a session.
    pub fn controller(&self) -> Option<&GateController> {
        self.controller.as_ref()
    }

    /// Get a reference to the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
