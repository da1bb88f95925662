//! Client side state machine of the contact form.
//!
//! ```text
//! Idle --submit--> Submitting --ok--> Success --edit--> Idle
//!                      |
//!                      +--err--> Error --delay--> Idle
//! ```

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use portfolio_extern_contracts::ContactApiService;
use portfolio_models::contact::ContactFormData;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl FormStatus {
    pub fn can_submit(self) -> bool {
        !matches!(self, Self::Submitting | Self::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Mobile,
    Message,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub status: FormStatus,
    pub data: ContactFormData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactFormConfig {
    /// Time spent in [`FormStatus::Error`] before falling back to
    /// [`FormStatus::Idle`].
    pub error_reset_delay: Duration,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self {
            error_reset_delay: Duration::from_secs(3),
        }
    }
}

#[derive(Debug)]
pub struct ContactForm<Api> {
    api: Api,
    config: ContactFormConfig,
    state: Arc<watch::Sender<FormState>>,
    reset_task: Mutex<Option<JoinHandle<()>>>,
}

impl<Api> ContactForm<Api>
where
    Api: ContactApiService,
{
    pub fn new(api: Api, config: ContactFormConfig) -> Self {
        Self {
            api,
            config,
            state: Arc::new(watch::Sender::new(FormState::default())),
            reset_task: Mutex::new(None),
        }
    }

    pub fn status(&self) -> FormStatus {
        self.state.borrow().status
    }

    pub fn data(&self) -> ContactFormData {
        self.state.borrow().data.clone()
    }

    /// Observe every state change, including the automatic reset after an
    /// error.
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    pub fn can_submit(&self) -> bool {
        self.status().can_submit()
    }

    /// Edit one input. Editing a successfully submitted form returns it to
    /// [`FormStatus::Idle`].
    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|state| {
            *match field {
                FormField::Name => &mut state.data.name,
                FormField::Email => &mut state.data.email,
                FormField::Mobile => &mut state.data.mobile,
                FormField::Message => &mut state.data.message,
            } = value;

            if state.status == FormStatus::Success {
                state.status = FormStatus::Idle;
            }
        });
    }

    /// Send the current inputs to the contact endpoint.
    ///
    /// The inputs are captured and the status switches to
    /// [`FormStatus::Submitting`] before the request is sent. While the form
    /// cannot be submitted this is a no-op returning the current status.
    pub async fn submit(&self) -> FormStatus {
        let mut captured = None;
        self.state.send_if_modified(|state| {
            if !state.status.can_submit() {
                return false;
            }
            state.status = FormStatus::Submitting;
            captured = Some(state.data.clone());
            true
        });

        let Some(data) = captured else {
            debug!(status = ?self.status(), "ignoring submit");
            return self.status();
        };

        self.cancel_reset();

        match self.api.submit(&data).await {
            Ok(()) => {
                info!("contact form submitted");
                self.state.send_modify(|state| {
                    state.status = FormStatus::Success;
                    state.data.clear();
                });
                FormStatus::Success
            }
            Err(err) => {
                warn!("Failed to submit contact form: {err:#}");
                self.state
                    .send_modify(|state| state.status = FormStatus::Error);
                self.schedule_reset();
                FormStatus::Error
            }
        }
    }

    fn schedule_reset(&self) {
        let state = Arc::clone(&self.state);
        let delay = self.config.error_reset_delay;

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.send_if_modified(|state| {
                let reset = state.status == FormStatus::Error;
                if reset {
                    state.status = FormStatus::Idle;
                }
                reset
            });
        });

        if let Some(previous) = self.reset_task().replace(task) {
            previous.abort();
        }
    }
}

impl<Api> ContactForm<Api> {
    fn reset_task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.reset_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel_reset(&self) {
        if let Some(task) = self.reset_task().take() {
            task.abort();
        }
    }
}

impl<Api> Drop for ContactForm<Api> {
    fn drop(&mut self) {
        self.cancel_reset();
    }
}
