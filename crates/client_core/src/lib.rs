use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{CheckItem, CheckItemKey, CheckItemStatus, Vehicle, VehicleId},
    error::CheckSubmitError,
    protocol::CreateCheckRequest,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub mod checklist;
pub mod transport;

pub use checklist::ChecklistConfig;

/// Banner shown for any submission failure that lacks structured details.
pub const SUBMIT_RETRY_MESSAGE: &str = "Failed to submit check. Please try again.";
/// Note length the presentation layer is expected to cap input at. The
/// controller stores whatever it is given; the server is the real bound.
pub const NOTE_MAX_LEN: usize = 300;

/// Read side of the vehicle directory service.
#[async_trait]
pub trait VehicleDirectory: Send + Sync {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>>;
}

/// Write side of the check-persistence service. Implementations classify
/// rejections into [`CheckSubmitError`]; the controller never inspects a raw
/// response.
#[async_trait]
pub trait CheckPersistence: Send + Sync {
    async fn create_check(&self, request: CreateCheckRequest) -> Result<(), CheckSubmitError>;
}

/// State-change notifications for whoever renders the form.
#[derive(Debug, Clone)]
pub enum FormEvent {
    VehiclesLoaded { vehicles: Vec<Vehicle> },
    VehicleLoadFailed { reason: String },
    DraftChanged,
    SubmitStarted,
    CheckRecorded,
    SubmitFailed { validation: bool },
}

/// The in-progress inspection held for one form session. Created pristine,
/// mutated in place by user input, reset after a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftInspection {
    /// Empty string means no vehicle has been selected yet.
    pub selected_vehicle: VehicleId,
    /// Raw text as typed; parsed to a number only at submit time.
    pub odometer_text: String,
    pub note: String,
    /// Exactly one entry per configured checklist key, in configured order.
    pub items: Vec<CheckItem>,
    pub submitting: bool,
    pub banner_error: Option<String>,
    pub field_errors: Vec<String>,
}

impl DraftInspection {
    fn new(checklist: &ChecklistConfig) -> Self {
        Self {
            selected_vehicle: VehicleId::default(),
            odometer_text: String::new(),
            note: String::new(),
            items: checklist.default_checklist(),
            submitting: false,
            banner_error: None,
            field_errors: Vec::new(),
        }
    }
}

struct FormState {
    vehicles: Vec<Vehicle>,
    vehicle_load_error: Option<String>,
    draft: DraftInspection,
}

pub type SuccessCallback = Arc<dyn Fn() + Send + Sync>;

/// Owns one [`DraftInspection`] and drives the submission workflow against
/// the two external services. All edits are synchronous; the only suspension
/// points are the vehicle-list fetch and the submission call.
pub struct CheckFormController {
    directory: Arc<dyn VehicleDirectory>,
    persistence: Arc<dyn CheckPersistence>,
    checklist: ChecklistConfig,
    on_success: SuccessCallback,
    inner: Mutex<FormState>,
    events: broadcast::Sender<FormEvent>,
}

impl CheckFormController {
    pub fn new(directory: Arc<dyn VehicleDirectory>, persistence: Arc<dyn CheckPersistence>) -> Self {
        Self::new_with_checklist(directory, persistence, ChecklistConfig::default())
    }

    pub fn new_with_checklist(
        directory: Arc<dyn VehicleDirectory>,
        persistence: Arc<dyn CheckPersistence>,
        checklist: ChecklistConfig,
    ) -> Self {
        Self::new_with_dependencies(directory, persistence, checklist, Arc::new(|| {}))
    }

    pub fn new_with_dependencies(
        directory: Arc<dyn VehicleDirectory>,
        persistence: Arc<dyn CheckPersistence>,
        checklist: ChecklistConfig,
        on_success: SuccessCallback,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        let draft = DraftInspection::new(&checklist);
        Self {
            directory,
            persistence,
            checklist,
            on_success,
            inner: Mutex::new(FormState {
                vehicles: Vec::new(),
                vehicle_load_error: None,
                draft,
            }),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    pub fn checklist(&self) -> &ChecklistConfig {
        &self.checklist
    }

    pub fn draft(&self) -> DraftInspection {
        self.state().draft.clone()
    }

    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.state().vehicles.clone()
    }

    pub fn vehicle_load_error(&self) -> Option<String> {
        self.state().vehicle_load_error.clone()
    }

    /// Fetch the selectable vehicles from the directory service. A failure
    /// is recorded and reported but leaves the rest of the form usable;
    /// calling this again is the retry path.
    pub async fn load_vehicles(&self) {
        match self.directory.list_vehicles().await {
            Ok(vehicles) => {
                info!(count = vehicles.len(), "vehicle directory loaded");
                {
                    let mut state = self.state();
                    state.vehicle_load_error = None;
                    state.vehicles = vehicles.clone();
                }
                let _ = self.events.send(FormEvent::VehiclesLoaded { vehicles });
            }
            Err(err) => {
                warn!(error = %err, "vehicle directory fetch failed; selector stays empty until retried");
                let reason = err.to_string();
                self.state().vehicle_load_error = Some(reason.clone());
                let _ = self.events.send(FormEvent::VehicleLoadFailed { reason });
            }
        }
    }

    pub fn select_vehicle(&self, id: impl Into<VehicleId>) {
        self.state().draft.selected_vehicle = id.into();
        self.notify_draft_changed();
    }

    pub fn set_odometer_text(&self, text: impl Into<String>) {
        self.state().draft.odometer_text = text.into();
        self.notify_draft_changed();
    }

    pub fn set_note(&self, text: impl Into<String>) {
        self.state().draft.note = text.into();
        self.notify_draft_changed();
    }

    pub fn set_item_status(&self, key: CheckItemKey, status: CheckItemStatus) {
        if !self.checklist.contains(key) {
            warn!(key = %key, "ignoring status update for a key outside the configured checklist");
            return;
        }
        {
            let mut state = self.state();
            for item in state.draft.items.iter_mut().filter(|item| item.key == key) {
                item.status = status;
            }
        }
        self.notify_draft_changed();
    }

    /// Submit the current draft to the persistence service.
    ///
    /// The payload is read from the draft at the moment of invocation; edits
    /// made while the call is pending stay in the draft but are not part of
    /// this payload. On success the draft resets to its initial state and
    /// the success callback fires once. On failure the draft is preserved
    /// and the error surfaces as either field-level messages or the fixed
    /// retry banner.
    pub async fn submit(&self) {
        let request = {
            let mut state = self.state();
            if state.draft.submitting {
                debug!("submit ignored while a submission is in flight");
                return;
            }
            state.draft.submitting = true;
            state.draft.banner_error = None;
            state.draft.field_errors.clear();
            build_request(&state.draft)
        };
        let _ = self.events.send(FormEvent::SubmitStarted);

        match self.persistence.create_check(request).await {
            Ok(()) => {
                {
                    let mut state = self.state();
                    state.draft = DraftInspection::new(&self.checklist);
                }
                info!("check recorded; draft reset");
                let _ = self.events.send(FormEvent::CheckRecorded);
                (self.on_success)();
            }
            Err(CheckSubmitError::Validation { details }) => {
                warn!(
                    rejected_fields = details.len(),
                    "persistence service rejected the check"
                );
                {
                    let mut state = self.state();
                    state.draft.field_errors = details
                        .iter()
                        .map(|detail| format!("{}: {}", detail.field, detail.reason))
                        .collect();
                    state.draft.submitting = false;
                }
                let _ = self.events.send(FormEvent::SubmitFailed { validation: true });
            }
            Err(err) => {
                warn!(error = %err, "check submission failed");
                {
                    let mut state = self.state();
                    state.draft.banner_error = Some(SUBMIT_RETRY_MESSAGE.to_string());
                    state.draft.submitting = false;
                }
                let _ = self.events.send(FormEvent::SubmitFailed { validation: false });
            }
        }
    }

    fn notify_draft_changed(&self) {
        let _ = self.events.send(FormEvent::DraftChanged);
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        // The guard is never held across an await.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn build_request(draft: &DraftInspection) -> CreateCheckRequest {
    let note = draft.note.trim();
    CreateCheckRequest {
        vehicle_id: draft.selected_vehicle.clone(),
        odometer_km: parse_odometer(&draft.odometer_text),
        items: draft.items.clone(),
        note: if note.is_empty() {
            None
        } else {
            Some(note.to_string())
        },
    }
}

fn parse_odometer(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
