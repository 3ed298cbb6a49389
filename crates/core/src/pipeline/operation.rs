//! Pipeline operations - one per named Go.Data call

use std::fmt;
use std::sync::Arc;

use godata_domain::{
    Filter, GoDataError, ResourceRef, Result, Session, UpsertCandidate, UpsertOutcome,
};
use serde_json::Value;

use super::state::State;
use crate::resources::GoDataService;

type RecordFn = dyn Fn(&State) -> Result<Value> + Send + Sync;
type SelectFn = dyn Fn(&State) -> Result<Vec<Value>> + Send + Sync;

/// Where an upsert's record comes from.
#[derive(Clone)]
pub enum RecordSource {
    /// A fixed record.
    Static(Value),
    /// A record computed from the state at the time the operation runs.
    FromState(Arc<RecordFn>),
}

impl RecordSource {
    pub fn from_state<F>(build: F) -> Self
    where
        F: Fn(&State) -> Result<Value> + Send + Sync + 'static,
    {
        Self::FromState(Arc::new(build))
    }

    pub fn resolve(&self, state: &State) -> Result<Value> {
        match self {
            Self::Static(record) => Ok(record.clone()),
            Self::FromState(build) => build(state),
        }
    }
}

impl From<Value> for RecordSource {
    fn from(record: Value) -> Self {
        Self::Static(record)
    }
}

impl fmt::Debug for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(record) => f.debug_tuple("Static").field(record).finish(),
            Self::FromState(_) => f.write_str("FromState(..)"),
        }
    }
}

#[derive(Debug, Clone)]
enum Target {
    Outbreaks,
    Contacts(String),
    Cases(String),
    Locations,
}

impl Target {
    fn resource(&self) -> Result<ResourceRef> {
        match self {
            Self::Outbreaks => Ok(ResourceRef::outbreaks()),
            Self::Contacts(outbreak_id) => ResourceRef::contacts(outbreak_id.as_str()),
            Self::Cases(outbreak_id) => ResourceRef::cases(outbreak_id.as_str()),
            Self::Locations => Ok(ResourceRef::locations()),
        }
    }
}

#[derive(Debug, Clone)]
enum Action {
    List,
    Get(Filter),
    Upsert { external_id_field: String, record: RecordSource },
}

#[derive(Clone)]
enum Kind {
    Call { target: Target, action: Action },
    Each { select: Arc<SelectFn>, inner: Box<Operation> },
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call { target, action } => {
                f.debug_struct("Call").field("target", target).field("action", action).finish()
            }
            Self::Each { inner, .. } => {
                f.debug_struct("Each").field("inner", inner).finish_non_exhaustive()
            }
        }
    }
}

/// A single step of a [`Pipeline`](super::Pipeline).
#[derive(Debug, Clone)]
pub struct Operation {
    name: &'static str,
    kind: Kind,
}

impl Operation {
    fn new(name: &'static str, target: Target, action: Action) -> Self {
        Self { name, kind: Kind::Call { target, action } }
    }

    fn upsert_action(
        external_id_field: impl Into<String>,
        record: impl Into<RecordSource>,
    ) -> Action {
        Action::Upsert { external_id_field: external_id_field.into(), record: record.into() }
    }

    /// Run `inner` once per element picked from the state by `select`.
    ///
    /// Each run sees the element as `state.data` and the outer state's
    /// references. A failing element is reported on its own and the
    /// remaining elements still run. Once every element has run, the
    /// successful results replace `data` as one array.
    ///
    /// `inner` must be a plain resource call; nesting `each` is rejected
    /// when the step runs.
    pub fn each<F>(select: F, inner: Operation) -> Self
    where
        F: Fn(&State) -> Result<Vec<Value>> + Send + Sync + 'static,
    {
        let kind = Kind::Each { select: Arc::new(select), inner: Box::new(inner) };
        Self { name: "each", kind }
    }

    /// `each` over the array stored under `field` of the current data.
    pub fn each_in(field: impl Into<String>, inner: Operation) -> Self {
        let field = field.into();
        Self::each(
            move |state| match state.data.get(&field) {
                Some(Value::Array(items)) => Ok(items.clone()),
                _ => Err(GoDataError::InvalidInput(format!(
                    "state data has no array under '{field}'"
                ))),
            },
            inner,
        )
    }

    pub fn list_outbreaks() -> Self {
        Self::new("listOutbreaks", Target::Outbreaks, Action::List)
    }

    pub fn get_outbreak(filter: Filter) -> Self {
        Self::new("getOutbreak", Target::Outbreaks, Action::Get(filter))
    }

    pub fn upsert_outbreak(
        external_id_field: impl Into<String>,
        record: impl Into<RecordSource>,
    ) -> Self {
        Self::new(
            "upsertOutbreak",
            Target::Outbreaks,
            Self::upsert_action(external_id_field, record),
        )
    }

    pub fn list_contacts(outbreak_id: impl Into<String>) -> Self {
        Self::new("listContacts", Target::Contacts(outbreak_id.into()), Action::List)
    }

    pub fn get_contact(outbreak_id: impl Into<String>, filter: Filter) -> Self {
        Self::new("getContact", Target::Contacts(outbreak_id.into()), Action::Get(filter))
    }

    pub fn upsert_contact(
        outbreak_id: impl Into<String>,
        external_id_field: impl Into<String>,
        record: impl Into<RecordSource>,
    ) -> Self {
        Self::new(
            "upsertContact",
            Target::Contacts(outbreak_id.into()),
            Self::upsert_action(external_id_field, record),
        )
    }

    pub fn list_cases(outbreak_id: impl Into<String>) -> Self {
        Self::new("listCases", Target::Cases(outbreak_id.into()), Action::List)
    }

    pub fn get_case(outbreak_id: impl Into<String>, filter: Filter) -> Self {
        Self::new("getCase", Target::Cases(outbreak_id.into()), Action::Get(filter))
    }

    pub fn upsert_case(
        outbreak_id: impl Into<String>,
        external_id_field: impl Into<String>,
        record: impl Into<RecordSource>,
    ) -> Self {
        Self::new(
            "upsertCase",
            Target::Cases(outbreak_id.into()),
            Self::upsert_action(external_id_field, record),
        )
    }

    pub fn list_locations() -> Self {
        Self::new("listLocations", Target::Locations, Action::List)
    }

    pub fn get_location(filter: Filter) -> Self {
        Self::new("getLocation", Target::Locations, Action::Get(filter))
    }

    pub fn upsert_location(
        external_id_field: impl Into<String>,
        record: impl Into<RecordSource>,
    ) -> Self {
        Self::new(
            "upsertLocation",
            Target::Locations,
            Self::upsert_action(external_id_field, record),
        )
    }

    /// Operation name as used in log lines and reports, e.g. `upsertCase`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run against `service` and return the value to compose into state.
    ///
    /// List and get yield the record array; upsert yields the body returned
    /// by the create or update call.
    pub async fn execute(
        &self,
        service: &GoDataService,
        session: &Session,
        state: &State,
    ) -> Result<Value> {
        let Kind::Call { target, action } = &self.kind else {
            return Err(GoDataError::InvalidInput(format!(
                "'{}' must run as a pipeline step, not inside another operation",
                self.name
            )));
        };
        let resource = target.resource()?;
        match action {
            Action::List => service.list(session, &resource).await.map(Value::Array),
            Action::Get(filter) => service.get(session, &resource, filter).await.map(Value::Array),
            Action::Upsert { external_id_field, record } => {
                let candidate =
                    UpsertCandidate::new(external_id_field.as_str(), record.resolve(state)?)?;
                service
                    .upsert(session, &resource, &candidate)
                    .await
                    .map(UpsertOutcome::into_record)
            }
        }
    }
}

/// Elements selected by an `each` step and the call to run for each.
pub(crate) struct Fanout<'a> {
    pub elements: Result<Vec<Value>>,
    pub inner: &'a Operation,
}

impl Operation {
    pub(crate) fn fanout(&self, state: &State) -> Option<Fanout<'_>> {
        match &self.kind {
            Kind::Each { select, inner } => Some(Fanout { elements: select(state), inner }),
            Kind::Call { .. } => None,
        }
    }
}
