//! Resource service - the named Go.Data operations

use std::sync::Arc;

use godata_domain::{
    Filter, ResourceRef, Result, Session, UpdateMethods, UpsertCandidate, UpsertOutcome,
};
use serde_json::Value;

use super::queries;
use super::resolver::UpsertResolver;
use crate::transport::ports::Transport;

/// Outbreaks, contacts, cases and locations over one transport
///
/// Every call takes the [`Session`] explicitly; the service holds no
/// per-sequence state.
pub struct GoDataService {
    transport: Arc<dyn Transport>,
    resolver: UpsertResolver,
}

impl GoDataService {
    pub fn new(transport: Arc<dyn Transport>, update_methods: UpdateMethods) -> Self {
        let resolver = UpsertResolver::new(transport.clone(), update_methods);
        Self { transport, resolver }
    }

    pub async fn list(&self, session: &Session, resource: &ResourceRef) -> Result<Vec<Value>> {
        queries::list(self.transport.as_ref(), session, resource).await
    }

    pub async fn get(
        &self,
        session: &Session,
        resource: &ResourceRef,
        filter: &Filter,
    ) -> Result<Vec<Value>> {
        queries::get(self.transport.as_ref(), session, resource, filter).await
    }

    pub async fn upsert(
        &self,
        session: &Session,
        resource: &ResourceRef,
        candidate: &UpsertCandidate,
    ) -> Result<UpsertOutcome> {
        self.resolver.upsert(session, resource, candidate).await
    }

    // Outbreaks

    pub async fn list_outbreaks(&self, session: &Session) -> Result<Vec<Value>> {
        self.list(session, &ResourceRef::outbreaks()).await
    }

    pub async fn get_outbreak(&self, session: &Session, filter: &Filter) -> Result<Vec<Value>> {
        self.get(session, &ResourceRef::outbreaks(), filter).await
    }

    pub async fn upsert_outbreak(
        &self,
        session: &Session,
        external_id_field: &str,
        record: Value,
    ) -> Result<UpsertOutcome> {
        let candidate = UpsertCandidate::new(external_id_field, record)?;
        self.upsert(session, &ResourceRef::outbreaks(), &candidate).await
    }

    // Contacts

    pub async fn list_contacts(&self, session: &Session, outbreak_id: &str) -> Result<Vec<Value>> {
        self.list(session, &ResourceRef::contacts(outbreak_id)?).await
    }

    pub async fn get_contact(
        &self,
        session: &Session,
        outbreak_id: &str,
        filter: &Filter,
    ) -> Result<Vec<Value>> {
        self.get(session, &ResourceRef::contacts(outbreak_id)?, filter).await
    }

    pub async fn upsert_contact(
        &self,
        session: &Session,
        outbreak_id: &str,
        external_id_field: &str,
        record: Value,
    ) -> Result<UpsertOutcome> {
        let resource = ResourceRef::contacts(outbreak_id)?;
        let candidate = UpsertCandidate::new(external_id_field, record)?;
        self.upsert(session, &resource, &candidate).await
    }

    // Cases

    pub async fn list_cases(&self, session: &Session, outbreak_id: &str) -> Result<Vec<Value>> {
        self.list(session, &ResourceRef::cases(outbreak_id)?).await
    }

    pub async fn get_case(
        &self,
        session: &Session,
        outbreak_id: &str,
        filter: &Filter,
    ) -> Result<Vec<Value>> {
        self.get(session, &ResourceRef::cases(outbreak_id)?, filter).await
    }

    pub async fn upsert_case(
        &self,
        session: &Session,
        outbreak_id: &str,
        external_id_field: &str,
        record: Value,
    ) -> Result<UpsertOutcome> {
        let resource = ResourceRef::cases(outbreak_id)?;
        let candidate = UpsertCandidate::new(external_id_field, record)?;
        self.upsert(session, &resource, &candidate).await
    }

    // Locations

    pub async fn list_locations(&self, session: &Session) -> Result<Vec<Value>> {
        self.list(session, &ResourceRef::locations()).await
    }

    pub async fn get_location(&self, session: &Session, filter: &Filter) -> Result<Vec<Value>> {
        self.get(session, &ResourceRef::locations(), filter).await
    }

    pub async fn upsert_location(
        &self,
        session: &Session,
        external_id_field: &str,
        record: Value,
    ) -> Result<UpsertOutcome> {
        let candidate = UpsertCandidate::new(external_id_field, record)?;
        self.upsert(session, &ResourceRef::locations(), &candidate).await
    }
}
