//! Upsert-by-external-id resolver
//!
//! One lookup GET keyed on the candidate's external id decides the branch:
//! no match creates, one match updates that record, several matches abort
//! without touching the backend.

use std::sync::Arc;

use godata_domain::{
    ApiRequest, GoDataError, HttpMethod, Match, MatchResult, ResourceRef, Result, Session,
    UpdateMethods, UpsertCandidate, UpsertOutcome,
};
use tracing::{info, instrument, warn};

use super::queries;
use crate::transport::ports::Transport;

/// Find-or-create-or-reject for one collection at a time
pub struct UpsertResolver {
    transport: Arc<dyn Transport>,
    update_methods: UpdateMethods,
}

impl UpsertResolver {
    pub fn new(transport: Arc<dyn Transport>, update_methods: UpdateMethods) -> Self {
        Self { transport, update_methods }
    }

    pub fn update_methods(&self) -> &UpdateMethods {
        &self.update_methods
    }

    /// Create or update `candidate` in `resource`.
    ///
    /// # Errors
    ///
    /// - `GoDataError::MultipleMatches` when more than one record shares the
    ///   external id; no mutating call is issued
    /// - any transport error from the lookup or the mutating call
    #[instrument(
        skip(self, session, candidate),
        fields(
            path = %resource.collection_path(),
            field = %candidate.external_id_field(),
        )
    )]
    pub async fn upsert(
        &self,
        session: &Session,
        resource: &ResourceRef,
        candidate: &UpsertCandidate,
    ) -> Result<UpsertOutcome> {
        let lookup = candidate.lookup_filter();
        let found = queries::get(self.transport.as_ref(), session, resource, &lookup).await?;
        let matches = MatchResult::new(found);

        let kind = resource.kind();
        match matches.classify()? {
            Match::Many(count) => {
                warn!(count, %kind, "Multiple records matched external id; aborting upsert");
                Err(GoDataError::MultipleMatches {
                    resource: resource.kind().collection_segment().to_string(),
                    field: candidate.external_id_field().to_string(),
                    count,
                })
            }
            Match::One(id) => {
                let method = self.update_methods.for_kind(kind);
                info!(%kind, id = %id, %method, "Record found; performing update");
                let request =
                    ApiRequest::with_body(method, resource.member_path(&id), candidate.body());
                let record = self.transport.send(session, request).await?;
                Ok(UpsertOutcome::Updated { id, record })
            }
            Match::None => {
                info!(%kind, "No record found; performing create");
                let request = ApiRequest::with_body(
                    HttpMethod::Post,
                    resource.collection_path(),
                    candidate.body(),
                );
                let record = self.transport.send(session, request).await?;
                Ok(UpsertOutcome::Created { record })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use godata_domain::UpdateMethod;
    use serde_json::{json, Value};

    use super::*;

    /// Replays scripted responses in order and records every request.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<Value>>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        fn replying(responses: Vec<Result<Value>>) -> Arc<Self> {
            Arc::new(Self { responses: Mutex::new(responses.into()), ..Default::default() })
        }

        fn methods(&self) -> Vec<HttpMethod> {
            self.requests.lock().unwrap().iter().map(|r| r.method).collect()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, _session: &Session, request: ApiRequest) -> Result<Value> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GoDataError::Internal("no scripted response".into())))
        }
    }

    fn session() -> Session {
        Session::new("http://godata.test/api", "token")
    }

    fn candidate() -> UpsertCandidate {
        UpsertCandidate::new("visualId", json!({ "visualId": "V1", "firstName": "Luca" })).unwrap()
    }

    #[tokio::test]
    async fn creates_when_nothing_matches() {
        let transport =
            ScriptedTransport::replying(vec![Ok(json!([])), Ok(json!({ "id": "new-1" }))]);
        let resolver = UpsertResolver::new(transport.clone(), UpdateMethods::default());
        let cases = ResourceRef::cases("outbreak-1").unwrap();

        let outcome = resolver.upsert(&session(), &cases, &candidate()).await.unwrap();

        assert_eq!(outcome, UpsertOutcome::Created { record: json!({ "id": "new-1" }) });
        assert_eq!(transport.methods(), vec![HttpMethod::Get, HttpMethod::Post]);
        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[1].path, "outbreaks/outbreak-1/cases");
        assert_eq!(requests[1].body.as_ref().unwrap()["visualId"], "V1");
    }

    #[tokio::test]
    async fn updates_single_match_with_configured_verb() {
        let transport = ScriptedTransport::replying(vec![
            Ok(json!([{ "id": "case-7", "visualId": "V1" }])),
            Ok(json!({ "id": "case-7", "firstName": "Luca" })),
        ]);
        let mut methods = UpdateMethods::default();
        methods.set(godata_domain::ResourceKind::Case, UpdateMethod::Patch);
        let resolver = UpsertResolver::new(transport.clone(), methods);
        let cases = ResourceRef::cases("outbreak-1").unwrap();

        let outcome = resolver.upsert(&session(), &cases, &candidate()).await.unwrap();

        assert!(matches!(outcome, UpsertOutcome::Updated { ref id, .. } if id == "case-7"));
        assert_eq!(transport.methods(), vec![HttpMethod::Get, HttpMethod::Patch]);
        assert_eq!(transport.requests.lock().unwrap()[1].path, "outbreaks/outbreak-1/cases/case-7");
    }

    #[tokio::test]
    async fn aborts_on_multiple_matches_without_mutating() {
        let transport = ScriptedTransport::replying(vec![Ok(json!([
            { "id": "a", "visualId": "V1" },
            { "id": "b", "visualId": "V1" }
        ]))]);
        let resolver = UpsertResolver::new(transport.clone(), UpdateMethods::default());

        let err = resolver
            .upsert(&session(), &ResourceRef::contacts("outbreak-1").unwrap(), &candidate())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GoDataError::MultipleMatches {
                resource: "contacts".into(),
                field: "visualId".into(),
                count: 2
            }
        );
        assert_eq!(transport.methods(), vec![HttpMethod::Get]);
    }

    #[tokio::test]
    async fn lookup_failure_skips_mutation() {
        let transport =
            ScriptedTransport::replying(vec![Err(GoDataError::Server("502 Bad Gateway".into()))]);
        let resolver = UpsertResolver::new(transport.clone(), UpdateMethods::default());

        let err =
            resolver.upsert(&session(), &ResourceRef::locations(), &candidate()).await.unwrap_err();

        assert!(matches!(err, GoDataError::Server(_)));
        assert_eq!(transport.methods(), vec![HttpMethod::Get]);
    }

    #[tokio::test]
    async fn failed_create_is_not_retried() {
        let transport = ScriptedTransport::replying(vec![
            Ok(json!([])),
            Err(GoDataError::Server("500 Internal Server Error".into())),
        ]);
        let resolver = UpsertResolver::new(transport.clone(), UpdateMethods::default());
        let cases = ResourceRef::cases("outbreak-1").unwrap();

        let err = resolver.upsert(&session(), &cases, &candidate()).await.unwrap_err();

        assert!(matches!(err, GoDataError::Server(_)));
        assert_eq!(transport.methods(), vec![HttpMethod::Get, HttpMethod::Post]);
    }

    #[tokio::test]
    async fn failed_update_is_not_retried() {
        let transport = ScriptedTransport::replying(vec![
            Ok(json!([{ "id": "case-7", "visualId": "V1" }])),
            Err(GoDataError::Server("503 Service Unavailable".into())),
        ]);
        let resolver = UpsertResolver::new(transport.clone(), UpdateMethods::default());
        let cases = ResourceRef::cases("outbreak-1").unwrap();

        let err = resolver.upsert(&session(), &cases, &candidate()).await.unwrap_err();

        assert!(matches!(err, GoDataError::Server(_)));
        assert_eq!(transport.methods(), vec![HttpMethod::Get, HttpMethod::Put]);
    }

    #[tokio::test]
    async fn lookup_filter_is_keyed_on_external_id_only() {
        let transport =
            ScriptedTransport::replying(vec![Ok(json!([])), Ok(json!({ "id": "loc-1" }))]);
        let resolver = UpsertResolver::new(transport.clone(), UpdateMethods::default());

        resolver.upsert(&session(), &ResourceRef::locations(), &candidate()).await.unwrap();

        let requests = transport.requests.lock().unwrap();
        let filter = requests[0].filter.as_ref().unwrap();
        assert_eq!(filter.to_query_value().unwrap(), r#"{"where":{"visualId":"V1"}}"#);
    }
}
