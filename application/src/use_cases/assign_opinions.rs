//! Assign Opinions use case
//!
//! Asks every persona of the catalog to take a side on a position pair.
//!
//! Two layouts:
//!
//! - **Batched** (default): one request covering the whole catalog
//! - **Fan-out**: one request per persona, run concurrently under a
//!   semaphore; results are slotted by catalog index so completion order
//!   never affects the output, and the first failure aborts the rest
//!
//! The returned opinions are in catalog order but are not yet checked for
//! side balance; see [`repair_sides`](arena_domain::repair_sides).

use crate::config::MAX_CONCURRENCY;
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::shared::{AttemptError, BackendCaller, report_single};
use arena_domain::{
    Opinion, OpinionPayload, OpinionsPayload, PersonaCatalog, PositionPair, PromptTemplate, Stage,
    Title,
};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

pub struct AssignOpinionsUseCase {
    caller: BackendCaller,
    catalog: PersonaCatalog,
    /// Concurrency limit when fanning out; `None` means batched.
    fan_out: Option<usize>,
}

impl AssignOpinionsUseCase {
    pub fn new(caller: BackendCaller, catalog: PersonaCatalog) -> Self {
        Self {
            caller,
            catalog,
            fan_out: None,
        }
    }

    /// Switch to one request per persona with at most `limit` in flight.
    pub fn with_fan_out(mut self, limit: usize) -> Self {
        self.fan_out = Some(limit.clamp(1, MAX_CONCURRENCY));
        self
    }

    pub async fn execute(
        &self,
        title: &Title,
        pair: &PositionPair,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Opinion>, AttemptError> {
        match self.fan_out {
            Some(limit) => self.execute_fan_out(title, pair, limit, progress).await,
            None => self.execute_batched(title, pair, progress).await,
        }
    }

    async fn execute_batched(
        &self,
        title: &Title,
        pair: &PositionPair,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Opinion>, AttemptError> {
        info!(
            "Stage: {} (batched, {} personas)",
            Stage::Opinions,
            self.catalog.len()
        );
        progress.on_stage_start(&Stage::Opinions, 1);

        let result = self.request_batched(title, pair).await;
        report_single(
            progress,
            &Stage::Opinions,
            self.caller.model().as_str(),
            &result,
        );
        result
    }

    async fn request_batched(
        &self,
        title: &Title,
        pair: &PositionPair,
    ) -> Result<Vec<Opinion>, AttemptError> {
        let prompt = PromptTemplate::opinions_batched(title.as_str(), pair, &self.catalog);
        let payload: OpinionsPayload = self.caller.request(Stage::Opinions, None, prompt).await?;
        payload
            .into_opinions(&self.catalog)
            .map_err(|e| AttemptError::malformed(Stage::Opinions, e))
    }

    async fn execute_fan_out(
        &self,
        title: &Title,
        pair: &PositionPair,
        limit: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Opinion>, AttemptError> {
        info!(
            "Stage: {} (fan-out, {} personas, limit {})",
            Stage::Opinions,
            self.catalog.len(),
            limit
        );
        progress.on_stage_start(&Stage::Opinions, self.catalog.len());

        let semaphore = Arc::new(Semaphore::new(limit));
        let mut join_set = JoinSet::new();

        for (index, persona) in self.catalog.iter().enumerate() {
            let caller = self.caller.clone();
            let semaphore = Arc::clone(&semaphore);
            let prompt = PromptTemplate::opinion_single(title.as_str(), pair, persona);

            join_set.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => caller
                        .request::<OpinionPayload>(Stage::Opinions, Some(persona.id), prompt)
                        .await
                        .and_then(|payload| {
                            payload
                                .into_opinion(persona)
                                .map_err(|e| AttemptError::malformed(Stage::Opinions, e))
                        }),
                    Err(e) => Err(AttemptError::TaskFailed(e.to_string())),
                };
                (index, result)
            });
        }

        let mut slots: Vec<Option<Opinion>> = vec![None; self.catalog.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, Ok(opinion))) => {
                    debug!(persona = opinion.persona.id, side = %opinion.side, "Persona answered");
                    progress.on_task_complete(&Stage::Opinions, opinion.persona.id, true);
                    slots[index] = Some(opinion);
                }
                Ok((index, Err(e))) => {
                    let persona = self.catalog.as_slice()[index].id;
                    warn!("Persona {} failed: {}", persona, e);
                    progress.on_task_complete(&Stage::Opinions, persona, false);
                    join_set.abort_all();
                    return Err(e);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    join_set.abort_all();
                    return Err(AttemptError::TaskFailed(e.to_string()));
                }
            }
        }

        progress.on_stage_complete(&Stage::Opinions);

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| AttemptError::TaskFailed("persona task produced no result".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineParams;
    use crate::ports::llm_gateway::GatewayError;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::test_support::*;
    use arena_domain::Side;
    use std::time::Duration;

    fn use_case(gateway: &Arc<ScriptedGateway>) -> AssignOpinionsUseCase {
        let config = fast_config(PipelineParams::default());
        AssignOpinionsUseCase::new(
            BackendCaller::new(gateway.clone(), &config),
            PersonaCatalog::philosophers(),
        )
    }

    fn title() -> Title {
        Title::from_generated("AI应否受限").unwrap()
    }

    fn pair() -> PositionPair {
        PositionPair::new("应限制AI发展", "不应限制AI发展").unwrap()
    }

    fn ids(opinions: &[Opinion]) -> Vec<&'static str> {
        opinions.iter().map(|o| o.persona.id).collect()
    }

    #[tokio::test]
    async fn test_batched_single_call() {
        let gateway = Arc::new(ScriptedGateway::happy(BALANCED));
        let opinions = use_case(&gateway)
            .execute(&title(), &pair(), &NoProgress)
            .await
            .unwrap();

        assert_eq!(
            ids(&opinions),
            vec!["socrates", "nietzsche", "wittgenstein", "kant", "freud"]
        );
        assert_eq!(
            opinions.iter().map(|o| o.side).collect::<Vec<_>>(),
            BALANCED.to_vec()
        );
        assert_eq!(gateway.calls(), vec![(Stage::Opinions, None)]);
    }

    #[tokio::test]
    async fn test_batched_does_not_repair() {
        let gateway = Arc::new(ScriptedGateway::happy([Side::Pro; 5]));
        let opinions = use_case(&gateway)
            .execute(&title(), &pair(), &NoProgress)
            .await
            .unwrap();
        assert!(opinions.iter().all(|o| o.side == Side::Pro));
    }

    #[tokio::test]
    async fn test_fan_out_one_call_per_persona() {
        let gateway = Arc::new(ScriptedGateway::happy(BALANCED));
        let progress = RecordingProgress::default();
        let opinions = use_case(&gateway)
            .with_fan_out(5)
            .execute(&title(), &pair(), &progress)
            .await
            .unwrap();

        assert_eq!(opinions.len(), 5);
        let mut personas: Vec<_> = gateway
            .calls()
            .into_iter()
            .filter_map(|(_, p)| p)
            .collect();
        personas.sort();
        assert_eq!(
            personas,
            vec!["freud", "kant", "nietzsche", "socrates", "wittgenstein"]
        );

        let events = progress.events();
        assert_eq!(events.first().unwrap(), "start:opinions:5");
        assert_eq!(events.last().unwrap(), "done:opinions");
        assert_eq!(events.iter().filter(|e| e.ends_with(":true")).count(), 5);
    }

    #[tokio::test]
    async fn test_fan_out_reverse_completion_keeps_catalog_order() {
        // Later personas answer first
        let gateway = Arc::new(ScriptedGateway::new(|request, _| {
            let index = PersonaCatalog::philosophers()
                .position(request.persona_id.unwrap())
                .unwrap();
            let delay = Duration::from_millis(20 * (5 - index) as u64);
            happy_reply(request, BALANCED).after(delay)
        }));
        let progress = RecordingProgress::default();
        let opinions = use_case(&gateway)
            .with_fan_out(5)
            .execute(&title(), &pair(), &progress)
            .await
            .unwrap();

        assert_eq!(
            ids(&opinions),
            vec!["socrates", "nietzsche", "wittgenstein", "kant", "freud"]
        );
        assert_eq!(
            opinions.iter().map(|o| o.side).collect::<Vec<_>>(),
            BALANCED.to_vec()
        );

        let completions: Vec<_> = progress
            .events()
            .into_iter()
            .filter(|e| e.starts_with("task:"))
            .collect();
        assert_eq!(completions.first().unwrap(), "task:opinions:freud:true");
        assert_eq!(completions.last().unwrap(), "task:opinions:socrates:true");
    }

    #[tokio::test]
    async fn test_fan_out_respects_concurrency_limit() {
        let gateway = Arc::new(ScriptedGateway::new(|request, _| {
            happy_reply(request, BALANCED).after(Duration::from_millis(20))
        }));
        use_case(&gateway)
            .with_fan_out(2)
            .execute(&title(), &pair(), &NoProgress)
            .await
            .unwrap();

        assert_eq!(gateway.call_count(), 5);
        assert!(gateway.max_in_flight() <= 2);
    }

    #[tokio::test]
    async fn test_fan_out_first_failure_fails_stage() {
        let gateway = Arc::new(ScriptedGateway::new(|request, _| {
            if request.persona_id == Some("kant") {
                Scripted::err(GatewayError::Timeout)
            } else {
                happy_reply(request, BALANCED).after(Duration::from_millis(200))
            }
        }));
        let progress = RecordingProgress::default();
        let err = use_case(&gateway)
            .with_fan_out(5)
            .execute(&title(), &pair(), &progress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AttemptError::Backend {
                source: GatewayError::Timeout,
                ..
            }
        ));
        // Remaining tasks were aborted before they could report
        let events = progress.events();
        assert!(events.contains(&"task:opinions:kant:false".to_string()));
        assert!(!events.iter().any(|e| e.ends_with(":true")));
        assert!(!events.contains(&"done:opinions".to_string()));
    }

    #[tokio::test]
    async fn test_missing_persona_in_batch_is_malformed() {
        let gateway = Arc::new(ScriptedGateway::new(|_, _| {
            Scripted::ok(
                r#"{"philosophers": [{"id": "socrates", "stance": "pro", "reason": "理由"}]}"#,
            )
        }));
        let err = use_case(&gateway)
            .execute(&title(), &pair(), &NoProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, AttemptError::MalformedPayload { .. }));
    }
}
