//! Test doubles shared by the use case tests.

use crate::config::{PipelineConfig, PipelineParams};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::run_pipeline::RunPipelineError;
use crate::use_cases::shared::AttemptError;
use arena_domain::{CompletionRequest, PersonaCatalog, Side, Stage};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) const LONG_TOPIC: &str = "我们应该限制人工智能的发展吗，还是放任它自由成长";
pub(crate) const SHORT_TOPIC: &str = "真爱存在吗?";

/// One scripted reply.
pub(crate) struct Scripted {
    pub delay: Duration,
    pub reply: Result<String, GatewayError>,
}

impl Scripted {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            reply: Ok(text.into()),
        }
    }

    pub fn err(error: GatewayError) -> Self {
        Self {
            delay: Duration::ZERO,
            reply: Err(error),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Script = Box<dyn Fn(&CompletionRequest, usize) -> Scripted + Send + Sync>;

/// Gateway whose replies come from a closure over the request and the
/// zero-based call index.
pub(crate) struct ScriptedGateway {
    script: Script,
    calls: Mutex<Vec<(Stage, Option<&'static str>)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new(
        script: impl Fn(&CompletionRequest, usize) -> Scripted + Send + Sync + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Well-formed replies for every stage with the given persona sides.
    pub fn happy(sides: [Side; 5]) -> Self {
        Self::new(move |request, _| happy_reply(request, sides))
    }

    /// Every call fails with a connection error.
    pub fn failing() -> Self {
        Self::new(|_, _| Scripted::err(GatewayError::ConnectionError("refused".to_string())))
    }

    pub fn calls(&self) -> Vec<(Stage, Option<&'static str>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((request.stage, request.persona_id));
            calls.len() - 1
        };
        let scripted = (self.script)(request, index);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        scripted.reply
    }
}

pub(crate) const BALANCED: [Side; 5] = [Side::Pro, Side::Con, Side::Con, Side::Pro, Side::Con];

pub(crate) fn title_reply() -> String {
    r#"{"refined_topic": "AI应否受限"}"#.to_string()
}

pub(crate) fn stances_reply() -> String {
    r#"{"pro_stance": "应限制AI发展", "con_stance": "不应限制AI发展"}"#.to_string()
}

fn opinion_entries(sides: [Side; 5]) -> String {
    let entries: Vec<String> = PersonaCatalog::philosophers()
        .iter()
        .zip(sides)
        .map(|(p, side)| {
            format!(
                r#"{{"id": "{}", "stance": "{}", "reason": "{}的理由"}}"#,
                p.id, side, p.name
            )
        })
        .collect();
    format!("[{}]", entries.join(","))
}

pub(crate) fn opinions_reply(sides: [Side; 5]) -> String {
    format!(r#"{{"philosophers": {}}}"#, opinion_entries(sides))
}

pub(crate) fn single_reply(persona_id: &str, sides: [Side; 5]) -> String {
    let catalog = PersonaCatalog::philosophers();
    let index = catalog.position(persona_id).unwrap();
    format!(
        r#"{{"stance": "{}", "reason": "{}的理由"}}"#,
        sides[index],
        catalog.as_slice()[index].name
    )
}

pub(crate) fn combined_reply(sides: [Side; 5]) -> String {
    format!(
        "```json\n{{\"refined_topic\": \"AI应否受限\", \"original_topic\": \"ignored\", \
         \"pro_stance\": \"应限制AI发展\", \"con_stance\": \"不应限制AI发展\", \
         \"philosophers\": {}}}\n```",
        opinion_entries(sides)
    )
}

pub(crate) fn happy_reply(request: &CompletionRequest, sides: [Side; 5]) -> Scripted {
    Scripted::ok(match (request.stage, request.persona_id) {
        (Stage::Normalize, _) => title_reply(),
        (Stage::Stances, _) => stances_reply(),
        (Stage::Opinions, Some(id)) => single_reply(id, sides),
        (Stage::Opinions, None) => opinions_reply(sides),
        (Stage::Combined, _) => combined_reply(sides),
    })
}

/// Config with no backoff and short timeouts.
pub(crate) fn fast_config(params: PipelineParams) -> PipelineConfig {
    PipelineConfig::default().with_params(
        params
            .with_backoff(Duration::ZERO)
            .with_call_timeout(Duration::from_secs(2)),
    )
}

/// Records progress events as strings.
#[derive(Default)]
pub(crate) struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_stage_start(&self, stage: &Stage, total_tasks: usize) {
        self.push(format!("start:{}:{}", stage.as_str(), total_tasks));
    }

    fn on_task_complete(&self, stage: &Stage, label: &str, success: bool) {
        self.push(format!("task:{}:{}:{}", stage.as_str(), label, success));
    }

    fn on_stage_complete(&self, stage: &Stage) {
        self.push(format!("done:{}", stage.as_str()));
    }

    fn on_attempt_failed(&self, attempt: usize, max_attempts: usize, error: &AttemptError) {
        self.push(format!(
            "failed:{}/{}:{}",
            attempt,
            max_attempts,
            error.kind().as_str()
        ));
    }

    fn on_fallback(&self, _reason: &RunPipelineError) {
        self.push("fallback".to_string());
    }
}
