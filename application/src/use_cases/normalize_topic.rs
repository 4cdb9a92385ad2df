//! Normalize Topic use case
//!
//! Reduces a raw topic to a display title of at most 15 characters.
//! Short topics pass through without a backend call.

use crate::ports::progress::ProgressNotifier;
use crate::use_cases::shared::{AttemptError, BackendCaller, report_single};
use arena_domain::{NormalizedTopic, PromptTemplate, Stage, TitlePayload, Topic};
use tracing::{debug, info};

pub struct NormalizeTopicUseCase {
    caller: BackendCaller,
}

impl NormalizeTopicUseCase {
    pub fn new(caller: BackendCaller) -> Self {
        Self { caller }
    }

    pub async fn execute(
        &self,
        topic: &Topic,
        progress: &dyn ProgressNotifier,
    ) -> Result<NormalizedTopic, AttemptError> {
        if let Some(normalized) = NormalizedTopic::unchanged(topic) {
            debug!(
                chars = topic.char_len(),
                "Topic is short enough to be its own title"
            );
            return Ok(normalized);
        }

        info!("Stage: {}", Stage::Normalize);
        progress.on_stage_start(&Stage::Normalize, 1);

        let result = self.condense(topic).await;
        report_single(
            progress,
            &Stage::Normalize,
            self.caller.model().as_str(),
            &result,
        );
        result
    }

    async fn condense(&self, topic: &Topic) -> Result<NormalizedTopic, AttemptError> {
        let payload: TitlePayload = self
            .caller
            .request(
                Stage::Normalize,
                None,
                PromptTemplate::condense_topic(topic.content()),
            )
            .await?;
        let title = payload
            .into_title()
            .map_err(|e| AttemptError::malformed(Stage::Normalize, e))?;

        debug!(title = %title, "Condensed topic");
        Ok(NormalizedTopic::condensed(topic, title))
    }
}
