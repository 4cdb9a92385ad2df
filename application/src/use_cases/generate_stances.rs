//! Generate Stances use case
//!
//! Produces the two antagonistic position statements for a title.

use crate::ports::progress::ProgressNotifier;
use crate::use_cases::shared::{AttemptError, BackendCaller, report_single};
use arena_domain::{PositionPair, PromptTemplate, Stage, StancePayload, Title};
use tracing::{debug, info};

pub struct GenerateStancesUseCase {
    caller: BackendCaller,
}

impl GenerateStancesUseCase {
    pub fn new(caller: BackendCaller) -> Self {
        Self { caller }
    }

    pub async fn execute(
        &self,
        title: &Title,
        progress: &dyn ProgressNotifier,
    ) -> Result<PositionPair, AttemptError> {
        info!("Stage: {}", Stage::Stances);
        progress.on_stage_start(&Stage::Stances, 1);

        let result = self.generate(title).await;
        report_single(
            progress,
            &Stage::Stances,
            self.caller.model().as_str(),
            &result,
        );
        result
    }

    async fn generate(&self, title: &Title) -> Result<PositionPair, AttemptError> {
        let payload: StancePayload = self
            .caller
            .request(Stage::Stances, None, PromptTemplate::stances(title.as_str()))
            .await?;
        let pair = payload
            .into_pair()
            .map_err(|e| AttemptError::malformed(Stage::Stances, e))?;

        debug!(
            pro = pair.pro(),
            con = pair.con(),
            "Generated position pair"
        );
        Ok(pair)
    }
}
