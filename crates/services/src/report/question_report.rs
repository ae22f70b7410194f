use std::sync::Arc;

use async_trait::async_trait;
use report_core::model::{ActivityContext, ReportViewModel};
use serde_json::{Value, json};
use storage::repository::ScormDataProvider;
use tracing::{debug, info};

use super::renderer::{OutputMode, RenderContext, ReportRenderer};
use crate::error::ReportError;

pub const REPORT_TEMPLATE: &str = "scormreport_question/report";
/// Recomputes the passing quota in the browser for a chosen minimum score.
pub const DASHBOARD_SCRIPT: &str = "scormreport_question/dashboard_passingquota";
/// Draws the per-question result charts.
pub const QUESTION_VIEW_SCRIPT: &str = "scormreport_question/report_view";

/// Question statistics report for a SCORM activity.
///
/// Shows the average attempt score on a dashboard and hands the raw scores
/// and question data to the client scripts.
pub struct QuestionReport {
    provider: Arc<dyn ScormDataProvider>,
}

impl QuestionReport {
    #[must_use]
    pub fn new(provider: Arc<dyn ScormDataProvider>) -> Self {
        Self { provider }
    }

    /// Template context for the report dashboard.
    #[must_use]
    pub fn template_context(vm: &ReportViewModel) -> Value {
        json!({
            "averagepercentage": vm.average_label(),
            "roundedaverage": vm.rounded_average(),
            "showdashboard": vm.show_dashboard(),
        })
    }
}

#[async_trait]
impl ReportRenderer for QuestionReport {
    fn name(&self) -> &'static str {
        "question"
    }

    async fn display(
        &self,
        target: &ActivityContext,
        mode: &OutputMode,
        ctx: &mut RenderContext<'_>,
    ) -> Result<(), ReportError> {
        let activity_id = target.activity_id();
        if mode.is_download() {
            // Exports are produced by the host; the page renders as usual.
            debug!(%activity_id, ?mode, "download requested for question report");
        }

        let question_data = self.provider.question_data(activity_id).await?;
        let scores = self.provider.user_scores(activity_id).await?;

        let vm = ReportViewModel::from_scores(&scores);
        let html = ctx
            .output
            .render_from_template(REPORT_TEMPLATE, &Self::template_context(&vm))?;
        let score_args = serde_json::to_value(&scores)?;
        let question_args = serde_json::to_value(&question_data)?;

        ctx.body.push_str(&html);
        ctx.page.js_call_amd(DASHBOARD_SCRIPT, "init", vec![score_args]);
        ctx.page
            .js_call_amd(QUESTION_VIEW_SCRIPT, "init", vec![question_args]);

        info!(
            %activity_id,
            attempts = scores.len(),
            rounded_average = vm.rounded_average(),
            "rendered question report"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_core::model::ScoreSet;

    #[test]
    fn context_for_empty_scores_hides_dashboard() {
        let vm = ReportViewModel::from_scores(&ScoreSet::empty());
        assert_eq!(
            QuestionReport::template_context(&vm),
            json!({"averagepercentage": "0", "roundedaverage": 0, "showdashboard": false})
        );
    }

    #[test]
    fn context_carries_two_decimal_average() {
        let vm = ReportViewModel::from_scores(&ScoreSet::from_scores([0.0, 0.0, 100.0]));
        assert_eq!(
            QuestionReport::template_context(&vm),
            json!({"averagepercentage": "33.33", "roundedaverage": 33, "showdashboard": true})
        );
    }
}
