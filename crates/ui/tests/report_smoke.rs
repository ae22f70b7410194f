use std::sync::Arc;

use report_core::model::{
    ActivityContext, ActivityId, AttemptRecord, Course, CourseId, CourseModule, CourseModuleId,
    InteractionRecord, ScormActivity, UserId,
};
use services::{OutputMode, PageRequirements, QuestionReport, RenderContext, ReportRenderer};
use storage::repository::{AttemptRepository, InMemoryRepository};
use ui::{SsrTemplates, render_page};

fn target() -> ActivityContext {
    ActivityContext::new(
        ScormActivity {
            id: ActivityId::new(1),
            course_id: CourseId::new(1),
            name: "Chemistry <basics>".into(),
        },
        CourseModule {
            id: CourseModuleId::new(10),
            course_id: CourseId::new(1),
            activity_id: ActivityId::new(1),
        },
        Course {
            id: CourseId::new(1),
            short_name: "CHEM".into(),
            full_name: "Chemistry".into(),
        },
    )
    .unwrap()
}

async fn render_report(repo: InMemoryRepository) -> String {
    let report = QuestionReport::new(Arc::new(repo));
    let templates = SsrTemplates::new();
    let mut page = PageRequirements::new();
    let mut body = String::new();
    let target = target();
    {
        let mut ctx = RenderContext::new(&templates, &mut page, &mut body);
        report
            .display(&target, &OutputMode::View, &mut ctx)
            .await
            .expect("display report");
    }
    let footer = page.render_footer().expect("footer");
    render_page(&target.activity().name, &body, &footer)
}

#[tokio::test]
async fn report_page_smoke_renders_dashboard_and_scripts() {
    let repo = InMemoryRepository::new();
    for (user, score) in [(1, Some(0.0)), (2, Some(0.0)), (3, Some(100.0))] {
        repo.record_attempt(&AttemptRecord {
            activity_id: ActivityId::new(1),
            user_id: UserId::new(user),
            attempt: 1,
            score,
        })
        .await
        .unwrap();
    }
    repo.record_interaction(&InteractionRecord {
        activity_id: ActivityId::new(1),
        user_id: UserId::new(3),
        attempt: 1,
        question_id: "q1".into(),
        description: "Symbol for sodium".into(),
        response: "Na".into(),
        correct: true,
    })
    .await
    .unwrap();

    let html = render_report(repo).await;

    assert!(html.contains("Chemistry &lt;basics&gt;"), "missing title in {html}");
    assert!(html.contains("33.33%"), "missing average in {html}");
    assert!(html.contains("progress-circle p33"), "missing rounded average in {html}");
    assert!(
        html.contains("scormreport_question/dashboard_passingquota"),
        "missing dashboard script in {html}"
    );
    assert!(html.contains("amd.init([0.0,0.0,100.0])"), "missing scores in {html}");
    assert!(html.contains("scormreport_question/report_view"), "missing view script in {html}");
    assert!(html.contains("Symbol for sodium"), "missing question data in {html}");
}

#[tokio::test]
async fn report_page_smoke_renders_notice_without_attempts() {
    let html = render_report(InMemoryRepository::new()).await;

    assert!(html.contains("No attempts have been recorded"), "missing notice in {html}");
    assert!(!html.contains("passingquota-minscore"), "unexpected dashboard in {html}");
    assert!(html.contains("amd.init([])"), "missing empty scores in {html}");
}
