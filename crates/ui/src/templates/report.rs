use dioxus::prelude::*;

use crate::vm::ReportDashboardVm;

#[derive(Props, Clone, PartialEq)]
pub struct ReportTemplateProps {
    pub dashboard: ReportDashboardVm,
}

/// Question report body: dashboard (or a notice when nobody attempted the
/// package yet) followed by the container the question view script fills.
#[component]
pub fn ReportTemplate(props: ReportTemplateProps) -> Element {
    let dashboard = props.dashboard;

    rsx! {
        div { class: "scormreport-question",
            if dashboard.show_dashboard {
                Dashboard { dashboard: dashboard.clone() }
            } else {
                div { class: "alert alert-info",
                    "No attempts have been recorded for this activity yet."
                }
            }
            div { id: "scormreport-question-results", class: "question-results" }
        }
    }
}

#[component]
fn Dashboard(dashboard: ReportDashboardVm) -> Element {
    rsx! {
        div { id: "scormreport-question-dashboard", class: "dashboard",
            div { class: "average-score",
                h3 { "Average score" }
                div { class: "progress-circle p{dashboard.rounded_average}",
                    span { class: "average-percentage", "{dashboard.average_percentage}%" }
                }
            }
            // The passing quota script reads the minimum score and fills the result.
            div { class: "passing-quota",
                h3 { "Passing quota" }
                label { r#for: "passingquota-minscore", "Minimum score" }
                input {
                    id: "passingquota-minscore",
                    r#type: "number",
                    min: "0",
                    max: "100",
                    step: "1",
                    value: "50",
                }
                span { id: "passingquota-result", class: "passing-quota-result" }
            }
        }
    }
}

pub(crate) fn render_report(dashboard: ReportDashboardVm) -> String {
    let mut dom = VirtualDom::new_with_props(ReportTemplate, ReportTemplateProps { dashboard });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}
