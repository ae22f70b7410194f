use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
struct ReportPageProps {
    title: String,
    body: String,
    footer: String,
}

#[component]
fn ReportPage(props: ReportPageProps) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            title { "{props.title}" }
        }
        body {
            main { class: "report", dangerous_inner_html: "{props.body}" }
            div { class: "page-footer", dangerous_inner_html: "{props.footer}" }
        }
    }
}

/// Wrap an already rendered report fragment and its footer scripts into a
/// standalone HTML document. The title is escaped; body and footer are
/// inserted as-is.
///
/// `rsx!` has no root `html` element, so the document element is added
/// around the rendered `head` and `body`.
#[must_use]
pub fn render_page(title: &str, body: &str, footer: &str) -> String {
    let mut dom = VirtualDom::new_with_props(
        ReportPage,
        ReportPageProps {
            title: title.to_string(),
            body: body.to_string(),
            footer: footer.to_string(),
        },
    );
    dom.rebuild_in_place();
    format!("<!DOCTYPE html><html>{}</html>", dioxus_ssr::render(&dom))
}
