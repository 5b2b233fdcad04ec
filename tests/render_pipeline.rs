//! End-to-end tests: document JSON in, render tree / HTML out

use pagekit::form::SubmissionSink;
use pagekit::host::HostEffect;
use pagekit::render::Element;
use pagekit::{
    render_initial, FormScope, MemorySink, PageDocument, PageSession, PageView, RecordingHost,
    RenderConfig, SubmitStatus,
};
use serde_json::json;

const LANDING: &str = "tests/fixtures/landing.json";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn landing() -> PageDocument {
    PageDocument::from_path(std::path::Path::new(LANDING)).expect("fixture parses")
}

fn sections_of(root: &pagekit::Node) -> Vec<&Element> {
    root.elements()
        .into_iter()
        .filter(|e| e.tag == "section")
        .collect()
}

#[test]
fn fixture_renders_every_section_in_order() {
    init_logger();
    let doc = landing();
    let page = render_initial(&doc, &RenderConfig::default());
    assert_eq!(page.view, PageView::Sections);

    let keys: Vec<&str> = sections_of(&page.root)
        .iter()
        .filter_map(|e| e.key.as_deref())
        .collect();
    assert_eq!(
        keys,
        vec!["hero", "why", "numbers", "quotes", "story", "shot", "tour", "pricing", "closer", "form"]
    );

    let html = page.to_html();
    assert!(html.contains("font-family: Work Sans"));
    assert!(html.contains("linear-gradient(to bottom, #ECFEFF, #F0FDF4)"));
}

#[test]
fn unknown_section_kind_renders_nothing_inside() {
    let page = render_initial(&landing(), &RenderConfig::default());
    let pricing = sections_of(&page.root)
        .into_iter()
        .find(|e| e.key.as_deref() == Some("pricing"))
        .unwrap();
    assert!(pricing.children.is_empty());
    assert_eq!(pricing.attrs["id"], "pricing-table");
}

#[test]
fn section_styles_resolve_per_background_mode() {
    let page = render_initial(&landing(), &RenderConfig::default());
    let by_key = |k: &str| {
        sections_of(&page.root)
            .into_iter()
            .find(|e| e.key.as_deref() == Some(k))
            .unwrap()
            .clone()
    };

    let hero = by_key("hero");
    assert_eq!(hero.style.get("background-color"), Some("#000000"));
    assert_eq!(hero.style.get("color"), Some("#FFFFFF"));
    assert!(hero.has_class("py-24"));

    let why = by_key("why");
    assert_eq!(why.style.get("background-size"), Some("20px 20px"));
    assert_eq!(why.style.get("background-color"), Some("#FFFFFF"));

    let shot = by_key("shot");
    assert_eq!(
        shot.style.get("background-image"),
        Some("url(\"/assets/texture.jpg\")")
    );
    assert_eq!(shot.style.get("background-attachment"), None);

    let closer = by_key("closer");
    assert_eq!(
        closer.style.get("background"),
        Some("linear-gradient(to right, #2563EB, #7C3AED)")
    );

    let story = by_key("story");
    assert_eq!(story.style.get("background-color"), Some("transparent"));
    assert!(story.animation.is_none());
}

#[test]
fn rich_text_is_emitted_verbatim_and_other_text_escaped() {
    let doc = PageDocument::from_value(&json!({ "sections": [
        { "id": "t", "type": "text", "content": { "title": "<i>x</i>", "body": "<p>ok</p>" } }
    ] }))
    .unwrap();
    let html = render_initial(&doc, &RenderConfig::default()).to_html();
    assert!(html.contains("<p>ok</p>"));
    assert!(html.contains("&lt;i&gt;x&lt;/i&gt;"));
}

#[test]
fn scroll_effects_and_staggers_are_attached() {
    let page = render_initial(&landing(), &RenderConfig::default());
    let why = sections_of(&page.root)
        .into_iter()
        .find(|e| e.key.as_deref() == Some("why"))
        .unwrap();
    assert!(why.animation.is_some());

    let delays: Vec<f32> = why
        .children
        .iter()
        .flat_map(|c| c.elements())
        .filter(|e| e.has_class("bg-white") && e.key.is_some())
        .filter_map(|e| e.animation.map(|a| a.transition.delay_secs))
        .collect();
    assert_eq!(delays.len(), 3);
    assert!((delays[2] - 0.2).abs() < 1e-6);
}

#[test]
fn buttons_dispatch_to_the_host() {
    let session = PageSession::new(landing(), RenderConfig::default());
    let host = RecordingHost::with_elements(["#form"]);

    session.click_button("hero", &host);
    session.click_button("closer", &host);
    session.click_button("story", &host);

    let effects = host.effects();
    assert_eq!(effects.len(), 2);
    assert!(matches!(&effects[0], HostEffect::ScrolledTo { selector, .. } if selector == "#form"));
    match &effects[1] {
        HostEffect::Downloaded(anchor) => {
            assert_eq!(anchor.href, "/assets/brochure.pdf");
            assert_eq!(anchor.download, "");
        }
        other => panic!("unexpected effect {:?}", other),
    }
}

#[test]
fn scroll_to_missing_target_is_a_no_op() {
    let session = PageSession::new(landing(), RenderConfig::default());
    let host = RecordingHost::new();
    session.click_button("hero", &host);
    assert!(host.effects().is_empty());
}

#[tokio::test]
async fn form_section_submission_round_trip() {
    init_logger();
    let mut session = PageSession::new(landing(), RenderConfig::default());
    let scope = FormScope::Section("form".to_string());
    session.set_field(&scope, "name", "Jane Doe");
    session.set_field(&scope, "email", "jane@example.com");

    let page = session.render();
    assert_eq!(page.root.find_by_id("email").unwrap().attrs["value"], "jane@example.com");
    assert!(page.root.text_content().contains("Book it"));

    let sink = MemorySink::new();
    session.submit(&scope, &sink).await.unwrap();

    assert_eq!(session.form(&scope).unwrap().status(), &SubmitStatus::Submitted);
    assert_eq!(session.view(), PageView::ThankYou);
    let delivered = sink.deliveries();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0]["name"], "Jane Doe");
    assert!(!delivered[0].contains_key("message"));

    // a second submit is ignored once submitted
    session.submit(&scope, &sink).await.unwrap();
    assert_eq!(sink.deliveries().len(), 1);
}

#[tokio::test]
async fn two_forms_submit_independently() {
    let doc = PageDocument::from_value(&json!({
        "formFields": [{ "id": "email", "type": "email" }],
        "sections": [{ "id": "top", "type": "form" }, { "id": "bottom", "type": "form" }]
    }))
    .unwrap();
    let mut session = PageSession::new(doc, RenderConfig::default());
    let top = FormScope::Section("top".to_string());
    let bottom = FormScope::Section("bottom".to_string());
    session.set_field(&top, "email", "a@example.com");
    session.set_field(&bottom, "email", "b@example.com");

    let top_values = session.begin_submit(&top).unwrap();
    let bottom_values = session.begin_submit(&bottom).unwrap();
    assert!(session.form(&top).unwrap().is_submitting());
    assert!(session.form(&bottom).unwrap().is_submitting());

    let ok = MemorySink::new();
    let failing = MemorySink::failing("offline");
    let (top_result, bottom_result) =
        futures::join!(ok.deliver(&top_values), failing.deliver(&bottom_values));

    session.finish_submit(&bottom, &bottom_result);
    assert_eq!(session.view(), PageView::Sections);
    assert_eq!(session.form(&bottom).unwrap().error(), Some("Submission failed: offline"));
    assert!(session.form(&top).unwrap().is_submitting());

    session.finish_submit(&top, &top_result);
    assert_eq!(session.view(), PageView::ThankYou);
    assert_eq!(ok.deliveries()[0]["email"], "a@example.com");
}

#[test]
fn empty_document_falls_back_to_form_with_defaults() {
    let doc = PageDocument::from_json_str("{}").unwrap();
    let page = render_initial(&doc, &RenderConfig::default());
    assert_eq!(page.view, PageView::FallbackForm);
    let html = page.to_html();
    assert!(html.contains("font-family: Inter"));
    assert!(html.contains(">Submit</button>"));
}

#[test]
fn malformed_document_is_rejected() {
    let err = PageDocument::from_json_str("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, pagekit::Error::DocumentError(_)));
    let err = PageDocument::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, pagekit::Error::Json(_)));
}
