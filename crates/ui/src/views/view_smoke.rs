use services::{Endpoint, InMemoryPracticeApi, NO_LANGUAGES_LABEL};

use super::test_harness::{ViewKind, setup_view_harness};

const SPANISH: ViewKind = ViewKind::VocabularyPractice {
    language_id: 1,
    language_name: "Spanish",
};

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_lists_languages() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, InMemoryPracticeApi::with_demo_data());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Spanish"), "missing language in {html}");
    assert!(html.contains("Level: Intermediate"), "missing level in {html}");
    assert!(html.contains("Practice Vocabulary"), "missing action in {html}");
    assert!(html.contains("Practice Sentences"), "missing action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, InMemoryPracticeApi::new());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(NO_LANGUAGES_LABEL), "missing placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_error_state() {
    let api = InMemoryPracticeApi::with_demo_data();
    api.fail(Endpoint::Languages);
    let mut harness = setup_view_harness(ViewKind::Dashboard, api);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Could not load your languages"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_languages_and_vocabulary() {
    let mut harness = setup_view_harness(ViewKind::Profile, InMemoryPracticeApi::with_demo_data());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("My Languages"), "missing languages section in {html}");
    assert!(html.contains("🇪🇸 Spanish"), "missing language label in {html}");
    assert!(html.contains("sobremesa"), "missing word in {html}");
    assert!(html.contains("No translation"), "missing placeholder in {html}");
    assert!(html.contains("Bulk Add"), "missing bulk form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_offers_unlearned_languages() {
    let mut harness = setup_view_harness(ViewKind::Profile, InMemoryPracticeApi::with_demo_data());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("🇩🇪 German"), "missing addable language in {html}");
    assert!(html.contains("Add Language"), "missing add button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn vocabulary_practice_smoke_renders_first_question() {
    let mut harness = setup_view_harness(SPANISH, InMemoryPracticeApi::with_demo_data());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Spanish Vocabulary"), "missing title in {html}");
    assert!(html.contains("Question 1 / "), "missing progress in {html}");
    assert!(html.contains("Time: 00:00"), "missing timer in {html}");
    assert!(html.contains("1. "), "missing numbered options in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn vocabulary_practice_smoke_renders_unavailable_state() {
    let view = ViewKind::VocabularyPractice {
        language_id: 3,
        language_name: "German",
    };
    let mut harness = setup_view_harness(view, InMemoryPracticeApi::with_demo_data());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No vocabulary available"), "missing empty state in {html}");
    assert!(html.contains("Go to Profile"), "missing profile link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn vocabulary_practice_smoke_renders_load_failure() {
    let api = InMemoryPracticeApi::with_demo_data();
    api.fail(Endpoint::PracticeVocabulary);
    let mut harness = setup_view_harness(SPANISH, api);
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Failed to load vocabulary questions"),
        "missing failure in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn sentence_practice_smoke_renders_generated_sentence() {
    let view = ViewKind::SentencePractice {
        language_id: 1,
        language_name: "Spanish",
    };
    let mut harness = setup_view_harness(view, InMemoryPracticeApi::with_demo_data());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("El gato duerme."), "missing sentence in {html}");
    assert!(html.contains("Question 1 / 5"), "missing progress in {html}");
    assert!(html.contains("Submit"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn sentence_practice_smoke_renders_fetch_failure() {
    let api = InMemoryPracticeApi::with_demo_data();
    api.fail(Endpoint::GenerateSentence);
    let view = ViewKind::SentencePractice {
        language_id: 1,
        language_name: "Spanish",
    };
    let mut harness = setup_view_harness(view, api);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Failed to generate sentence"), "missing failure in {html}");
    assert!(html.contains("Try Again"), "missing retry in {html}");
    assert_eq!(harness.api.calls(Endpoint::GenerateSentence), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn quick_practice_smoke_waits_for_a_sentence() {
    let mut harness = setup_view_harness(ViewKind::QuickPractice, InMemoryPracticeApi::new());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Quick Practice"), "missing title in {html}");
    assert!(html.contains("New Sentence"), "missing fetch button in {html}");
    assert_eq!(harness.api.calls(Endpoint::LegacySentence), 0);
}
