use dioxus::prelude::*;

use services::QuickPractice;

use crate::context::AppContext;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Snapshot {
    sentence: Option<String>,
    result_label: Option<&'static str>,
    correct: Option<bool>,
}

impl Snapshot {
    fn of(widget: &QuickPractice) -> Self {
        Self {
            sentence: widget.sentence().map(str::to_string),
            result_label: widget.result_label(),
            correct: widget.result(),
        }
    }
}

/// The original single-sentence widget: one sentence, one check, no session.
#[component]
pub fn QuickPracticeView() -> Element {
    let ctx = use_context::<AppContext>();
    let api = ctx.api();
    let mut widget = use_signal(move || Some(QuickPractice::new(api)));
    let mut snapshot = use_signal(Snapshot::default);
    let mut translation = use_signal(String::new);

    let new_sentence = use_callback(move |()| {
        spawn(async move {
            let taken = {
                let mut guard = widget.write();
                guard.take()
            };
            let Some(mut current) = taken else {
                return;
            };
            if current.new_sentence().await {
                translation.set(String::new());
            }
            snapshot.set(Snapshot::of(&current));
            widget.set(Some(current));
        });
    });

    let check = use_callback(move |()| {
        let text = translation();
        spawn(async move {
            let taken = {
                let mut guard = widget.write();
                guard.take()
            };
            let Some(mut current) = taken else {
                return;
            };
            current.check(&text).await;
            snapshot.set(Snapshot::of(&current));
            widget.set(Some(current));
        });
    });

    let current = snapshot();
    let sentence_label = current
        .sentence
        .clone()
        .unwrap_or_else(|| "Press \"New Sentence\" to begin.".to_string());

    rsx! {
        div { class: "page quick-practice",
            h2 { "Quick Practice" }
            p { class: "quick-practice__sentence", "{sentence_label}" }
            input {
                r#type: "text",
                placeholder: "Your translation",
                value: "{translation}",
                oninput: move |evt| translation.set(evt.value()),
            }
            div { class: "form-row",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| new_sentence.call(()),
                    "New Sentence"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: current.sentence.is_none(),
                    onclick: move |_| check.call(()),
                    "Check"
                }
            }
            if let Some(label) = current.result_label {
                p {
                    class: if current.correct == Some(true) { "result result--correct" } else { "result result--incorrect" },
                    "{label}"
                }
            }
        }
    }
}
