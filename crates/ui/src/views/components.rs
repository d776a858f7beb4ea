use dioxus::prelude::*;

use services::{SessionProgress, SessionResults};

use crate::vm::{format_timer, map_results};

/// Modal notice with a single dismiss button.
#[component]
pub fn MessageDialog(message: String, on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog", role: "alertdialog",
                p { class: "dialog__message", "{message}" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "OK"
                }
            }
        }
    }
}

#[component]
pub fn ErrorPanel(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "error-panel",
            p { "{message}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}

/// Title bar shared by both practice flows.
#[component]
pub fn SessionHeader(title: String, progress: SessionProgress, elapsed: u64) -> Element {
    let question = progress.question_label();
    let score = progress.score_label();
    let timer = format_timer(elapsed);

    rsx! {
        header { class: "session-header",
            h2 { "{title}" }
            div { class: "session-header__stats",
                span { class: "session-header__question", "Question {question}" }
                span { class: "session-header__score", "Score: {score}" }
                span { class: "session-header__timer", "{timer}" }
            }
        }
    }
}

#[component]
pub fn ResultsPanel(
    results: SessionResults,
    on_again: EventHandler<()>,
    on_done: EventHandler<()>,
) -> Element {
    let vm = map_results(&results);

    rsx! {
        section { class: "results",
            h2 { "Session Complete!" }
            p { class: "results__message", "{vm.message}" }
            dl { class: "results__stats",
                dt { "Score" }
                dd { "{vm.score_label}" }
                dt { "Accuracy" }
                dd { "{vm.accuracy_label}" }
                dt { "Time" }
                dd { "{vm.time_label}" }
            }
            div { class: "results__actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_again.call(()),
                    "Practice Again"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_done.call(()),
                    "Back to Dashboard"
                }
            }
        }
    }
}
