use dioxus::prelude::*;
use dioxus_router::use_navigator;

use lingua_core::model::SessionKind;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{ErrorPanel, MessageDialog};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LanguageCardVm, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut notice = use_signal(|| None::<String>);
    let starting = use_signal(|| false);

    let ctx_for_resource = ctx.clone();
    let resource = use_resource(move || {
        let ctx = ctx_for_resource.clone();
        async move {
            let catalog = ctx
                .refresh_catalog()
                .await
                .map_err(|_| ViewError::Catalog)?;
            Ok::<_, ViewError>(map_dashboard(&catalog))
        }
    });
    let state = view_state_from_resource(resource);

    let start_practice = use_callback(move |(card, kind): (LanguageCardVm, SessionKind)| {
        let profile = ctx.profile();
        let mut notice = notice;
        let mut starting = starting;
        if starting() {
            return;
        }
        spawn(async move {
            starting.set(true);
            let result = profile
                .start_practice(card.id, &card.name, kind)
                .await;
            starting.set(false);
            match result {
                Ok(config) => {
                    let _ = navigator.push(Route::for_session(kind, &config));
                }
                Err(err) => notice.set(Some(err.user_message())),
            }
        });
    });

    rsx! {
        div { class: "page dashboard",
            h2 { "Your Languages" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading…" }
                },
                ViewState::Error(err) => rsx! {
                    ErrorPanel {
                        message: err.message().to_string(),
                        on_retry: move |()| {
                            let mut resource = resource;
                            resource.restart();
                        },
                    }
                },
                ViewState::Ready(vm) => rsx! {
                    if let Some(label) = vm.empty_label {
                        p { class: "empty", "{label}" }
                    }
                    div { class: "language-grid",
                        for card in vm.cards {
                            LanguageCard {
                                key: "{card.id}",
                                card: card.clone(),
                                disabled: starting(),
                                on_start: move |choice| start_practice.call(choice),
                            }
                        }
                    }
                },
            }
            if let Some(message) = notice() {
                MessageDialog {
                    message,
                    on_close: move |()| notice.set(None),
                }
            }
        }
    }
}

#[component]
fn LanguageCard(
    card: LanguageCardVm,
    disabled: bool,
    on_start: EventHandler<(LanguageCardVm, SessionKind)>,
) -> Element {
    let vocabulary_card = card.clone();
    let sentence_card = card.clone();

    rsx! {
        article { class: "language-card",
            h3 {
                span { class: "language-card__flag", "{card.flag}" }
                " {card.name}"
            }
            p { class: "language-card__level", "Level: {card.level_label}" }
            div { class: "language-card__actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled,
                    onclick: move |_| on_start.call((vocabulary_card.clone(), SessionKind::Vocabulary)),
                    "Practice Vocabulary"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled,
                    onclick: move |_| on_start.call((sentence_card.clone(), SessionKind::Sentences)),
                    "Practice Sentences"
                }
            }
        }
    }
}
