use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::components::{ErrorPanel, MessageDialog};
use crate::views::{ViewError, ViewState, view_state_from_resource};

use super::languages::LanguagesSection;
use super::vocabulary::VocabularySection;

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut notice = use_signal(|| None::<String>);

    let catalog_resource = use_resource(move || {
        let ctx = ctx.clone();
        async move {
            ctx.refresh_catalog()
                .await
                .map_err(|_| ViewError::Catalog)
        }
    });
    let state = view_state_from_resource(catalog_resource);

    let on_catalog_changed = use_callback(move |()| {
        let mut resource = catalog_resource;
        resource.restart();
    });
    let on_notice = use_callback(move |message: String| notice.set(Some(message)));

    rsx! {
        div { class: "page profile",
            h2 { "Profile" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading…" }
                },
                ViewState::Error(err) => rsx! {
                    ErrorPanel {
                        message: err.message().to_string(),
                        on_retry: move |()| on_catalog_changed.call(()),
                    }
                },
                ViewState::Ready(catalog) => rsx! {
                    LanguagesSection {
                        catalog: catalog.clone(),
                        on_changed: on_catalog_changed,
                        on_notice,
                    }
                    VocabularySection { catalog, on_notice }
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
