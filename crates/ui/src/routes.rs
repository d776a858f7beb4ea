use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use lingua_core::model::{SessionConfig, SessionKind};

use crate::context::AppContext;
use crate::views::{
    DashboardView, ProfileView, QuickPracticeView, SentencePracticeView, VocabularyPracticeView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/profile", ProfileView)] Profile {},
        #[route("/practice/vocabulary/:language_id/:session_id/:language_name", VocabularyPracticeView)]
        VocabularyPractice { language_id: u64, session_id: u64, language_name: String },
        #[route("/practice/sentences/:language_id/:session_id/:language_name", SentencePracticeView)]
        SentencePractice { language_id: u64, session_id: u64, language_name: String },
        #[route("/quick-practice", QuickPracticeView)] QuickPractice {},
}

impl Route {
    /// The practice flow for a freshly started server session.
    #[must_use]
    pub fn for_session(kind: SessionKind, config: &SessionConfig) -> Self {
        let language_id = config.language_id.value();
        let session_id = config.session_id.value();
        let language_name = config.language_name.clone();
        match kind {
            SessionKind::Vocabulary => Route::VocabularyPractice {
                language_id,
                session_id,
                language_name,
            },
            SessionKind::Sentences => Route::SentencePractice {
                language_id,
                session_id,
                language_name,
            },
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();

    rsx! {
        nav { class: "sidebar",
            h1 { "Lingua" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Profile {}, "Profile" } }
                li { Link { to: Route::QuickPractice {}, "Quick Practice" } }
            }
            p { class: "sidebar__server", "{ctx.server_label()}" }
        }
    }
}
