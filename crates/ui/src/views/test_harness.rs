use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{InMemoryPracticeApi, PracticeApi};

use crate::context::{UiApp, build_app_context};
use crate::views::{
    DashboardView, ProfileView, QuickPracticeView, SentencePracticeView, VocabularyPracticeView,
};

#[derive(Clone)]
struct TestApp {
    api: InMemoryPracticeApi,
}

impl UiApp for TestApp {
    fn api(&self) -> Arc<dyn PracticeApi> {
        Arc::new(self.api.clone())
    }

    fn server_label(&self) -> String {
        "test server".to_string()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Profile,
    VocabularyPractice {
        language_id: u64,
        language_name: &'static str,
    },
    SentencePractice {
        language_id: u64,
        language_name: &'static str,
    },
    QuickPractice,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::VocabularyPractice {
            language_id,
            language_name,
        } => rsx! {
            VocabularyPracticeView {
                language_id,
                session_id: 1,
                language_name: language_name.to_string(),
            }
        },
        ViewKind::SentencePractice {
            language_id,
            language_name,
        } => rsx! {
            SentencePracticeView {
                language_id,
                session_id: 1,
                language_name: language_name.to_string(),
            }
        },
        ViewKind::QuickPractice => rsx! { QuickPracticeView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: InMemoryPracticeApi,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuilds and lets pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, api: InMemoryPracticeApi) -> ViewHarness {
    let app = Arc::new(TestApp { api: api.clone() });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, api }
}
