use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use lingua_core::model::{LanguageId, SessionConfig, SessionId};
use services::session::{VocabularyPrompt, VocabularyState};
use services::{SessionProgress, VocabularyEvent, VocabularySession};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{ResultsPanel, SessionHeader};
use crate::vm::map_vocabulary_feedback;

/// What the view renders; copied out of the session after every transition.
#[derive(Clone, Debug, PartialEq)]
struct Screen {
    state: VocabularyState,
    progress: SessionProgress,
}

impl Screen {
    fn of(session: &VocabularySession) -> Self {
        Self {
            state: session.state().clone(),
            progress: session.progress(),
        }
    }
}

/// Digit keys pick an option; 1 is the first.
fn option_for_key(key: &str) -> Option<usize> {
    match key {
        "1" => Some(0),
        "2" => Some(1),
        "3" => Some(2),
        "4" => Some(3),
        _ => None,
    }
}

#[component]
pub fn VocabularyPracticeView(language_id: u64, session_id: u64, language_name: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let config = SessionConfig::new(
        SessionId::new(session_id),
        LanguageId::new(language_id),
        language_name.clone(),
    );

    let mut vm = use_signal(|| None::<VocabularySession>);
    let mut screen = use_signal(|| None::<Screen>);
    let mut elapsed = use_signal(|| 0_u64);

    let api = ctx.api();
    let _start = use_resource(move || {
        let api = api.clone();
        let config = config.clone();
        async move {
            let mut session = VocabularySession::new(api, config);
            session.start().await;
            let mut updates = session.elapsed_updates();
            spawn(async move {
                while updates.changed().await.is_ok() {
                    let seconds = *updates.borrow();
                    elapsed.set(seconds);
                }
            });
            screen.set(Some(Screen::of(&session)));
            vm.set(Some(session));
        }
    });

    let dispatch = use_callback(move |event: VocabularyEvent| {
        spawn(async move {
            let taken = {
                let mut guard = vm.write();
                guard.take()
            };
            let Some(mut session) = taken else {
                return;
            };
            if let Err(err) = session.handle(event).await {
                log::debug!("ignored {event:?}: {err}");
            }
            elapsed.set(session.elapsed_secs());
            screen.set(Some(Screen::of(&session)));
            vm.set(Some(session));
        });
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let key = evt.data.key().to_string();
        match screen().map(|current| current.state) {
            Some(VocabularyState::Question(_)) => {
                if let Some(index) = option_for_key(&key) {
                    dispatch.call(VocabularyEvent::Select(index));
                }
            }
            Some(VocabularyState::Feedback(_)) if key == "Enter" => {
                dispatch.call(VocabularyEvent::Next);
            }
            _ => {}
        }
    });

    let title = format!("{language_name} Vocabulary");

    rsx! {
        div {
            class: "page practice vocabulary-practice",
            tabindex: "0",
            onkeydown: move |evt| on_key.call(evt),
            match screen() {
                None | Some(Screen { state: VocabularyState::Loading, .. }) => rsx! {
                    p { class: "loading", "Loading questions…" }
                },
                Some(Screen { state: VocabularyState::Unavailable, .. }) => rsx! {
                    div { class: "empty-state",
                        h2 { "No vocabulary available" }
                        p { "Add some {language_name} words to your profile to practice them here." }
                        Link { to: Route::Profile {}, class: "btn btn-primary", "Go to Profile" }
                    }
                },
                Some(Screen { state: VocabularyState::LoadFailed { message }, .. }) => rsx! {
                    div { class: "error-panel",
                        p { "{message}" }
                        Link { to: Route::Dashboard {}, class: "btn btn-secondary", "Back to Dashboard" }
                    }
                },
                Some(Screen { state: VocabularyState::Question(prompt), progress }) => rsx! {
                    SessionHeader { title: title.clone(), progress, elapsed: elapsed() }
                    QuestionCard {
                        prompt,
                        on_select: move |index| dispatch.call(VocabularyEvent::Select(index)),
                    }
                },
                Some(Screen { state: VocabularyState::Feedback(feedback), progress }) => {
                    let vm = map_vocabulary_feedback(&feedback);
                    rsx! {
                        SessionHeader { title: title.clone(), progress, elapsed: elapsed() }
                        div { class: if vm.is_correct { "feedback feedback--correct" } else { "feedback feedback--incorrect" },
                            h3 { "{vm.title}" }
                            if let Some(correction) = vm.correction {
                                p { class: "feedback__correction", "{correction}" }
                            }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| dispatch.call(VocabularyEvent::Next),
                                "Next"
                            }
                        }
                    }
                }
                Some(Screen { state: VocabularyState::Results(results), .. }) => rsx! {
                    ResultsPanel {
                        results,
                        on_again: move |()| dispatch.call(VocabularyEvent::PracticeAgain),
                        on_done: move |()| {
                            let _ = navigator.push(Route::Dashboard {});
                        },
                    }
                },
            }
        }
    }
}

#[component]
fn QuestionCard(prompt: VocabularyPrompt, on_select: EventHandler<usize>) -> Element {
    let options: Vec<(usize, String)> = prompt
        .options
        .iter()
        .enumerate()
        .map(|(index, option)| (index, format!("{}. {}", index + 1, option.label())))
        .collect();

    rsx! {
        section { class: "question",
            p { class: "question__hint", "What does this word mean?" }
            h2 { class: "question__word", "{prompt.word}" }
            div { class: "question__options",
                for (index, label) in options {
                    button {
                        key: "{index}",
                        class: "btn option",
                        r#type: "button",
                        onclick: move |_| on_select.call(index),
                        "{label}"
                    }
                }
            }
        }
    }
}
