use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use lingua_core::model::{LanguageId, SessionConfig, SessionId};
use services::session::{SentencePrompt, is_submit_key};
use services::{SentenceEvent, SentenceSession, SentenceState, SessionError, SessionProgress};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{ResultsPanel, SessionHeader};
use crate::vm::map_sentence_feedback;

#[derive(Clone, Debug, PartialEq)]
struct Screen {
    state: SentenceState,
    progress: SessionProgress,
}

impl Screen {
    fn of(session: &SentenceSession) -> Self {
        Self {
            state: session.state().clone(),
            progress: session.progress(),
        }
    }
}

#[component]
pub fn SentencePracticeView(language_id: u64, session_id: u64, language_name: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let config = SessionConfig::new(
        SessionId::new(session_id),
        LanguageId::new(language_id),
        language_name.clone(),
    );

    let mut vm = use_signal(|| None::<SentenceSession>);
    let mut screen = use_signal(|| None::<Screen>);
    let mut elapsed = use_signal(|| 0_u64);
    let mut answer = use_signal(String::new);
    let mut hint = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let api = ctx.api();
    let _start = use_resource(move || {
        let api = api.clone();
        let config = config.clone();
        async move {
            let mut session = SentenceSession::new(api, config);
            let mut updates = session.elapsed_updates();
            spawn(async move {
                while updates.changed().await.is_ok() {
                    let seconds = *updates.borrow();
                    elapsed.set(seconds);
                }
            });
            session.start().await;
            screen.set(Some(Screen::of(&session)));
            vm.set(Some(session));
        }
    });

    let dispatch = use_callback(move |event: SentenceEvent| {
        if busy() {
            return;
        }
        spawn(async move {
            let taken = {
                let mut guard = vm.write();
                guard.take()
            };
            let Some(mut session) = taken else {
                return;
            };
            busy.set(true);
            let submitted = matches!(event, SentenceEvent::Submit(_));
            match session.handle(event).await {
                Ok(()) => {
                    hint.set(None);
                    if submitted {
                        answer.set(String::new());
                    }
                }
                Err(SessionError::Validation(err)) => hint.set(Some(err.to_string())),
                Err(err) => log::debug!("ignored sentence event: {err}"),
            }
            elapsed.set(session.elapsed_secs());
            screen.set(Some(Screen::of(&session)));
            vm.set(Some(session));
            busy.set(false);
        });
    });

    let on_answer_key = use_callback(move |evt: KeyboardEvent| {
        let shift = evt.data.modifiers().contains(Modifiers::SHIFT);
        if is_submit_key(&evt.data.key().to_string(), shift) {
            evt.prevent_default();
            dispatch.call(SentenceEvent::Submit(answer()));
        }
    });

    let on_page_key = use_callback(move |evt: KeyboardEvent| {
        let on_feedback = matches!(
            screen().map(|current| current.state),
            Some(SentenceState::Feedback(_))
        );
        if on_feedback && is_submit_key(&evt.data.key().to_string(), false) {
            dispatch.call(SentenceEvent::Next);
        }
    });

    let title = format!("{language_name} Sentences");

    rsx! {
        div {
            class: "page practice sentence-practice",
            tabindex: "0",
            onkeydown: move |evt| on_page_key.call(evt),
            match screen() {
                None => rsx! {
                    p { class: "loading", "Generating sentence…" }
                },
                Some(Screen { state: SentenceState::Fetching { .. }, progress }) => rsx! {
                    SessionHeader { title: title.clone(), progress, elapsed: elapsed() }
                    p { class: "loading", "Generating sentence…" }
                },
                Some(Screen { state: SentenceState::FetchFailed { message }, .. }) => rsx! {
                    div { class: "error-panel",
                        p { "{message}" }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| dispatch.call(SentenceEvent::Retry),
                            "Try Again"
                        }
                        Link { to: Route::Dashboard {}, class: "btn btn-secondary", "Back to Dashboard" }
                    }
                },
                Some(Screen { state: SentenceState::Question(prompt), progress }) => rsx! {
                    SessionHeader { title: title.clone(), progress, elapsed: elapsed() }
                    SentenceCard {
                        prompt,
                        answer: answer(),
                        hint: hint(),
                        busy: busy(),
                        on_input: move |value| answer.set(value),
                        on_key: on_answer_key,
                        on_submit: move |()| dispatch.call(SentenceEvent::Submit(answer())),
                    }
                },
                Some(Screen { state: SentenceState::Feedback(feedback), progress }) => {
                    let vm = map_sentence_feedback(&feedback);
                    rsx! {
                        SessionHeader { title: title.clone(), progress, elapsed: elapsed() }
                        div { class: if vm.is_correct { "feedback feedback--correct" } else { "feedback feedback--incorrect" },
                            h3 { "{vm.title}" }
                            dl {
                                dt { "Your translation" }
                                dd { "{vm.your_translation}" }
                                dt { "Correct translation" }
                                dd { "{vm.correct_translation}" }
                            }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                disabled: busy(),
                                onclick: move |_| dispatch.call(SentenceEvent::Next),
                                "Next"
                            }
                        }
                    }
                }
                Some(Screen { state: SentenceState::Results(results), .. }) => rsx! {
                    ResultsPanel {
                        results,
                        on_again: move |()| dispatch.call(SentenceEvent::PracticeAgain),
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
fn SentenceCard(
    prompt: SentencePrompt,
    answer: String,
    hint: Option<String>,
    busy: bool,
    on_input: EventHandler<String>,
    on_key: EventHandler<KeyboardEvent>,
    on_submit: EventHandler<()>,
) -> Element {
    rsx! {
        section { class: "question",
            p { class: "question__hint", "Translate this sentence:" }
            blockquote { class: "question__sentence", "{prompt.sentence}" }
            textarea {
                class: "answer",
                placeholder: "Type your translation…",
                rows: "3",
                value: "{answer}",
                disabled: busy,
                oninput: move |evt| on_input.call(evt.value()),
                onkeydown: move |evt| on_key.call(evt),
            }
            if let Some(hint) = hint {
                p { class: "answer__hint", "{hint}" }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: busy,
                onclick: move |_| on_submit.call(()),
                "Submit"
            }
        }
    }
}
