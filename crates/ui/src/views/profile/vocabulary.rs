use dioxus::prelude::*;

use lingua_core::model::{SkillLevel, VocabularyFilter, VocabularyId};
use services::LanguageCatalog;

use crate::context::AppContext;
use crate::views::components::ErrorPanel;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    LanguageOptionVm, language_options, map_vocabulary_rows, parse_language_selection,
    proficiency_label,
};

fn non_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[component]
pub fn VocabularySection(catalog: LanguageCatalog, on_notice: EventHandler<String>) -> Element {
    let ctx = use_context::<AppContext>();
    let options = language_options(&catalog);

    let filter_language = use_signal(String::new);
    let filter_difficulty = use_signal(String::new);

    let profile = ctx.profile();
    let mut resource = use_resource(move || {
        let profile = profile.clone();
        let filter = VocabularyFilter {
            language_id: parse_language_selection(&filter_language()),
            difficulty_level: non_empty(filter_difficulty()),
        };
        async move {
            profile
                .vocabulary(&filter)
                .await
                .map_err(|_| ViewError::Vocabulary)
        }
    });
    let state = view_state_from_resource(resource);
    let on_changed = use_callback(move |()| resource.restart());

    let profile = ctx.profile();
    let delete_word = use_callback(move |id: VocabularyId| {
        let profile = profile.clone();
        spawn(async move {
            match profile.delete_vocabulary(id).await {
                Ok(()) => on_changed.call(()),
                Err(err) => on_notice.call(err.user_message()),
            }
        });
    });

    rsx! {
        section { class: "profile-vocabulary",
            h3 { "My Vocabulary" }
            AddWordForm { options: options.clone(), on_changed, on_notice }
            BulkAddForm { options: options.clone(), on_changed, on_notice }
            VocabularyFilters { options, filter_language, filter_difficulty }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading…" }
                },
                ViewState::Error(err) => rsx! {
                    ErrorPanel {
                        message: err.message().to_string(),
                        on_retry: move |()| on_changed.call(()),
                    }
                },
                ViewState::Ready(items) => {
                    let visible: Vec<_> = items.iter().collect();
                    let rows = map_vocabulary_rows(&visible, &catalog);
                    rsx! {
                        if rows.is_empty() {
                            p { class: "empty", "No vocabulary found. Add some words above." }
                        }
                        table { class: "vocabulary-table",
                            tbody {
                                for row in rows {
                                    tr { key: "{row.id}",
                                        td { class: "vocabulary-table__word", "{row.word}" }
                                        td {
                                            class: if row.has_translation { "vocabulary-table__translation" } else { "vocabulary-table__translation muted" },
                                            "{row.translation}"
                                        }
                                        td { "{row.language_label}" }
                                        td { "{row.difficulty}" }
                                        td { "Mastery: {row.mastery_label}" }
                                        td { "{row.review_label}" }
                                        td {
                                            button {
                                                class: "btn btn-danger",
                                                r#type: "button",
                                                onclick: move |_| delete_word.call(VocabularyId::new(row.id)),
                                                "Delete"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn LanguageSelect(
    label: &'static str,
    placeholder: &'static str,
    options: Vec<LanguageOptionVm>,
    value: Signal<String>,
) -> Element {
    let mut value = value;

    rsx! {
        select {
            "aria-label": label,
            value: "{value}",
            onchange: move |evt| value.set(evt.value()),
            option { value: "", "{placeholder}" }
            for option_vm in options {
                option { key: "{option_vm.value}", value: "{option_vm.value}", "{option_vm.label}" }
            }
        }
    }
}

#[component]
fn LevelSelect(label: &'static str, placeholder: &'static str, value: Signal<String>) -> Element {
    let mut value = value;

    rsx! {
        select {
            "aria-label": label,
            value: "{value}",
            onchange: move |evt| value.set(evt.value()),
            option { value: "", "{placeholder}" }
            for level in SkillLevel::ALL {
                option { value: level.as_str(), {proficiency_label(Some(level))} }
            }
        }
    }
}

#[component]
fn VocabularyFilters(
    options: Vec<LanguageOptionVm>,
    filter_language: Signal<String>,
    filter_difficulty: Signal<String>,
) -> Element {
    rsx! {
        div { class: "form-row filters",
            LanguageSelect {
                label: "Filter by language",
                placeholder: "All languages",
                options,
                value: filter_language,
            }
            LevelSelect {
                label: "Filter by difficulty",
                placeholder: "All levels",
                value: filter_difficulty,
            }
        }
    }
}

#[component]
fn AddWordForm(
    options: Vec<LanguageOptionVm>,
    on_changed: EventHandler<()>,
    on_notice: EventHandler<String>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let language = use_signal(String::new);
    let mut word = use_signal(String::new);
    let mut translation = use_signal(String::new);

    let profile = ctx.profile();
    let submit = use_callback(move |()| {
        let profile = profile.clone();
        let language_id = parse_language_selection(&language());
        let (word_value, translation_value) = (word(), translation());
        spawn(async move {
            match profile
                .add_vocabulary(language_id, &word_value, &translation_value)
                .await
            {
                Ok(()) => {
                    word.set(String::new());
                    translation.set(String::new());
                    on_changed.call(());
                }
                Err(err) => on_notice.call(err.user_message()),
            }
        });
    });

    rsx! {
        div { class: "form-row add-word",
            LanguageSelect {
                label: "Word language",
                placeholder: "Select a language",
                options,
                value: language,
            }
            input {
                r#type: "text",
                placeholder: "Word",
                value: "{word}",
                oninput: move |evt| word.set(evt.value()),
            }
            input {
                r#type: "text",
                placeholder: "Translation (optional)",
                value: "{translation}",
                oninput: move |evt| translation.set(evt.value()),
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| submit.call(()),
                "Add Word"
            }
        }
    }
}

#[component]
fn BulkAddForm(
    options: Vec<LanguageOptionVm>,
    on_changed: EventHandler<()>,
    on_notice: EventHandler<String>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let language = use_signal(String::new);
    let level = use_signal(|| SkillLevel::default().as_str().to_string());
    let mut words = use_signal(String::new);

    let profile = ctx.profile();
    let submit = use_callback(move |()| {
        let profile = profile.clone();
        let language_id = parse_language_selection(&language());
        let (words_value, level_value) = (words(), level());
        spawn(async move {
            match profile
                .bulk_add(language_id, &words_value, &level_value)
                .await
            {
                Ok(added) => {
                    words.set(String::new());
                    on_changed.call(());
                    on_notice.call(format!("Added {added} words."));
                }
                Err(err) => on_notice.call(err.user_message()),
            }
        });
    });

    rsx! {
        div { class: "form-column bulk-add",
            h4 { "Bulk Add" }
            div { class: "form-row",
                LanguageSelect {
                    label: "Bulk language",
                    placeholder: "Select a language",
                    options,
                    value: language,
                }
                LevelSelect {
                    label: "Bulk difficulty",
                    placeholder: "Difficulty",
                    value: level,
                }
            }
            textarea {
                placeholder: "One word per line, or separated by commas",
                rows: "5",
                value: "{words}",
                oninput: move |evt| words.set(evt.value()),
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| submit.call(()),
                "Add Words"
            }
        }
    }
}
