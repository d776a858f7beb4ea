use dioxus::prelude::*;

use lingua_core::model::{LanguageId, SkillLevel};
use services::LanguageCatalog;

use crate::context::AppContext;
use crate::vm::{map_user_languages, parse_language_selection, proficiency_label};

/// The learner's languages with level controls, plus the add form.
#[component]
pub fn LanguagesSection(
    catalog: LanguageCatalog,
    on_changed: EventHandler<()>,
    on_notice: EventHandler<String>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let mut new_language = use_signal(String::new);
    let mut new_level = use_signal(String::new);

    let rows = map_user_languages(&catalog);
    let available: Vec<(LanguageId, String)> = catalog
        .available_to_add()
        .into_iter()
        .map(|language| (language.id, language.label()))
        .collect();

    let profile = ctx.profile();
    let update_level = use_callback(move |(language_id, level): (LanguageId, String)| {
        let profile = profile.clone();
        spawn(async move {
            match profile.update_proficiency(language_id, &level).await {
                Ok(()) => on_changed.call(()),
                Err(err) => on_notice.call(err.user_message()),
            }
        });
    });

    let profile = ctx.profile();
    let remove_language = use_callback(move |language_id: LanguageId| {
        let profile = profile.clone();
        spawn(async move {
            match profile.remove_language(language_id).await {
                Ok(()) => on_changed.call(()),
                Err(err) => on_notice.call(err.user_message()),
            }
        });
    });

    let profile = ctx.profile();
    let add_language = use_callback(move |()| {
        let Some(language_id) = parse_language_selection(&new_language()) else {
            on_notice.call("Please select a language.".to_string());
            return;
        };
        let level = new_level();
        let profile = profile.clone();
        spawn(async move {
            match profile.add_language(language_id, &level).await {
                Ok(()) => {
                    new_language.set(String::new());
                    new_level.set(String::new());
                    on_changed.call(());
                }
                Err(err) => on_notice.call(err.user_message()),
            }
        });
    });

    rsx! {
        section { class: "profile-languages",
            h3 { "My Languages" }
            if rows.is_empty() {
                p { class: "empty", "You are not learning any languages yet." }
            }
            ul { class: "language-list",
                for row in rows {
                    li { key: "{row.id}", class: "language-list__item",
                        span { class: "language-list__label", "{row.label}" }
                        select {
                            class: "language-list__level",
                            "aria-label": "Proficiency",
                            onchange: move |evt| update_level.call((row.id, evt.value())),
                            if row.level_value.is_empty() {
                                option { value: "", selected: true, disabled: true, "{row.level_label}" }
                            }
                            for level in SkillLevel::ALL {
                                option {
                                    value: level.as_str(),
                                    selected: level.as_str() == row.level_value,
                                    {proficiency_label(Some(level))}
                                }
                            }
                        }
                        button {
                            class: "btn btn-danger",
                            r#type: "button",
                            onclick: move |_| remove_language.call(row.id),
                            "Remove"
                        }
                    }
                }
            }
            if !available.is_empty() {
                div { class: "form-row",
                    select {
                        "aria-label": "Language to add",
                        value: "{new_language}",
                        onchange: move |evt| new_language.set(evt.value()),
                        option { value: "", "Select a language" }
                        for (id, label) in available {
                            option { key: "{id}", value: "{id}", "{label}" }
                        }
                    }
                    select {
                        "aria-label": "Proficiency level",
                        value: "{new_level}",
                        onchange: move |evt| new_level.set(evt.value()),
                        option { value: "", "Level (optional)" }
                        for level in SkillLevel::ALL {
                            option { value: level.as_str(), {proficiency_label(Some(level))} }
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| add_language.call(()),
                        "Add Language"
                    }
                }
            }
        }
    }
}
