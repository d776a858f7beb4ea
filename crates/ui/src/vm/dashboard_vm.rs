use lingua_core::model::LanguageId;
use services::{LanguageCatalog, NO_LANGUAGES_LABEL};

use super::profile_vm::proficiency_label;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageCardVm {
    pub id: LanguageId,
    pub name: String,
    pub flag: String,
    pub level_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub cards: Vec<LanguageCardVm>,
    pub empty_label: Option<&'static str>,
}

/// One card per studied language, in the order the server listed them.
#[must_use]
pub fn map_dashboard(catalog: &LanguageCatalog) -> DashboardVm {
    let cards: Vec<LanguageCardVm> = catalog
        .user_languages()
        .iter()
        .filter_map(|entry| {
            let language = catalog.language(entry.language_id)?;
            Some(LanguageCardVm {
                id: language.id,
                name: language.name.clone(),
                flag: language.flag_emoji.clone(),
                level_label: proficiency_label(entry.proficiency_level).to_string(),
            })
        })
        .collect();
    let empty_label = cards.is_empty().then_some(NO_LANGUAGES_LABEL);
    DashboardVm { cards, empty_label }
}
