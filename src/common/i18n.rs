// src/common/i18n.rs

use std::collections::HashMap;

// Catálogos embutidos no binário: não dependem do diretório de execução
const EN_CATALOG: &str = include_str!("../../locales/en.json");
const PT_CATALOG: &str = include_str!("../../locales/pt.json");

pub const DEFAULT_LANG: &str = "en";

/// Mensagens traduzidas, indexadas por idioma e depois por chave ("errors.worker_not_found").
#[derive(Debug, Clone, Default)]
pub struct I18nStore {
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl I18nStore {
    pub fn embedded() -> Result<Self, serde_json::Error> {
        let mut store = Self::default();
        store.insert_catalog("en", EN_CATALOG)?;
        store.insert_catalog("pt", PT_CATALOG)?;
        Ok(store)
    }

    pub fn insert_catalog(&mut self, lang: &str, raw_json: &str) -> Result<(), serde_json::Error> {
        let messages: HashMap<String, String> = serde_json::from_str(raw_json)?;
        self.catalogs.insert(lang.to_string(), messages);
        Ok(())
    }

    /// Idioma pedido -> inglês -> a própria chave.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(DEFAULT_LANG, key))
            .unwrap_or(key)
            .to_string()
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.catalogs
            .get(lang)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalogs_share_the_same_keys() {
        let en: HashMap<String, String> = serde_json::from_str(EN_CATALOG).unwrap();
        let pt: HashMap<String, String> = serde_json::from_str(PT_CATALOG).unwrap();

        let mut en_keys: Vec<_> = en.keys().collect();
        let mut pt_keys: Vec<_> = pt.keys().collect();
        en_keys.sort();
        pt_keys.sort();
        assert_eq!(en_keys, pt_keys);
    }

    #[test]
    fn translate_falls_back_to_english_then_to_the_key() {
        let mut store = I18nStore::default();
        store.insert_catalog("en", r#"{"a": "Alpha", "b": "Beta"}"#).unwrap();
        store.insert_catalog("pt", r#"{"a": "Alfa"}"#).unwrap();

        assert_eq!(store.translate("pt", "a"), "Alfa");
        assert_eq!(store.translate("pt", "b"), "Beta");
        assert_eq!(store.translate("fr", "a"), "Alpha");
        assert_eq!(store.translate("pt", "missing.key"), "missing.key");
    }

    #[test]
    fn embedded_store_knows_the_sign_in_failure_message() {
        let store = I18nStore::embedded().unwrap();
        assert_eq!(
            store.translate("en", "errors.invalid_credentials"),
            "Invalid Email or Password, please try again."
        );
    }
}
