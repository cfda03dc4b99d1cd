//! Shape of the `SD_COMPONENT_DATA` payload. Only the fields the card pipeline
//! reads are required to make sense; everything else is optional and unknown
//! keys are ignored. `null` anywhere decodes to the field's default.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn null_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, deserialize_with = "null_default")]
    pub result_card_header_props: ResultCardHeaderProps,
    #[serde(default, deserialize_with = "null_default")]
    pub sd_dictionary_results_props: SdDictionaryResultsProps,
}

impl Response {
    pub fn headword(&self) -> &Headword {
        &self.result_card_header_props.headword_and_quickdefs_props.headword
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.sd_dictionary_results_props.entry.neodict
    }

    pub fn asset_host(&self) -> &str {
        &self.sd_dictionary_results_props.hegemone_asset_host
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultCardHeaderProps {
    #[serde(default, deserialize_with = "null_default")]
    pub headword_and_quickdefs_props: HeadwordAndQuickdefs,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadwordAndQuickdefs {
    #[serde(default, deserialize_with = "null_default")]
    pub headword: Headword,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub quickdef1: Headword,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub quickdef2: Headword,
}

/// Headword or quick definition: display form plus pronunciation audio.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headword {
    #[serde(default, deserialize_with = "null_default")]
    pub display_text: String,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub text_to_pronounce: String,
    #[serde(default, deserialize_with = "null_default")]
    pub audio_url: String,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub pronunciations: Vec<Pronunciation>,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub word_lang: String,
    #[allow(dead_code)]
    #[serde(default, rename = "type", deserialize_with = "null_default")]
    pub kind: String,
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pronunciation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_default")]
    pub ipa: String,
    #[serde(default, deserialize_with = "null_default")]
    pub abc: String,
    #[serde(default, deserialize_with = "null_default")]
    pub spa: String,
    #[serde(default, deserialize_with = "null_default")]
    pub region: String,
    #[serde(default)]
    pub speaker_id: Option<i64>,
    #[serde(default, deserialize_with = "null_default")]
    pub source: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdDictionaryResultsProps {
    #[serde(default, deserialize_with = "null_default")]
    pub entry: Entry,
    #[serde(default, deserialize_with = "null_default")]
    pub hegemone_asset_host: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Entry {
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub chambers: Value,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub collins: Value,
    #[serde(default, deserialize_with = "null_default")]
    pub neodict: Vec<DictionaryEntry>,
}

/// One headword variant in the neodict.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub subheadword: String,
    #[serde(default, deserialize_with = "null_default")]
    pub pos_groups: Vec<PosGroup>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosGroup {
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub pos: PartOfSpeech,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub entry_lang: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub gender: Value,
    #[serde(default, deserialize_with = "null_default")]
    pub senses: Vec<Sense>,
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartOfSpeech {
    #[serde(default, deserialize_with = "null_default")]
    pub abbr_en: String,
    #[serde(default, deserialize_with = "null_default")]
    pub abbr_es: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name_en: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name_es: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    #[allow(dead_code)]
    #[serde(default)]
    pub id: Option<i64>,
    #[allow(dead_code)]
    #[serde(default)]
    pub idx: Option<i64>,
    #[serde(default, deserialize_with = "null_default")]
    pub subheadword: String,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub context_en: String,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub context_es: String,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub part_of_speech: PartOfSpeech,
    #[allow(dead_code)]
    #[serde(default)]
    pub gender: Value,
    #[allow(dead_code)]
    #[serde(default)]
    pub regions: Value,
    #[allow(dead_code)]
    #[serde(default)]
    pub register_labels: Value,
    #[serde(default, deserialize_with = "null_default")]
    pub translations: Vec<Translation>,
}

impl Sense {
    /// Usable for a card: the first translation carries at least one example.
    pub fn is_usable(&self) -> bool {
        self.translations
            .first()
            .is_some_and(|t| !t.examples.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    #[allow(dead_code)]
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_default")]
    pub translation: String,
    #[serde(default, deserialize_with = "null_default")]
    pub image_path: String,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub context_en: String,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub context_es: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub gender: Value,
    #[allow(dead_code)]
    #[serde(default)]
    pub regions: Value,
    #[allow(dead_code)]
    #[serde(default)]
    pub register_labels: Value,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub is_quick_translation: bool,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub is_opposite_language_headword: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub examples: Vec<Example>,
}

/// Example sentence pair; `text_es` is the card sentence.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    #[serde(default, deserialize_with = "null_default")]
    pub text_es: String,
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_default")]
    pub text_en: String,
}
