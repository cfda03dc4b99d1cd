pub mod export;
pub mod media;

use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::parser::model::{Response, Sense};
use media::MediaResolver;

/// One flashcard row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub sentence: String,
    pub picture: String,
    pub audio: String,
    pub infinitive: String,
    pub definition: String,
    pub conjugation: String,
    #[allow(dead_code)]
    pub tag: String,
}

impl Card {
    /// Rows without an infinitive are never exported.
    pub fn is_exportable(&self) -> bool {
        !self.infinitive.is_empty()
    }
}

/// First `limit` senses in document order: entries, then pos groups, then senses.
///
/// `word` is the looked-up word, used to label a page without entries.
pub fn flatten_senses<'r>(
    response: &'r Response,
    word: &str,
    limit: usize,
) -> Result<Vec<&'r Sense>> {
    let entries = response.entries();
    if entries.is_empty() {
        return Err(Error::NoEntry(word.to_string()));
    }
    Ok(entries
        .iter()
        .flat_map(|e| &e.pos_groups)
        .flat_map(|g| &g.senses)
        .take(limit)
        .collect())
}

/// Card for a usable sense. The caller filters out senses without examples.
pub fn build_card(sense: &Sense, audio_tag: &str, media: &MediaResolver) -> Result<Card> {
    let translation = &sense.translations[0];
    let picture = media.picture_tag(&sense.subheadword, &translation.image_path)?;
    Ok(Card {
        sentence: translation.examples[0].text_es.clone(),
        picture,
        audio: audio_tag.to_string(),
        infinitive: sense.subheadword.clone(),
        definition: translation.translation.clone(),
        ..Default::default()
    })
}

/// Turn up to `limit` senses of `response` into cards, downloading their media
/// into `collections_dir`.
///
/// Headword audio failures abort the run; an image failure only drops its card.
pub fn make_cards(
    response: &Response,
    word: &str,
    fetcher: &dyn Fetch,
    collections_dir: &Path,
    asset_scheme: &str,
    limit: usize,
) -> Result<Vec<Card>> {
    let senses = flatten_senses(response, word, limit)?;
    let media = MediaResolver::new(
        fetcher,
        collections_dir,
        media::asset_base(asset_scheme, response.asset_host()),
    );
    let audio_tag = media.audio_tag(response.headword())?;

    let mut cards = Vec::with_capacity(senses.len());
    let mut skipped = 0usize;
    for (idx, sense) in senses.iter().enumerate() {
        if !sense.is_usable() {
            info!(idx, subheadword = %sense.subheadword, "No examples for sense, skipping");
            skipped += 1;
            continue;
        }
        match build_card(sense, &audio_tag, &media) {
            Ok(card) => cards.push(card),
            Err(e) if e.is_recoverable() => {
                warn!(idx, subheadword = %sense.subheadword, error = %e, "Dropping card");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        senses = senses.len(),
        cards = cards.len(),
        skipped,
        "Built cards"
    );
    Ok(cards)
}

// ── Tests ──
