use std::fs::OpenOptions;
use std::path::Path;

use tracing::info;

use super::Card;
use crate::error::{Error, Result};

/// Append exportable cards to `path` (created if missing), no header row.
///
/// Columns: sentence, infinitive, picture, audio, definition, conjugation.
/// Returns the number of rows written.
pub fn append_cards(cards: &[Card], path: &Path) -> Result<usize> {
    let csv_error = |reason: String| Error::CsvWrite {
        path: path.to_path_buf(),
        reason,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| csv_error(e.to_string()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    let mut written = 0;
    for card in cards.iter().filter(|c| c.is_exportable()) {
        writer
            .write_record([
                &card.sentence,
                &card.infinitive,
                &card.picture,
                &card.audio,
                &card.definition,
                &card.conjugation,
            ])
            .map_err(|e| csv_error(e.to_string()))?;
        written += 1;
    }
    writer.flush().map_err(|e| csv_error(e.to_string()))?;

    info!(path = %path.display(), rows = written, "Appended cards");
    Ok(written)
}
