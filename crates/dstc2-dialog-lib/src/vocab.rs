//! Whitespace-token vocabulary over user inputs.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{DatasetError, Result};
use crate::model::normalized_turn::NormalizedTurn;

/// Unique lowercased tokens of every turn's `input_text`, in sorted order.
///
/// System responses are not part of the vocabulary.
pub fn build_vocab<'a, I>(turns: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a NormalizedTurn>,
{
    turns
        .into_iter()
        .flat_map(|turn| {
            turn.input_text
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Write the vocabulary of `turns` to `path` as one space-separated line.
///
/// The file is created or truncated. No trailing newline is written.
pub fn save_vocab<'a, I>(turns: I, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = &'a NormalizedTurn>,
{
    let words = build_vocab(turns);
    let line = words.into_iter().collect::<Vec<_>>().join(" ");

    let file = File::create(path).map_err(|e| DatasetError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(line.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| DatasetError::io(path, e))?;

    tracing::debug!(path = %path.display(), "vocabulary written");
    Ok(())
}

/// Read a vocabulary previously written by [`save_vocab`].
pub fn load_vocab(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;
    Ok(text.split_whitespace().map(str::to_string).collect())
}
