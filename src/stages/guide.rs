use crate::{read_words, Error, Options, Stage, GUIDETABLE, SORTED_LIST};
use log::debug;
use std::io::prelude::*;
use std::path::Path;

/// Writes `guidetable.bin`: for every possible two-byte prefix, the ordinal of the first word
/// starting with it.
///
/// Prefixes are the first two bytes of a word read as a native-endian `u16`, the way the C side
/// reads them straight out of a string. The table is `GUIDE_ENTRIES` native-endian `u16`s, and a
/// prefix no word starts with maps to the last word.
pub struct GuideTable;

pub const GUIDE_ENTRIES: usize = 0x10000;

/// The guide table slot for `word`. Words shorter than two bytes are padded with their terminator.
pub fn prefix(word: &str) -> u16 {
    let bytes = word.as_bytes();
    u16::from_ne_bytes([
        bytes.first().copied().unwrap_or(0),
        bytes.get(1).copied().unwrap_or(0),
    ])
}

pub fn guide_table(words: &[String]) -> Result<Vec<u16>, Error> {
    let last = words
        .len()
        .checked_sub(1)
        .and_then(|last| u16::try_from(last).ok())
        .ok_or_else(|| {
            Error::Config(format!(
                "a guide table indexes between 1 and {} words, not {}",
                GUIDE_ENTRIES,
                words.len()
            ))
        })?;

    let mut table = vec![None; GUIDE_ENTRIES];
    for (i, word) in (0..=last).zip(words) {
        let slot = &mut table[usize::from(prefix(word))];
        if slot.is_none() {
            *slot = Some(i);
        }
    }
    let used = table.iter().filter(|slot| slot.is_some()).count();
    debug!("{} of {} prefixes in use", used, GUIDE_ENTRIES);
    Ok(table.into_iter().map(|slot| slot.unwrap_or(last)).collect())
}

impl Stage for GuideTable {
    fn name(&self) -> &'static str {
        "guide"
    }

    fn input(&self) -> &'static Path {
        Path::new(SORTED_LIST)
    }

    fn output(&self) -> &'static Path {
        Path::new(GUIDETABLE)
    }

    fn process(
        &self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        options: &Options,
    ) -> Result<(), Error> {
        options.validate()?;
        let words = read_words(input, options.count)?;
        let table = guide_table(&words)?;
        let bytes: Vec<u8> = table.iter().flat_map(|entry| entry.to_ne_bytes()).collect();
        output.write_all(&bytes)?;
        Ok(())
    }
}
