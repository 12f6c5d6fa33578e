use crate::{lines, Error, Options, Stage, FILTERED_LIST, SORTED_LIST};
use log::info;
use std::io::prelude::*;
use std::path::Path;

/// Sorts the filtered list bytewise, which is the order `strcmp` puts it in.
///
/// Duplicates are kept. This stage sorts whatever it is given and does not check the word count.
pub struct Sort;

impl Stage for Sort {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn input(&self) -> &'static Path {
        Path::new(FILTERED_LIST)
    }

    fn output(&self) -> &'static Path {
        Path::new(SORTED_LIST)
    }

    fn process(
        &self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        _options: &Options,
    ) -> Result<(), Error> {
        let mut words = lines(input).collect::<Result<Vec<_>, _>>()?;
        info!("sorting {} words", words.len());
        // `str` orders by bytes, so this matches the C side's lookups.
        words.sort();
        for word in &words {
            output.write_all(word.as_bytes())?;
            output.write_all(b"\n")?;
        }
        Ok(())
    }
}
