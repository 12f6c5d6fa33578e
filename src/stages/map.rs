use crate::{read_words, Error, Options, Stage, SORTED_LIST, WORDMAP_HEADER};
use std::io::prelude::*;
use std::path::Path;

/// Writes `wordmap.h`, the offset of every word's first byte inside `WORDTABLE`.
///
/// `WORDTABLE + WORDMAP[n]` is then the nth word as a C string.
pub struct Map;

const PER_LINE: usize = 4;

/// Where each word starts in a table built from `words`.
pub fn offsets(words: &[String]) -> Result<Vec<u32>, Error> {
    let mut next = 0usize;
    words
        .iter()
        .map(|word| {
            let offset = u32::try_from(next).map_err(|_| {
                Error::Config(format!("word table offset {} does not fit in 32 bits", next))
            })?;
            next += word.len() + 1;
            Ok(offset)
        })
        .collect()
}

impl Stage for Map {
    fn name(&self) -> &'static str {
        "map"
    }

    fn input(&self) -> &'static Path {
        Path::new(SORTED_LIST)
    }

    fn output(&self) -> &'static Path {
        Path::new(WORDMAP_HEADER)
    }

    fn process(
        &self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        options: &Options,
    ) -> Result<(), Error> {
        options.validate()?;
        let words = read_words(input, options.count)?;
        let offsets = offsets(&words)?;

        write!(
            output,
            "#include <stdint.h>\n\n\
             #ifndef WORDMAP_H\n\
             #define WORDMAP_H\n\n\
             const uint32_t WORDMAP[] = {{\n"
        )?;
        let lines = offsets.chunks(PER_LINE);
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.enumerate() {
            let line: Vec<_> = line.iter().map(|o| format!("0x{:08x}", o)).collect();
            let comma = if i == last { "" } else { "," };
            writeln!(output, "\t{}{}", line.join(", "), comma)?;
        }
        write!(output, "}};\n\n#endif\t/* WORDMAP_H */\n")?;
        Ok(())
    }
}
