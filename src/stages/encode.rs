use crate::{read_words, table_len, Error, Escaped, Options, Stage, SORTED_LIST, WORDTABLE_HEADER};
use log::debug;
use std::io::prelude::*;
use std::path::Path;

/// Turns the sorted list into `wordtable.h`.
///
/// `WORDTABLE` holds every word followed by an explicit `\0`, except the last one, which relies on
/// the terminator C puts at the end of every string literal. `WORDTABLE_LEN` still counts that
/// final terminator.
pub struct Encode;

impl Stage for Encode {
    fn name(&self) -> &'static str {
        "encode"
    }

    fn input(&self) -> &'static Path {
        Path::new(SORTED_LIST)
    }

    fn output(&self) -> &'static Path {
        Path::new(WORDTABLE_HEADER)
    }

    fn process(
        &self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        options: &Options,
    ) -> Result<(), Error> {
        options.validate()?;
        let words = read_words(input, options.count)?;
        let Some((last, rest)) = words.split_last() else {
            return Err(Error::Config("the word count must be at least 1".into()));
        };
        if let Some(i) = words.iter().position(|word| word.contains('\0')) {
            return Err(Error::MalformedLine {
                line: i + 1,
                reason: "word contains a NUL byte",
            });
        }

        write!(
            output,
            "#ifndef WORDTABLE_H\n\
             #define WORDTABLE_H\n\n\
             #define NUMBER_OF_WORDS {}\n\n\
             const char *WORDTABLE =\n",
            words.len()
        )?;
        for word in rest {
            writeln!(output, "\t\"{}\\0\"", Escaped(word))?;
        }
        writeln!(output, "\t\"{}\"", Escaped(last))?;

        let len = table_len(&words);
        debug!("{} words, {} bytes", words.len(), len);
        write!(
            output,
            ";\n\n\
             const size_t WORDTABLE_LEN = {};\n\n\
             #endif /* WORDTABLE_H */",
            len
        )?;
        Ok(())
    }
}
