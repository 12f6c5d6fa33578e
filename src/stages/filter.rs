use crate::{
    lines, EmptyLines, Error, Options, Stage, COMMENT_MARKER, FILTERED_LIST, RANKED_LIST,
};
use log::debug;
use std::io::prelude::*;
use std::path::Path;

/// Strips comments from the ranked list and keeps the first `count` words.
///
/// Output lines always end in a single `\n`, whatever the input used: `\n`, `\r\n` or a lone
/// `\r`.
pub struct Filter;

enum Line<'a> {
    Comment,
    Empty,
    Word(&'a str),
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        match line.as_bytes().first() {
            None => Line::Empty,
            Some(&COMMENT_MARKER) => Line::Comment,
            Some(_) => Line::Word(line),
        }
    }
}

impl Stage for Filter {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn input(&self) -> &'static Path {
        Path::new(RANKED_LIST)
    }

    fn output(&self) -> &'static Path {
        Path::new(FILTERED_LIST)
    }

    fn process(
        &self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        options: &Options,
    ) -> Result<(), Error> {
        options.validate()?;
        let mut kept = 0;
        let mut comments = 0;
        for (i, line) in lines(input).enumerate() {
            let line = line?;
            let word = match Line::classify(&line) {
                Line::Comment => {
                    comments += 1;
                    continue;
                }
                Line::Word(word) => word,
                Line::Empty => match options.empty_lines {
                    EmptyLines::Keep => "",
                    EmptyLines::Skip => continue,
                    EmptyLines::Reject => {
                        return Err(Error::MalformedLine {
                            line: i + 1,
                            reason: "empty line",
                        })
                    }
                },
            };
            output.write_all(word.as_bytes())?;
            output.write_all(b"\n")?;
            kept += 1;
            if kept == options.count {
                debug!("kept {} words, dropped {} comments", kept, comments);
                return Ok(());
            }
        }
        Err(Error::EndOfInput {
            expected: options.count,
            found: kept,
        })
    }
}
