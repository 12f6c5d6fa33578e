use log::info;
use std::fmt::{self, Write as _};
use std::fs::{self, File};
use std::io::{self, prelude::*, BufReader, BufWriter};
use std::path::Path;
use tempfile::NamedTempFile;

mod error;
pub mod stages;

pub use error::Error;
pub use stages::{
    guide_table, offsets, prefix, Encode, Filter, GuideTable, Map, Sort, GUIDE_ENTRIES,
};

/// How many words make it into the generated tables.
pub const NUMBER_OF_WORDS: usize = 50_000;

/// Lines of the ranked list starting with this byte are annotations, not words.
pub const COMMENT_MARKER: u8 = b'#';

pub const RANKED_LIST: &str = "wiki-100k.txt";
pub const FILTERED_LIST: &str = "50k-newline-separated.txt";
pub const SORTED_LIST: &str = "50k-newline-separated-sorted.txt";
pub const WORDTABLE_HEADER: &str = "../src/wordtable.h";
pub const WORDMAP_HEADER: &str = "../src/wordmap.h";
pub const GUIDETABLE: &str = "guidetable.bin";

/// What the filter does with a zero-length line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EmptyLines {
    /// An empty line is not a comment, so it is kept as an empty word.
    Keep,

    /// Empty lines are dropped and do not count towards the word total.
    Skip,

    /// An empty line is an error.
    Reject,
}

#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Options {
    /// The number of words every stage reads or produces.
    pub count: usize,

    /// How the filter treats empty lines.
    pub empty_lines: EmptyLines,

    /// If true, outputs are written to a temporary file and renamed into place.
    pub atomic: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            count: NUMBER_OF_WORDS,
            empty_lines: EmptyLines::Keep,
            atomic: true,
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<(), Error> {
        if self.count == 0 {
            return Err(Error::Config("the word count must be at least 1".into()));
        }
        Ok(())
    }
}

/// One step of the word table pipeline.
///
/// Each stage reads one fixed file and writes another; stages only ever talk to each other through
/// those files.
pub trait Stage {
    fn name(&self) -> &'static str;
    fn input(&self) -> &'static Path;
    fn output(&self) -> &'static Path;
    fn process(
        &self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        options: &Options,
    ) -> Result<(), Error>;

    /// Runs the stage with its input and output resolved against `root`.
    fn run(&self, root: &Path, options: &Options) -> Result<(), Error> {
        options.validate()?;
        let input_path = root.join(self.input());
        let output_path = root.join(self.output());
        info!("{}: reading {}", self.name(), input_path.display());

        let input = File::open(&input_path).map_err(|e| Error::io("open", &input_path, e))?;
        let mut input = BufReader::new(input);

        if options.atomic {
            let dir = output_path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(root);
            let tmp = temp_file_for(dir, &output_path)
                .map_err(|e| Error::io("create a temporary file in", dir, e))?;
            let mut output = BufWriter::new(tmp);
            self.process(&mut input, &mut output, options)?;
            // The temporary file is removed when dropped, so an error above leaves nothing behind.
            let tmp = output
                .into_inner()
                .map_err(|e| Error::Stream(e.into_error()))?;
            tmp.persist(&output_path)
                .map_err(|e| Error::io("write", &output_path, e.error))?;
        } else {
            let file =
                File::create(&output_path).map_err(|e| Error::io("create", &output_path, e))?;
            let mut output = BufWriter::new(file);
            self.process(&mut input, &mut output, options)?;
            output.flush()?;
        }

        info!("{}: wrote {}", self.name(), output_path.display());
        Ok(())
    }
}

/// A temporary file in `dir` that will end up with the mode a plain create of `dest` would give.
///
/// New files get 0666 minus the umask, and an existing `dest` keeps its current mode.
fn temp_file_for(dir: &Path, dest: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Passed to open(2), so the umask still applies.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;
    if let Ok(meta) = fs::metadata(dest) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    Ok(tmp)
}

/// Every stage, in the order they have to run.
pub fn pipeline() -> [&'static dyn Stage; 5] {
    [&Filter, &Sort, &Encode, &Map, &GuideTable]
}

/// Iterator over the lines of a text stream, see [`lines`].
pub struct Lines<'a> {
    input: &'a mut dyn BufRead,
}

/// Splits `input` into lines ending in `\n`, `\r\n` or a lone `\r`, like a text-mode read would.
///
/// `BufRead::lines` only knows the first two. Lines are pulled one at a time, so whatever follows
/// the last line taken stays unread.
pub fn lines(input: &mut dyn BufRead) -> Lines<'_> {
    Lines { input }
}

impl Lines<'_> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        let mut after_cr = false;
        loop {
            let (used, done) = {
                let buf = self.input.fill_buf()?;
                if buf.is_empty() {
                    if line.is_empty() && !after_cr {
                        return Ok(None);
                    }
                    break;
                }
                if after_cr {
                    // Either half of a \r\n or a line that ended on its own.
                    (usize::from(buf[0] == b'\n'), true)
                } else {
                    match buf.iter().position(|&b| b == b'\n' || b == b'\r') {
                        Some(i) => {
                            line.extend_from_slice(&buf[..i]);
                            after_cr = buf[i] == b'\r';
                            (i + 1, !after_cr)
                        }
                        None => {
                            line.extend_from_slice(buf);
                            (buf.len(), false)
                        }
                    }
                }
            };
            self.input.consume(used);
            if done {
                break;
            }
        }
        String::from_utf8(line)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl Iterator for Lines<'_> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Reads exactly `count` newline-separated words. Anything after the last one is left unread.
pub fn read_words(input: &mut dyn BufRead, count: usize) -> Result<Vec<String>, Error> {
    let mut words = Vec::with_capacity(count);
    for line in lines(input).take(count) {
        words.push(line?);
    }
    if words.len() < count {
        return Err(Error::EndOfInput {
            expected: count,
            found: words.len(),
        });
    }
    Ok(words)
}

/// Size of the word table: every word plus its terminator, including the last one.
pub fn table_len(words: &[String]) -> usize {
    words.iter().map(|word| word.len() + 1).sum()
}

/// Formats a word so it can sit between the quotes of a C string literal.
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                // Octal escapes stop after three digits, unlike hex ones.
                c if c.is_ascii_control() => write!(f, "\\{:03o}", c as u32)?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}
