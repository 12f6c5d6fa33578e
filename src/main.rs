use clap::{ArgEnum, Parser, Subcommand};
use log::error;
use std::path::Path;
use std::process::ExitCode;
use wordtable::{Encode, Filter, GuideTable, Map, Options, Sort, Stage};

/// Builds the static word tables from a ranked word list.
///
/// Every stage reads and writes fixed files relative to the current directory.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Strip comment lines from the ranked list and keep the first NUMBER_OF_WORDS words.
    Filter {
        /// What to do with empty lines in the ranked list.
        #[clap(long, arg_enum, default_value = "keep")]
        empty_lines: EmptyLines,
    },

    /// Sort the filtered list bytewise.
    Sort,

    /// Generate the word table header from the sorted list.
    Encode,

    /// Generate the word offset header from the sorted list.
    Map,

    /// Generate the two-byte prefix guide table from the sorted list.
    Guide,

    /// Run every stage in order.
    All {
        /// What to do with empty lines in the ranked list.
        #[clap(long, arg_enum, default_value = "keep")]
        empty_lines: EmptyLines,
    },
}

#[derive(ArgEnum, Debug, Clone, Copy)]
enum EmptyLines {
    /// Keep an empty line as an empty word.
    Keep,

    /// Drop empty lines without counting them.
    Skip,

    /// Fail on the first empty line.
    Reject,
}

impl From<EmptyLines> for wordtable::EmptyLines {
    fn from(e: EmptyLines) -> Self {
        match e {
            EmptyLines::Keep => wordtable::EmptyLines::Keep,
            EmptyLines::Skip => wordtable::EmptyLines::Skip,
            EmptyLines::Reject => wordtable::EmptyLines::Reject,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut options = Options::default();
    let stages: Vec<&dyn Stage> = match args.command {
        Command::Filter { empty_lines } => {
            options.empty_lines = empty_lines.into();
            vec![&Filter as &dyn Stage]
        }
        Command::Sort => vec![&Sort as &dyn Stage],
        Command::Encode => vec![&Encode as &dyn Stage],
        Command::Map => vec![&Map as &dyn Stage],
        Command::Guide => vec![&GuideTable as &dyn Stage],
        Command::All { empty_lines } => {
            options.empty_lines = empty_lines.into();
            wordtable::pipeline().to_vec()
        }
    };

    for stage in stages {
        if let Err(e) = stage.run(Path::new("."), &options) {
            error!("{}: {}", stage.name(), e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
