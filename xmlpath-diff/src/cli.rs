use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, ValueEnum};
use xmlpath_core::PathOptions;

/// Single-dash multi-letter flags and the long options they stand for.
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-at", "--attributes"),
    ("-av", "--attribute-values"),
    ("-val", "--values"),
];

#[derive(Parser, Debug)]
#[command(name = "xmlpath-diff")]
#[command(about = "Compare two XML files and list element paths found in only one of them")]
#[command(override_usage = "xmlpath-diff <FILE1> <FILE2> [-at] [-av] [-val] [OPTIONS]")]
pub struct Cli {
    /// First XML file.
    pub file1: Option<PathBuf>,
    /// Second XML file.
    pub file2: Option<PathBuf>,
    /// Include attribute names in paths (-at).
    #[arg(long)]
    pub attributes: bool,
    /// Include attribute values; needs --attributes to take effect (-av).
    #[arg(long)]
    pub attribute_values: bool,
    /// Include the text of leaf elements in paths (-val).
    #[arg(long)]
    pub values: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
    /// Log debug details to stderr.
    #[arg(short, long)]
    pub verbose: bool,
    /// Positional arguments past the second file; ignored.
    #[arg(hide = true)]
    pub extra: Vec<OsString>,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Summary,
}

impl Cli {
    /// Both input files, or `None` when fewer than two were given.
    pub fn inputs(&self) -> Option<(&Path, &Path)> {
        Some((self.file1.as_deref()?, self.file2.as_deref()?))
    }

    pub fn path_options(&self) -> PathOptions {
        PathOptions::structure()
            .with_attributes(self.attributes)
            .with_attribute_values(self.attribute_values)
            .with_values(self.values)
    }
}

/// Command-line arguments ready for clap, plus the flags it would reject.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NormalizedArgs {
    pub args: Vec<OsString>,
    /// Unrecognized flags, removed so the comparison still runs.
    pub ignored: Vec<OsString>,
}

/// Rewrite `-at`, `-av` and `-val` to their long forms so clap can parse
/// them, and set aside flags the command does not define.
///
/// The first argument is the program name. Arguments after a literal `--`
/// are left untouched.
pub fn normalize_args<I>(args: I) -> NormalizedArgs
where
    I: IntoIterator<Item = OsString>,
{
    let known = KnownFlags::new();
    let mut out = NormalizedArgs::default();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || passthrough {
            out.args.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.args.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            out.args.push(arg);
            continue;
        };
        if let Some((_, long)) = LEGACY_FLAGS.iter().find(|(legacy, _)| *legacy == text) {
            out.args.push(OsString::from(*long));
        } else if known.accepts(text) {
            out.args.push(arg);
        } else {
            out.ignored.push(arg);
        }
    }

    out
}

/// Long and short option names defined on [`Cli`].
struct KnownFlags {
    longs: Vec<String>,
    shorts: Vec<char>,
}

impl KnownFlags {
    fn new() -> Self {
        let command = Cli::command();
        let mut longs = vec!["help".to_string()];
        let mut shorts = vec!['h'];
        for arg in command.get_arguments() {
            longs.extend(arg.get_long().map(str::to_string));
            shorts.extend(arg.get_short());
        }
        Self { longs, shorts }
    }

    /// Positionals (including `-` for stdin) are always accepted.
    fn accepts(&self, arg: &str) -> bool {
        if let Some(long) = arg.strip_prefix("--") {
            let name = long.split_once('=').map_or(long, |(name, _)| name);
            self.longs.iter().any(|known| known == name)
        } else if let Some(shorts) = arg.strip_prefix('-') {
            shorts.chars().all(|c| self.shorts.contains(&c))
        } else {
            true
        }
    }
}
