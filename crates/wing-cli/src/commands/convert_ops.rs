use std::io::{self, Read};
use std::path::Path;
use std::process;

use wing_core::convert::Converter;
use wing_core::glyph::GlyphMap;
use wing_core::tokenize::{ScriptTokenizer, Tokenizer};
use wing_core::user_dict::UserDictionary;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Options shared by the forward conversion commands.
pub struct ConvertOptions<'a> {
    /// Personal dictionary supplying readings to the tokenizer.
    pub dict: Option<&'a Path>,
    /// Skip tokenization and encipher the input as-is.
    pub raw: bool,
}

/// The command-line text, or all of stdin when absent.
pub fn input_text(text: Option<String>) -> String {
    match text {
        Some(t) => t,
        None => {
            let mut buf = String::new();
            die!(io::stdin().read_to_string(&mut buf), "Error reading stdin: {}");
            buf.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string()
        }
    }
}

fn open_dict(path: Option<&Path>) -> Option<UserDictionary> {
    path.map(|p| {
        die!(
            UserDictionary::open(p),
            "Error opening user dictionary: {}"
        )
    })
}

fn with_tokenizer<R>(
    opts: &ConvertOptions,
    f: impl FnOnce(Option<&dyn Tokenizer>) -> R,
) -> R {
    if opts.raw {
        return f(None);
    }
    let dict = open_dict(opts.dict);
    let tokenizer = match &dict {
        Some(d) => ScriptTokenizer::with_dictionary(d),
        None => ScriptTokenizer::new(),
    };
    f(Some(&tokenizer))
}

pub fn romaji_cmd(text: &str, opts: &ConvertOptions) {
    let converter = Converter::default();
    let romaji = with_tokenizer(opts, |t| converter.romanize(text, t));
    println!("{romaji}");
}

pub fn encode_cmd(glyphs: &GlyphMap, text: &str, opts: &ConvertOptions) {
    let converter = Converter::new(glyphs);
    let encoded = with_tokenizer(opts, |t| converter.convert(text, t));
    println!("{encoded}");
}

pub fn decode_cmd(glyphs: &GlyphMap, text: &str) {
    println!("{}", Converter::new(glyphs).revert(text));
}
