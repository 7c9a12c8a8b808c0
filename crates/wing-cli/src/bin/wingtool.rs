use std::path::Path;

use clap::{Parser, Subcommand};

use wing_cli::commands::{config_ops, convert_ops, table_ops, user_dict_ops};
use wing_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "wingtool", about = "Japanese and ASCII text to Wingdings glyphs")]
struct Cli {
    /// Custom glyph table (TOML, or JSON with a .json extension)
    #[arg(long, global = true)]
    glyphs: Option<String>,
    /// Custom settings TOML
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Write JSON trace logs here (requires --features trace)
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the romaji form of the input
    Romaji {
        /// Input text (default: stdin)
        text: Option<String>,
        /// User dictionary supplying readings
        #[arg(long)]
        dict: Option<String>,
    },
    /// Convert text to glyphs
    Encode {
        /// Input text (default: stdin)
        text: Option<String>,
        /// User dictionary supplying readings
        #[arg(long)]
        dict: Option<String>,
        /// Skip romanization; encipher the input as-is
        #[arg(long)]
        raw: bool,
    },
    /// Convert glyphs back to ASCII
    Decode {
        /// Glyph text (default: stdin)
        text: Option<String>,
    },
    /// Show the glyph mapping table
    Table {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export the default glyph table as TOML
    GlyphsExport,
    /// Validate a custom glyph table
    GlyphsValidate {
        /// Path to the TOML or JSON file
        file: String,
    },
    /// Export the default kana table as TOML
    KanaExport,
    /// Validate a custom kana table TOML file
    KanaValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Manage the personal dictionary
    UserDict {
        /// User dictionary file (default: $XDG_DATA_HOME/wingdings/user_dict.wgud)
        #[arg(long)]
        file: Option<String>,
        #[command(subcommand)]
        action: UserDictAction,
    },
}

#[derive(Subcommand)]
enum UserDictAction {
    /// Add a word, or bump its frequency if already registered
    Add {
        /// Surface form (kanji/kana)
        surface: String,
        /// Reading (hiragana or katakana)
        reading: String,
        /// Romaji (default: transliterated reading)
        #[arg(long)]
        romaji: Option<String>,
    },
    /// Remove a word
    Remove {
        /// Surface form
        surface: String,
    },
    /// List all registered words
    List,
    /// Search by surface, reading or romaji
    Search {
        query: String,
        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show dictionary statistics
    Stats,
    /// Export as JSON
    Export {
        /// Output file (default: stdout)
        output: Option<String>,
    },
    /// Import a JSON export
    Import {
        /// Input JSON file
        input: String,
        /// Replace all words instead of merging
        #[arg(long)]
        replace: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let _trace = cli.log_dir.as_deref().map(|dir| init_tracing(Path::new(dir)));
    if let Some(file) = cli.settings.as_deref() {
        config_ops::init_settings(file);
    }

    match cli.command {
        Command::Romaji { text, dict } => {
            let text = convert_ops::input_text(text);
            let opts = convert_ops::ConvertOptions {
                dict: dict.as_deref().map(Path::new),
                raw: false,
            };
            convert_ops::romaji_cmd(&text, &opts);
        }
        Command::Encode { text, dict, raw } => {
            let glyphs = config_ops::load_glyphs(cli.glyphs.as_deref());
            let text = convert_ops::input_text(text);
            let opts = convert_ops::ConvertOptions {
                dict: dict.as_deref().map(Path::new),
                raw,
            };
            convert_ops::encode_cmd(&glyphs, &text, &opts);
        }
        Command::Decode { text } => {
            let glyphs = config_ops::load_glyphs(cli.glyphs.as_deref());
            convert_ops::decode_cmd(&glyphs, &convert_ops::input_text(text));
        }
        Command::Table { json } => {
            let glyphs = config_ops::load_glyphs(cli.glyphs.as_deref());
            table_ops::table_cmd(&glyphs, json);
        }
        Command::GlyphsExport => config_ops::glyphs_export(),
        Command::GlyphsValidate { file } => config_ops::glyphs_validate(&file),
        Command::KanaExport => config_ops::kana_export(),
        Command::KanaValidate { file } => config_ops::kana_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::UserDict { file, action } => {
            let path_str = file.unwrap_or_else(user_dict_ops::default_user_dict_path);
            let path = Path::new(&path_str);
            match action {
                UserDictAction::Add {
                    surface,
                    reading,
                    romaji,
                } => user_dict_ops::user_dict_add(path, &surface, &reading, romaji.as_deref()),
                UserDictAction::Remove { surface } => {
                    user_dict_ops::user_dict_remove(path, &surface)
                }
                UserDictAction::List => user_dict_ops::user_dict_list(path),
                UserDictAction::Search { query, limit } => {
                    user_dict_ops::user_dict_search(path, &query, limit)
                }
                UserDictAction::Stats => user_dict_ops::user_dict_stats(path),
                UserDictAction::Export { output } => {
                    user_dict_ops::user_dict_export(path, output.as_deref())
                }
                UserDictAction::Import { input, replace } => {
                    user_dict_ops::user_dict_import(path, &input, replace)
                }
            }
        }
    }
}
