use std::fs;
use std::path::Path;
use std::process;

use wing_core::romaji::transliterate;
use wing_core::settings::settings;
use wing_core::user_dict::{ImportMode, UserDictionary};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn default_user_dict_path() -> String {
    if let Ok(data) = std::env::var("XDG_DATA_HOME") {
        return format!("{data}/wingdings/user_dict.wgud");
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    format!("{home}/.local/share/wingdings/user_dict.wgud")
}

fn open(path: &Path) -> UserDictionary {
    die!(
        UserDictionary::open(path),
        "Error opening user dictionary: {}"
    )
}

/// Romaji for a word: the explicit value, else the transliterated reading.
pub fn romaji_for(reading: &str, romaji: Option<&str>) -> String {
    match romaji {
        Some(r) => r.to_string(),
        None => transliterate(reading).to_lowercase(),
    }
}

pub fn user_dict_add(path: &Path, surface: &str, reading: &str, romaji: Option<&str>) {
    let mut dict = open(path);
    let romaji = romaji_for(reading, romaji);
    let entry = die!(
        dict.add_word(surface, reading, Some(&romaji)),
        "Error adding word: {}"
    );
    die!(dict.save(path), "Error saving user dictionary: {}");
    if entry.frequency > 1 {
        println!("Updated: {surface} ({}) used {} times", entry.reading, entry.frequency);
    } else {
        println!("Added: {surface} → {} [{}]", entry.reading, entry.romaji);
    }
}

pub fn user_dict_remove(path: &Path, surface: &str) {
    let mut dict = open(path);
    if dict.remove_word(surface) {
        die!(dict.save(path), "Error saving user dictionary: {}");
        println!("Removed: {surface}");
    } else {
        println!("Not found: {surface}");
    }
}

pub fn user_dict_list(path: &Path) {
    let dict = open(path);
    let entries = dict.list();
    if entries.is_empty() {
        println!("(empty)");
    } else {
        for (surface, e) in &entries {
            println!("{surface}\t{}\t{}\t{}", e.reading, e.romaji, e.frequency);
        }
        println!("---");
        println!("{} entries", entries.len());
    }
}

pub fn user_dict_search(path: &Path, query: &str, limit: Option<usize>) {
    let dict = open(path);
    let limit = limit.unwrap_or(settings().search.default_limit);
    let hits = dict.search(query, limit);
    if hits.is_empty() {
        println!("No matches for {query}");
        return;
    }
    for hit in &hits {
        println!(
            "{:>7.1}  {}\t{}\t{}",
            hit.relevance, hit.surface, hit.entry.reading, hit.entry.romaji
        );
    }
}

pub fn user_dict_stats(path: &Path) {
    let dict = open(path);
    let stats = die!(dict.statistics(), "Error computing statistics: {}");
    println!("words:          {}", stats.total_words);
    println!("avg frequency:  {:.2}", stats.average_frequency);
    println!(
        "most used:      {}",
        stats.most_used.as_deref().unwrap_or("-")
    );
    println!("recently added: {}", stats.recently_added);
    println!("storage:        {}%", stats.storage_usage);
    println!("last update:    {}", stats.last_update);
}

pub fn user_dict_export(path: &Path, output: Option<&str>) {
    let dict = open(path);
    let json = die!(dict.export_json(), "Error exporting user dictionary: {}");
    match output {
        Some(file) => {
            die!(fs::write(file, json), "Error writing {file}: {}");
            println!("Exported {} words to {file}", dict.len());
        }
        None => println!("{json}"),
    }
}

pub fn user_dict_import(path: &Path, input: &str, replace: bool) {
    let mut dict = open(path);
    let json = die!(fs::read_to_string(input), "Error reading {input}: {}");
    let mode = if replace {
        ImportMode::Replace
    } else {
        ImportMode::Merge
    };
    let summary = die!(
        dict.import_json(&json, mode),
        "Error importing {input}: {}"
    );
    die!(dict.save(path), "Error saving user dictionary: {}");
    println!(
        "Imported {} words ({} total)",
        summary.imported, summary.total
    );
}
