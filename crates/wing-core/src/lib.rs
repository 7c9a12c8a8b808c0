pub mod convert;
pub mod glyph;
pub mod romaji;
pub mod settings;
pub mod tokenize;
pub mod unicode;
pub mod user_dict;
