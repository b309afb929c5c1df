use camino::Utf8Path;
pub use groovel_tokenizer::Dialect;
pub use line_index::{LineCol, LineIndex};

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: camino::Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
    pub dialect: Dialect,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

/// Template pages (`.gsp`, `.gtpl`) mix Groovy with markup; everything else
/// is plain Groovy.
pub fn dialect_for_path(path: &Utf8Path) -> Dialect {
    match path.extension() {
        Some("gsp" | "gtpl") => Dialect::Template,
        _ => Dialect::Groovy,
    }
}
