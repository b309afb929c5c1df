use groovel_errors::Diagnostic;
use groovel_inputs::File;
use groovel_parse::Parse;
use salsa::{Accumulator as _, Database};

#[salsa::tracked(returns(ref), no_eq)]
pub(crate) fn parse(db: &dyn Database, file: File) -> Parse {
    groovel_parse::parse_file(file.text(db), file.dialect(db))
}

#[salsa::tracked]
pub(crate) fn check_file(db: &dyn Database, file: File) {
    for diagnostic in parse(db, file).errors() {
        diagnostic.clone().accumulate(db);
    }
}
