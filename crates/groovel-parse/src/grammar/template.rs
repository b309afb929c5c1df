use groovel_syntax::SyntaxKind::*;

use crate::parser::Parser;

/// Template text between `%>` and `<%`. Only lexed in the template dialect,
/// so plain Groovy never matches here.
pub(crate) fn fragment(p: &mut Parser<'_>) -> bool {
    if !p.at(TEMPLATE_TEXT) {
        return false;
    }

    let m = p.start();
    p.advance();
    m.complete(p, TEMPLATE_STMT);
    true
}
