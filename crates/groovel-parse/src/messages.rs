use groovel_errors::DiagnosticKind;

/// Every message the parser can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Message {
    LParenExpected,
    RParenExpected,
    LCurlyExpected,
    RCurlyExpected,
    RBracketExpected,
    ColonExpected,
    SemicolonExpected,
    GtExpected,
    ExpressionExpected,
    IdentifierExpected,
    TypeExpected,
    ForClauseExpected,
    CatchOrFinallyExpected,
    ImportNotAllowed,
    ElseWithoutIf,
    CatchWithoutTry,
    FinallyWithoutTry,
    CaseWithoutSwitch,
    DefaultWithoutSwitch,
    WrongStatement,
    SeparatorOrRCurlyExpected,
    UnexpectedInput,
    NestingTooDeep,
}

impl Message {
    pub(crate) fn text(self) -> &'static str {
        match self {
            Self::LParenExpected => "'(' expected",
            Self::RParenExpected => "')' expected",
            Self::LCurlyExpected => "'{' expected",
            Self::RCurlyExpected => "'}' expected",
            Self::RBracketExpected => "']' expected",
            Self::ColonExpected => "':' expected",
            Self::SemicolonExpected => "';' expected",
            Self::GtExpected => "'>' expected",
            Self::ExpressionExpected => "expression expected",
            Self::IdentifierExpected => "identifier expected",
            Self::TypeExpected => "type expected",
            Self::ForClauseExpected => "for clause expected",
            Self::CatchOrFinallyExpected => "'catch' or 'finally' expected",
            Self::ImportNotAllowed => "import is not allowed here",
            Self::ElseWithoutIf => "'else' without 'if'",
            Self::CatchWithoutTry => "'catch' without 'try'",
            Self::FinallyWithoutTry => "'finally' without 'try'",
            Self::CaseWithoutSwitch => "'case' without 'switch'",
            Self::DefaultWithoutSwitch => "'default' without 'switch'",
            Self::WrongStatement => "wrong statement",
            Self::SeparatorOrRCurlyExpected => "separator or '}' expected",
            Self::UnexpectedInput => "unexpected input",
            Self::NestingTooDeep => "nesting too deep",
        }
    }

    pub(crate) fn kind(self) -> DiagnosticKind {
        match self {
            Self::ElseWithoutIf
            | Self::CatchWithoutTry
            | Self::FinallyWithoutTry
            | Self::CaseWithoutSwitch
            | Self::DefaultWithoutSwitch => DiagnosticKind::DanglingConstruct,
            Self::WrongStatement
            | Self::SeparatorOrRCurlyExpected
            | Self::UnexpectedInput
            | Self::NestingTooDeep => {
                DiagnosticKind::RecoverableGarbage
            }
            _ => DiagnosticKind::StructuralMismatch,
        }
    }
}
