use crate::SyntaxKind::{self, *};
use crate::{NodeOrToken, SyntaxNode, SyntaxToken};

pub trait AstNode<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self>
    where
        Self: Sized;

    fn syntax(self) -> SyntaxNode<'a>;
}

macro_rules! ast_node {
    ($($name:ident => $kind:ident),* $(,)?) => {$(
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<'a>(SyntaxNode<'a>);

        impl<'a> AstNode<'a> for $name<'a> {
            fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                (syntax.kind() == $kind).then_some(Self(syntax))
            }

            fn syntax(self) -> SyntaxNode<'a> {
                self.0
            }
        }
    )*};
}

ast_node! {
    SourceFile => FILE,
    Block => BLOCK,
    IfStmt => IF_STMT,
    WhileStmt => WHILE_STMT,
    ForStmt => FOR_STMT,
    SwitchStmt => SWITCH_STMT,
    CaseSection => CASE_SECTION,
    TryStmt => TRY_STMT,
    LabeledStmt => LABELED_STMT,
    ImportStmt => IMPORT_STMT,
}

/// First child node that follows a token of kind `after`, stopping at `until`.
fn node_after<'a>(
    parent: SyntaxNode<'a>,
    after: SyntaxKind,
    until: Option<SyntaxKind>,
) -> Option<SyntaxNode<'a>> {
    parent
        .children_with_tokens()
        .skip_while(|element| !matches!(element, NodeOrToken::Token(t) if t.kind() == after))
        .skip(1)
        .take_while(|element| {
            !matches!((element, until), (NodeOrToken::Token(t), Some(until)) if t.kind() == until)
        })
        .find_map(NodeOrToken::into_node)
}

pub fn is_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        BLOCK_STMT
            | IF_STMT
            | WHILE_STMT
            | FOR_STMT
            | SWITCH_STMT
            | TRY_STMT
            | SYNCHRONIZED_STMT
            | LABELED_STMT
            | RETURN_STMT
            | BREAK_STMT
            | CONTINUE_STMT
            | THROW_STMT
            | ASSERT_STMT
            | EXPR_STMT
            | TEMPLATE_STMT
            | VARIABLE_DEF
            | METHOD_DEF
            | CLASS_DEF
            | INTERFACE_DEF
            | ENUM_DEF
            | IMPORT_STMT
            | ERROR
    )
}

impl<'a> SourceFile<'a> {
    pub fn package(self) -> Option<SyntaxNode<'a>> {
        self.0.child_of_kind(PACKAGE_DEF)
    }

    pub fn imports(self) -> impl Iterator<Item = ImportStmt<'a>> {
        self.0.children().filter_map(ImportStmt::cast)
    }

    pub fn statements(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        self.0.children().filter(|node| is_statement(node.kind()) && node.kind() != IMPORT_STMT)
    }
}

impl<'a> Block<'a> {
    pub fn statements(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        self.0.children().filter(|node| is_statement(node.kind()))
    }
}

impl<'a> IfStmt<'a> {
    pub fn condition(self) -> Option<SyntaxNode<'a>> {
        node_after(self.0, LEFT_PAREN, Some(RIGHT_PAREN))
    }

    pub fn then_branch(self) -> Option<SyntaxNode<'a>> {
        node_after(self.0, RIGHT_PAREN, Some(ELSE_KW))
    }

    pub fn else_token(self) -> Option<SyntaxToken<'a>> {
        self.0.token_of_kind(ELSE_KW)
    }

    pub fn else_branch(self) -> Option<SyntaxNode<'a>> {
        node_after(self.0, ELSE_KW, None)
    }
}

impl<'a> WhileStmt<'a> {
    pub fn condition(self) -> Option<SyntaxNode<'a>> {
        node_after(self.0, LEFT_PAREN, Some(RIGHT_PAREN))
    }

    pub fn body(self) -> Option<SyntaxNode<'a>> {
        node_after(self.0, RIGHT_PAREN, None)
    }
}

impl<'a> ForStmt<'a> {
    pub fn clause(self) -> Option<SyntaxNode<'a>> {
        self.0.children().find(|node| matches!(node.kind(), FOR_CLAUSE | FOR_IN_CLAUSE))
    }

    pub fn body(self) -> Option<SyntaxNode<'a>> {
        node_after(self.0, RIGHT_PAREN, None)
    }
}

impl<'a> SwitchStmt<'a> {
    pub fn sections(self) -> impl Iterator<Item = CaseSection<'a>> {
        self.0.children().filter_map(CaseSection::cast)
    }
}

impl<'a> CaseSection<'a> {
    pub fn labels(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        self.0.children().filter(|node| node.kind() == CASE_LABEL)
    }

    pub fn statements(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        self.0.children().filter(|node| is_statement(node.kind()))
    }
}

impl<'a> TryStmt<'a> {
    pub fn catch_clauses(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        self.0.children().filter(|node| node.kind() == CATCH_CLAUSE)
    }

    pub fn finally_clause(self) -> Option<SyntaxNode<'a>> {
        self.0.child_of_kind(FINALLY_CLAUSE)
    }
}

impl<'a> LabeledStmt<'a> {
    pub fn label(self) -> Option<&'a str> {
        self.0.child_of_kind(LABEL).map(SyntaxNode::text_trimmed)
    }

    pub fn statement(self) -> Option<SyntaxNode<'a>> {
        node_after(self.0, COLON, None)
    }
}

impl<'a> ImportStmt<'a> {
    pub fn is_static(self) -> bool {
        self.0.token_of_kind(STATIC_KW).is_some()
    }

    /// Dotted path text, without `import`, `static` or an alias.
    pub fn path(self) -> String {
        self.0
            .tokens()
            .skip_while(|token| matches!(token.kind(), IMPORT_KW | STATIC_KW))
            .take_while(|token| {
                matches!(token.kind(), IDENT | DOT | STAR)
                    || (token.kind().is_keyword() && token.kind() != AS_KW)
            })
            .map(SyntaxToken::text)
            .collect()
    }

    pub fn alias(self) -> Option<&'a str> {
        self.0.tokens().skip_while(|token| token.kind() != AS_KW).nth(1).map(SyntaxToken::text)
    }
}
