#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u16)]
pub enum SyntaxKind {
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    SEMICOLON,
    COMMA,
    DOT,
    SAFE_DOT,
    SPREAD_DOT,
    COLON,
    QUESTION,
    ELVIS,
    ARROW,
    AT,
    EQ,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    EQ2,
    NEQ,
    LT,
    LTEQ,
    GT,
    GTEQ,
    COMPARE,
    REGEX_FIND,
    REGEX_MATCH,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    POW,
    PLUS2,
    MINUS2,
    AMP2,
    PIPE2,
    BANG,
    TILDE,
    AMP,
    PIPE,
    CARET,
    SHL,
    RANGE,
    RANGE_EXCLUSIVE,

    ABSTRACT_KW,
    AS_KW,
    ASSERT_KW,
    BREAK_KW,
    CASE_KW,
    CATCH_KW,
    CLASS_KW,
    CONTINUE_KW,
    DEF_KW,
    DEFAULT_KW,
    ELSE_KW,
    ENUM_KW,
    EXTENDS_KW,
    FALSE_KW,
    FINAL_KW,
    FINALLY_KW,
    FOR_KW,
    IF_KW,
    IMPLEMENTS_KW,
    IMPORT_KW,
    IN_KW,
    INSTANCEOF_KW,
    INTERFACE_KW,
    NATIVE_KW,
    NEW_KW,
    NULL_KW,
    PACKAGE_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    RETURN_KW,
    STATIC_KW,
    STRICTFP_KW,
    SUPER_KW,
    SWITCH_KW,
    SYNCHRONIZED_KW,
    THIS_KW,
    THROW_KW,
    THROWS_KW,
    TRANSIENT_KW,
    TRUE_KW,
    TRY_KW,
    VOLATILE_KW,
    WHILE_KW,

    VOID_KW,
    BOOLEAN_KW,
    BYTE_KW,
    CHAR_KW,
    SHORT_KW,
    INT_KW,
    LONG_KW,
    FLOAT_KW,
    DOUBLE_KW,

    IDENT,
    INT_NUMBER,
    FLOAT_NUMBER,
    STRING,
    NEWLINE,
    TEMPLATE_TEXT,
    UNKNOWN,
    EOF,

    WHITESPACE,
    LINE_COMMENT,
    BLOCK_COMMENT,

    FILE,
    FRAGMENT,
    PACKAGE_DEF,
    IMPORT_STMT,
    MODIFIER_LIST,
    ANNOTATION,
    TYPE,
    TYPE_ARG_LIST,
    WILDCARD_TYPE,
    TYPE_PARAM_LIST,
    TYPE_PARAM,
    CLASS_DEF,
    INTERFACE_DEF,
    ENUM_DEF,
    EXTENDS_CLAUSE,
    IMPLEMENTS_CLAUSE,
    CLASS_BODY,
    ENUM_CONSTANT,
    CONSTRUCTOR_DEF,
    METHOD_DEF,
    PARAM_LIST,
    PARAM,
    THROWS_CLAUSE,
    VARIABLE_DEF,
    VARIABLE,
    BLOCK,
    BLOCK_STMT,
    IF_STMT,
    WHILE_STMT,
    FOR_STMT,
    FOR_CLAUSE,
    FOR_IN_CLAUSE,
    SWITCH_STMT,
    CASE_SECTION,
    CASE_LABEL,
    TRY_STMT,
    CATCH_CLAUSE,
    FINALLY_CLAUSE,
    SYNCHRONIZED_STMT,
    LABELED_STMT,
    LABEL,
    RETURN_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    THROW_STMT,
    ASSERT_STMT,
    EXPR_STMT,
    TEMPLATE_STMT,
    LITERAL,
    REFERENCE_EXPR,
    PAREN_EXPR,
    LIST_EXPR,
    MAP_EXPR,
    MAP_ENTRY,
    CLOSURE_EXPR,
    NEW_EXPR,
    ARRAY_DIMS,
    CALL_EXPR,
    ARG_LIST,
    NAMED_ARG,
    COMMAND_ARGS,
    INDEX_EXPR,
    PROPERTY_EXPR,
    BINARY_EXPR,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    ASSIGN_EXPR,
    TERNARY_EXPR,
    ELVIS_EXPR,
    CAST_EXPR,
    INSTANCEOF_EXPR,
    ERROR,
    TOMBSTONE,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    pub fn is_keyword(self) -> bool {
        (Self::ABSTRACT_KW..=Self::DOUBLE_KW).contains(&self)
    }

    pub fn is_primitive_type(self) -> bool {
        (Self::VOID_KW..=Self::DOUBLE_KW).contains(&self)
    }

    pub fn from_keyword(ident: &str) -> Option<Self> {
        let kind = match ident {
            "abstract" => Self::ABSTRACT_KW,
            "as" => Self::AS_KW,
            "assert" => Self::ASSERT_KW,
            "break" => Self::BREAK_KW,
            "case" => Self::CASE_KW,
            "catch" => Self::CATCH_KW,
            "class" => Self::CLASS_KW,
            "continue" => Self::CONTINUE_KW,
            "def" => Self::DEF_KW,
            "default" => Self::DEFAULT_KW,
            "else" => Self::ELSE_KW,
            "enum" => Self::ENUM_KW,
            "extends" => Self::EXTENDS_KW,
            "false" => Self::FALSE_KW,
            "final" => Self::FINAL_KW,
            "finally" => Self::FINALLY_KW,
            "for" => Self::FOR_KW,
            "if" => Self::IF_KW,
            "implements" => Self::IMPLEMENTS_KW,
            "import" => Self::IMPORT_KW,
            "in" => Self::IN_KW,
            "instanceof" => Self::INSTANCEOF_KW,
            "interface" => Self::INTERFACE_KW,
            "native" => Self::NATIVE_KW,
            "new" => Self::NEW_KW,
            "null" => Self::NULL_KW,
            "package" => Self::PACKAGE_KW,
            "private" => Self::PRIVATE_KW,
            "protected" => Self::PROTECTED_KW,
            "public" => Self::PUBLIC_KW,
            "return" => Self::RETURN_KW,
            "static" => Self::STATIC_KW,
            "strictfp" => Self::STRICTFP_KW,
            "super" => Self::SUPER_KW,
            "switch" => Self::SWITCH_KW,
            "synchronized" => Self::SYNCHRONIZED_KW,
            "this" => Self::THIS_KW,
            "throw" => Self::THROW_KW,
            "throws" => Self::THROWS_KW,
            "transient" => Self::TRANSIENT_KW,
            "true" => Self::TRUE_KW,
            "try" => Self::TRY_KW,
            "volatile" => Self::VOLATILE_KW,
            "while" => Self::WHILE_KW,
            "void" => Self::VOID_KW,
            "boolean" => Self::BOOLEAN_KW,
            "byte" => Self::BYTE_KW,
            "char" => Self::CHAR_KW,
            "short" => Self::SHORT_KW,
            "int" => Self::INT_KW,
            "long" => Self::LONG_KW,
            "float" => Self::FLOAT_KW,
            "double" => Self::DOUBLE_KW,
            _ => return None,
        };
        Some(kind)
    }
}
