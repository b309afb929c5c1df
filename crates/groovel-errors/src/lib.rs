use std::fmt::{self, Display};

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

/// What went wrong, independent of the message wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// An expected token is absent.
    StructuralMismatch,
    /// `else`, `catch`, `finally`, `case` or `default` without its opener.
    DanglingConstruct,
    /// A run of tokens no rule accepts, skipped as a whole.
    RecoverableGarbage,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StructuralMismatch => "structural-mismatch",
            Self::DanglingConstruct => "dangling-construct",
            Self::RecoverableGarbage => "recoverable-garbage",
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[salsa::accumulator]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, range: TextRange) -> Self {
        Self { kind, message: message.into(), range }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let label = match self.kind {
            DiagnosticKind::StructuralMismatch => "here",
            DiagnosticKind::DanglingConstruct => "no matching opener",
            DiagnosticKind::RecoverableGarbage => "skipped",
        };
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.range.into()).label(label))
                .fold(true),
        );
        renderer.render(message)
    }
}
