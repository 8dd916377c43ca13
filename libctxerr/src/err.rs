use std::fmt;

use nu_ansi_term::{Color, Style};

/// Which constructor produced an [`Error`]. The kind only shows up as the
/// fixed header line of the rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A plain `where`/`what` pair.
    Base,
    /// The `where` part was synthesized by marking a span of a context string.
    Context,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Base => "ctxerr::error",
            ErrorKind::Context => "ctxerr::context_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable two-part diagnostic: where the problem was found and what the
/// problem is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
    location: String,
    problem: String,
}

pub type Res<T> = Result<T, Error>;

impl Error {
    pub fn new(location: impl Into<String>, problem: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Base, location, problem)
    }

    /// An error that doesn't know where it happened.
    pub fn from_problem(problem: impl Into<String>) -> Self {
        Self::new(String::new(), problem)
    }

    pub(crate) fn with_kind(
        kind: ErrorKind,
        location: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            location: location.into(),
            problem: problem.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn problem(&self) -> &str {
        &self.problem
    }

    /// The full message:
    ///
    /// ```text
    ///
    /// ctxerr::error
    ///   Where: <location>.
    ///   What: <problem>.
    /// ```
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Same layout as [`Error::render`], with the header and labels painted
    /// for a terminal.
    pub fn render_styled(&self) -> String {
        let header = Color::Red.bold().paint(self.kind.name());
        let label = Style::new().bold();
        format!(
            "\n{header}\n  {}: {}.\n  {}: {}.\n",
            label.paint("Where"),
            self.location,
            label.paint("What"),
            self.problem,
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            kind,
            location,
            problem,
        } = self;
        write!(f, "\n{kind}\n  Where: {location}.\n  What: {problem}.\n")
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use insta::assert_debug_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_where_and_what() {
        let err = Error::new("error_example.rs, main()", "Example error");
        assert_debug_snapshot!(
            err.render(),
            @r###""\nctxerr::error\n  Where: error_example.rs, main().\n  What: Example error.\n""###
        );
    }

    #[test]
    fn problem_only_has_empty_location() {
        let err = Error::from_problem("Out of cheese");
        check!(err.kind() == ErrorKind::Base);
        check!(err.location() == "");
        assert_eq!(err.render(), "\nctxerr::error\n  Where: .\n  What: Out of cheese.\n");
    }

    #[test]
    fn empty_strings_are_accepted() {
        let err = Error::new("", "");
        assert_eq!(err.render(), "\nctxerr::error\n  Where: .\n  What: .\n");
    }

    #[test]
    fn context_kind_has_its_own_header() {
        let err = Error::with_kind(ErrorKind::Context, "somewhere", "something");
        check!(err.render().starts_with("\nctxerr::context_error\n"));
    }

    #[test]
    fn render_is_repeatable() {
        let err = Error::new("here", "there");
        let first = err.render();
        let second = err.render();
        check!(first == second);
        check!(err.to_string() == first);
    }

    #[test]
    fn styled_render_keeps_the_text() {
        let err = Error::new("line 3", "Unexpected token");
        let styled = err.render_styled();
        check!(styled != err.render());
        check!(styled.contains("ctxerr::error"));
        check!(styled.contains(": line 3."));
        check!(styled.contains(": Unexpected token."));
    }
}
