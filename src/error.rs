use crate::location::Location;

/// A diagnostic pointing at a span of source text.
///
/// Errors are ordinary values: both the lexer and the parser collect them
/// into lists next to their regular output instead of aborting on the first
/// one.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub location: Location,
    pub message: String,
}

impl Error {
    pub fn new(location: Location, message: impl ToString) -> Self {
        Error {
            location,
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = &self.location.line;

        writeln!(
            f,
            "{}:{}:{}: {}",
            line.filename,
            line.number,
            self.location.position + 1,
            self.message
        )?;
        writeln!(f, "{}", line.trimmed())?;
        writeln!(
            f,
            "{:>pad$}{:^<carets$}",
            "",
            "^",
            pad = self.location.position,
            carets = self.location.length,
        )
    }
}
