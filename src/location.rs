use std::rc::Rc;

/// One physical line of a source file.
///
/// `text` is the raw line including its terminator, so concatenating the
/// lines of a file reproduces the file byte for byte. Anything user-facing
/// goes through [`Line::trimmed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub filename: Rc<str>,
    pub text: String,
    /// 1-based line number.
    pub number: usize,
}

impl Line {
    /// Splits `source` into its lines. The result is never empty; an empty
    /// source is one empty line.
    pub fn split(filename: &str, source: &str) -> Vec<Rc<Line>> {
        let filename = Rc::<str>::from(filename);
        let mut lines = Vec::new();

        let mut rest = source;
        loop {
            match rest.find('\n') {
                Some(newline) => {
                    let (line, remainder) = rest.split_at(newline + 1);
                    lines.push(Rc::new(Line {
                        filename: filename.clone(),
                        text: line.to_string(),
                        number: lines.len() + 1,
                    }));
                    rest = remainder;
                }
                None => {
                    lines.push(Rc::new(Line {
                        filename,
                        text: rest.to_string(),
                        number: lines.len() + 1,
                    }));
                    break;
                }
            }
        }

        lines
    }

    /// The character at byte index `index`, if any.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.text.get(index..).and_then(|rest| rest.chars().next())
    }

    /// The line text without its terminator.
    pub fn trimmed(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }
}

/// A byte span on a single [`Line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: Rc<Line>,
    /// 0-based column of the first byte.
    pub position: usize,
    pub length: usize,
}

impl Location {
    /// The spanned text. The end-of-file sentinel sits one past the visible
    /// end of its line; extraction clamps, so it yields `""` instead of
    /// failing.
    pub fn extract(&self) -> &str {
        let text = self.line.trimmed();
        let end = (self.position + self.length).min(text.len());
        let start = self.position.min(end);

        &text[start..end]
    }
}
