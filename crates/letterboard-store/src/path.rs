//! Field paths for addressing within JSON documents
//!
//! Provides [`FieldPath`] for hierarchical addressing of a single nested
//! field, using object-field and array-index steps only.

use serde_json::Value;
use std::fmt::{self, Display, Formatter, Write as _};
use std::str::FromStr;

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object field by name
    Key(String),
    /// Array element by position
    Index(usize),
}

/// Path to a single field within a JSON document
///
/// Textual form is dot/bracket notation: keys joined with `.`, indices in
/// brackets. The empty path addresses the document root and displays as `.`.
///
/// # Examples
/// - `letters[3].style.left`
/// - `board.backgroundColor`
/// - `.` (root)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// Empty path addressing the document root
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Single-key path
    #[inline]
    #[must_use]
    pub fn key(name: impl Into<String>) -> Self {
        Self(vec![Segment::Key(name.into())])
    }

    /// Append an object-field step
    #[inline]
    #[must_use]
    pub fn child(mut self, name: impl Into<String>) -> Self {
        self.0.push(Segment::Key(name.into()));
        self
    }

    /// Append an array-index step
    #[inline]
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(Segment::Index(index));
        self
    }

    /// Path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this path addresses the document root
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve the path against a document, if addressable
    #[must_use]
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut cur = root;
        for seg in &self.0 {
            cur = match seg {
                Segment::Key(k) => cur.get(k.as_str())?,
                Segment::Index(n) => cur.get(*n)?,
            };
        }
        Some(cur)
    }

    /// Replace the addressed field in `root` with `value`
    ///
    /// Intermediate steps must already exist. The final step may insert a
    /// new key into an existing object; an index step only replaces an
    /// existing element, never extends the array. The root path replaces
    /// the whole document.
    pub fn write_into(&self, root: &mut Value, value: Value) -> Result<(), PathWriteError> {
        let Some((last, parents)) = self.0.split_last() else {
            *root = value;
            return Ok(());
        };

        let mut cur = root;
        let mut at = String::new();
        for seg in parents {
            match seg {
                Segment::Key(k) => {
                    let obj = cur
                        .as_object_mut()
                        .ok_or_else(|| PathWriteError::NotAnObject { at: at_or_root(&at) })?;
                    cur = obj.get_mut(k).ok_or_else(|| PathWriteError::MissingKey {
                        key: k.clone(),
                        at: at_or_root(&at),
                    })?;
                    if !at.is_empty() {
                        at.push('.');
                    }
                    at.push_str(k);
                }
                Segment::Index(n) => {
                    let arr = cur
                        .as_array_mut()
                        .ok_or_else(|| PathWriteError::NotAnArray { at: at_or_root(&at) })?;
                    let len = arr.len();
                    cur = arr
                        .get_mut(*n)
                        .ok_or(PathWriteError::IndexOutOfBounds { index: *n, len })?;
                    let _ = write!(at, "[{n}]");
                }
            }
        }

        match last {
            Segment::Key(k) => {
                let obj = cur
                    .as_object_mut()
                    .ok_or_else(|| PathWriteError::NotAnObject { at: at_or_root(&at) })?;
                obj.insert(k.clone(), value);
            }
            Segment::Index(n) => {
                let arr = cur
                    .as_array_mut()
                    .ok_or_else(|| PathWriteError::NotAnArray { at: at_or_root(&at) })?;
                let len = arr.len();
                let slot = arr
                    .get_mut(*n)
                    .ok_or(PathWriteError::IndexOutOfBounds { index: *n, len })?;
                *slot = value;
            }
        }
        Ok(())
    }
}

fn at_or_root(at: &str) -> String {
    if at.is_empty() {
        ".".to_string()
    } else {
        at.to_string()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, ".");
        }
        for (i, seg) in self.0.iter().enumerate() {
            match seg {
                Segment::Key(k) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{k}")?;
                }
                Segment::Index(n) => write!(f, "[{n}]")?,
            }
        }
        Ok(())
    }
}

/// Parse failure for the textual path notation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldPathError {
    /// Empty input
    #[error("path must not be empty")]
    Empty,
    /// Missing segment between separators or at the end
    #[error("empty segment at offset {offset}")]
    EmptySegment {
        /// Byte offset of the missing segment
        offset: usize,
    },
    /// `[` without a matching `]`
    #[error("unterminated index at offset {offset}")]
    UnterminatedIndex {
        /// Byte offset of the opening bracket
        offset: usize,
    },
    /// Bracket content that is not a non-negative integer
    #[error("invalid index `{text}`")]
    InvalidIndex {
        /// The offending bracket content
        text: String,
    },
    /// Character that may not follow a closed bracket
    #[error("unexpected character `{ch}` at offset {offset}")]
    UnexpectedChar {
        /// The offending character
        ch: char,
        /// Its byte offset
        offset: usize,
    },
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(FieldPathError::Empty);
        }
        if s == "." {
            return Ok(Self::root());
        }

        let bytes = s.as_bytes();
        let mut segments = Vec::new();
        let mut i = 0;
        while i < s.len() {
            match bytes[i] {
                b'.' => return Err(FieldPathError::EmptySegment { offset: i }),
                b'[' => {
                    let close = s[i..]
                        .find(']')
                        .map(|j| i + j)
                        .ok_or(FieldPathError::UnterminatedIndex { offset: i })?;
                    let digits = &s[i + 1..close];
                    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(FieldPathError::InvalidIndex {
                            text: digits.to_string(),
                        });
                    }
                    let index = digits
                        .parse()
                        .map_err(|_| FieldPathError::InvalidIndex {
                            text: digits.to_string(),
                        })?;
                    segments.push(Segment::Index(index));
                    i = close + 1;
                    if i < s.len() {
                        match bytes[i] {
                            b'.' => {
                                i += 1;
                                if i == s.len() || bytes[i] == b'[' {
                                    return Err(FieldPathError::EmptySegment { offset: i });
                                }
                            }
                            b'[' => {}
                            _ => {
                                return Err(FieldPathError::UnexpectedChar {
                                    ch: s[i..].chars().next().unwrap_or('?'),
                                    offset: i,
                                })
                            }
                        }
                    }
                }
                _ => {
                    let end = s[i..]
                        .find(|c| c == '.' || c == '[')
                        .map_or(s.len(), |j| i + j);
                    segments.push(Segment::Key(s[i..end].to_string()));
                    i = end;
                    if i < s.len() && bytes[i] == b'.' {
                        i += 1;
                        if i == s.len() || bytes[i] == b'[' {
                            return Err(FieldPathError::EmptySegment { offset: i });
                        }
                    }
                }
            }
        }
        Ok(Self(segments))
    }
}

/// Failure while replacing a field in a document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathWriteError {
    /// Index step past the end of an array
    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Actual array length
        len: usize,
    },
    /// Index step over a non-array value
    #[error("expected an array at `{at}`")]
    NotAnArray {
        /// Path of the non-array value
        at: String,
    },
    /// Key step over a non-object value
    #[error("expected an object at `{at}`")]
    NotAnObject {
        /// Path of the non-object value
        at: String,
    },
    /// Intermediate key that does not exist
    #[error("missing key `{key}` at `{at}`")]
    MissingKey {
        /// The absent key
        key: String,
        /// Path of the object missing it
        at: String,
    },
}
