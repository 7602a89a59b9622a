use crate::error::{FieldError, FieldErrorReason};
use std::fmt::Write;

#[derive(Debug, Clone)]
enum Segment {
    Key(String),
    Index(usize),
}

/// State shared by the readers of one decode operation.
///
/// Values that can't be converted to their declared type are recorded here
/// instead of aborting the decode, so sibling attributes are still read.
#[derive(Debug, Default)]
pub struct ReadContext {
    path: Vec<Segment>,
    errors: Vec<FieldError>,
}

impl ReadContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn enter_key(&mut self, key: &str) {
        self.path.push(Segment::Key(key.to_string()));
    }

    pub(crate) fn enter_index(&mut self, index: usize) {
        self.path.push(Segment::Index(index));
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    /// Dotted location of the value currently being read.
    ///
    /// Keys that contain `.`, `[`, `]` or `"` are written quoted in brackets,
    /// as in `properties["a.b"]`.
    pub fn path(&self) -> String {
        let mut path = String::new();
        for segment in &self.path {
            match segment {
                Segment::Key(key) if key.contains(['.', '[', ']', '"']) => {
                    let _ = write!(path, "[{:?}]", key);
                }
                Segment::Key(key) => {
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(key);
                }
                Segment::Index(index) => {
                    let _ = write!(path, "[{}]", index);
                }
            }
        }
        path
    }

    /// Records a rejected value at the current location.
    pub fn report(&mut self, reason: FieldErrorReason) {
        let error = FieldError {
            path: self.path(),
            reason,
        };
        log::debug!("rejecting attribute value {}", error);
        self.errors.push(error);
    }

    /// Records a value of the wrong JSON shape and reads it as absent.
    pub(crate) fn reject<T>(&mut self, expected: &'static str, found: &'static str) -> Option<T> {
        self.report(FieldErrorReason::UnexpectedType { expected, found });
        None
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}
