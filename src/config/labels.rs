//! Class names and bounded class indices.

use std::sync::Arc;

use crate::util::{YoloDecodeError, YoloDecodeResult};

/// Index into a [`LabelSet`], only constructible through a bounds check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassIndex(usize);

impl ClassIndex {
    /// Validates `index` against `num_classes`.
    pub fn new(index: usize, num_classes: usize) -> YoloDecodeResult<Self> {
        if index >= num_classes {
            return Err(YoloDecodeError::config(format!(
                "class index {index} out of range for {num_classes} classes"
            )));
        }
        Ok(Self(index))
    }

    /// Returns the raw index.
    pub fn get(self) -> usize {
        self.0
    }
}

/// Ordered class names. Labels are reference counted so detections can carry
/// them without copying strings.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelSet {
    names: Vec<Arc<str>>,
}

impl LabelSet {
    /// Creates a label set from any list of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names.into_iter().map(|s| Arc::from(s.as_ref())).collect(),
        }
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when there are no labels.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Checked lookup from a raw class index.
    pub fn class_index(&self, index: usize) -> YoloDecodeResult<ClassIndex> {
        ClassIndex::new(index, self.names.len())
    }

    /// Returns the label for `class`.
    ///
    /// A `ClassIndex` built for a larger set still fails cleanly here.
    pub fn label(&self, class: ClassIndex) -> YoloDecodeResult<Arc<str>> {
        self.names.get(class.get()).cloned().ok_or_else(|| {
            YoloDecodeError::config(format!(
                "class index {} out of range for {} labels",
                class.get(),
                self.names.len()
            ))
        })
    }

    /// Iterates over the names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_ref())
    }
}
