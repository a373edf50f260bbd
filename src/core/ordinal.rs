use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

/// Identity-keyed lookup from series id to a token.
///
/// Ids map to the range entry at their domain position. Ids outside the
/// domain, or whose position has no range entry, resolve to `unknown`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale<T> {
    domain: IndexMap<String, usize>,
    range: Vec<T>,
    unknown: Option<T>,
}

impl<T: Clone> OrdinalScale<T> {
    #[must_use]
    pub fn new(domain: impl IntoIterator<Item = String>, range: Vec<T>) -> Self {
        let mut positions = IndexMap::new();
        for (position, id) in domain.into_iter().enumerate() {
            positions.entry(id).or_insert(position);
        }
        Self {
            domain: positions,
            range,
            unknown: None,
        }
    }

    #[must_use]
    pub fn with_unknown(mut self, unknown: Option<T>) -> Self {
        self.unknown = unknown;
        self
    }

    /// Domain ids in insertion order; repeated ids appear once.
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.keys().map(String::as_str)
    }

    #[must_use]
    pub fn domain_len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn range(&self) -> &[T] {
        &self.range
    }

    #[must_use]
    pub fn unknown(&self) -> Option<&T> {
        self.unknown.as_ref()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<T> {
        self.domain
            .get(id)
            .and_then(|position| self.range.get(*position))
            .or(self.unknown.as_ref())
            .cloned()
    }
}

/// Series id → color token.
pub type ColorScale = OrdinalScale<String>;

/// Series id → line dash style.
pub type StyleScale = OrdinalScale<LineStyle>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// Stroke dash pattern in pixels; empty for solid lines.
    #[must_use]
    pub fn dash_array(self) -> SmallVec<[f64; 4]> {
        match self {
            Self::Solid => SmallVec::new(),
            Self::Dashed => smallvec![5.0, 5.0],
            Self::Dotted => smallvec![1.0, 3.0],
            Self::DashDot => smallvec![5.0, 3.0, 1.0, 3.0],
        }
    }
}
