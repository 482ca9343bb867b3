//! Configuration shared by every list type.

/// What a sorted insert does when none of the hinted positions fit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HintPolicy {
    /// Reject with `ListError::NoValidPosition`.
    #[default]
    Strict,
    /// Find the position with a linear scan from the head instead.
    ScanOnMiss,
}

/// Configuration for a list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListConfig {
    /// Maximum number of elements; `None` for unbounded.
    pub capacity: Option<usize>,
    /// Number of elements to reserve space for up front.
    pub initial_capacity: usize,
    /// Behaviour on a hint miss.
    pub hint_policy: HintPolicy,
}

impl Default for ListConfig {
    fn default() -> Self {
        return ListConfig {
            capacity: None,
            initial_capacity: 16,
            hint_policy: HintPolicy::Strict,
        };
    }
}

impl ListConfig {
    /// Bound the list to at most `capacity` elements.
    pub fn with_capacity(mut self, capacity: usize) -> ListConfig {
        self.capacity = Some(capacity);
        return self;
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> ListConfig {
        self.initial_capacity = initial_capacity;
        return self;
    }

    pub fn with_hint_policy(mut self, hint_policy: HintPolicy) -> ListConfig {
        self.hint_policy = hint_policy;
        return self;
    }

    /// Space to reserve: the initial capacity, never more than the bound.
    pub(crate) fn reserve(&self) -> usize {
        return match self.capacity {
            Some(capacity) => self.initial_capacity.min(capacity),
            None => self.initial_capacity,
        };
    }
}
