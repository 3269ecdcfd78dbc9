//! Case-insensitive substring matching shared by the list views.

/// True when `needle` occurs in `haystack`, ignoring case. An empty needle
/// matches everything.
pub fn matches(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Status filter where `None` means "ALL".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter<S>(pub Option<S>);

impl<S: PartialEq + Copy> StatusFilter<S> {
    pub fn all() -> Self {
        Self(None)
    }

    pub fn only(status: S) -> Self {
        Self(Some(status))
    }

    pub fn accepts(&self, status: S) -> bool {
        self.0.map_or(true, |wanted| wanted == status)
    }
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        Self(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case() {
        assert!(matches("2021 Honda Civic", "civic"));
        assert!(matches("2021 Honda Civic", ""));
        assert!(!matches("2021 Honda Civic", "accord"));
    }

    #[test]
    fn status_filter_all_accepts_anything() {
        assert!(StatusFilter::<u8>::all().accepts(3));
        assert!(StatusFilter::only(2u8).accepts(2));
        assert!(!StatusFilter::only(2u8).accepts(3));
    }
}
