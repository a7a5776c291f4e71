//! Load status for data fetched from the schemes API.

/// Data a view fetched remotely along with its loading flag and banner.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Loadable<T> {
    data: T,
    loading: bool,
    error: Option<String>,
}

impl<T> Loadable<T> {
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mark a request as in flight and clear the banner.
    ///
    pub fn start(&mut self) -> &mut Self {
        self.loading = true;
        self.error = None;
        self
    }

    /// Replace the data with a successful response.
    ///
    pub fn succeed(&mut self, data: T) -> &mut Self {
        self.data = data;
        self.loading = false;
        self.error = None;
        self
    }

    /// Keep the previous data and show the given banner.
    ///
    pub fn fail(&mut self, message: &str) -> &mut Self {
        self.loading = false;
        self.error = Some(message.to_owned());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_clears_banner() {
        let mut list: Loadable<Vec<u64>> = Loadable::default();
        list.fail("Failed to load saved schemes.");
        assert_eq!(list.error(), Some("Failed to load saved schemes."));
        list.start();
        assert!(list.is_loading());
        assert_eq!(list.error(), None);
    }

    #[test]
    fn fail_keeps_previous_data() {
        let mut list = Loadable::default();
        list.start().succeed(vec![1, 2]);
        list.start().fail("Failed to load schemes");
        assert_eq!(list.data(), &vec![1, 2]);
        assert!(!list.is_loading());
    }
}
