#[cfg(feature = "threadsafe")]
pub(crate) mod inner {
    use std::sync::OnceLock;

    pub(crate) struct Lazy<T>(OnceLock<T>);

    impl<T> Lazy<T> {
        pub(crate) const fn new() -> Self {
            Self(OnceLock::new())
        }

        pub(crate) fn get(&self) -> Option<&T> {
            self.0.get()
        }

        pub(crate) fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
            self.0.get_or_init(init)
        }
    }
}

#[cfg(not(feature = "threadsafe"))]
pub(crate) mod inner {
    use std::cell::OnceCell;

    pub(crate) struct Lazy<T>(OnceCell<T>);

    impl<T> Lazy<T> {
        pub(crate) const fn new() -> Self {
            Self(OnceCell::new())
        }

        pub(crate) fn get(&self) -> Option<&T> {
            self.0.get()
        }

        pub(crate) fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
            self.0.get_or_init(init)
        }
    }
}

pub(crate) use inner::Lazy;

impl<T> Lazy<T> {
    /// Resolves the value with a fallible `init` on first access.
    ///
    /// Errors are not cached; a later call retries `init`.
    /// When racing with another thread, the first stored value wins
    /// and is returned to every caller.
    pub(crate) fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        if let Some(value) = self.get() {
            return Ok(value);
        }
        let value = init()?;
        Ok(self.get_or_init(|| value))
    }
}

impl<T> Default for Lazy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Lazy").field(value).finish(),
            None => f.write_str("Lazy(<unresolved>)"),
        }
    }
}
