use crate::SkipNullish;

/// Holds one value and threads it through a chain of closures.
///
/// Operations that observe or filter hand back the very same scope. Only
/// [`Scope::map`] produces a new one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Scope<T> {
    value: T,
}

/// Wraps `value` in a [`Scope`].
pub const fn scope<T>(value: T) -> Scope<T> {
    Scope::new(value)
}

impl<T> Scope<T> {
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// Calls `f` with the value and wraps whatever it returns.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scope<U> {
        Scope::new(f(self.value))
    }

    /// Like [`Scope::map`] for a fallible `f`. The error is returned untouched.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Scope<U>, E> {
        f(self.value).map(Scope::new)
    }

    /// Calls `f` for its side effects and returns `self`.
    pub fn also(self, f: impl FnOnce(&T)) -> Self {
        f(&self.value);
        self
    }

    /// Like [`Scope::also`], but `f` may modify the value in place.
    pub fn also_mut(mut self, f: impl FnOnce(&mut T)) -> Self {
        f(&mut self.value);
        self
    }

    pub fn try_also<E>(self, f: impl FnOnce(&T) -> Result<(), E>) -> Result<Self, E> {
        f(&self.value)?;
        Ok(self)
    }

    /// Returns `self` if `predicate` holds, `None` otherwise.
    pub fn take_if(self, predicate: impl FnOnce(&T) -> bool) -> Option<Self> {
        if predicate(&self.value) {
            Some(self)
        } else {
            None
        }
    }

    /// Returns `self` unless `predicate` holds.
    pub fn take_unless(self, predicate: impl FnOnce(&T) -> bool) -> Option<Self> {
        self.take_if(|value| !predicate(value))
    }

    /// Drops the scope if its value is nullish.
    ///
    /// The result type depends on `T`, see [`SkipNullish`]: a type that can
    /// never be absent stays a plain `Scope<T>`, while `Option<U>` narrows to
    /// `Option<Scope<U>>`.
    pub fn skip_nullish(self) -> T::Output
    where
        T: SkipNullish,
    {
        T::skip_nullish(self)
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Borrows the value into a new scope, leaving `self` usable.
    pub fn as_ref(&self) -> Scope<&T> {
        Scope::new(&self.value)
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    /// Emits a `DEBUG` event with `label` and the value, then returns `self`.
    #[cfg(feature = "tracing")]
    pub fn trace(self, label: &str) -> Self
    where
        T: std::fmt::Debug,
    {
        tracing::debug!(target: "scopefn", label, value = ?self.value, "scope");
        self
    }
}

impl<T> From<T> for Scope<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
