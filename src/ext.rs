use crate::Scope;

/// Postfix form of [`scope`](crate::scope) for every sized value.
pub trait ScopeExt: Sized {
    fn scope(self) -> Scope<Self> {
        Scope::new(self)
    }
}

impl<T> ScopeExt for T {}

/// Continues a chain through the empty result of
/// [`Scope::take_if`], [`Scope::take_unless`] or [`Scope::skip_nullish`].
///
/// Once the chain is empty no further closure is called.
pub trait ScopeOption<T>: Sized {
    fn map_some<U>(self, f: impl FnOnce(T) -> U) -> Option<Scope<U>>;
    fn also_some(self, f: impl FnOnce(&T)) -> Self;
    fn take_if_some(self, predicate: impl FnOnce(&T) -> bool) -> Self;
    fn take_unless_some(self, predicate: impl FnOnce(&T) -> bool) -> Self;
    fn into_inner(self) -> Option<T>;
}

impl<T> ScopeOption<T> for Option<Scope<T>> {
    fn map_some<U>(self, f: impl FnOnce(T) -> U) -> Option<Scope<U>> {
        self.map(|scope| scope.map(f))
    }

    fn also_some(self, f: impl FnOnce(&T)) -> Self {
        self.map(|scope| scope.also(f))
    }

    fn take_if_some(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        self.and_then(|scope| scope.take_if(predicate))
    }

    fn take_unless_some(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        self.and_then(|scope| scope.take_unless(predicate))
    }

    fn into_inner(self) -> Option<T> {
        self.map(Scope::into_inner)
    }
}
