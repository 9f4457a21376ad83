/// Kotlin-style scope functions for expression-oriented call chains.
pub trait LetAlso {
    fn let_owned<R, F>(self, f: F) -> R
    where
        Self: Sized,
        F: FnOnce(Self) -> R,
    {
        f(self)
    }

    fn let_ref<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&Self) -> R,
    {
        f(self)
    }

    fn also<F>(self, f: F) -> Self
    where
        Self: Sized,
        F: FnOnce(&Self),
    {
        f(&self);
        self
    }
}

impl<T> LetAlso for T {}
