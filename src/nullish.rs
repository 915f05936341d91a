use crate::Scope;
use std::{
    any::Any,
    borrow::Cow,
    cell::{Cell, RefCell},
    cmp::{Ordering, Reverse},
    collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque},
    convert::Infallible,
    ffi::{CStr, CString, OsStr, OsString},
    marker::PhantomData,
    num::{
        NonZeroI128, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroIsize, NonZeroU128,
        NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU8, NonZeroUsize, Wrapping,
    },
    ops::{Deref, Range, RangeInclusive},
    path::{Path, PathBuf},
    ptr::NonNull,
    rc::Rc,
    sync::{Arc, Mutex, RwLock},
    time::{Duration, Instant, SystemTime},
};

/// Selects the result type of [`Scope::skip_nullish`].
///
/// A type that can never hold a "nothing" value narrows to `Scope<Self>`, so
/// callers are not forced to handle an empty case that cannot happen. A type
/// that can be absent narrows to `Option<Scope<_>>` with the absent members
/// removed where the type system allows it:
///
/// | `Self`                      | `Output`                                   |
/// |-----------------------------|--------------------------------------------|
/// | `Option<T>`                 | `Option<Scope<T>>`                         |
/// | `()`                        | `Option<Scope<Infallible>>`                |
/// | `*const T`, `*mut T`        | `Option<Scope<NonNull<T>>>`                |
/// | `&T`, `&mut T`              | follows `T`, see [`SkipNullishRef`]        |
/// | `Box<T>`, `Rc<T>`, `Arc<T>` | follows `T`, the pointer itself is kept    |
/// | everything else here        | `Scope<Self>`                              |
///
/// Behind `dyn Any` only `()` and `None::<()>` are recognised as nullish. An
/// erased `None::<T>` for any other `T` cannot be named without `T` and is
/// kept as present.
///
/// User types opt in with `#[derive(SkipNullish)]`.
pub trait SkipNullish: Sized {
    type Output;

    fn skip_nullish(scope: Scope<Self>) -> Self::Output;
}

/// Narrowing of a value reached through a reference or an owning pointer.
///
/// `&Option<T>` narrows to `Option<Scope<&T>>` and `&mut Option<T>` to
/// `Option<Scope<&mut T>>`. A `Box`, `Rc` or `Arc` cannot give up its
/// pointee, so it is kept whole and only dropped when the pointee is nullish.
pub trait SkipNullishRef {
    type Keep<P>;
    type Ref<'r>
    where
        Self: 'r;
    type Mut<'r>
    where
        Self: 'r;

    fn is_nullish(&self) -> bool;
    fn keep<P: Deref<Target = Self>>(scope: Scope<P>) -> Self::Keep<P>;
    fn skip_nullish_ref(scope: Scope<&Self>) -> Self::Ref<'_>;
    fn skip_nullish_mut(scope: Scope<&mut Self>) -> Self::Mut<'_>;
}

#[doc(hidden)]
pub mod private {
    use super::SkipNullishRef;
    use crate::Scope;
    use std::ops::Deref;

    pub fn keep_present<T, P>(scope: Scope<P>) -> Option<Scope<P>>
    where
        T: SkipNullishRef + ?Sized,
        P: Deref<Target = T>,
    {
        if T::is_nullish(scope.get()) {
            None
        } else {
            Some(scope)
        }
    }
}

use private::keep_present;

impl<T> SkipNullish for Option<T> {
    type Output = Option<Scope<T>>;

    #[inline]
    fn skip_nullish(scope: Scope<Self>) -> Self::Output {
        scope.into_inner().map(Scope::new)
    }
}

impl<T> SkipNullishRef for Option<T> {
    type Keep<P> = Option<Scope<P>>;
    type Ref<'r> = Option<Scope<&'r T>> where Self: 'r;
    type Mut<'r> = Option<Scope<&'r mut T>> where Self: 'r;

    fn is_nullish(&self) -> bool {
        self.is_none()
    }

    fn keep<P: Deref<Target = Self>>(scope: Scope<P>) -> Self::Keep<P> {
        keep_present(scope)
    }

    fn skip_nullish_ref(scope: Scope<&Self>) -> Self::Ref<'_> {
        scope.into_inner().as_ref().map(Scope::new)
    }

    fn skip_nullish_mut(scope: Scope<&mut Self>) -> Self::Mut<'_> {
        scope.into_inner().as_mut().map(Scope::new)
    }
}

impl SkipNullish for () {
    type Output = Option<Scope<Infallible>>;

    #[inline]
    fn skip_nullish(_: Scope<Self>) -> Self::Output {
        None
    }
}

impl SkipNullishRef for () {
    type Keep<P> = Option<Scope<Infallible>>;
    type Ref<'r> = Option<Scope<Infallible>>;
    type Mut<'r> = Option<Scope<Infallible>>;

    fn is_nullish(&self) -> bool {
        true
    }

    fn keep<P: Deref<Target = Self>>(_: Scope<P>) -> Self::Keep<P> {
        None
    }

    fn skip_nullish_ref(_: Scope<&Self>) -> Self::Ref<'_> {
        None
    }

    fn skip_nullish_mut(_: Scope<&mut Self>) -> Self::Mut<'_> {
        None
    }
}

macro_rules! raw_pointers {
    ($($ptr:ty => $to_mut:expr;)*) => {$(
        impl<T: ?Sized> SkipNullish for $ptr {
            type Output = Option<Scope<NonNull<T>>>;

            #[inline]
            fn skip_nullish(scope: Scope<Self>) -> Self::Output {
                NonNull::new($to_mut(scope.into_inner())).map(Scope::new)
            }
        }

        impl<T: ?Sized> SkipNullishRef for $ptr {
            type Keep<P> = Option<Scope<P>>;
            type Ref<'r> = Option<Scope<NonNull<T>>> where Self: 'r;
            type Mut<'r> = Option<Scope<NonNull<T>>> where Self: 'r;

            fn is_nullish(&self) -> bool {
                self.is_null()
            }

            fn keep<P: Deref<Target = Self>>(scope: Scope<P>) -> Self::Keep<P> {
                keep_present(scope)
            }

            fn skip_nullish_ref(scope: Scope<&Self>) -> Self::Ref<'_> {
                scope.map(|ptr| *ptr).skip_nullish()
            }

            fn skip_nullish_mut(scope: Scope<&mut Self>) -> Self::Mut<'_> {
                scope.map(|ptr| *ptr).skip_nullish()
            }
        }
    )*};
}

raw_pointers! {
    *const T => |ptr: *const T| ptr as *mut T;
    *mut T => |ptr: *mut T| ptr;
}

macro_rules! owning_pointers {
    ($($ptr:ident),*) => {$(
        impl<T: SkipNullishRef + ?Sized> SkipNullish for $ptr<T> {
            type Output = T::Keep<Self>;

            #[inline]
            fn skip_nullish(scope: Scope<Self>) -> Self::Output {
                T::keep(scope)
            }
        }
    )*};
}

owning_pointers!(Box, Rc, Arc);

impl<'a, T: SkipNullishRef + ?Sized> SkipNullish for &'a T {
    type Output = T::Ref<'a>;

    #[inline]
    fn skip_nullish(scope: Scope<Self>) -> Self::Output {
        T::skip_nullish_ref(scope)
    }
}

impl<'a, T: SkipNullishRef + ?Sized> SkipNullish for &'a mut T {
    type Output = T::Mut<'a>;

    #[inline]
    fn skip_nullish(scope: Scope<Self>) -> Self::Output {
        T::skip_nullish_mut(scope)
    }
}

/// An erased value is nullish when it is `()` or `None::<()>`.
fn is_nullish_any(value: &dyn Any) -> bool {
    value.is::<()>()
        || value
            .downcast_ref::<Option<()>>()
            .map_or(false, Option::is_none)
}

macro_rules! dynamic {
    ($($ty:ty),*) => {$(
        impl SkipNullishRef for $ty {
            type Keep<P> = Option<Scope<P>>;
            type Ref<'r> = Option<Scope<&'r Self>> where Self: 'r;
            type Mut<'r> = Option<Scope<&'r mut Self>> where Self: 'r;

            fn is_nullish(&self) -> bool {
                is_nullish_any(self)
            }

            fn keep<P: Deref<Target = Self>>(scope: Scope<P>) -> Self::Keep<P> {
                keep_present(scope)
            }

            fn skip_nullish_ref(scope: Scope<&Self>) -> Self::Ref<'_> {
                keep_present(scope)
            }

            fn skip_nullish_mut(scope: Scope<&mut Self>) -> Self::Mut<'_> {
                keep_present(scope)
            }
        }
    )*};
}

dynamic!(dyn Any, dyn Any + Send, dyn Any + Send + Sync);

macro_rules! non_nullish_ref {
    ($([$($gen:tt)*] $ty:ty;)*) => {$(
        impl<$($gen)*> SkipNullishRef for $ty {
            type Keep<P> = Scope<P>;
            type Ref<'r> = Scope<&'r Self> where Self: 'r;
            type Mut<'r> = Scope<&'r mut Self> where Self: 'r;

            #[inline]
            fn is_nullish(&self) -> bool {
                false
            }

            #[inline]
            fn keep<P: Deref<Target = Self>>(scope: Scope<P>) -> Self::Keep<P> {
                scope
            }

            #[inline]
            fn skip_nullish_ref(scope: Scope<&Self>) -> Self::Ref<'_> {
                scope
            }

            #[inline]
            fn skip_nullish_mut(scope: Scope<&mut Self>) -> Self::Mut<'_> {
                scope
            }
        }
    )*};
}

macro_rules! non_nullish {
    ($([$($gen:tt)*] $ty:ty;)*) => {$(
        impl<$($gen)*> SkipNullish for $ty {
            type Output = Scope<Self>;

            #[inline]
            fn skip_nullish(scope: Scope<Self>) -> Self::Output {
                scope
            }
        }

        non_nullish_ref! { [$($gen)*] $ty; }
    )*};
}

macro_rules! tuples {
    ($first:ident $($rest:ident)*) => {
        non_nullish! { [$first $(, $rest)*] ($first, $($rest,)*); }
        tuples!($($rest)*);
    };
    () => {};
}

non_nullish! {
    [] bool; [] char;
    [] u8; [] u16; [] u32; [] u64; [] u128; [] usize;
    [] i8; [] i16; [] i32; [] i64; [] i128; [] isize;
    [] f32; [] f64;
    [] NonZeroU8; [] NonZeroU16; [] NonZeroU32; [] NonZeroU64; [] NonZeroU128; [] NonZeroUsize;
    [] NonZeroI8; [] NonZeroI16; [] NonZeroI32; [] NonZeroI64; [] NonZeroI128; [] NonZeroIsize;
    [] Infallible; [] Ordering;
    [] Duration; [] Instant; [] SystemTime;
    [] String; [] PathBuf; [] OsString; [] CString;
    ['a, B: ?Sized + ToOwned] Cow<'a, B>;
    [T: ?Sized] NonNull<T>;

    [T, const N: usize] [T; N];
    [T] Vec<T>; [T] VecDeque<T>; [T] LinkedList<T>; [T] BinaryHeap<T>;
    [K, V, S] HashMap<K, V, S>; [T, S] HashSet<T, S>;
    [K, V] BTreeMap<K, V>; [T] BTreeSet<T>;

    [T, E] Result<T, E>;
    [T] Range<T>; [T] RangeInclusive<T>;
    [T] Cell<T>; [T] RefCell<T>; [T] Mutex<T>; [T] RwLock<T>;
    [T] Reverse<T>; [T] Wrapping<T>; [T] PhantomData<T>;
    [T] Scope<T>;
}

non_nullish_ref! {
    [] str; [T] [T];
    [] Path; [] OsStr; [] CStr;
}

tuples!(A B C D E F G H I J K L);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope;

    #[test]
    fn non_nullish_stays_scope() {
        let out: Scope<i32> = scope(0).skip_nullish();
        assert_eq!(out.into_inner(), 0);

        let out: Scope<&str> = scope("").skip_nullish();
        assert_eq!(out.into_inner(), "");

        let out: Scope<(bool, Vec<u8>)> = scope((false, vec![])).skip_nullish();
        assert_eq!(out.into_inner(), (false, vec![]));
    }

    #[test]
    fn option_narrows() {
        let out: Option<Scope<bool>> = scope(Some(true)).skip_nullish();
        assert_eq!(out, Some(scope(true)));

        let out: Option<Scope<bool>> = scope(None::<bool>).skip_nullish();
        assert_eq!(out, None);

        // Only the outer layer is absent here.
        let out: Option<Scope<Option<u8>>> = scope(Some(None::<u8>)).skip_nullish();
        assert_eq!(out, Some(scope(None)));
    }

    #[test]
    fn unit_is_always_empty() {
        let out: Option<Scope<Infallible>> = scope(()).skip_nullish();
        assert!(out.is_none());
    }

    #[test]
    fn raw_pointers_narrow_to_non_null() {
        let value = 7;
        let ptr: *const i32 = &value;
        let out: Option<Scope<NonNull<i32>>> = scope(ptr).skip_nullish();
        assert_eq!(out.map(|s| s.into_inner().as_ptr() as *const i32), Some(ptr));

        let null: *mut i32 = std::ptr::null_mut();
        assert!(scope(null).skip_nullish().is_none());
        assert!(scope(&null).skip_nullish().is_none());
    }

    #[test]
    fn references_follow_the_pointee() {
        let absent: Option<String> = None;
        let out: Option<Scope<&String>> = scope(&absent).skip_nullish();
        assert!(out.is_none());

        let present = Some(String::from("x"));
        let out: Option<Scope<&String>> = scope(&present).skip_nullish();
        assert_eq!(out.map(|s| s.into_inner().as_str()), Some("x"));

        let out: Option<Scope<Infallible>> = scope(&()).skip_nullish();
        assert!(out.is_none());

        let number = 0;
        let out: Scope<&i32> = scope(&number).skip_nullish();
        assert_eq!(*out.into_inner(), 0);

        let out: Scope<&[u8]> = scope(&[1u8, 2][..]).skip_nullish();
        assert_eq!(out.into_inner(), &[1, 2]);
    }

    #[test]
    fn mutable_references_narrow_in_place() {
        let mut slot = Some(1);
        if let Some(inner) = scope(&mut slot).skip_nullish() {
            inner.also_mut(|it| **it += 1);
        }
        assert_eq!(slot, Some(2));

        let mut empty = None::<i32>;
        let out: Option<Scope<&mut i32>> = scope(&mut empty).skip_nullish();
        assert!(out.is_none());
    }

    #[test]
    fn owning_pointers_keep_the_pointer() {
        let out: Option<Scope<Box<Option<u8>>>> = scope(Box::new(None::<u8>)).skip_nullish();
        assert!(out.is_none());

        let out: Option<Scope<Box<Option<u8>>>> = scope(Box::new(Some(3u8))).skip_nullish();
        assert_eq!(out.map(|s| *s.into_inner()), Some(Some(3)));

        let shared = Rc::new(None::<u8>);
        assert!(scope(Rc::clone(&shared)).skip_nullish().is_none());

        let out: Scope<Arc<str>> = scope(Arc::<str>::from("a")).skip_nullish();
        assert_eq!(&*out.into_inner(), "a");

        let out: Option<Scope<Infallible>> = scope(Box::new(())).skip_nullish();
        assert!(out.is_none());
    }

    #[test]
    fn dynamic_values_stay_optional() {
        let out: Option<Scope<Box<dyn Any>>> = scope(Box::new(1) as Box<dyn Any>).skip_nullish();
        assert_eq!(out.and_then(|s| s.into_inner().downcast_ref::<i32>().copied()), Some(1));

        assert!(scope(Box::new(()) as Box<dyn Any>).skip_nullish().is_none());
        assert!(scope(Box::new(None::<()>) as Box<dyn Any + Send>)
            .skip_nullish()
            .is_none());
        assert!(scope(&0u8 as &dyn Any).skip_nullish().is_some());
        assert!(scope(Arc::new(()) as Arc<dyn Any + Send + Sync>)
            .skip_nullish()
            .is_none());

        // Only `None::<()>` can be recognised once the type is erased.
        assert!(scope(Box::new(None::<u8>) as Box<dyn Any>)
            .skip_nullish()
            .is_some());
    }
}
