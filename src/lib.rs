//! Chainable scope functions over a single value.
//!
//! ```
//! use scopefn::{scope, ScopeOption};
//!
//! let len = scope(Some("hello"))
//!     .skip_nullish()
//!     .map_some(str::len)
//!     .map_some(|len| len + 1)
//!     .into_inner();
//! assert_eq!(len, Some(6));
//! ```

mod ext;
mod nullish;
mod scope;

#[doc(inline)]
pub use self::{
    ext::{ScopeExt, ScopeOption},
    nullish::{SkipNullish, SkipNullishRef},
    scope::{scope, Scope},
};

#[doc(hidden)]
pub use self::nullish::private;

#[cfg(feature = "derive")]
#[doc(inline)]
pub use scopefn_impl::SkipNullish;
