//! Domain identifier types
//!
//! Newtype wrappers for the numeric identifiers used by the catalog store.
//! Keeping them distinct prevents passing an image id where a product id is
//! expected, which matters most for the pagination cursor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident($inner:ty), $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Wraps a raw identifier value
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<$inner>()
                    .map(Self)
                    .map_err(|e| format!("Invalid {} '{}': {}", $label, s, e))
            }
        }
    };
}

numeric_id!(
    /// Catalog product identifier
    ///
    /// Product ids grow with catalog insertion order, so the id of the last
    /// exported product doubles as the seek cursor for the next page.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_feed::domain::ids::ProductId;
    ///
    /// let cursor: ProductId = "42".parse().unwrap();
    /// assert!(ProductId::new(43) > cursor);
    /// ```
    ProductId(u64),
    "product id"
);

numeric_id!(
    /// Storefront domain identifier
    DomainId(u32),
    "domain id"
);

numeric_id!(
    /// Pricing group (pricing tier) identifier
    PricingGroupId(u64),
    "pricing group id"
);

numeric_id!(
    /// Image identifier
    ImageId(u64),
    "image id"
);

impl DomainId {
    /// The first storefront domain
    pub const FIRST: DomainId = DomainId(1);
}
