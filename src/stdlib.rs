#![allow(unused_imports)]

#[cfg(feature = "std")]
#[doc(hidden)]
pub(crate) mod with_std {
    pub(crate) use std::fmt;
    pub(crate) use std::str;

    pub(crate) use std::borrow::ToOwned;
    pub(crate) use std::boxed::Box;
    pub(crate) use std::cmp;
    pub(crate) use std::collections::{BTreeMap, HashMap};
    pub(crate) use std::format;
    pub(crate) use std::ops::Neg;
    pub(crate) use std::result::Result as StdResult;
    pub(crate) use std::string::{String, ToString};
    pub(crate) use std::vec;
    pub(crate) use std::vec::Vec;
    pub(crate) use thiserror::Error as ThisError;
}

#[cfg(not(feature = "std"))]
#[cfg(feature = "no_std")]
#[doc(hidden)]
pub(crate) mod without_std {
    extern crate alloc;

    pub(crate) use alloc::borrow::ToOwned;
    pub(crate) use alloc::boxed::Box;
    pub(crate) use alloc::collections::BTreeMap;
    pub(crate) use alloc::format;
    pub(crate) use alloc::string::{String, ToString};
    pub(crate) use alloc::vec;
    pub(crate) use alloc::vec::Vec;
    pub(crate) use core::fmt;
    pub(crate) use core::ops::Neg;
    pub(crate) use core::result::Result as StdResult;
    pub(crate) use core::str;
    pub(crate) use core::cmp;
    pub(crate) use hashbrown::HashMap;
    pub(crate) use thiserror_no_std::Error as ThisError;
}

macro_rules! import_stdlib {
    () => {
        #[allow(unused_imports)]
        #[cfg(feature = "std")]
        use $crate::stdlib::with_std::*;
        #[allow(unused_imports)]
        #[cfg(not(feature = "std"))]
        use $crate::stdlib::without_std::*;
    };
}
