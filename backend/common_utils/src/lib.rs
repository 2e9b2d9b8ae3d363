//! Common utilities for the payment channels playground.

/// Masking primitives so credentials and other secrets never reach logs or
/// `Debug` output in the clear.
pub mod masking {
    use std::{fmt, hash::Hash, marker::PhantomData};

    use serde::{Deserialize, Serialize};

    /// A wrapper that keeps its inner value out of `Debug`/`Display` output.
    /// Serialization is transparent: persisted session snapshots and wire
    /// payloads carry the inner value.
    pub struct Secret<T, S = ()>(T, PhantomData<S>);

    impl<T, S> Secret<T, S> {
        pub fn new(value: T) -> Self {
            Self(value, PhantomData)
        }
    }

    impl<T, S> From<T> for Secret<T, S> {
        fn from(value: T) -> Self {
            Self::new(value)
        }
    }

    impl<T: Clone, S> Clone for Secret<T, S> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), PhantomData)
        }
    }

    impl<T: PartialEq, S> PartialEq for Secret<T, S> {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    impl<T: Eq, S> Eq for Secret<T, S> {}

    impl<T: Hash, S> Hash for Secret<T, S> {
        fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
            self.0.hash(state);
        }
    }

    impl<T: Default, S> Default for Secret<T, S> {
        fn default() -> Self {
            Self(T::default(), PhantomData)
        }
    }

    impl<T, S> fmt::Debug for Secret<T, S> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("*** masked ***")
        }
    }

    impl<T: Serialize, S> Serialize for Secret<T, S> {
        fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
        where
            Ser: serde::Serializer,
        {
            self.0.serialize(serializer)
        }
    }

    impl<'de, T: Deserialize<'de>, S> Deserialize<'de> for Secret<T, S> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            T::deserialize(deserializer).map(Self::new)
        }
    }

    /// Read access without consuming the secret.
    pub trait PeekInterface<T> {
        fn peek(&self) -> &T;
    }

    impl<T, S> PeekInterface<T> for Secret<T, S> {
        fn peek(&self) -> &T {
            &self.0
        }
    }

    /// Consume the secret, handing back the inner value.
    pub trait ExposeInterface<T> {
        fn expose(self) -> T;
    }

    impl<T, S> ExposeInterface<T> for Secret<T, S> {
        fn expose(self) -> T {
            self.0
        }
    }

    /// A value that may or may not be sensitive, used for request headers.
    #[derive(Clone, Debug, Eq, Hash, PartialEq)]
    pub enum Maskable<T> {
        Normal(T),
        Masked(Secret<T>),
    }

    impl<T> Maskable<T> {
        pub fn new_normal(value: T) -> Self {
            Self::Normal(value)
        }

        pub fn new_masked(value: Secret<T>) -> Self {
            Self::Masked(value)
        }

        pub fn into_inner(self) -> T {
            match self {
                Self::Normal(value) => value,
                Self::Masked(secret) => secret.expose(),
            }
        }
    }

    impl<T> From<T> for Maskable<T> {
        fn from(value: T) -> Self {
            Self::Normal(value)
        }
    }

    /// Conversion into the masked variant of [`Maskable`].
    pub trait Mask {
        type Output;

        fn into_masked(self) -> Self::Output;
    }

    impl Mask for String {
        type Output = Maskable<String>;

        fn into_masked(self) -> Self::Output {
            Maskable::Masked(Secret::new(self))
        }
    }

    impl Mask for Secret<String> {
        type Output = Maskable<String>;

        fn into_masked(self) -> Self::Output {
            Maskable::Masked(self)
        }
    }

    /// Object-safe serialization for request bodies carried as trait objects.
    pub trait ErasedMaskSerialize: erased_serde::Serialize {}

    impl<T: serde::Serialize> ErasedMaskSerialize for T {}

    erased_serde::serialize_trait_object!(ErasedMaskSerialize);
}

pub mod consts;
pub mod errors;
pub mod ext_traits;
pub mod id_type;
pub mod request;
pub mod types;

pub use errors::{CustomResult, ParsingError};
pub use masking::{ExposeInterface, Mask, Maskable, PeekInterface, Secret};
pub use request::{Method, Request, RequestBuilder, RequestContent};
pub use types::{AmountConvertor, FloatMajorUnit, MinorUnit, StringMajorUnit};
