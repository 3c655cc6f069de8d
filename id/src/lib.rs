// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! A typed identifier for configuration objects.
//!
//! Objects returned by the management API are identified by a [UUID]. This crate tags those
//! identifiers with the type of object they name, so that the id of a NAT rule cannot be handed
//! to something expecting the id of, say, an address object.
//!
//! [UUID]: https://en.wikipedia.org/wiki/Universally_unique_identifier

use core::fmt::{Debug, Formatter};
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

#[allow(unused_imports)] // re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

/// An abstract, typed ID.
///
/// # Example
///
/// ```
/// # use scm_id::Id;
/// pub struct NatRule {
///     id: Id<Self>,
///     name: String,
/// }
///
/// pub struct AddressObject {
///     id: Id<Self>,
///     value: String,
/// }
/// ```
///
/// Assigning one to the other does not compile:
///
/// ```rust,compile_fail
/// # use scm_id::Id;
/// # struct NatRule;
/// # struct AddressObject;
/// fn mixup(mut rule: Id<NatRule>, address: Id<AddressObject>) {
///     rule = address;
/// }
/// ```
#[repr(transparent)]
pub struct Id<T: ?Sized, U = Uuid>(U, PhantomData<T>);

impl<T: ?Sized, U> Copy for Id<T, U> where U: Copy {}

impl<T: ?Sized, U> Clone for Id<T, U>
where
    U: Clone,
{
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T: ?Sized, U> Hash for Id<T, U>
where
    U: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T: ?Sized, U> PartialEq for Id<T, U>
where
    U: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: ?Sized, U> Eq for Id<T, U> where U: Eq {}

impl<T: ?Sized, U> PartialOrd for Id<T, U>
where
    U: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized, U> Ord for Id<T, U>
where
    U: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T: ?Sized, U> Display for Id<T, U>
where
    U: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <_ as Display>::fmt(&self.0, f)
    }
}

impl<T: ?Sized, U> Debug for Id<T, U>
where
    U: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <_ as Debug>::fmt(&self.0, f)
    }
}

impl<T: ?Sized> Id<T> {
    /// Generate a new random (version 4) `Id<T>`.
    ///
    /// This is what the management service does when an object is created; locally it is used
    /// by in-memory tables that stand in for the service.
    #[must_use]
    pub fn new() -> Id<T> {
        Id(Uuid::new_v4(), PhantomData)
    }

    /// Strip type safety and return the wrapped (untyped) [Uuid]
    #[must_use]
    pub const fn into_raw(self) -> Uuid {
        self.0
    }

    /// Return a reference to the underlying (untyped) [Uuid].
    #[must_use]
    pub const fn as_raw(&self) -> &Uuid {
        &self.0
    }

    /// Create a typed version of `uuid`.
    ///
    /// Use this only when the [Uuid] was received in a context where its object type is known,
    /// e.g. the `id` field of a NAT rule returned by the API.
    #[must_use]
    pub const fn from_raw(uuid: Uuid) -> Self {
        Self(uuid, PhantomData)
    }
}

impl<T: ?Sized> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> From<Id<T>> for Uuid {
    fn from(value: Id<T>) -> Self {
        value.0
    }
}

impl<T: ?Sized> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self::from_raw)
    }
}

// Serialized as the bare identifier: the type tag exists only at compile time.
#[cfg(feature = "serde")]
impl<T: ?Sized, U> serde::Serialize for Id<T, U>
where
    U: serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: ?Sized, U> serde::Deserialize<'de> for Id<T, U>
where
    U: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        U::deserialize(deserializer).map(|raw| Self(raw, PhantomData))
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use crate::Id;
    use bolero::{Driver, TypeGenerator, ValueGenerator};
    use std::marker::PhantomData;

    pub struct UuidIdGenerator;

    impl ValueGenerator for UuidIdGenerator {
        type Output = Id<()>;

        fn generate<D: Driver>(&self, driver: &mut D) -> Option<Self::Output> {
            Some(Id(
                uuid::Builder::from_random_bytes(driver.produce::<[u8; 16]>()?).into_uuid(),
                PhantomData,
            ))
        }
    }

    impl<T: 'static, U> TypeGenerator for Id<T, U>
    where
        U: TypeGenerator,
    {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(Id(driver.produce()?, PhantomData))
        }
    }
}
