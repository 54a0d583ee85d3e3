//! # Component Values
//!
//! A component is a named value attached to an entity. The store keeps the
//! payload as a closed tagged variant so any entity can hold any named
//! component without type erasure. The core never looks inside a payload;
//! only the systems that wrote it give it meaning.

use velocity_shared::Vec2;

use super::entity::Entity;

/// Payload of a single component.
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentValue {
    /// On/off marker.
    Flag(bool),
    /// Counters, scores, hit points.
    Int(i64),
    /// Timers, angles, scalars.
    Float(f64),
    /// Positions, velocities.
    Vec2(Vec2),
    /// A reference to another entity (owner, target).
    Entity(Entity),
    /// Labels and ids.
    Text(String),
}

impl ComponentValue {
    /// Name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Flag(_) => bool::KIND,
            Self::Int(_) => i64::KIND,
            Self::Float(_) => f64::KIND,
            Self::Vec2(_) => Vec2::KIND,
            Self::Entity(_) => Entity::KIND,
            Self::Text(_) => String::KIND,
        }
    }

    /// Returns the flag, if this is one.
    #[must_use]
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the float, if this is one.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the vector, if this is one.
    #[must_use]
    pub const fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Self::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the referenced entity, if this is one.
    #[must_use]
    pub const fn as_entity(&self) -> Option<Entity> {
        match self {
            Self::Entity(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// Rust types that map onto exactly one [`ComponentValue`] variant.
///
/// Lets callers write `store.get_as::<f64>(e, "timer")` instead of matching
/// on the variant themselves.
pub trait ComponentKind: Sized + Into<ComponentValue> {
    /// Variant name used in diagnostics.
    const KIND: &'static str;

    /// Extracts `Self` from a value of the matching variant.
    fn from_value(value: &ComponentValue) -> Option<Self>;
}

macro_rules! component_kind {
    ($ty:ty, $variant:ident, $kind:literal, $accessor:ident) => {
        impl ComponentKind for $ty {
            const KIND: &'static str = $kind;

            #[inline]
            fn from_value(value: &ComponentValue) -> Option<Self> {
                value.$accessor()
            }
        }

        impl From<$ty> for ComponentValue {
            #[inline]
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

component_kind!(bool, Flag, "flag", as_flag);
component_kind!(i64, Int, "int", as_int);
component_kind!(f64, Float, "float", as_float);
component_kind!(Vec2, Vec2, "vec2", as_vec2);
component_kind!(Entity, Entity, "entity", as_entity);

impl ComponentKind for String {
    const KIND: &'static str = "text";

    fn from_value(value: &ComponentValue) -> Option<Self> {
        value.as_text().map(str::to_owned)
    }
}

impl From<String> for ComponentValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for ComponentValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<i32> for ComponentValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}
