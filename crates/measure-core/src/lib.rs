//! Units of measurement and dimension-safe quantity arithmetic.
//!
//! The building blocks, leaf first:
//!
//! * [`Dimension`]: integer exponents over the base physical dimensions.
//! * [`UnitConverter`]: an exact, invertible chain of scale and offset steps.
//! * [`Unit`]: a dimension plus the converter to that dimension's system
//!   unit, and a record of how the unit was derived.
//! * [`Quantity`]: a decimal value in some unit.
//!
//! Units come from the [`si`] accessors and are combined with the unit
//! algebra and the prefix shortcuts:
//!
//! ```
//! use measure_core::{prefix::milli, si, Quantity, Speed};
//! use rust_decimal::Decimal;
//!
//! let distance = Quantity::of(Decimal::from(680), &si::metre());
//! let time = Quantity::of(Decimal::from(2000), &milli(&si::second()));
//! let speed = distance.divide(&time).unwrap();
//! assert_eq!(speed.to_string(), "0.34 m/ms");
//!
//! let speed = speed.as_type::<Speed>().to(&si::metre_per_second()).unwrap();
//! assert_eq!(speed.value(), Decimal::from(340));
//! ```
//!
//! `Unit` and `Quantity` carry a compile-time quantity kind (see [`kind`]);
//! products and quotients are [`Untyped`] until re-tagged with `as_type`.

pub mod config;
pub mod converter;
pub mod dimension;
mod error;
pub mod kind;
pub mod prefix;
pub mod quantity;
pub mod system;
pub mod unit;

pub use config::{SystemConfig, UnitDefinition};
pub use converter::{Affine, ConverterStep, Factor, UnitConverter};
pub use dimension::{BaseDimension, Dimension};
pub use error::UnitError;
pub use kind::*;
pub use prefix::MetricPrefix;
pub use quantity::Quantity;
pub use system::{global, si, UnitSystem};
pub use unit::{Derivation, DisplayIn, Unit};
