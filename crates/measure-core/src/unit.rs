//! Units and the unit algebra.
//!
//! A [`Unit`] pairs a [`Dimension`] with the [`UnitConverter`] that takes a
//! value in this unit to the system unit of that dimension. Every unit also
//! records how it was built ([`Derivation`]); derived units hold shared
//! references to their operands, so the derivation graph is built strictly
//! bottom-up and has no cycles.
//!
//! Three relations are kept apart:
//!
//! * `==` is structural: dimension, converter chain, name, symbol and
//!   derivation all match.
//! * [`Unit::is_equivalent_to`]: compatible, and converting between the two
//!   units is the identity.
//! * [`Unit::is_compatible`]: same dimension, any scale.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::converter::{Factor, UnitConverter};
use crate::dimension::Dimension;
use crate::kind::{QuantityKind, Untyped};
use crate::prefix::MetricPrefix;
use crate::system::{self, UnitSystem};
use crate::UnitError;

/// How a unit was constructed.
#[derive(Clone, Debug, PartialEq)]
pub enum Derivation {
    Base,
    /// A named unit defined by a converter on another unit (litre, degree Celsius).
    Transformed { parent: Unit },
    Prefixed { unit: Unit, prefix: MetricPrefix },
    /// Multiplication by a number; `divide(d)` records the factor `1/d`.
    Scaled { unit: Unit, factor: Factor },
    Product { lhs: Unit, rhs: Unit },
    Quotient { numerator: Unit, denominator: Unit },
    Power { unit: Unit, exponent: i32 },
}

#[derive(Debug, PartialEq)]
struct UnitData {
    dimension: Dimension,
    converter: UnitConverter,
    name: Option<String>,
    symbol: Option<String>,
    derivation: Derivation,
}

/// An immutable unit of measurement, tagged with a compile-time quantity kind.
pub struct Unit<Q = Untyped> {
    data: Arc<UnitData>,
    kind: PhantomData<fn() -> Q>,
}

impl<Q> Clone for Unit<Q> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            kind: PhantomData,
        }
    }
}

impl<Q, R> PartialEq<Unit<R>> for Unit<Q> {
    fn eq(&self, other: &Unit<R>) -> bool {
        Arc::ptr_eq(&self.data, &other.data) || self.data == other.data
    }
}

impl<Q: QuantityKind> Unit<Q> {
    fn from_data(data: UnitData) -> Self {
        Self {
            data: Arc::new(data),
            kind: PhantomData,
        }
    }

    /// A base unit: the system unit of `dimension`, with the identity converter.
    pub fn base(dimension: Dimension, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::from_data(UnitData {
            dimension,
            converter: UnitConverter::identity(),
            name: Some(name.into()),
            symbol: Some(symbol.into()),
            derivation: Derivation::Base,
        })
    }

    /// A named unit where one of it is `converter(1)` of `parent`.
    pub fn transformed<P: QuantityKind>(
        parent: &Unit<P>,
        converter: UnitConverter,
        name: Option<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self::from_data(UnitData {
            dimension: parent.dimension(),
            converter: converter.then(parent.converter()),
            name,
            symbol: Some(symbol.into()),
            derivation: Derivation::Transformed {
                parent: parent.untyped(),
            },
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.data.name.as_deref()
    }

    /// The symbol this unit was given. Most derived units have none; their
    /// `Display` form is synthesized instead.
    pub fn symbol(&self) -> Option<&str> {
        self.data.symbol.as_deref()
    }

    pub fn dimension(&self) -> Dimension {
        self.data.dimension
    }

    /// Converter from this unit to the system unit of its dimension.
    pub fn converter(&self) -> &UnitConverter {
        &self.data.converter
    }

    pub fn derivation(&self) -> &Derivation {
        &self.data.derivation
    }

    pub fn kind_name(&self) -> &'static str {
        Q::NAME
    }

    pub fn untyped(&self) -> Unit<Untyped> {
        self.as_type()
    }

    /// Reinterpret this unit as kind `R`. Nothing is checked.
    pub fn as_type<R: QuantityKind>(&self) -> Unit<R> {
        Unit {
            data: Arc::clone(&self.data),
            kind: PhantomData,
        }
    }

    /// Like [`Unit::as_type`], but fails when `R` declares a different dimension.
    pub fn try_as_type<R: QuantityKind>(&self) -> Result<Unit<R>, UnitError> {
        match R::DIMENSION {
            Some(expected) if expected != self.dimension() => Err(UnitError::KindMismatch {
                unit: self.to_string(),
                kind: R::NAME,
                expected: expected.to_string(),
                actual: self.dimension().to_string(),
            }),
            _ => Ok(self.as_type()),
        }
    }

    /// This unit scaled by a power-of-ten prefix. A prefix applied to an
    /// already prefixed unit is not collapsed: `milli(kilogram)` shows `mkg`.
    pub fn prefixed(&self, prefix: MetricPrefix) -> Unit<Q> {
        let scale = UnitConverter::from_factor(Factor::power_of_ten(prefix.exponent()));
        Self::from_data(UnitData {
            dimension: self.dimension(),
            converter: scale.then(self.converter()),
            name: None,
            symbol: None,
            derivation: Derivation::Prefixed {
                unit: self.untyped(),
                prefix,
            },
        })
    }

    pub(crate) fn scaled_by(&self, factor: Factor) -> Unit<Q> {
        Self::from_data(UnitData {
            dimension: self.dimension(),
            converter: UnitConverter::from_factor(factor).then(self.converter()),
            name: None,
            symbol: None,
            derivation: Derivation::Scaled {
                unit: self.untyped(),
                factor,
            },
        })
    }

    /// One of the result equals `factor` of this unit. Results whose converter
    /// matches a registered unit of the same dimension resolve to that unit.
    pub fn multiply_scalar(&self, factor: Decimal) -> Result<Unit<Q>, UnitError> {
        let scaled = self.scaled_by(Factor::new(factor, Decimal::ONE)?);
        Ok(system::global().canonicalize(scaled))
    }

    /// `multiply_scalar(1 / divisor)`, kept exact: `kilogram / 1000` is `gram`.
    pub fn divide_scalar(&self, divisor: Decimal) -> Result<Unit<Q>, UnitError> {
        let scaled = self.scaled_by(Factor::new(Decimal::ONE, divisor)?);
        Ok(system::global().canonicalize(scaled))
    }

    pub fn multiply<R: QuantityKind>(&self, other: &Unit<R>) -> Unit<Untyped> {
        Unit::from_data(UnitData {
            dimension: self.dimension() * other.dimension(),
            converter: self.converter().linear().then(&other.converter().linear()),
            name: None,
            symbol: None,
            derivation: Derivation::Product {
                lhs: self.untyped(),
                rhs: other.untyped(),
            },
        })
    }

    pub fn divide<R: QuantityKind>(&self, other: &Unit<R>) -> Unit<Untyped> {
        Unit::from_data(UnitData {
            dimension: self.dimension() / other.dimension(),
            converter: self
                .converter()
                .linear()
                .then(&other.converter().linear().inverse()),
            name: None,
            symbol: None,
            derivation: Derivation::Quotient {
                numerator: self.untyped(),
                denominator: other.untyped(),
            },
        })
    }

    /// `unit^exponent`. The first power is the unit itself and the zeroth is `one`.
    pub fn pow(&self, exponent: i32) -> Unit<Untyped> {
        match exponent {
            0 => system::global().one(),
            1 => self.untyped(),
            _ => Unit::from_data(UnitData {
                dimension: self.dimension().pow(exponent),
                converter: self.converter().linear().pow(exponent),
                name: None,
                symbol: None,
                derivation: Derivation::Power {
                    unit: self.untyped(),
                    exponent,
                },
            }),
        }
    }

    /// `one / self`
    pub fn inverse(&self) -> Unit<Untyped> {
        system::global().one().divide(self)
    }

    /// The unit every converter of this dimension is expressed against.
    pub fn system_unit(&self) -> Unit<Q> {
        system::global()
            .system_unit(self.dimension())
            .as_type()
    }

    pub fn is_compatible<R: QuantityKind>(&self, other: &Unit<R>) -> bool {
        self.dimension() == other.dimension()
    }

    pub fn is_equivalent_to<R: QuantityKind>(&self, other: &Unit<R>) -> bool {
        self.is_compatible(other) && self.raw_converter_to(other).is_equivalent_to_identity()
    }

    fn raw_converter_to<R>(&self, other: &Unit<R>) -> UnitConverter {
        if self.data.converter == other.data.converter {
            return UnitConverter::identity();
        }
        self.data.converter.then(&other.data.converter.inverse())
    }

    /// Converter to a unit of the same kind. A dimension mismatch here means
    /// an `as_type` somewhere asserted the wrong kind.
    pub fn converter_to(&self, other: &Unit<Q>) -> Result<UnitConverter, UnitError> {
        if !self.is_compatible(other) {
            return Err(UnitError::Unconvertible {
                from: self.to_string(),
                to: other.to_string(),
                from_dimension: self.dimension().to_string(),
                to_dimension: other.dimension().to_string(),
            });
        }
        Ok(self.raw_converter_to(other))
    }

    /// Converter to a unit of any kind, checking dimensions at runtime.
    pub fn converter_to_any<R: QuantityKind>(
        &self,
        other: &Unit<R>,
    ) -> Result<UnitConverter, UnitError> {
        if !self.is_compatible(other) {
            return Err(UnitError::Incommensurable {
                from: self.to_string(),
                to: other.to_string(),
                from_dimension: self.dimension().to_string(),
                to_dimension: other.dimension().to_string(),
            });
        }
        Ok(self.raw_converter_to(other))
    }

    fn is_compound(&self, system: &UnitSystem) -> bool {
        self.symbol().is_none()
            && system.label_of(self).is_none()
            && matches!(
                self.derivation(),
                Derivation::Scaled { .. }
                    | Derivation::Product { .. }
                    | Derivation::Quotient { .. }
                    | Derivation::Power { .. }
            )
    }

    fn write_operand(&self, f: &mut fmt::Formatter<'_>, system: &UnitSystem) -> fmt::Result {
        if self.is_compound(system) {
            write!(f, "(")?;
            self.write_symbol(f, system)?;
            write!(f, ")")
        } else {
            self.write_symbol(f, system)
        }
    }

    /// Writes the symbol, the label `system` registered for this unit, or a
    /// symbol synthesized from the derivation, in that order of preference.
    ///
    /// `Display` passes the process-wide [`system::global`]; labels of a
    /// system that was never installed only show through [`Unit::display_in`].
    pub fn write_symbol(&self, f: &mut fmt::Formatter<'_>, system: &UnitSystem) -> fmt::Result {
        if let Some(symbol) = self.symbol() {
            return f.write_str(symbol);
        }
        if let Some(label) = system.label_of(self) {
            return f.write_str(label);
        }
        match self.derivation() {
            Derivation::Base | Derivation::Transformed { .. } => {
                f.write_str(self.name().unwrap_or("?"))
            }
            Derivation::Prefixed { unit, prefix } => {
                f.write_str(prefix.symbol())?;
                unit.write_symbol(f, system)
            }
            Derivation::Scaled { unit, factor } => {
                unit.write_symbol(f, system)?;
                let numerator = factor.numerator().normalize();
                let denominator = factor.denominator().normalize();
                if denominator == Decimal::ONE {
                    write!(f, "*{}", numerator)
                } else if numerator == Decimal::ONE {
                    write!(f, "/{}", denominator)
                } else {
                    write!(f, "*{}/{}", numerator, denominator)
                }
            }
            Derivation::Product { lhs, rhs } => {
                lhs.write_symbol(f, system)?;
                f.write_str("*")?;
                rhs.write_symbol(f, system)
            }
            Derivation::Quotient {
                numerator,
                denominator,
            } => {
                numerator.write_symbol(f, system)?;
                f.write_str("/")?;
                denominator.write_operand(f, system)
            }
            Derivation::Power { unit, exponent } => {
                unit.write_operand(f, system)?;
                write!(f, "^{}", exponent)
            }
        }
    }
}

/// A unit rendered against a particular [`UnitSystem`].
pub struct DisplayIn<'a, Q> {
    unit: &'a Unit<Q>,
    system: &'a UnitSystem,
}

impl<Q: QuantityKind> fmt::Display for DisplayIn<'_, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.unit.write_symbol(f, self.system)
    }
}

impl<Q: QuantityKind> Unit<Q> {
    /// Display using the labels of `system` instead of the process-wide ones.
    pub fn display_in<'a>(&'a self, system: &'a UnitSystem) -> DisplayIn<'a, Q> {
        DisplayIn { unit: self, system }
    }
}

impl<Q: QuantityKind> fmt::Display for Unit<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_symbol(f, system::global())
    }
}

impl<Q: QuantityKind> fmt::Debug for Unit<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("display", &self.to_string())
            .field("kind", &Q::NAME)
            .field("dimension", &self.dimension().to_string())
            .field("converter", &self.converter().to_string())
            .finish()
    }
}

impl<Q: QuantityKind, R: QuantityKind> std::ops::Mul<&Unit<R>> for &Unit<Q> {
    type Output = Unit<Untyped>;
    fn mul(self, rhs: &Unit<R>) -> Self::Output {
        self.multiply(rhs)
    }
}

impl<Q: QuantityKind, R: QuantityKind> std::ops::Div<&Unit<R>> for &Unit<Q> {
    type Output = Unit<Untyped>;
    fn div(self, rhs: &Unit<R>) -> Self::Output {
        self.divide(rhs)
    }
}
