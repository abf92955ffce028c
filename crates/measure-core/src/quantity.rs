use std::cmp::Ordering;
use std::fmt;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::dimension::Dimension;
use crate::kind::{QuantityKind, Untyped};
use crate::unit::Unit;
use crate::UnitError;

/// A decimal amount of some [`Unit`]. Every operation returns a new quantity.
pub struct Quantity<Q = Untyped> {
    value: Decimal,
    unit: Unit<Q>,
}

impl<Q> Clone for Quantity<Q> {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            unit: self.unit.clone(),
        }
    }
}

/// Same value in a structurally equal unit. `5 kg` is not `5000 g`; use
/// [`Quantity::is_equivalent_to`] to compare amounts.
impl<Q, R> PartialEq<Quantity<R>> for Quantity<Q> {
    fn eq(&self, other: &Quantity<R>) -> bool {
        self.value == other.value && self.unit == other.unit
    }
}

fn describe<Q: QuantityKind>(unit: &Unit<Q>) -> String {
    format!("{} ({})", unit, unit.dimension())
}

impl<Q: QuantityKind> Quantity<Q> {
    pub fn of(value: Decimal, unit: &Unit<Q>) -> Self {
        Self {
            value,
            unit: unit.clone(),
        }
    }

    pub fn from_f64(value: f64, unit: &Unit<Q>) -> Result<Self, UnitError> {
        let value = Decimal::from_f64(value).ok_or_else(|| UnitError::InvalidNumber {
            number: value.to_string(),
        })?;
        Ok(Self::of(value, unit))
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn value_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(f64::NAN)
    }

    pub fn unit(&self) -> &Unit<Q> {
        &self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    pub fn as_type<R: QuantityKind>(&self) -> Quantity<R> {
        Quantity {
            value: self.value,
            unit: self.unit.as_type(),
        }
    }

    pub fn try_as_type<R: QuantityKind>(&self) -> Result<Quantity<R>, UnitError> {
        Ok(Quantity {
            value: self.value,
            unit: self.unit.try_as_type()?,
        })
    }

    pub fn untyped(&self) -> Quantity<Untyped> {
        self.as_type()
    }

    /// The same amount expressed in `unit`.
    pub fn to(&self, unit: &Unit<Q>) -> Result<Quantity<Q>, UnitError> {
        let converter = self.unit.converter_to(unit)?;
        Ok(Quantity::of(converter.convert(self.value)?, unit))
    }

    /// Like [`Quantity::to`] for a unit of any kind; dimensions are checked at runtime.
    pub fn to_any<R: QuantityKind>(&self, unit: &Unit<R>) -> Result<Quantity<R>, UnitError> {
        let converter = self.unit.converter_to_any(unit)?;
        Ok(Quantity::of(converter.convert(self.value)?, unit))
    }

    /// `other` converted into this quantity's unit.
    fn aligned<R: QuantityKind>(&self, other: &Quantity<R>) -> Result<Decimal, UnitError> {
        if !self.unit.is_compatible(&other.unit) {
            return Err(UnitError::IncompatibleDimension {
                lhs: describe(&self.unit),
                rhs: describe(&other.unit),
            });
        }
        other
            .unit
            .converter_to_any(&self.unit)?
            .convert(other.value)
    }

    /// Sum in this quantity's unit.
    pub fn add<R: QuantityKind>(&self, other: &Quantity<R>) -> Result<Quantity<Q>, UnitError> {
        let value = self
            .value
            .checked_add(self.aligned(other)?)
            .ok_or(UnitError::Overflow {
                operation: "adding quantities",
            })?;
        Ok(Quantity::of(value, &self.unit))
    }

    /// Difference in this quantity's unit.
    pub fn subtract<R: QuantityKind>(
        &self,
        other: &Quantity<R>,
    ) -> Result<Quantity<Q>, UnitError> {
        let value = self
            .value
            .checked_sub(self.aligned(other)?)
            .ok_or(UnitError::Overflow {
                operation: "subtracting quantities",
            })?;
        Ok(Quantity::of(value, &self.unit))
    }

    pub fn multiply<R: QuantityKind>(
        &self,
        other: &Quantity<R>,
    ) -> Result<Quantity<Untyped>, UnitError> {
        let value = self
            .value
            .checked_mul(other.value)
            .ok_or(UnitError::Overflow {
                operation: "multiplying quantities",
            })?;
        Ok(Quantity::of(value, &self.unit.multiply(&other.unit)))
    }

    pub fn divide<R: QuantityKind>(
        &self,
        other: &Quantity<R>,
    ) -> Result<Quantity<Untyped>, UnitError> {
        if other.value.is_zero() {
            return Err(UnitError::DivisionByZero);
        }
        let value = self
            .value
            .checked_div(other.value)
            .ok_or(UnitError::Overflow {
                operation: "dividing quantities",
            })?;
        Ok(Quantity::of(value, &self.unit.divide(&other.unit)))
    }

    /// Multiply the value by a plain number, keeping the unit.
    pub fn scale(&self, factor: Decimal) -> Result<Quantity<Q>, UnitError> {
        let value = self.value.checked_mul(factor).ok_or(UnitError::Overflow {
            operation: "scaling a quantity",
        })?;
        Ok(Quantity::of(value, &self.unit))
    }

    pub fn negate(&self) -> Quantity<Q> {
        Quantity::of(-self.value, &self.unit)
    }

    pub fn abs(&self) -> Quantity<Q> {
        Quantity::of(self.value.abs(), &self.unit)
    }

    /// Orders two amounts of the same dimension. Values are compared as they
    /// are when the units share a converter and in the system unit otherwise,
    /// so `a.compare_to(b)` is always the reverse of `b.compare_to(a)`.
    pub fn compare_to<R: QuantityKind>(&self, other: &Quantity<R>) -> Result<Ordering, UnitError> {
        let to_self = other.unit.converter_to_any(&self.unit)?;
        if to_self.is_identity() {
            return Ok(self.value.cmp(&other.value));
        }
        let lhs = self.unit.converter().convert(self.value)?;
        let rhs = other.unit.converter().convert(other.value)?;
        Ok(lhs.cmp(&rhs))
    }

    pub fn is_greater_than<R: QuantityKind>(&self, other: &Quantity<R>) -> Result<bool, UnitError> {
        Ok(self.compare_to(other)?.is_gt())
    }

    pub fn is_greater_than_or_equal_to<R: QuantityKind>(
        &self,
        other: &Quantity<R>,
    ) -> Result<bool, UnitError> {
        Ok(self.compare_to(other)?.is_ge())
    }

    pub fn is_less_than<R: QuantityKind>(&self, other: &Quantity<R>) -> Result<bool, UnitError> {
        Ok(self.compare_to(other)?.is_lt())
    }

    pub fn is_less_than_or_equal_to<R: QuantityKind>(
        &self,
        other: &Quantity<R>,
    ) -> Result<bool, UnitError> {
        Ok(self.compare_to(other)?.is_le())
    }

    /// Same amount, whatever the units: `5 kg` is equivalent to `5000 g`.
    pub fn is_equivalent_to<R: QuantityKind>(
        &self,
        other: &Quantity<R>,
    ) -> Result<bool, UnitError> {
        Ok(self.compare_to(other)?.is_eq())
    }
}

fn fmt_significant(x: Decimal) -> String {
    let formatted = format!("{}", x);

    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

impl<Q: QuantityKind> fmt::Display for Quantity<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", fmt_significant(self.value), self.unit)
    }
}

impl<Q: QuantityKind> fmt::Debug for Quantity<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quantity")
            .field("value", &self.value)
            .field("unit", &self.unit)
            .finish()
    }
}

impl<Q: QuantityKind, R: QuantityKind> std::ops::Add<&Quantity<R>> for &Quantity<Q> {
    type Output = Result<Quantity<Q>, UnitError>;
    fn add(self, rhs: &Quantity<R>) -> Self::Output {
        Quantity::add(self, rhs)
    }
}

impl<Q: QuantityKind, R: QuantityKind> std::ops::Sub<&Quantity<R>> for &Quantity<Q> {
    type Output = Result<Quantity<Q>, UnitError>;
    fn sub(self, rhs: &Quantity<R>) -> Self::Output {
        self.subtract(rhs)
    }
}

impl<Q: QuantityKind, R: QuantityKind> std::ops::Mul<&Quantity<R>> for &Quantity<Q> {
    type Output = Result<Quantity<Untyped>, UnitError>;
    fn mul(self, rhs: &Quantity<R>) -> Self::Output {
        self.multiply(rhs)
    }
}

impl<Q: QuantityKind, R: QuantityKind> std::ops::Div<&Quantity<R>> for &Quantity<Q> {
    type Output = Result<Quantity<Untyped>, UnitError>;
    fn div(self, rhs: &Quantity<R>) -> Self::Output {
        self.divide(rhs)
    }
}

impl<Q: QuantityKind> std::ops::Neg for &Quantity<Q> {
    type Output = Quantity<Q>;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}
