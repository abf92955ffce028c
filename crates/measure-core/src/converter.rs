//! Composable numeric transforms between units.
//!
//! A [`UnitConverter`] is kept as the chain of steps it was built from rather
//! than collapsed into a single number. Two chains with the same net effect
//! can therefore still differ structurally (`g*1000` is not `kg`), while the
//! [`Affine`] normal form answers whether they are numerically the same.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::UnitError;

/// An exact ratio `numerator / denominator`. Both parts are non-zero.
#[derive(Clone, Copy, Debug)]
pub struct Factor {
    numerator: Decimal,
    denominator: Decimal,
}

impl Factor {
    pub const ONE: Factor = Factor {
        numerator: Decimal::ONE,
        denominator: Decimal::ONE,
    };

    pub fn new(numerator: Decimal, denominator: Decimal) -> Result<Self, UnitError> {
        if denominator.is_zero() {
            return Err(UnitError::InvalidConverter {
                reason: format!("scale {}/0 divides by zero", numerator.normalize()),
            });
        }
        if numerator.is_zero() {
            return Err(UnitError::InvalidConverter {
                reason: "scale factor of zero is not invertible".to_string(),
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// `10^exponent`, never zero.
    pub(crate) fn power_of_ten(exponent: i32) -> Self {
        Self {
            numerator: crate::prefix::pow10(exponent),
            denominator: Decimal::ONE,
        }
    }

    /// A whole-number factor. `n` must be non-zero.
    pub(crate) fn whole(n: u32) -> Self {
        debug_assert!(n != 0);
        Self {
            numerator: Decimal::from(n),
            denominator: Decimal::ONE,
        }
    }

    pub fn numerator(&self) -> Decimal {
        self.numerator
    }

    pub fn denominator(&self) -> Decimal {
        self.denominator
    }

    pub fn is_one(&self) -> bool {
        self.numerator == self.denominator
    }

    pub fn inverse(&self) -> Self {
        Self {
            numerator: self.denominator,
            denominator: self.numerator,
        }
    }

    /// Product of two factors, reduced to a plain decimal when it terminates.
    /// Each numerator is cancelled against the other denominator first.
    pub fn checked_mul(&self, other: &Factor) -> Option<Factor> {
        let (lhs_numerator, rhs_denominator) = simplify(self.numerator, other.denominator);
        let (rhs_numerator, lhs_denominator) = simplify(other.numerator, self.denominator);
        let (numerator, denominator) = simplify(
            lhs_numerator.checked_mul(rhs_numerator)?,
            lhs_denominator.checked_mul(rhs_denominator)?,
        );
        Some(Factor {
            numerator,
            denominator,
        })
    }

    /// `value * numerator / denominator`, dividing last.
    pub fn apply(&self, value: Decimal) -> Option<Decimal> {
        value
            .checked_mul(self.numerator)?
            .checked_div(self.denominator)
    }

    /// True when the magnitude is at least one.
    fn is_growing(&self) -> bool {
        self.numerator.abs() >= self.denominator.abs()
    }

    /// Product of commuting factors, taken so that the running product stays
    /// near one: ten `×1000` and ten `÷1000` steps alternate instead of
    /// passing through `10^30`.
    fn balanced_product(factors: &[Factor]) -> Option<Factor> {
        let (mut growing, mut shrinking): (Vec<Factor>, Vec<Factor>) =
            factors.iter().copied().partition(Factor::is_growing);
        let mut product = Factor::ONE;
        loop {
            let next = if product.is_growing() {
                shrinking.pop().or_else(|| growing.pop())
            } else {
                growing.pop().or_else(|| shrinking.pop())
            };
            match next {
                Some(factor) => product = product.checked_mul(&factor)?,
                None => return Some(product),
            }
        }
    }

    pub fn to_f64(&self) -> f64 {
        let num = self.numerator.to_f64().unwrap_or(f64::NAN);
        let den = self.denominator.to_f64().unwrap_or(f64::NAN);
        num / den
    }
}

impl PartialEq for Factor {
    fn eq(&self, other: &Self) -> bool {
        match (
            self.numerator.checked_mul(other.denominator),
            other.numerator.checked_mul(self.denominator),
        ) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => {
                self.numerator.checked_div(self.denominator)
                    == other.numerator.checked_div(other.denominator)
            }
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = self.numerator.normalize();
        let den = self.denominator.normalize();
        if den == Decimal::ONE {
            write!(f, "{}", num)
        } else {
            write!(f, "{}/{}", num, den)
        }
    }
}

/// A single step of a converter chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConverterStep {
    Scale(Factor),
    Offset(Decimal),
}

impl ConverterStep {
    fn is_identity(&self) -> bool {
        match self {
            ConverterStep::Scale(factor) => factor.is_one(),
            ConverterStep::Offset(offset) => offset.is_zero(),
        }
    }

    fn inverse(&self) -> Self {
        match self {
            ConverterStep::Scale(factor) => ConverterStep::Scale(factor.inverse()),
            ConverterStep::Offset(offset) => ConverterStep::Offset(-*offset),
        }
    }
}

/// `x -> factor * x + offset`, the reduced form of a converter chain.
///
/// The offset is kept as a ratio so that reducing a chain never divides;
/// the single division happens in [`Affine::apply`].
#[derive(Clone, Copy, Debug)]
pub struct Affine {
    factor: Factor,
    offset_numerator: Decimal,
    offset_denominator: Decimal,
}

impl Affine {
    const IDENTITY: Affine = Affine {
        factor: Factor::ONE,
        offset_numerator: Decimal::ZERO,
        offset_denominator: Decimal::ONE,
    };

    pub fn factor(&self) -> Factor {
        self.factor
    }

    pub fn offset(&self) -> Option<Decimal> {
        self.offset_numerator.checked_div(self.offset_denominator)
    }

    pub fn is_identity(&self) -> bool {
        self.factor.is_one() && self.offset_numerator.is_zero()
    }

    fn then(self, step: &ConverterStep) -> Option<Affine> {
        match step {
            ConverterStep::Scale(scale) => {
                let (offset_numerator, offset_denominator) = simplify(
                    self.offset_numerator.checked_mul(scale.numerator)?,
                    self.offset_denominator.checked_mul(scale.denominator)?,
                );
                Some(Affine {
                    factor: self.factor.checked_mul(scale)?,
                    offset_numerator,
                    offset_denominator,
                })
            }
            ConverterStep::Offset(shift) => {
                let (offset_numerator, offset_denominator) = simplify(
                    self.offset_numerator
                        .checked_add(shift.checked_mul(self.offset_denominator)?)?,
                    self.offset_denominator,
                );
                Some(Affine {
                    offset_numerator,
                    offset_denominator,
                    ..self
                })
            }
        }
    }

    /// `(value * fn * od + on * fd) / (fd * od)`
    pub fn apply(&self, value: Decimal) -> Result<Decimal, UnitError> {
        let overflow = UnitError::Overflow {
            operation: "converting a value",
        };
        if self.offset_numerator.is_zero() {
            return self.factor.apply(value).ok_or(overflow);
        }
        let compute = || {
            let scaled = value
                .checked_mul(self.factor.numerator)?
                .checked_mul(self.offset_denominator)?;
            let shifted = self
                .offset_numerator
                .checked_mul(self.factor.denominator)?;
            scaled
                .checked_add(shifted)?
                .checked_div(self.factor.denominator.checked_mul(self.offset_denominator)?)
        };
        compute().ok_or(overflow)
    }
}

impl PartialEq for Affine {
    fn eq(&self, other: &Self) -> bool {
        let offsets_equal = match (
            self.offset_numerator.checked_mul(other.offset_denominator),
            other.offset_numerator.checked_mul(self.offset_denominator),
        ) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => self.offset() == other.offset(),
        };
        self.factor == other.factor && offsets_equal
    }
}

/// Replaces `numerator / denominator` by its exact decimal quotient over one
/// when the quotient terminates, keeping the operands of later products small.
fn simplify(numerator: Decimal, denominator: Decimal) -> (Decimal, Decimal) {
    if denominator == Decimal::ONE {
        return (numerator, denominator);
    }
    match numerator.checked_div(denominator) {
        Some(quotient) if quotient.checked_mul(denominator) == Some(numerator) => {
            (quotient.normalize(), Decimal::ONE)
        }
        _ => (numerator, denominator),
    }
}

/// An invertible transform built from scale and offset steps, applied in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnitConverter {
    steps: Vec<ConverterStep>,
}

impl UnitConverter {
    pub fn identity() -> Self {
        Self::default()
    }

    /// Multiply by `factor`. Zero is rejected because it cannot be inverted.
    pub fn scale(factor: Decimal) -> Result<Self, UnitError> {
        Ok(Self::from_factor(Factor::new(factor, Decimal::ONE)?))
    }

    /// Multiply by `numerator / denominator`.
    pub fn ratio(numerator: Decimal, denominator: Decimal) -> Result<Self, UnitError> {
        Ok(Self::from_factor(Factor::new(numerator, denominator)?))
    }

    pub fn from_factor(factor: Factor) -> Self {
        Self::from_step(ConverterStep::Scale(factor))
    }

    pub fn offset(amount: Decimal) -> Self {
        Self::from_step(ConverterStep::Offset(amount))
    }

    fn from_step(step: ConverterStep) -> Self {
        let mut steps = Vec::with_capacity(1);
        if !step.is_identity() {
            steps.push(step);
        }
        Self { steps }
    }

    pub fn steps(&self) -> &[ConverterStep] {
        &self.steps
    }

    /// True when the chain has no steps at all. A chain that merely cancels
    /// out (`×1000` then `÷1000`) is not structurally the identity; use
    /// [`UnitConverter::is_equivalent_to_identity`] for that.
    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_linear(&self) -> bool {
        self.steps
            .iter()
            .all(|step| matches!(step, ConverterStep::Scale(_)))
    }

    /// Apply `self`, then `next`.
    pub fn then(&self, next: &UnitConverter) -> UnitConverter {
        let mut steps = Vec::with_capacity(self.steps.len() + next.steps.len());
        steps.extend(self.steps.iter().copied());
        steps.extend(next.steps.iter().copied());
        Self { steps }
    }

    /// Apply `first`, then `second`.
    pub fn compose(first: &UnitConverter, second: &UnitConverter) -> UnitConverter {
        first.then(second)
    }

    pub fn inverse(&self) -> UnitConverter {
        Self {
            steps: self.steps.iter().rev().map(ConverterStep::inverse).collect(),
        }
    }

    /// The chain with its offset steps removed.
    pub fn linear(&self) -> UnitConverter {
        Self {
            steps: self
                .steps
                .iter()
                .filter(|step| matches!(step, ConverterStep::Scale(_)))
                .copied()
                .collect(),
        }
    }

    /// `self` applied `n` times; for negative `n` the inverse is repeated.
    pub fn pow(&self, n: i32) -> UnitConverter {
        let base = if n < 0 { self.inverse() } else { self.clone() };
        let mut steps = Vec::with_capacity(base.steps.len() * n.unsigned_abs() as usize);
        for _ in 0..n.unsigned_abs() {
            steps.extend(base.steps.iter().copied());
        }
        Self { steps }
    }

    /// The affine normal form. Runs of consecutive scale steps commute and are
    /// multiplied out together before the next offset.
    pub fn reduce(&self) -> Result<Affine, UnitError> {
        self.steps
            .chunk_by(|a, b| {
                matches!(
                    (a, b),
                    (ConverterStep::Scale(_), ConverterStep::Scale(_))
                )
            })
            .try_fold(Affine::IDENTITY, |affine, run| match run {
                [step @ ConverterStep::Offset(_)] => affine.then(step),
                _ => {
                    let factors: Vec<Factor> = run
                        .iter()
                        .filter_map(|step| match step {
                            ConverterStep::Scale(factor) => Some(*factor),
                            ConverterStep::Offset(_) => None,
                        })
                        .collect();
                    affine.then(&ConverterStep::Scale(Factor::balanced_product(&factors)?))
                }
            })
            .ok_or(UnitError::Overflow {
                operation: "reducing a converter",
            })
    }

    pub fn convert(&self, value: Decimal) -> Result<Decimal, UnitError> {
        self.reduce()?.apply(value)
    }

    pub fn convert_f64(&self, value: f64) -> f64 {
        self.steps.iter().fold(value, |acc, step| match step {
            ConverterStep::Scale(factor) => acc * factor.to_f64(),
            ConverterStep::Offset(offset) => acc + offset.to_f64().unwrap_or(f64::NAN),
        })
    }

    /// True when the chain maps every value onto itself.
    pub fn is_equivalent_to_identity(&self) -> bool {
        self.reduce().is_ok_and(|affine| affine.is_identity())
    }
}

impl fmt::Display for UnitConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "x");
        }
        let mut expr = "x".to_string();
        for step in &self.steps {
            expr = match step {
                ConverterStep::Scale(factor) => format!("{}*{}", expr, factor),
                ConverterStep::Offset(offset) if offset.is_sign_negative() => {
                    format!("({}-{})", expr, offset.abs().normalize())
                }
                ConverterStep::Offset(offset) => format!("({}+{})", expr, offset.normalize()),
            };
        }
        write!(f, "{}", expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn scale(factor: Decimal) -> UnitConverter {
        UnitConverter::scale(factor).unwrap()
    }

    #[test]
    fn test_scale_one_is_identity() {
        assert!(scale(dec!(1)).is_identity());
        assert!(UnitConverter::ratio(dec!(1000), dec!(1000)).unwrap().is_identity());
        assert!(UnitConverter::offset(dec!(0)).is_identity());
        assert_eq!(scale(dec!(1000)).then(&scale(dec!(1))), scale(dec!(1000)));
    }

    #[test]
    fn test_zero_factor_is_rejected() {
        assert!(matches!(
            UnitConverter::scale(dec!(0)),
            Err(UnitError::InvalidConverter { .. })
        ));
        assert!(matches!(
            UnitConverter::ratio(dec!(1), dec!(0)),
            Err(UnitError::InvalidConverter { .. })
        ));
    }

    #[test]
    fn test_inverse_cancels() {
        let kilo = scale(dec!(1000));
        let there_and_back = kilo.then(&kilo.inverse());
        assert!(!there_and_back.is_identity());
        assert!(there_and_back.is_equivalent_to_identity());
        assert_eq!(there_and_back.convert(dec!(42.5)).unwrap(), dec!(42.5));

        let third = UnitConverter::ratio(dec!(1), dec!(3)).unwrap();
        assert_eq!(third.then(&third.inverse()).convert(dec!(7)).unwrap(), dec!(7));
    }

    #[test]
    fn test_affine_round_trip() {
        // degrees Fahrenheit to kelvin
        let fahrenheit = UnitConverter::offset(dec!(-32))
            .then(&UnitConverter::ratio(dec!(5), dec!(9)).unwrap())
            .then(&UnitConverter::offset(dec!(273.15)));
        assert_eq!(fahrenheit.convert(dec!(212)).unwrap(), dec!(373.15));
        assert_eq!(fahrenheit.inverse().convert(dec!(373.15)).unwrap(), dec!(212));
        assert!(fahrenheit.then(&fahrenheit.inverse()).is_equivalent_to_identity());
        assert!(!fahrenheit.is_linear());
        assert!(fahrenheit.linear().is_linear());
    }

    #[test]
    fn test_composition_is_associative() {
        let a = scale(dec!(1000));
        let b = UnitConverter::offset(dec!(3));
        let c = UnitConverter::ratio(dec!(1), dec!(8)).unwrap();
        let left = a.then(&b).then(&c);
        let right = a.then(&b.then(&c));
        assert_eq!(left, right);
        assert_eq!(left.convert(dec!(2)).unwrap(), dec!(250.375));
    }

    #[test]
    fn test_factor_equality_is_by_value() {
        assert_eq!(
            Factor::new(dec!(0.001), dec!(1)).unwrap(),
            Factor::new(dec!(1), dec!(1000)).unwrap()
        );
        assert_ne!(
            Factor::new(dec!(2), dec!(1)).unwrap(),
            Factor::new(dec!(1), dec!(2)).unwrap()
        );
    }

    #[test]
    fn test_long_chains_cancel_without_overflow() {
        let kilo = scale(dec!(1000));
        let there_and_back = kilo.pow(10).then(&kilo.pow(-10));
        assert!(there_and_back.is_equivalent_to_identity());
        assert_eq!(there_and_back.convert(dec!(7)).unwrap(), dec!(7));

        let yotta = scale(dec!(1000000000000000000000000));
        assert!(yotta.pow(2).then(&yotta.pow(2).inverse()).is_equivalent_to_identity());

        // 10^30 itself is outside the decimal range
        assert!(matches!(
            kilo.pow(10).reduce(),
            Err(UnitError::Overflow { .. })
        ));
    }

    #[test]
    fn test_factor_product_cancels_first() {
        let third = Factor::new(dec!(1), dec!(3)).unwrap();
        let product = third.checked_mul(&third.inverse()).unwrap();
        assert!(product.is_one());
        assert_eq!(product.numerator(), dec!(1));
        assert_eq!(
            Factor::whole(1000).apply(dec!(2.5)),
            Some(dec!(2500))
        );
    }

    #[test]
    fn test_pow() {
        let kilo = scale(dec!(1000));
        assert_eq!(kilo.pow(3).convert(dec!(1)).unwrap(), dec!(1000000000));
        assert_eq!(kilo.pow(-2).convert(dec!(1000000)).unwrap(), dec!(1));
        assert!(kilo.pow(0).is_identity());
    }

    #[test]
    fn test_convert_f64() {
        let milli = scale(dec!(0.001));
        assert!((milli.convert_f64(2500.0) - 2.5).abs() < 1e-12);
        assert!((milli.inverse().convert_f64(2.5) - 2500.0).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        let celsius = UnitConverter::offset(dec!(273.15));
        assert_eq!(celsius.to_string(), "(x+273.15)");
        assert_eq!(scale(dec!(0.001)).to_string(), "x*0.001");
        assert_eq!(UnitConverter::identity().to_string(), "x");
    }
}
