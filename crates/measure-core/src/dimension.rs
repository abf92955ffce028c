use std::fmt;

/// The base physical dimensions every [`Dimension`] is expressed over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    ElectricCurrent,
    Temperature,
    AmountOfSubstance,
    LuminousIntensity,
    PlaneAngle,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; 8] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::ElectricCurrent,
        BaseDimension::Temperature,
        BaseDimension::AmountOfSubstance,
        BaseDimension::LuminousIntensity,
        BaseDimension::PlaneAngle,
    ];

    pub const fn symbol(&self) -> &'static str {
        match self {
            BaseDimension::Length => "[L]",
            BaseDimension::Mass => "[M]",
            BaseDimension::Time => "[T]",
            BaseDimension::ElectricCurrent => "[I]",
            BaseDimension::Temperature => "[Θ]",
            BaseDimension::AmountOfSubstance => "[N]",
            BaseDimension::LuminousIntensity => "[J]",
            BaseDimension::PlaneAngle => "[α]",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BaseDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Integer exponents over the base dimensions. Exponents not mentioned are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimension {
    exponents: [i32; 8],
}

impl Dimension {
    pub const NONE: Self = Self::new([0; 8]);
    pub const LENGTH: Self = Self::of(BaseDimension::Length);
    pub const MASS: Self = Self::of(BaseDimension::Mass);
    pub const TIME: Self = Self::of(BaseDimension::Time);
    pub const ELECTRIC_CURRENT: Self = Self::of(BaseDimension::ElectricCurrent);
    pub const TEMPERATURE: Self = Self::of(BaseDimension::Temperature);
    pub const AMOUNT_OF_SUBSTANCE: Self = Self::of(BaseDimension::AmountOfSubstance);
    pub const LUMINOUS_INTENSITY: Self = Self::of(BaseDimension::LuminousIntensity);
    pub const PLANE_ANGLE: Self = Self::of(BaseDimension::PlaneAngle);

    const fn new(exponents: [i32; 8]) -> Self {
        Self { exponents }
    }

    /// The dimension of a single base dimension raised to the first power.
    pub const fn of(base: BaseDimension) -> Self {
        let mut exponents = [0; 8];
        exponents[base.index()] = 1;
        Self::new(exponents)
    }

    pub const fn exponent(&self, base: BaseDimension) -> i32 {
        self.exponents[base.index()]
    }

    pub const fn is_dimensionless(&self) -> bool {
        let mut i = 0;
        while i < self.exponents.len() {
            if self.exponents[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Elementwise exponent sum.
    pub const fn multiply(self, other: Self) -> Self {
        let mut exponents = self.exponents;
        let mut i = 0;
        while i < exponents.len() {
            exponents[i] += other.exponents[i];
            i += 1;
        }
        Self::new(exponents)
    }

    /// Elementwise exponent difference.
    pub const fn divide(self, other: Self) -> Self {
        let mut exponents = self.exponents;
        let mut i = 0;
        while i < exponents.len() {
            exponents[i] -= other.exponents[i];
            i += 1;
        }
        Self::new(exponents)
    }

    /// Every exponent multiplied by `n`.
    pub const fn pow(self, n: i32) -> Self {
        let mut exponents = self.exponents;
        let mut i = 0;
        while i < exponents.len() {
            exponents[i] *= n;
            i += 1;
        }
        Self::new(exponents)
    }

    /// Non-zero exponents in base-dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (BaseDimension, i32)> + '_ {
        BaseDimension::ALL
            .iter()
            .map(|&base| (base, self.exponent(base)))
            .filter(|&(_, exp)| exp != 0)
    }
}

impl std::ops::Mul for Dimension {
    type Output = Dimension;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl std::ops::Div for Dimension {
    type Output = Dimension;
    fn div(self, rhs: Self) -> Self::Output {
        self.divide(rhs)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn term(base: BaseDimension, exp: i32) -> String {
            if exp == 1 {
                base.symbol().to_string()
            } else {
                format!("{}^{}", base.symbol(), exp)
            }
        }

        let num: Vec<String> = self
            .iter()
            .filter(|&(_, exp)| exp > 0)
            .map(|(base, exp)| term(base, exp))
            .collect();
        let den: Vec<String> = self
            .iter()
            .filter(|&(_, exp)| exp < 0)
            .map(|(base, exp)| term(base, -exp))
            .collect();

        let den_str = if den.len() > 1 {
            format!("({})", den.join("·"))
        } else {
            den.join("·")
        };

        match (num.is_empty(), den.is_empty()) {
            (true, true) => write!(f, "1"),
            (false, true) => write!(f, "{}", num.join("·")),
            (true, false) => write!(f, "1/{}", den_str),
            (false, false) => write!(f, "{}/{}", num.join("·"), den_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_then_divide_recovers_operand() {
        let speed = Dimension::LENGTH / Dimension::TIME;
        let force = Dimension::MASS * Dimension::LENGTH / Dimension::TIME.pow(2);
        for (lhs, rhs) in [
            (speed, force),
            (force, Dimension::NONE),
            (Dimension::NONE, Dimension::AMOUNT_OF_SUBSTANCE),
            (Dimension::PLANE_ANGLE.pow(-3), speed.pow(4)),
        ] {
            assert_eq!(lhs.multiply(rhs).divide(rhs), lhs);
        }
    }

    #[test]
    fn test_exponents() {
        let area = Dimension::LENGTH.pow(2);
        assert_eq!(area.exponent(BaseDimension::Length), 2);
        assert_eq!(area.exponent(BaseDimension::Time), 0);
        assert_eq!(area / area, Dimension::NONE);
        assert!(Dimension::NONE.is_dimensionless());
        assert!(!area.is_dimensionless());
        assert_eq!(Dimension::LENGTH.pow(0), Dimension::NONE);
    }

    #[test]
    fn test_display() {
        for (dimension, expected) in [
            (Dimension::LENGTH / Dimension::TIME, "[L]/[T]"),
            (Dimension::NONE, "1"),
            (Dimension::LENGTH.pow(3), "[L]^3"),
            (Dimension::NONE / Dimension::TIME, "1/[T]"),
            (
                Dimension::MASS * Dimension::LENGTH / Dimension::TIME.pow(2),
                "[L]·[M]/[T]^2",
            ),
            (
                Dimension::AMOUNT_OF_SUBSTANCE / (Dimension::LENGTH.pow(3) * Dimension::TIME),
                "[N]/([L]^3·[T])",
            ),
        ] {
            assert_eq!(dimension.to_string(), expected);
        }
    }
}
