use std::fmt;

use rust_decimal::Decimal;

use crate::kind::QuantityKind;
use crate::unit::Unit;
use crate::UnitError;

/// Power-of-ten SI prefixes representable as a [`Decimal`] factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricPrefix {
    Yotta,
    Zetta,
    Exa,
    Peta,
    Tera,
    Giga,
    Mega,
    Kilo,
    Hecto,
    Deka,
    Deci,
    Centi,
    Milli,
    Micro,
    Nano,
    Pico,
    Femto,
    Atto,
    Zepto,
    Yocto,
}

static SI_PREFIXES: [(MetricPrefix, i32, &str, &str); 20] = [
    (MetricPrefix::Yotta, 24, "Y", "yotta"),
    (MetricPrefix::Zetta, 21, "Z", "zetta"),
    (MetricPrefix::Exa, 18, "E", "exa"),
    (MetricPrefix::Peta, 15, "P", "peta"),
    (MetricPrefix::Tera, 12, "T", "tera"),
    (MetricPrefix::Giga, 9, "G", "giga"),
    (MetricPrefix::Mega, 6, "M", "mega"),
    (MetricPrefix::Kilo, 3, "k", "kilo"),
    (MetricPrefix::Hecto, 2, "h", "hecto"),
    (MetricPrefix::Deka, 1, "da", "deka"),
    (MetricPrefix::Deci, -1, "d", "deci"),
    (MetricPrefix::Centi, -2, "c", "centi"),
    (MetricPrefix::Milli, -3, "m", "milli"),
    (MetricPrefix::Micro, -6, "µ", "micro"),
    (MetricPrefix::Nano, -9, "n", "nano"),
    (MetricPrefix::Pico, -12, "p", "pico"),
    (MetricPrefix::Femto, -15, "f", "femto"),
    (MetricPrefix::Atto, -18, "a", "atto"),
    (MetricPrefix::Zepto, -21, "z", "zepto"),
    (MetricPrefix::Yocto, -24, "y", "yocto"),
];

#[inline]
pub(crate) fn pow10(exp: i32) -> Decimal {
    if exp >= 0 {
        Decimal::from_i128_with_scale(10i128.pow(exp as u32), 0)
    } else {
        Decimal::new(1, (-exp) as u32)
    }
}

impl MetricPrefix {
    pub const ALL: [MetricPrefix; 20] = [
        MetricPrefix::Yotta,
        MetricPrefix::Zetta,
        MetricPrefix::Exa,
        MetricPrefix::Peta,
        MetricPrefix::Tera,
        MetricPrefix::Giga,
        MetricPrefix::Mega,
        MetricPrefix::Kilo,
        MetricPrefix::Hecto,
        MetricPrefix::Deka,
        MetricPrefix::Deci,
        MetricPrefix::Centi,
        MetricPrefix::Milli,
        MetricPrefix::Micro,
        MetricPrefix::Nano,
        MetricPrefix::Pico,
        MetricPrefix::Femto,
        MetricPrefix::Atto,
        MetricPrefix::Zepto,
        MetricPrefix::Yocto,
    ];

    fn entry(&self) -> &'static (MetricPrefix, i32, &'static str, &'static str) {
        &SI_PREFIXES[*self as usize]
    }

    pub fn exponent(&self) -> i32 {
        self.entry().1
    }

    pub fn symbol(&self) -> &'static str {
        self.entry().2
    }

    pub fn name(&self) -> &'static str {
        self.entry().3
    }

    /// `10^exponent`
    pub fn factor(&self) -> Decimal {
        pow10(self.exponent())
    }

    pub fn from_exponent(exponent: i32) -> Option<MetricPrefix> {
        SI_PREFIXES
            .iter()
            .find(|&&(_, exp, _, _)| exp == exponent)
            .map(|&(prefix, _, _, _)| prefix)
    }

    /// Shorthand for [`Unit::prefixed`].
    pub fn of<Q: QuantityKind>(self, unit: &Unit<Q>) -> Unit<Q> {
        unit.prefixed(self)
    }
}

impl fmt::Display for MetricPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `unit` scaled by `10^exponent`. Only exponents with an SI prefix are accepted.
pub fn prefixed_unit<Q: QuantityKind>(unit: &Unit<Q>, exponent: i32) -> Result<Unit<Q>, UnitError> {
    let prefix = MetricPrefix::from_exponent(exponent).ok_or_else(|| UnitError::InvalidConverter {
        reason: format!("no SI prefix for 10^{}", exponent),
    })?;
    Ok(unit.prefixed(prefix))
}

macro_rules! prefix_shortcuts {
    ($($name:ident => $prefix:ident),* $(,)?) => {
        $(
            #[doc = concat!("The unit scaled by the ", stringify!($name), " prefix.")]
            pub fn $name<Q: QuantityKind>(unit: &Unit<Q>) -> Unit<Q> {
                unit.prefixed(MetricPrefix::$prefix)
            }
        )*
    };
}

prefix_shortcuts! {
    yotta => Yotta,
    zetta => Zetta,
    exa => Exa,
    peta => Peta,
    tera => Tera,
    giga => Giga,
    mega => Mega,
    kilo => Kilo,
    hecto => Hecto,
    deka => Deka,
    deci => Deci,
    centi => Centi,
    milli => Milli,
    micro => Micro,
    nano => Nano,
    pico => Pico,
    femto => Femto,
    atto => Atto,
    zepto => Zepto,
    yocto => Yocto,
}
