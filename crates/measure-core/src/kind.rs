//! Quantity-kind markers.
//!
//! A kind is a zero-sized type used as the `Q` parameter of
//! [`Unit<Q>`](crate::Unit) and [`Quantity<Q>`](crate::Quantity). It only
//! exists at compile time: `as_type` swaps the marker and leaves the
//! dimension and converter untouched.

use crate::dimension::Dimension;

pub trait QuantityKind: 'static {
    /// Human readable name of the kind, e.g. `"Speed"`.
    const NAME: &'static str;
    /// The dimension units of this kind are expected to carry. `None` accepts any.
    const DIMENSION: Option<Dimension>;
}

macro_rules! define_quantity_kind {
    ($(#[$meta:meta])* $kind:ident, $dimension:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $kind {}

        impl QuantityKind for $kind {
            const NAME: &'static str = stringify!($kind);
            const DIMENSION: Option<Dimension> = $dimension;
        }
    };
}

define_quantity_kind!(
    /// No asserted kind. Products, quotients and powers of units are untyped.
    Untyped,
    None
);
define_quantity_kind!(Dimensionless, Some(Dimension::NONE));
define_quantity_kind!(Length, Some(Dimension::LENGTH));
define_quantity_kind!(Mass, Some(Dimension::MASS));
define_quantity_kind!(Time, Some(Dimension::TIME));
define_quantity_kind!(ElectricCurrent, Some(Dimension::ELECTRIC_CURRENT));
define_quantity_kind!(Temperature, Some(Dimension::TEMPERATURE));
define_quantity_kind!(AmountOfSubstance, Some(Dimension::AMOUNT_OF_SUBSTANCE));
define_quantity_kind!(LuminousIntensity, Some(Dimension::LUMINOUS_INTENSITY));
define_quantity_kind!(Angle, Some(Dimension::PLANE_ANGLE));
define_quantity_kind!(Area, Some(Dimension::LENGTH.pow(2)));
define_quantity_kind!(Volume, Some(Dimension::LENGTH.pow(3)));
define_quantity_kind!(Speed, Some(Dimension::LENGTH.divide(Dimension::TIME)));
define_quantity_kind!(
    Acceleration,
    Some(Dimension::LENGTH.divide(Dimension::TIME.pow(2)))
);
define_quantity_kind!(Frequency, Some(Dimension::NONE.divide(Dimension::TIME)));
define_quantity_kind!(
    /// Amount of substance per volume, e.g. `mol/l`.
    Molarity,
    Some(Dimension::AMOUNT_OF_SUBSTANCE.divide(Dimension::LENGTH.pow(3)))
);
