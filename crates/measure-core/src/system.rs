//! The unit registry.
//!
//! A [`UnitSystem`] records the units it knows per dimension, the system unit
//! of each dimension, and display labels for units that have no symbol of
//! their own. The process-wide system is built lazily on first use of
//! [`global`], or set explicitly once with [`UnitSystem::install`]; it is
//! read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use rust_decimal::Decimal;

use crate::config::SystemConfig;
use crate::converter::{Factor, UnitConverter};
use crate::dimension::{BaseDimension, Dimension};
use crate::kind::{
    AmountOfSubstance, Angle, Area, Dimensionless, ElectricCurrent, Length, LuminousIntensity,
    Mass, QuantityKind, Speed, Temperature, Time, Volume,
};
use crate::unit::Unit;
use crate::UnitError;

static GLOBAL: OnceLock<UnitSystem> = OnceLock::new();

/// The process-wide unit system, built from [`UnitSystem::si`] unless another
/// system was installed first.
pub fn global() -> &'static UnitSystem {
    GLOBAL.get_or_init(|| {
        let system = UnitSystem::si();
        log::debug!("Initialised default unit system with {} units", system.len());
        system
    })
}

#[derive(Debug, Clone)]
struct Registered {
    unit: Unit,
    label: Option<String>,
}

impl Registered {
    fn answers_to(&self, symbol: &str) -> bool {
        self.unit.symbol() == Some(symbol) || self.label.as_deref() == Some(symbol)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UnitSystem {
    units: Vec<Registered>,
    system_units: HashMap<Dimension, Unit>,
}

impl UnitSystem {
    /// An empty system with no units.
    pub fn new() -> Self {
        Self::default()
    }

    /// The SI base units plus the handful of derived units the crate names in [`si`].
    pub fn si() -> Self {
        let units = si_units();
        let mut system = Self::new();
        system.insert(units.one.untyped(), None);
        system.insert(units.metre.untyped(), None);
        system.insert(units.kilogram.untyped(), None);
        system.insert(units.gram.untyped(), Some("g".to_string()));
        system.insert(units.second.untyped(), None);
        system.insert(units.minute.untyped(), None);
        system.insert(units.hour.untyped(), None);
        system.insert(units.ampere.untyped(), None);
        system.insert(units.kelvin.untyped(), None);
        system.insert(units.celsius.untyped(), None);
        system.insert(units.mole.untyped(), None);
        system.insert(units.candela.untyped(), None);
        system.insert(units.radian.untyped(), None);
        system.insert(units.square_metre.untyped(), None);
        system.insert(units.cubic_metre.untyped(), None);
        system.insert(units.litre.untyped(), None);
        system.insert(units.metre_per_second.untyped(), None);
        system
    }

    /// Make this the process-wide system. Fails if [`global`] was already
    /// used or another system was installed.
    pub fn install(self) -> Result<&'static UnitSystem, UnitError> {
        let count = self.len();
        GLOBAL
            .set(self)
            .map_err(|_| UnitError::SystemAlreadyInstalled)?;
        log::debug!("Installed unit system with {} units", count);
        Ok(global())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().map(|registered| &registered.unit)
    }

    fn insert(&mut self, unit: Unit, label: Option<String>) {
        if unit.converter().is_identity() {
            self.system_units
                .entry(unit.dimension())
                .or_insert_with(|| unit.clone());
        }
        self.units.push(Registered { unit, label });
    }

    fn check_free(&self, symbol: &str) -> Result<(), UnitError> {
        if self.units.iter().any(|registered| registered.answers_to(symbol)) {
            return Err(UnitError::DuplicateUnit {
                symbol: symbol.to_string(),
            });
        }
        Ok(())
    }

    /// Register a unit under its own symbol.
    pub fn register<Q: QuantityKind>(&mut self, unit: &Unit<Q>) -> Result<(), UnitError> {
        if let Some(symbol) = unit.symbol() {
            self.check_free(symbol)?;
        }
        self.insert(unit.untyped(), None);
        Ok(())
    }

    /// Register a unit that displays as `label` although it has no symbol of its own.
    pub fn register_labelled<Q: QuantityKind>(
        &mut self,
        unit: &Unit<Q>,
        label: impl Into<String>,
    ) -> Result<(), UnitError> {
        let label = label.into();
        self.check_free(&label)?;
        if let Some(symbol) = unit.symbol() {
            self.check_free(symbol)?;
        }
        self.insert(unit.untyped(), Some(label));
        Ok(())
    }

    /// The display label registered for a unit structurally equal to `unit`.
    pub fn label_of<Q: QuantityKind>(&self, unit: &Unit<Q>) -> Option<&str> {
        self.units
            .iter()
            .filter(|registered| registered.unit.dimension() == unit.dimension())
            .find(|registered| registered.label.is_some() && registered.unit == *unit)
            .and_then(|registered| registered.label.as_deref())
    }

    /// Find a registered unit by exact symbol or label.
    pub fn lookup(&self, symbol: &str) -> Option<Unit> {
        self.units
            .iter()
            .find(|registered| registered.answers_to(symbol))
            .map(|registered| registered.unit.clone())
    }

    /// The reference unit of `dimension`: the registered unit with the identity
    /// converter, else the product of the base units raised to the dimension's
    /// exponents.
    pub fn system_unit(&self, dimension: Dimension) -> Unit {
        if let Some(unit) = self.system_units.get(&dimension) {
            return unit.clone();
        }
        let mut factors = dimension
            .iter()
            .map(|(base, exponent)| self.base_unit(base).pow(exponent));
        match factors.next() {
            Some(first) => factors.fold(first, |product, factor| product.multiply(&factor)),
            None => Unit::base(Dimension::NONE, "One", "1"),
        }
    }

    fn base_unit(&self, base: BaseDimension) -> Unit {
        let dimension = Dimension::of(base);
        match self.system_units.get(&dimension) {
            Some(unit) => unit.clone(),
            None => Unit::base(dimension, format!("{:?}", base), base.symbol()),
        }
    }

    pub fn one(&self) -> Unit {
        self.system_unit(Dimension::NONE)
    }

    /// Replace a scalar-derived unit by the first registered unit of the same
    /// dimension whose converter chain is structurally the same.
    pub fn canonicalize<Q: QuantityKind>(&self, unit: Unit<Q>) -> Unit<Q> {
        if !unit.converter().is_linear() {
            return unit;
        }
        let found = self.units.iter().find(|registered| {
            registered.unit.dimension() == unit.dimension()
                && registered.unit.converter() == unit.converter()
        });
        match found {
            Some(registered) => {
                log::trace!(
                    "Canonicalized scaled unit onto {}",
                    registered
                        .unit
                        .symbol()
                        .or(registered.label.as_deref())
                        .unwrap_or("an unnamed unit")
                );
                registered.unit.as_type()
            }
            None => unit,
        }
    }

    /// Add the units described by `config`. Each definition may build on
    /// units defined earlier in the same configuration.
    pub fn apply_config(&mut self, config: &SystemConfig) -> Result<(), UnitError> {
        for definition in &config.units {
            self.check_free(&definition.symbol)?;
            let base = self
                .lookup(&definition.base)
                .ok_or_else(|| UnitError::UnknownUnit {
                    symbol: definition.base.clone(),
                })?;
            let factor = Factor::new(definition.factor, Decimal::ONE)?;
            let offset = definition.offset.unwrap_or(Decimal::ZERO);

            if definition.label_only {
                if !offset.is_zero() {
                    return Err(UnitError::InvalidConverter {
                        reason: format!(
                            "label-only unit '{}' cannot carry an offset",
                            definition.symbol
                        ),
                    });
                }
                self.insert(base.scaled_by(factor), Some(definition.symbol.clone()));
            } else {
                let converter =
                    UnitConverter::from_factor(factor).then(&UnitConverter::offset(offset));
                let unit = Unit::transformed(
                    &base,
                    converter,
                    definition.name.clone(),
                    definition.symbol.clone(),
                );
                self.insert(unit, None);
            }
        }
        log::debug!(
            "Applied {} unit definitions from configuration",
            config.units.len()
        );
        Ok(())
    }
}

struct SiUnits {
    one: Unit<Dimensionless>,
    metre: Unit<Length>,
    kilogram: Unit<Mass>,
    gram: Unit<Mass>,
    second: Unit<Time>,
    minute: Unit<Time>,
    hour: Unit<Time>,
    ampere: Unit<ElectricCurrent>,
    kelvin: Unit<Temperature>,
    celsius: Unit<Temperature>,
    mole: Unit<AmountOfSubstance>,
    candela: Unit<LuminousIntensity>,
    radian: Unit<Angle>,
    square_metre: Unit<Area>,
    cubic_metre: Unit<Volume>,
    litre: Unit<Volume>,
    metre_per_second: Unit<Speed>,
}

// Built without touching `global`, which is itself initialised from these.
fn si_units() -> &'static SiUnits {
    static SI: OnceLock<SiUnits> = OnceLock::new();
    SI.get_or_init(|| {
        let metre: Unit<Length> = Unit::base(Dimension::LENGTH, "Metre", "m");
        let kilogram: Unit<Mass> = Unit::base(Dimension::MASS, "Kilogram", "kg");
        let second: Unit<Time> = Unit::base(Dimension::TIME, "Second", "s");
        let minute: Unit<Time> = Unit::transformed(
            &second,
            UnitConverter::from_factor(Factor::whole(60)),
            Some("Minute".to_string()),
            "min",
        );
        let hour: Unit<Time> = Unit::transformed(
            &minute,
            UnitConverter::from_factor(Factor::whole(60)),
            Some("Hour".to_string()),
            "h",
        );
        let kelvin: Unit<Temperature> = Unit::base(Dimension::TEMPERATURE, "Kelvin", "K");
        let celsius: Unit<Temperature> = Unit::transformed(
            &kelvin,
            UnitConverter::offset(Decimal::new(27315, 2)),
            Some("Celsius".to_string()),
            "℃",
        );
        let cubic_metre = metre.pow(3).as_type::<Volume>();
        let litre: Unit<Volume> = Unit::transformed(
            &cubic_metre,
            UnitConverter::from_factor(Factor::power_of_ten(-3)),
            Some("Litre".to_string()),
            "l",
        );
        SiUnits {
            one: Unit::base(Dimension::NONE, "One", "1"),
            gram: kilogram.scaled_by(Factor::whole(1000).inverse()),
            square_metre: metre.pow(2).as_type(),
            metre_per_second: metre.divide(&second).as_type(),
            ampere: Unit::base(Dimension::ELECTRIC_CURRENT, "Ampere", "A"),
            mole: Unit::base(Dimension::AMOUNT_OF_SUBSTANCE, "Mole", "mol"),
            candela: Unit::base(Dimension::LUMINOUS_INTENSITY, "Candela", "cd"),
            radian: Unit::base(Dimension::PLANE_ANGLE, "Radian", "rad"),
            metre,
            kilogram,
            second,
            minute,
            hour,
            kelvin,
            celsius,
            cubic_metre,
            litre,
        }
    })
}

/// Accessors for the units every [`UnitSystem::si`] registers.
pub mod si {
    use super::si_units;
    use crate::kind::*;
    use crate::unit::Unit;

    macro_rules! si_accessors {
        ($($name:ident: $kind:ty),* $(,)?) => {
            $(
                pub fn $name() -> Unit<$kind> {
                    si_units().$name.clone()
                }
            )*
        };
    }

    si_accessors! {
        one: Dimensionless,
        metre: Length,
        kilogram: Mass,
        gram: Mass,
        second: Time,
        minute: Time,
        hour: Time,
        ampere: ElectricCurrent,
        kelvin: Temperature,
        celsius: Temperature,
        mole: AmountOfSubstance,
        candela: LuminousIntensity,
        radian: Angle,
        square_metre: Area,
        cubic_metre: Volume,
        litre: Volume,
        metre_per_second: Speed,
    }
}
