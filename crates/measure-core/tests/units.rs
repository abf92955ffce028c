mod common;
use common::{describe, init_logging};
use insta::assert_snapshot;
use measure_core::prefix::milli;
use measure_core::{si, AmountOfSubstance, Dimension, Molarity, UnitError};
use rust_decimal_macros::dec;

#[test]
fn test_gram_and_kilogram() {
    init_logging();
    let kilogram = si::kilogram();
    let gram = si::gram();

    assert_eq!(gram.name(), None);
    assert_eq!(gram.symbol(), None);
    assert_snapshot!(gram.to_string(), @"g");

    assert_eq!(kilogram.name(), Some("Kilogram"));
    assert_eq!(kilogram.symbol(), Some("kg"));
    assert_snapshot!(kilogram.to_string(), @"kg");

    assert_eq!(kilogram.divide_scalar(dec!(1000)).unwrap(), gram);
}

#[test]
fn test_gram_times_thousand_is_not_kilogram() {
    init_logging();
    let kilogram = si::kilogram();
    let scaled = si::gram().multiply_scalar(dec!(1000)).unwrap();

    assert_snapshot!(scaled.to_string(), @"g*1000");
    assert_ne!(scaled, kilogram);
    assert!(scaled.is_equivalent_to(&kilogram));
    assert!(scaled.is_compatible(&kilogram));
}

#[test]
fn test_milli_kilogram_is_a_gram_in_disguise() {
    init_logging();
    let mkg = milli(&si::kilogram());

    assert_snapshot!(mkg.to_string(), @"mkg");
    assert_ne!(mkg, si::gram());
    assert!(mkg.is_equivalent_to(&si::gram()));
}

#[test]
fn test_mass_conversions() {
    init_logging();
    let kilogram = si::kilogram();
    let gram = si::gram();
    let scaled_gram = gram.multiply_scalar(dec!(1000)).unwrap();
    let divided_kilogram = kilogram.divide_scalar(dec!(1000)).unwrap();
    let mkg = milli(&kilogram);

    let cases = [
        (&kilogram, &gram, dec!(1), dec!(1000)),
        (&gram, &kilogram, dec!(1000), dec!(1)),
        (&kilogram, &scaled_gram, dec!(1), dec!(1)),
        (&gram, &divided_kilogram, dec!(1), dec!(1)),
        (&gram, &mkg, dec!(1), dec!(1)),
        (&divided_kilogram, &mkg, dec!(1), dec!(1)),
        (&mkg, &kilogram, dec!(2500), dec!(2.5)),
    ];
    for (from, to, value, expected) in cases {
        let typed = from.converter_to(to).unwrap();
        let untyped = from.converter_to_any(to).unwrap();
        assert_eq!(typed.convert(value).unwrap(), expected, "{} -> {}", from, to);
        assert_eq!(untyped.convert(value).unwrap(), expected, "{} -> {}", from, to);
    }
}

#[test]
fn test_cubic_metre_over_thousand_is_litre() {
    let litre = si::cubic_metre().divide_scalar(dec!(1000)).unwrap();
    assert_eq!(litre, si::litre());
    assert_snapshot!(litre.to_string(), @"l");
}

#[test]
fn test_mole_and_litre() {
    let mole = si::mole();
    let litre = si::litre();
    assert_eq!(mole.name(), Some("Mole"));
    assert_eq!(mole.symbol(), Some("mol"));
    assert_eq!(litre.name(), Some("Litre"));
    assert_eq!(litre.symbol(), Some("l"));

    let millimole = milli(&mole);
    assert_eq!(millimole.name(), None);
    assert_eq!(millimole.symbol(), None);
    assert_snapshot!(millimole.to_string(), @"mmol");
}

#[test]
fn test_concentration_units() {
    init_logging();
    let mol_per_l = si::mole().divide(&si::litre());
    let mmol_per_l = milli(&si::mole()).divide(&si::litre());

    assert_snapshot!(describe(&mol_per_l), @"mol/l name=- symbol=- dimension=[N]/[L]^3");
    assert_snapshot!(describe(&mmol_per_l), @"mmol/l name=- symbol=- dimension=[N]/[L]^3");

    let converter = mol_per_l.converter_to(&mmol_per_l).unwrap();
    assert_eq!(converter.convert(dec!(1)).unwrap(), dec!(1000));
    assert!((converter.convert_f64(1.0) - 1000.0).abs() < 1e-9);
}

#[test]
fn test_typed_molarity() {
    let mol_per_l = si::mole().divide(&si::litre()).as_type::<Molarity>();
    let mmol_per_l = milli(&si::mole())
        .divide(&si::litre())
        .as_type::<Molarity>();
    assert_eq!(mol_per_l.kind_name(), "Molarity");

    let converter = mol_per_l.converter_to(&mmol_per_l).unwrap();
    assert_eq!(converter.convert(dec!(1)).unwrap(), dec!(1000));
    assert_eq!(converter.inverse().convert(dec!(250)).unwrap(), dec!(0.25));
    assert!(mol_per_l.try_as_type::<Molarity>().is_ok());

    let amount = mol_per_l
        .multiply(&milli(&si::litre()))
        .as_type::<AmountOfSubstance>();
    let millimole = milli(&si::mole());
    let to_amount = millimole.converter_to(&amount).unwrap();
    assert_eq!(to_amount.convert(dec!(1)).unwrap(), dec!(1));
    let to_mole = amount.converter_to(&si::mole()).unwrap();
    assert_eq!(to_mole.convert(dec!(1000)).unwrap(), dec!(1));
}

#[test]
fn test_concentration_times_volume_is_amount() {
    let mol_per_l = si::mole().divide(&si::litre());
    let amount = mol_per_l.multiply(&milli(&si::litre()));
    let millimole = milli(&si::mole());

    assert!(amount.is_equivalent_to(&millimole));
    assert!(amount.is_compatible(&millimole));
    assert_eq!(amount.dimension(), Dimension::AMOUNT_OF_SUBSTANCE);

    let there = amount.converter_to_any(&millimole).unwrap();
    let back = millimole.converter_to_any(&amount).unwrap();
    assert_eq!(there.convert(dec!(1)).unwrap(), dec!(1));
    assert_eq!(back.convert(dec!(1)).unwrap(), dec!(1));
}

#[test]
fn test_metre_and_square_metre_are_incommensurable() {
    let metre = si::metre();
    let area = metre.multiply(&metre);

    assert!(!metre.is_compatible(&area));
    assert!(!metre.is_equivalent_to(&area));
    let err = metre.converter_to_any(&area).unwrap_err();
    assert!(matches!(err, UnitError::Incommensurable { .. }));
    assert_snapshot!(err.to_string(), @"m ([L]) and m*m ([L]^2) are incommensurable");
}

#[test]
fn test_temperature_scales() {
    let celsius = si::celsius();
    let kelvin = si::kelvin();
    let to_kelvin = celsius.converter_to(&kelvin).unwrap();
    assert_eq!(to_kelvin.convert(dec!(25)).unwrap(), dec!(298.15));
    assert_eq!(to_kelvin.inverse().convert(dec!(0)).unwrap(), dec!(-273.15));

    let hour_in_seconds = si::hour().converter_to(&si::second()).unwrap();
    assert_eq!(hour_in_seconds.convert(dec!(1.5)).unwrap(), dec!(5400));
}
