mod common;
use common::{init_logging, qty};
use insta::assert_snapshot;
use measure_core::{global, si, Quantity, SystemConfig, UnitError, UnitSystem};
use rust_decimal_macros::dec;

// The process-wide system can only be installed once, so everything that
// depends on it lives in this single test.
#[test]
fn test_install_configured_system() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("units.toml");
    std::fs::write(
        &path,
        r#"
[[unit]]
symbol = "t"
name = "Tonne"
base = "kg"
factor = "1000"

[[unit]]
symbol = "mg"
base = "g"
factor = "0.001"
label_only = true

[[unit]]
symbol = "degF"
name = "Fahrenheit"
base = "K"
factor = "0.5555555555555555555555555556"
offset = "255.3722222222222222222222222"
"#,
    )
    .unwrap();

    let config = SystemConfig::load(&path).unwrap();
    let mut system = UnitSystem::si();
    system.apply_config(&config).unwrap();
    let installed = system.install().unwrap();
    assert!(std::ptr::eq(installed, global()));
    assert!(matches!(
        UnitSystem::new().install(),
        Err(UnitError::SystemAlreadyInstalled)
    ));

    let tonne = global().lookup("t").unwrap();
    assert_snapshot!(tonne.to_string(), @"t");
    assert_eq!(qty(2, &tonne).to_any(&si::kilogram()).unwrap().value(), dec!(2000));

    // Scaled units now resolve to the configured ones.
    let from_kilograms = si::kilogram().multiply_scalar(dec!(1000)).unwrap();
    assert_eq!(from_kilograms, tonne);
    assert_eq!(from_kilograms.to_string(), "t");
    let milligram = si::gram().divide_scalar(dec!(1000)).unwrap();
    assert_snapshot!(milligram.to_string(), @"mg");
    let amount = Quantity::of(dec!(2500), &milligram);
    assert_eq!(amount.to(&si::gram()).unwrap().value(), dec!(2.5));

    let fahrenheit = global().lookup("degF").unwrap();
    assert_eq!(fahrenheit.name(), Some("Fahrenheit"));
    assert!(fahrenheit.is_compatible(&si::kelvin()));
    assert!(!fahrenheit.is_equivalent_to(&si::kelvin()));
    let boiling = qty(212, &fahrenheit).to_any(&si::kelvin()).unwrap();
    assert!((boiling.value_f64() - 373.15).abs() < 1e-9);
}
