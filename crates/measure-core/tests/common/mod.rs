use measure_core::{Quantity, QuantityKind, Unit};
use rust_decimal::Decimal;

/// Route `log` output through the test harness.
#[allow(unused)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Shorthand for `Quantity::of(value, unit)` with an integer value.
#[allow(unused)]
pub fn qty<Q: QuantityKind>(value: i64, unit: &Unit<Q>) -> Quantity<Q> {
    Quantity::of(Decimal::from(value), unit)
}

/// Snapshot line describing a unit: display, name, symbol and dimension.
#[allow(unused)]
pub fn describe<Q: QuantityKind>(unit: &Unit<Q>) -> String {
    format!(
        "{} name={} symbol={} dimension={}",
        unit,
        unit.name().unwrap_or("-"),
        unit.symbol().unwrap_or("-"),
        unit.dimension()
    )
}
