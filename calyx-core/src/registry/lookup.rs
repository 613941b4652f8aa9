//! Sensor lookup
//!
//! Plain linear scans over caller-owned slices. The first match wins, so the
//! order of a sensor table is its priority order.

use crate::sensor::{DataFields, SensorContext};
use crate::traits::{Capability, SensorDriver};

/// Find the context whose driver is called `name`
///
/// Names are compared byte for byte. Contexts that have not been initialized
/// have no name and never match.
///
/// # Returns
/// The first matching context, or `None`.
pub fn find_backend<'a, D: SensorDriver>(
    contexts: &'a [SensorContext<D>],
    name: &str,
) -> Option<&'a SensorContext<D>> {
    contexts.iter().find(|ctx| ctx.name() == Some(name))
}

/// Mutable variant of [`find_backend`]
pub fn find_backend_mut<'a, D: SensorDriver>(
    contexts: &'a mut [SensorContext<D>],
    name: &str,
) -> Option<&'a mut SensorContext<D>> {
    contexts.iter_mut().find(|ctx| ctx.name() == Some(name))
}

/// Find a capability providing at least `fields`
///
/// # Arguments
/// * `capabilities` - Candidates in priority order, e.g. `&[&dyn Capability]`
/// * `fields` - Required fields; a candidate matches when it provides all of them
///
/// # Returns
/// The first candidate whose provided fields are a superset of `fields`.
pub fn find_provider<C: Capability>(capabilities: &[C], fields: DataFields) -> Option<&C> {
    capabilities
        .iter()
        .find(|capability| capability.provides().contains(fields))
}

/// Find an initialized context providing at least `fields`
pub fn find_provider_context<D: SensorDriver>(
    contexts: &[SensorContext<D>],
    fields: DataFields,
) -> Option<&SensorContext<D>> {
    contexts
        .iter()
        .find(|ctx| ctx.is_ready() && ctx.provides().contains(fields))
}

/// Mutable variant of [`find_provider_context`]
pub fn find_provider_context_mut<D: SensorDriver>(
    contexts: &mut [SensorContext<D>],
    fields: DataFields,
) -> Option<&mut SensorContext<D>> {
    contexts
        .iter_mut()
        .find(|ctx| ctx.is_ready() && ctx.provides().contains(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calyx_hal::Bus;
    use proptest::prelude::*;

    use crate::lifecycle::Lifecycle;
    use crate::diag::NullSink;
    use crate::testing::*;

    fn initialized(mut contexts: Vec<SensorContext<MockSensor>>) -> Vec<SensorContext<MockSensor>> {
        let mut lifecycle = Lifecycle::new(NullSink);
        for ctx in contexts.iter_mut() {
            lifecycle.initialize(Some(ctx)).unwrap();
        }
        contexts
    }

    fn table() -> Vec<SensorContext<MockSensor>> {
        initialized(vec![
            SensorContext::new(init_accel, Bus::Spi, 1, 1, 2),
            SensorContext::new(init_env, Bus::I2c, 0x76, 1, 3),
            SensorContext::new(init_ntc, Bus::None, 0, 1, 4),
        ])
    }

    #[test]
    fn test_find_backend_by_name() {
        let contexts = table();
        let found = find_backend(&contexts, "env").unwrap();
        assert_eq!(found.nvm_record, 3);
        assert!(find_backend(&contexts, "bme280").is_none());
        assert!(find_backend(&contexts, "en").is_none());
    }

    #[test]
    fn test_find_backend_empty_table() {
        let contexts: [SensorContext<MockSensor>; 0] = [];
        assert!(find_backend(&contexts, "accel").is_none());
    }

    #[test]
    fn test_find_backend_first_duplicate() {
        let contexts = initialized(vec![
            SensorContext::new(init_env, Bus::I2c, 0x76, 1, 10),
            SensorContext::new(init_env, Bus::I2c, 0x77, 1, 11),
        ]);
        let found = find_backend(&contexts, "env").unwrap();
        assert_eq!(found.handle, 0x76);
    }

    #[test]
    fn test_find_backend_skips_uninitialized() {
        let contexts: Vec<SensorContext<MockSensor>> =
            vec![SensorContext::new(init_accel, Bus::Spi, 1, 1, 2)];
        assert!(find_backend(&contexts, "accel").is_none());
    }

    #[test]
    fn test_find_backend_mut_allows_update() {
        let mut contexts = table();
        let ctx = find_backend_mut(&mut contexts, "accel").unwrap();
        ctx.configuration.sample_rate = 100.0;
        assert_eq!(contexts[0].configuration.sample_rate, 100.0);
    }

    #[test]
    fn test_find_provider_first_superset() {
        let caps = [
            StaticCapability { name: "a", provides: DataFields::from_bits(0b001) },
            StaticCapability { name: "b", provides: DataFields::from_bits(0b011) },
            StaticCapability { name: "c", provides: DataFields::from_bits(0b010) },
        ];

        let found = find_provider(&caps, DataFields::from_bits(0b001)).unwrap();
        assert_eq!(found.name, "a");
        let found = find_provider(&caps, DataFields::from_bits(0b010)).unwrap();
        assert_eq!(found.name, "b");
        assert!(find_provider(&caps, DataFields::from_bits(0b100)).is_none());
    }

    #[test]
    fn test_find_provider_dyn() {
        let accel = MockSensor::new("accel", DataFields::ACCELERATION | DataFields::TEMPERATURE);
        let env = MockSensor::new("env", DataFields::ENVIRONMENTAL);
        let caps: [&dyn Capability; 2] = [&accel, &env];

        let found = find_provider(&caps, DataFields::HUMIDITY).unwrap();
        assert_eq!(found.name(), "env");
        let found = find_provider(&caps, DataFields::TEMPERATURE).unwrap();
        assert_eq!(found.name(), "accel");
        assert!(find_provider(&caps, DataFields::CO2).is_none());
    }

    #[test]
    fn test_find_provider_context() {
        let mut contexts = table();
        let found = find_provider_context(&contexts, DataFields::PRESSURE).unwrap();
        assert_eq!(found.name(), Some("env"));

        let found = find_provider_context_mut(&mut contexts, DataFields::ACCELERATION_Z).unwrap();
        assert_eq!(found.name(), Some("accel"));

        let fresh: Vec<SensorContext<MockSensor>> =
            vec![SensorContext::new(init_env, Bus::I2c, 0x76, 1, 3)];
        assert!(find_provider_context(&fresh, DataFields::NONE).is_none());
    }

    proptest! {
        #[test]
        fn prop_find_provider_returns_first_superset(
            masks in proptest::collection::vec(0u32..64, 0..8),
            query in 0u32..64,
        ) {
            let caps: Vec<StaticCapability> = masks
                .iter()
                .map(|&bits| StaticCapability { name: "s", provides: DataFields::from_bits(bits) })
                .collect();
            let query = DataFields::from_bits(query);

            let expected = masks.iter().position(|&bits| bits & query.bits() == query.bits());
            let found = find_provider(&caps, query)
                .map(|c| caps.iter().position(|x| core::ptr::eq(x, c)).unwrap());
            prop_assert_eq!(found, expected);
        }
    }
}
