//! Display device registry
//!
//! Configured devices are keyed by the small integer id the host assigns.
//! The table is explicit and fixed-capacity: a slot per id, owned records,
//! allocation and lookup failures as values. Records live for the firmware
//! process lifetime; there is no removal path beyond shutdown marking the
//! device Off in place.

use crate::st7789::St7789;

/// Errors from id allocation and lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Id beyond the table's capacity
    InvalidId(u8),
    /// Configure for an id that is already bound
    IdInUse(u8),
    /// Lookup for an id with no configured device
    UnknownId(u8),
}

/// Fixed-capacity table of configured displays, slot per id
pub struct DisplayRegistry<SPI, PIN, const N: usize> {
    slots: [Option<St7789<SPI, PIN>>; N],
}

impl<SPI, PIN, const N: usize> DisplayRegistry<SPI, PIN, N> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
        }
    }

    /// Check that `id` is in range and unbound
    pub fn ensure_vacant(&self, id: u8) -> Result<(), RegistryError> {
        match self.slots.get(id as usize) {
            None => Err(RegistryError::InvalidId(id)),
            Some(Some(_)) => Err(RegistryError::IdInUse(id)),
            Some(None) => Ok(()),
        }
    }

    /// Bind a configured device to `id`
    pub fn insert(&mut self, id: u8, device: St7789<SPI, PIN>) -> Result<(), RegistryError> {
        self.ensure_vacant(id)?;
        self.slots[id as usize] = Some(device);
        Ok(())
    }

    /// Look up the device bound to `id`
    pub fn get(&self, id: u8) -> Result<&St7789<SPI, PIN>, RegistryError> {
        match self.slots.get(id as usize) {
            None => Err(RegistryError::InvalidId(id)),
            Some(None) => Err(RegistryError::UnknownId(id)),
            Some(Some(device)) => Ok(device),
        }
    }

    /// Look up the device bound to `id`, mutably
    pub fn get_mut(&mut self, id: u8) -> Result<&mut St7789<SPI, PIN>, RegistryError> {
        match self.slots.get_mut(id as usize) {
            None => Err(RegistryError::InvalidId(id)),
            Some(None) => Err(RegistryError::UnknownId(id)),
            Some(Some(device)) => Ok(device),
        }
    }

    /// Iterate over every configured device
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut St7789<SPI, PIN>> {
        self.slots.iter_mut().flatten()
    }
}

impl<SPI, PIN, const N: usize> Default for DisplayRegistry<SPI, PIN, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{new_trace, TracePin, TraceSpi};

    fn device() -> St7789<TraceSpi, TracePin> {
        let trace = new_trace();
        St7789::new(
            TraceSpi::new(&trace, 0),
            TracePin::new(&trace, 1),
            TracePin::new(&trace, 2),
            TracePin::new(&trace, 3),
        )
    }

    #[test]
    fn insert_and_lookup() {
        let mut registry: DisplayRegistry<_, _, 4> = DisplayRegistry::new();
        registry.insert(2, device()).unwrap();

        assert!(registry.get(2).is_ok());
        assert!(registry.get_mut(2).is_ok());
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut registry: DisplayRegistry<_, _, 4> = DisplayRegistry::new();
        registry.insert(1, device()).unwrap();

        assert_eq!(
            registry.insert(1, device()),
            Err(RegistryError::IdInUse(1))
        );
    }

    #[test]
    fn out_of_range_id_rejected() {
        let mut registry: DisplayRegistry<_, _, 4> = DisplayRegistry::new();

        assert_eq!(registry.ensure_vacant(4), Err(RegistryError::InvalidId(4)));
        assert_eq!(
            registry.insert(200, device()),
            Err(RegistryError::InvalidId(200))
        );
    }

    #[test]
    fn unknown_id_lookup_rejected() {
        let mut registry: DisplayRegistry<TraceSpi, TracePin, 4> = DisplayRegistry::new();

        assert!(matches!(registry.get(0), Err(RegistryError::UnknownId(0))));
        assert!(matches!(
            registry.get_mut(3),
            Err(RegistryError::UnknownId(3))
        ));
    }

    #[test]
    fn iter_mut_visits_every_configured_device() {
        let mut registry: DisplayRegistry<_, _, 4> = DisplayRegistry::new();
        registry.insert(0, device()).unwrap();
        registry.insert(3, device()).unwrap();

        assert_eq!(registry.iter_mut().count(), 2);
    }
}
