use std::collections::BTreeMap;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::api::{Guest, GuestId, Reservation, ReservationId};

/// Both tables live behind one lock, so a cascade delete is a single write
#[derive(Default)]
pub struct InMemoryStorage {
    tables: RwLock<InMemoryTables>,
}

#[derive(Default)]
pub(crate) struct InMemoryTables {
    pub guests: BTreeMap<GuestId, Guest>,
    pub reservations: BTreeMap<ReservationId, Reservation>,
    guest_sequence_generator: GuestId,
    reservation_sequence_generator: ReservationId,
}

impl InMemoryTables {
    pub fn next_guest_id(&mut self) -> GuestId {
        self.guest_sequence_generator += 1;
        self.guest_sequence_generator
    }

    pub fn next_reservation_id(&mut self) -> ReservationId {
        self.reservation_sequence_generator += 1;
        self.reservation_sequence_generator
    }
}

impl InMemoryStorage {
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, InMemoryTables> {
        self.tables.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, InMemoryTables> {
        self.tables.write()
    }
}
