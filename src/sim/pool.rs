//! Fixed-capacity projectile pool
//!
//! Slots are allocated once and recycled by a round-robin cursor. Claiming
//! never looks at whether the slot is still in flight: when the spawn rate
//! outruns the pool, the oldest projectile is overwritten. Draw budgets stay
//! bounded that way and nothing is ever allocated after startup.

use glam::Vec2;

/// A single pool slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

impl Projectile {
    /// Inactive projectile sitting at `anchor` with no velocity
    pub fn parked(anchor: Vec2) -> Self {
        Self {
            pos: anchor,
            vel: Vec2::ZERO,
            active: false,
        }
    }
}

/// Round-robin projectile pool
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
    next_slot: usize,
    parked: Vec2,
    /// Claims that landed on a slot that was still active
    overwrites: u64,
}

impl ProjectilePool {
    /// Allocate `capacity` inactive slots parked at `parked`
    ///
    /// A zero capacity is bumped to one; config validation rejects it first.
    pub fn new(capacity: usize, parked: Vec2) -> Self {
        let capacity = capacity.max(1);
        log::info!("Projectile pool: {} slots parked at {}", capacity, parked);
        Self {
            slots: vec![Projectile::parked(parked); capacity],
            next_slot: 0,
            parked,
            overwrites: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index the next claim will return
    #[inline]
    pub fn next_slot(&self) -> usize {
        self.next_slot
    }

    /// Current parked anchor
    #[inline]
    pub fn parked(&self) -> Vec2 {
        self.parked
    }

    #[inline]
    pub fn overwrites(&self) -> u64 {
        self.overwrites
    }

    /// Claim the slot under the cursor, mark it active and advance the cursor
    ///
    /// The claimed slot keeps whatever position/velocity it had; callers set
    /// both right after claiming.
    pub fn claim_next(&mut self) -> usize {
        let slot = self.next_slot;
        let projectile = &mut self.slots[slot];
        if projectile.active {
            self.overwrites += 1;
            log::trace!("Overwriting in-flight projectile in slot {}", slot);
        }
        projectile.active = true;
        self.next_slot = (slot + 1) % self.slots.len();
        slot
    }

    /// Claim a slot and launch it from `pos` with `vel`
    pub fn spawn(&mut self, pos: Vec2, vel: Vec2) -> usize {
        let slot = self.claim_next();
        let projectile = &mut self.slots[slot];
        projectile.pos = pos;
        projectile.vel = vel;
        slot
    }

    /// Park a slot and mark it inactive. Out-of-range indices are ignored.
    pub fn reset(&mut self, slot: usize) {
        let parked = self.parked;
        if let Some(projectile) = self.slots.get_mut(slot) {
            *projectile = Projectile::parked(parked);
        }
    }

    /// Move the parked anchor and bring every inactive slot along with it
    pub fn set_parked(&mut self, anchor: Vec2) {
        self.parked = anchor;
        for projectile in self.slots.iter_mut().filter(|p| !p.active) {
            *projectile = Projectile::parked(anchor);
        }
    }

    pub fn get(&self, slot: usize) -> Option<&Projectile> {
        self.slots.get(slot)
    }

    /// All slots in index order, active or not
    pub fn slots(&self) -> &[Projectile] {
        &self.slots
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Projectile)> {
        self.slots.iter().enumerate().filter(|(_, p)| p.active)
    }

    /// Visit active slots in index order (read-only)
    pub fn for_each_active<F>(&self, mut f: F)
    where
        F: FnMut(usize, &Projectile),
    {
        for (slot, projectile) in self.iter_active() {
            f(slot, projectile);
        }
    }

    /// Visit active slots in index order (read-write)
    pub fn for_each_active_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &mut Projectile),
    {
        for (slot, projectile) in self.slots.iter_mut().enumerate() {
            if projectile.active {
                f(slot, projectile);
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.active).count()
    }
}
