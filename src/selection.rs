// The two comparison slots and the athletes selected into them.

use crate::api::types::SearchResult;

/// One of the two comparison positions a user fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub const BOTH: [Slot; 2] = [Slot::A, Slot::B];

    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::A => "A",
            Slot::B => "B",
        }
    }
}

/// Small helper: one value per slot, indexed by `Slot`.
#[derive(Debug, Clone, Default)]
pub struct PerSlot<T> {
    a: T,
    b: T,
}

impl<T> PerSlot<T> {
    pub fn get(&self, slot: Slot) -> &T {
        match slot {
            Slot::A => &self.a,
            Slot::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut T {
        match slot {
            Slot::A => &mut self.a,
            Slot::B => &mut self.b,
        }
    }
}

/// An athlete chosen into a slot. Carries the display fields the search row
/// offered so detail panels can render without refetching the row.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub id: u64,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub nickname: Option<String>,
    pub weight_class: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
}

impl From<&SearchResult> for Selection {
    fn from(result: &SearchResult) -> Self {
        Selection {
            id: result.id,
            name: result.name.clone(),
            team: result.team.clone(),
            position: result.position.clone(),
            nickname: result.nickname.clone(),
            weight_class: result.weight_class.clone(),
            height: result.height.clone(),
            weight: result.weight.clone(),
        }
    }
}

/// Holds zero, one or two selected athletes. Selecting into an occupied
/// slot replaces the previous occupant.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    slots: PerSlot<Option<Selection>>,
}

impl SelectionStore {
    pub fn select(&mut self, slot: Slot, selection: Selection) {
        *self.slots.get_mut(slot) = Some(selection);
    }

    pub fn clear(&mut self, slot: Slot) {
        *self.slots.get_mut(slot) = None;
    }

    pub fn get(&self, slot: Slot) -> Option<&Selection> {
        self.slots.get(slot).as_ref()
    }

    /// True iff both slots are filled. Gates the compare action and
    /// triggers detail fetching on transitions into true.
    pub fn is_complete(&self) -> bool {
        self.get(Slot::A).is_some() && self.get(Slot::B).is_some()
    }

    /// Both selections, when complete.
    pub fn pair(&self) -> Option<(&Selection, &Selection)> {
        match (self.get(Slot::A), self.get(Slot::B)) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
}
