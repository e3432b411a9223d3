//! Slot storage for entities which can be removed from the engine.
//!
//! Every value is addressed through a [`Handle`], which records the slot index, the generation of
//! the slot at insertion time, and the tag of the arena that issued it. Removing a value bumps the
//! generation of its slot, so every handle that is still around afterwards is detected as stale
//! in O(1) instead of silently reaching whatever value reuses the slot.
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// A generation-checked reference to a value stored in an [`Arena`].
pub struct Handle<T> {
    owner: u32,
    index: u32,
    generation: u32,
    value: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// The tag of the arena which issued this handle.
    pub fn owner(&self) -> u32 {
        self.owner
    }

    /// The slot this handle points to.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[cfg(test)]
    pub(crate) fn for_test(owner: u32, index: u32) -> Handle<T> {
        Handle {
            owner,
            index,
            generation: 0,
            value: PhantomData,
        }
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner
            && self.index == other.index
            && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> PartialOrd for Handle<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Handle<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.owner, self.index, self.generation).cmp(&(other.owner, other.index, other.generation))
    }
}

impl<T> Debug for Handle<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handle({}:{}@{})", self.owner, self.index, self.generation)
    }
}

impl<T> Display for Handle<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct ArenaSlot<T> {
    generation: u32,
    value: Option<T>,
}

/// Storage with free-list reuse; see the module documentation.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    owner: u32,
    slots: Vec<ArenaSlot<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> Arena<T> {
    /// Creates an empty arena whose handles carry the given owner tag.
    pub fn new(owner: u32) -> Self {
        Arena {
            owner,
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Inserts a value which is created from the handle it will be stored under.
    pub fn insert_with(&mut self, create: impl FnOnce(Handle<T>) -> T) -> Handle<T> {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(ArenaSlot {
                    generation: 0,
                    value: None,
                });
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        let handle = Handle {
            owner: self.owner,
            index,
            generation: slot.generation,
            value: PhantomData,
        };
        slot.value = Some(create(handle));
        self.live += 1;

        handle
    }

    pub fn insert(&mut self, value: T) -> Handle<T> {
        self.insert_with(|_| value)
    }

    /// Returns whether the handle was issued by this arena and still refers to a stored value.
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if handle.owner != self.owner {
            return None;
        }
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if handle.owner != self.owner {
            return None;
        }
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Exclusive access to two distinct values at once.
    ///
    /// Returns [`None`] if either handle is stale or if both handles refer to the same value.
    pub fn get_pair_mut(
        &mut self,
        first: Handle<T>,
        second: Handle<T>,
    ) -> Option<(&mut T, &mut T)> {
        if first.index == second.index || !self.contains(first) || !self.contains(second) {
            return None;
        }

        let (low, high, swapped) = if first.index < second.index {
            (first.index(), second.index(), false)
        } else {
            (second.index(), first.index(), true)
        };
        let (head, tail) = self.slots.split_at_mut(high);
        let low_value = head[low].value.as_mut()?;
        let high_value = tail[0].value.as_mut()?;

        if swapped {
            Some((high_value, low_value))
        } else {
            Some((low_value, high_value))
        }
    }

    /// Removes the value, invalidating every outstanding handle to it.
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }

        let slot = &mut self.slots[handle.index()];
        let value = slot.value.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;

        value
    }

    /// Iterates over the stored values in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value.as_ref().map(|value| {
                (
                    Handle {
                        owner: self.owner,
                        index: index as u32,
                        generation: slot.generation,
                        value: PhantomData,
                    },
                    value,
                )
            })
        })
    }

    pub fn handles(&self) -> impl Iterator<Item = Handle<T>> + '_ {
        self.iter().map(|(handle, _)| handle)
    }
}
