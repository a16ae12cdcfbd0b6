// Animation registry: bounded list of in-flight entries with timed removal

use super::sampler::{RandomSampler, SpawnSampler};
use super::types::{AnimationEntry, EntryId};
use crate::settings::RegistrySettings;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::time::{Duration, Instant};

/// A removal that fires once `due` has passed. Never cancelled: if the entry
/// was already evicted by the cap, firing it does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PendingRemoval {
    due: Instant,
    id: EntryId,
}

/// Owns the active entries in insertion order.
///
/// At most `capacity` entries are held; submitting past the cap drops the
/// oldest entry. Every entry gets exactly one removal scheduled at
/// `delay + duration + grace` after creation, drained by [`tick`].
///
/// [`tick`]: AnimationRegistry::tick
pub struct AnimationRegistry<S: SpawnSampler = RandomSampler> {
    entries: VecDeque<AnimationEntry>,
    next_id: EntryId,
    pending: BinaryHeap<Reverse<PendingRemoval>>,
    sampler: S,
    settings: RegistrySettings,
}

impl<S: SpawnSampler> AnimationRegistry<S> {
    pub fn new(sampler: S, settings: RegistrySettings) -> Self {
        Self {
            entries: VecDeque::with_capacity(settings.capacity),
            next_id: 1,
            pending: BinaryHeap::new(),
            sampler,
            settings,
        }
    }

    /// Creates an entry for `text` and schedules its removal.
    ///
    /// Returns `None` without touching any state when `text` is empty after
    /// trimming. `viewport_width` is the current stage width; when it is
    /// missing or unusable the sampler's fallback width is used instead.
    pub fn submit(
        &mut self,
        text: &str,
        viewport_width: Option<f32>,
        now: Instant,
    ) -> Option<AnimationEntry> {
        let text = text.trim();
        if text.is_empty() {
            log::trace!("Ignoring empty submission");
            return None;
        }

        let width = match viewport_width {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => self.sampler.fallback_viewport_width(),
        };
        let trajectory = self.sampler.sample(width);

        let id = self.next_id;
        self.next_id += 1;
        let entry = AnimationEntry::new(id, text.to_string(), trajectory, now);

        while self.entries.len() >= self.settings.capacity.max(1) {
            let Some(evicted) = self.entries.pop_front() else {
                break;
            };
            log::debug!("Evicting animation {} to make room for {}", evicted.id, id);
        }
        self.entries.push_back(entry.clone());

        let due = now + entry.visible_lifetime() + Duration::from_millis(self.settings.grace_ms);
        self.pending.push(Reverse(PendingRemoval { due, id }));

        log::debug!(
            "Animation {} '{}' spawned: {:.0} ms after {:.0} ms delay",
            id,
            entry.text,
            entry.duration_ms,
            entry.delay_ms
        );

        Some(entry)
    }

    /// Removes the entry with `id`. Missing ids are ignored.
    pub fn expire(&mut self, id: EntryId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                log::debug!("Animation {} expired", id);
                true
            }
            None => {
                log::trace!("Animation {} already gone", id);
                false
            }
        }
    }

    /// Fires every removal that is due at `now`, returns how many entries
    /// were actually removed
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut removed = 0;
        while let Some(Reverse(next)) = self.pending.peek() {
            if next.due > now {
                break;
            }
            let id = next.id;
            self.pending.pop();
            if self.expire(id) {
                removed += 1;
            }
        }
        removed
    }

    /// Earliest scheduled removal, if any
    #[cfg(test)]
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.peek().map(|Reverse(p)| p.due)
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &AnimationEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.settings.capacity
    }

    pub fn sampler_mut(&mut self) -> &mut S {
        &mut self.sampler
    }

    /// Takes effect immediately; a lowered capacity trims the oldest entries
    pub fn set_settings(&mut self, settings: RegistrySettings) {
        self.settings = settings;
        while self.entries.len() > self.settings.capacity {
            self.entries.pop_front();
        }
    }
}
