use crate::AssignmentResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RewardScheduled {
        generation: u64,
        completed_wave: u32,
    },
    RewardSuperseded { generation: u64 },
    RewardHidden,
    RewardAborted { generation: u64, reason: String },
    RewardOffered {
        generation: u64,
        spell: String,
        modifiers: usize,
        damage: f64,
        mana: f64,
    },
    SpellAdded { spell: String, slot: usize },
    SpellDuplicate { spell: String, slot: usize },
    SlotsFull { spell: String },
    RewardSkipped { spell: String },
    NextWaveRequested { wave: u32 },
}

impl Event {
    pub fn from_assignment(spell: String, result: AssignmentResult) -> Self {
        match result {
            AssignmentResult::Inserted(slot) => Event::SpellAdded { spell, slot },
            AssignmentResult::Duplicate(slot) => Event::SpellDuplicate { spell, slot },
            AssignmentResult::Full => Event::SlotsFull { spell },
        }
    }
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
