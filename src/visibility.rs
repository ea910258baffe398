// Copyright 2026 Newsdesk Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Named show/hide flags consumed by the renderer.
//!
//! Slots are registered with an id and zero or more group labels; toggling a
//! group flips every slot carrying that label, toggling an id flips the
//! first matching slot. Hiding is presentation-only: a hidden slot still
//! holds its place in the rendered layout.

#[derive(Debug, Clone)]
struct Slot {
    id: String,
    groups: Vec<String>,
    visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Visibility {
    slots: Vec<Slot>,
}

impl Visibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a slot. Slots start visible.
    pub fn register(&mut self, id: &str, groups: &[&str]) {
        self.slots.push(Slot {
            id: id.to_string(),
            groups: groups.iter().map(|g| g.to_string()).collect(),
            visible: true,
        });
    }

    /// Show or hide every slot carrying `group`.
    pub fn set_group_visible(&mut self, group: &str, visible: bool) {
        for slot in &mut self.slots {
            if slot.groups.iter().any(|g| g == group) {
                slot.visible = visible;
            }
        }
    }

    /// Show or hide the first slot with `id`. No-op when nothing matches.
    pub fn set_one_visible(&mut self, id: &str, visible: bool) {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.id == id) {
            slot.visible = visible;
        }
    }

    /// Unregistered ids read as visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.slots
            .iter()
            .find(|slot| slot.id == id)
            .map_or(true, |slot| slot.visible)
    }
}
