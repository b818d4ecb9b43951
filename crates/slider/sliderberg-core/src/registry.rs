//! Registry of live slider instances.
//!
//! Adapters create instances from root nodes and route every host callback
//! through [`SliderRegistry::dispatch`]. Iteration order is creation order.

use std::fmt;

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::controller::Controller;
use crate::elements::is_inside_clone;
use crate::events::{Direction, EventOutcome, SliderEvent};
use crate::host::SliderHost;
use crate::ids::{IdAllocator, SliderId};

pub struct SliderRegistry<H: SliderHost> {
    host: H,
    ids: IdAllocator,
    instances: IndexMap<SliderId, Controller<H>>,
}

impl<H: SliderHost> fmt::Debug for SliderRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderRegistry")
            .field("instances", &self.instances.values().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<H: SliderHost> SliderRegistry<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            ids: IdAllocator::new(),
            instances: IndexMap::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Create an instance on `root`. A root that already hosts a live instance
    /// returns the existing id. Invalid markup and markup inside slide clones
    /// is skipped.
    pub fn create_instance(&mut self, root: &H::Node) -> Option<SliderId> {
        if let Some(existing) = self.find_by_root(root) {
            return Some(existing);
        }
        if is_inside_clone(&self.host, root) {
            debug!("skipping slider markup inside a slide clone");
            return None;
        }
        let id = self.ids.alloc_slider();
        match Controller::create(self.host.for_slider(id), id, root) {
            Ok(controller) => {
                self.instances.insert(id, controller);
                Some(id)
            }
            Err(err) => {
                warn!("{err}");
                None
            }
        }
    }

    /// Deliver a host callback. Events for unknown or destroyed instances are
    /// ignored.
    pub fn dispatch(&mut self, id: SliderId, event: SliderEvent<H::Node>) -> EventOutcome {
        match self.instances.get_mut(&id) {
            Some(controller) => controller.handle(event),
            None => EventOutcome::IGNORED,
        }
    }

    pub fn get(&self, id: SliderId) -> Option<&Controller<H>> {
        self.instances.get(&id)
    }

    pub fn get_mut(&mut self, id: SliderId) -> Option<&mut Controller<H>> {
        self.instances.get_mut(&id)
    }

    pub fn contains(&self, id: SliderId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Look up by reported slider name (wrapper `id` or generated name).
    pub fn find_by_name(&self, name: &str) -> Option<SliderId> {
        self.instances
            .iter()
            .find(|(_, controller)| controller.name() == name)
            .map(|(id, _)| *id)
    }

    pub fn find_by_root(&self, root: &H::Node) -> Option<SliderId> {
        self.instances
            .iter()
            .find(|(_, controller)| &controller.elements().wrapper == root)
            .map(|(id, _)| *id)
    }

    pub fn next_slide(&mut self, id: SliderId) -> bool {
        self.instances
            .get_mut(&id)
            .is_some_and(|controller| controller.next_slide())
    }

    pub fn prev_slide(&mut self, id: SliderId) -> bool {
        self.instances
            .get_mut(&id)
            .is_some_and(|controller| controller.prev_slide())
    }

    pub fn go_to_slide(&mut self, id: SliderId, index: isize) -> bool {
        self.instances
            .get_mut(&id)
            .is_some_and(|controller| controller.go_to_slide(index, Direction::Jump))
    }

    /// Destroy and forget one instance.
    pub fn destroy(&mut self, id: SliderId) -> bool {
        match self.instances.shift_remove(&id) {
            Some(mut controller) => {
                controller.destroy();
                true
            }
            None => false,
        }
    }

    /// Destroy every instance (page teardown). Returns how many were live.
    pub fn destroy_all(&mut self) -> usize {
        let count = self.instances.len();
        for (_, mut controller) in self.instances.drain(..) {
            controller.destroy();
        }
        if count > 0 {
            info!("destroyed {count} slider(s)");
        }
        count
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn ids(&self) -> Vec<SliderId> {
        self.instances.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SliderId, &Controller<H>)> {
        self.instances.iter().map(|(id, controller)| (*id, controller))
    }
}
