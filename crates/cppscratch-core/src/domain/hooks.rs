//! Ordered extension hook lists.

use std::fmt;

/// Handle returned by [`HookList::register`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

type Hook = Box<dyn Fn() + Send + Sync>;

/// Zero-argument callbacks run synchronously in registration order.
#[derive(Default)]
pub struct HookList {
    next_id: u64,
    hooks: Vec<(HookId, Hook)>,
}

impl HookList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, hook: F) -> HookId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = HookId(self.next_id);
        self.next_id += 1;
        self.hooks.push((id, Box::new(hook)));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn unregister(&mut self, id: HookId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(h, _)| *h != id);
        self.hooks.len() != before
    }

    pub fn run(&self) {
        for (_, hook) in &self.hooks {
            hook();
        }
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for HookList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookList")
            .field("len", &self.hooks.len())
            .finish()
    }
}
