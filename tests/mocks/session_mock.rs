use std::cell::{Cell, RefCell};
use std::rc::Rc;

use teacher_review::auth::storage::{KeyValueStore, MemoryStore, StatusEvents};
use teacher_review::auth::AuthStore;
use teacher_review::management::Confirm;

/// Counts `userStatusChange` dispatches.
#[derive(Clone, Default)]
pub struct CountingEvents {
    count: Rc<Cell<usize>>,
}

impl CountingEvents {
    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl StatusEvents for CountingEvents {
    fn dispatch(&self) {
        self.count.set(self.count.get() + 1);
    }
}

pub struct Session {
    pub store: Rc<MemoryStore>,
    pub events: CountingEvents,
    pub auth: AuthStore,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::with_store(MemoryStore::default())
    }

    pub fn admin() -> Self {
        Self::with_store(MemoryStore::with_entries([
            ("userType", "admin"),
            ("username", "root"),
            ("accessToken", "admin-token"),
            ("refreshToken", "admin-refresh"),
        ]))
    }

    fn with_store(store: MemoryStore) -> Self {
        let store = Rc::new(store);
        let events = CountingEvents::default();
        let auth = AuthStore::restore(store.clone(), Rc::new(events.clone()));
        Self { store, events, auth }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }
}

/// Answers every prompt the same way and remembers what was asked.
pub struct ScriptedConfirm {
    answer: bool,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Rc<Self> {
        Rc::new(Self {
            answer,
            prompts: RefCell::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answer
    }
}
