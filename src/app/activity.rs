use std::{
    any::Any,
    ops::{Deref, DerefMut},
};

use crate::ui::Screen;

use super::{app::AppData, event::Event};

pub type ActivityResult = Box<dyn Any>;

/// Requested mutation of the activity stack.
pub enum Change {
    Push(Activity),
    Pop {
        n: usize,
        res: Option<ActivityResult>,
    },
}

impl Change {
    pub fn push(activity: Activity) -> Self {
        Self::Push(activity)
    }

    pub fn pop(n: usize) -> Self {
        Self::Pop { n, res: None }
    }

    pub fn pop_with(n: usize, res: impl Any) -> Self {
        Self::Pop {
            n,
            res: Some(Box::new(res)),
        }
    }

    pub fn pop_top() -> Self {
        Self::pop(1)
    }

    pub fn pop_top_with(res: impl Any) -> Self {
        Self::pop_with(1, res)
    }

    pub fn pop_all() -> Self {
        Self::Pop {
            n: usize::MAX,
            res: None,
        }
    }
}

pub struct Activities {
    activities: Vec<Activity>,
}

impl Activities {
    pub fn new(base: Activity) -> Self {
        Self {
            activities: vec![base],
        }
    }

    pub fn empty() -> Self {
        Self { activities: vec![] }
    }

    pub fn push(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    pub fn pop_n(&mut self, n: usize) {
        let len = self.activities.len().saturating_sub(n);
        self.activities.truncate(len);
    }

    pub fn active(&self) -> Option<&Activity> {
        self.activities.last()
    }

    pub fn active_mut(&mut self) -> Option<&mut Activity> {
        self.activities.last_mut()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

/// Named entry on the activity stack.
pub struct Activity {
    name: String,
    handler: Box<dyn ActivityHandler>,
}

impl Activity {
    pub fn new(name: impl Into<String>, handler: Box<dyn ActivityHandler>) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Deref for Activity {
    type Target = Box<dyn ActivityHandler>;

    fn deref(&self) -> &Self::Target {
        &self.handler
    }
}

impl DerefMut for Activity {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.handler
    }
}

pub trait ActivityHandler {
    /// Consumes this frame's events. `None` keeps the activity as is,
    /// `Some` mutates the stack.
    #[must_use]
    fn update(&mut self, events: Vec<Event>, data: &mut AppData) -> Option<Change>;

    fn screen(&self) -> &dyn Screen;
}
