use std::rc::Rc;
use yew::prelude::*;

use crate::models::notice::Notice;

pub enum NoticeAction {
    Push(Notice),
    Dismiss(u64),
}

/// Notices currently on screen, oldest first, each with a stable id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeStack {
    next_id: u64,
    items: Vec<(u64, Notice)>,
}

impl NoticeStack {
    pub fn items(&self) -> &[(u64, Notice)] {
        &self.items
    }
}

impl Reducible for NoticeStack {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            NoticeAction::Push(notice) => {
                next.items.push((next.next_id, notice));
                next.next_id += 1;
            }
            NoticeAction::Dismiss(id) => next.items.retain(|(i, _)| *i != id),
        }
        Rc::new(next)
    }
}

/// Handle for pushing and dismissing notices
#[derive(Clone, PartialEq)]
pub struct NoticeHandle {
    stack: UseReducerHandle<NoticeStack>,
}

impl NoticeHandle {
    pub fn push(&self, notice: Notice) {
        self.stack.dispatch(NoticeAction::Push(notice));
    }

    pub fn dismiss(&self, id: u64) {
        self.stack.dispatch(NoticeAction::Dismiss(id));
    }

    pub fn items(&self) -> Vec<(u64, Notice)> {
        self.stack.items().to_vec()
    }
}

/// Owns the notice stack; call once near the root and provide it as context.
#[hook]
pub fn use_notice_stack() -> NoticeHandle {
    NoticeHandle {
        stack: use_reducer(NoticeStack::default),
    }
}

#[hook]
pub fn use_notices() -> NoticeHandle {
    use_context::<NoticeHandle>().expect("NoticeHandle must be provided by the App component")
}
