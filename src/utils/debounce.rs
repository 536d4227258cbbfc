use gloo::events::EventListener;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;

/// Runs `callback` once the window has stopped resizing for `delay_ms`.
///
/// Every resize event restarts the countdown. Dropping the returned watcher
/// removes the listener and cancels a pending run.
pub fn create_debounced_resize_listener<F>(callback: F, delay_ms: u32) -> ResizeWatcher
where
    F: Fn() + 'static,
{
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
    let callback = Rc::new(callback);

    let listener = web_sys::window().map(|window| {
        let pending = pending.clone();
        EventListener::new(&window, "resize", move |_| {
            let callback = callback.clone();
            // Replacing the handle drops, and so cancels, the previous timeout
            pending
                .borrow_mut()
                .replace(Timeout::new(delay_ms, move || callback()));
        })
    });

    ResizeWatcher {
        _listener: listener,
        pending,
    }
}

/// Keeps a debounced resize listener alive.
pub struct ResizeWatcher {
    _listener: Option<EventListener>,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        drop(self.pending.borrow_mut().take());
    }
}
