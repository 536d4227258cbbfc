use crate::models::error::AppError;
use std::cell::Cell;
use std::rc::Rc;

/// Single-slot latch that refuses a second submission while one is outstanding.
#[derive(Clone, Default)]
pub struct InFlight {
    busy: Rc<Cell<bool>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Claims the slot, or fails with [`AppError::Busy`] if it is taken.
    /// The slot is released when the guard is dropped.
    pub fn begin(&self) -> Result<InFlightGuard, AppError> {
        if self.busy.replace(true) {
            return Err(AppError::Busy);
        }
        Ok(InFlightGuard {
            busy: self.busy.clone(),
        })
    }
}

pub struct InFlightGuard {
    busy: Rc<Cell<bool>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}
