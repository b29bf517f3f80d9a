use crate::app::MIN_RESIZE_INTERVAL;
use crate::backend::{CanvasHandle, Host};
use crate::error::Error;
use crate::size::{CanvasSize, SizeTracker};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub type ResizeHandler = Box<dyn FnMut(CanvasSize)>;

/// Polls the canvas size at a fixed interval and calls the handler when it changes.
/// Changes that are reverted between two checks are not reported.
/// The polling stops when [`ResizeWatch::stop`] is called or the watch is dropped.
pub struct ResizeWatch<H: Host> {
    interval: Option<H::Interval>,
    tracker: Rc<RefCell<SizeTracker>>,
    period: Duration,
}

impl<H: Host> ResizeWatch<H> {
    pub fn start(
        host: &H,
        canvas: &H::Canvas,
        period: Duration,
        mut handler: ResizeHandler,
    ) -> Result<Self, Error> {
        if period < MIN_RESIZE_INTERVAL {
            return Err(Error::InvalidInterval);
        }

        let tracker = Rc::new(RefCell::new(SizeTracker::new(canvas.size())));

        let canvas = canvas.clone();
        let inner_tracker = tracker.clone();
        let interval = host.set_interval(
            period,
            Box::new(move || {
                let changed = inner_tracker.borrow_mut().update(canvas.size());
                if let Some(size) = changed {
                    handler(size);
                }
            }),
        )?;

        Ok(Self {
            interval: Some(interval),
            tracker,
            period,
        })
    }

    /// Cancels the polling, calling it again does nothing
    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            log::debug!("Resize polling stopped");
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Last size seen by the polling
    #[inline]
    pub fn last_size(&self) -> CanvasSize {
        self.tracker.borrow().last()
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }
}
