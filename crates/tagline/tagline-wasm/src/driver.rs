//! Browser driver for one animator: a single pending timeout or animation frame,
//! replaced on every wake request, plus the window resize listener.
//!
//! Spawned drivers are held by a per-thread registry, so a tagline keeps running
//! after its JS handle is dropped or collected. [`Driver::dispose`] is the only
//! teardown.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use anyhow::{anyhow, Result};
use log::warn;
use tagline_core::{Animator, Wake};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::surface::DomSurface;

thread_local! {
    static RUNNING: RefCell<Vec<Rc<Driver>>> = const { RefCell::new(Vec::new()) };
}

/// Number of drivers spawned and not yet disposed.
pub(crate) fn running_count() -> usize {
    RUNNING.with(|running| running.borrow().len())
}

pub(crate) fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| anyhow!("no global window"))
}

/// Monotonic page clock in milliseconds.
pub(crate) fn now_ms(window: &Window) -> f64 {
    window.performance().map_or(0.0, |p| p.now())
}

pub(crate) struct Driver {
    window: Window,
    anim: RefCell<Animator<DomSurface>>,
    timeout: Cell<Option<i32>>,
    frame: Cell<Option<i32>>,
    on_timeout: Closure<dyn FnMut()>,
    on_frame: Closure<dyn FnMut()>,
    on_resize: Closure<dyn FnMut()>,
}

impl Driver {
    /// Wire the callbacks, listen for resizes and start the animator.
    pub(crate) fn spawn(anim: Animator<DomSurface>) -> Result<Rc<Self>> {
        let window = window()?;
        let driver = Rc::new_cyclic(|weak: &Weak<Driver>| {
            let (w_timeout, w_frame, w_resize) = (weak.clone(), weak.clone(), weak.clone());
            Driver {
                window,
                anim: RefCell::new(anim),
                timeout: Cell::new(None),
                frame: Cell::new(None),
                on_timeout: Closure::<dyn FnMut()>::new(move || {
                    if let Some(driver) = w_timeout.upgrade() {
                        driver.timeout.set(None);
                        driver.fire();
                    }
                }),
                on_frame: Closure::<dyn FnMut()>::new(move || {
                    if let Some(driver) = w_frame.upgrade() {
                        driver.frame.set(None);
                        driver.fire();
                    }
                }),
                on_resize: Closure::<dyn FnMut()>::new(move || {
                    if let Some(driver) = w_resize.upgrade() {
                        driver.resize();
                    }
                }),
            }
        });

        driver
            .window
            .add_event_listener_with_callback("resize", driver.on_resize.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("failed to add resize listener: {e:?}"))?;
        let wake = driver.anim.borrow_mut().start(now_ms(&driver.window));
        driver.schedule(wake);
        RUNNING.with(|running| running.borrow_mut().push(Rc::clone(&driver)));
        Ok(driver)
    }

    pub(crate) fn with_animator<R>(&self, f: impl FnOnce(&Animator<DomSurface>) -> R) -> R {
        f(&self.anim.borrow())
    }

    /// Dispose the animator, drop pending callbacks, stop listening for resizes and
    /// release the registry's hold on this driver.
    pub(crate) fn dispose(&self) {
        self.anim.borrow_mut().dispose();
        self.unhook();
        let released = RUNNING.with(|running| {
            let mut running = running.borrow_mut();
            running
                .iter()
                .position(|d| std::ptr::eq(Rc::as_ptr(d), self))
                .map(|i| running.swap_remove(i))
        });
        // Dropped outside the registry borrow.
        drop(released);
    }

    fn unhook(&self) {
        self.cancel();
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
    }

    fn fire(&self) {
        let wake = self.anim.borrow_mut().poll(now_ms(&self.window));
        self.schedule(wake);
    }

    fn resize(&self) {
        let wake = self.anim.borrow_mut().on_resize(now_ms(&self.window));
        self.schedule(wake);
    }

    fn schedule(&self, wake: Wake) {
        self.cancel();
        let scheduled = match wake {
            Wake::NextFrame => self
                .window
                .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
                .map(|id| self.frame.set(Some(id))),
            Wake::After(ms) => self
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    self.on_timeout.as_ref().unchecked_ref(),
                    ms.ceil() as i32,
                )
                .map(|id| self.timeout.set(Some(id))),
            Wake::Never => Ok(()),
        };
        if let Err(e) = scheduled {
            warn!("tagline wake-up not scheduled: {e:?}");
        }
    }

    fn cancel(&self) {
        if let Some(id) = self.timeout.take() {
            self.window.clear_timeout_with_handle(id);
        }
        if let Some(id) = self.frame.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        // The closures die with the driver; the browser must not call them afterwards.
        self.unhook();
    }
}
