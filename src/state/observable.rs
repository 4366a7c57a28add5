//! Observable - Synchronous Value Holder
//!
//! A single-threaded value with an observer list. Observers run synchronously
//! inside `set`/`update`, in registration order.
//!
//! ```text
//! subscribe → observer(current)
//! set(v)    → value = v → observer(v) for each subscriber
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Observer<T> = Rc<dyn Fn(&T)>;

struct Subscribers<T> {
    next_id: u64,
    entries: Vec<(u64, Observer<T>)>,
}

impl<T> Subscribers<T> {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }
}

/// Value holder notifying its subscribers on every change
pub struct Observable<T> {
    value: RefCell<T>,
    subscribers: Rc<RefCell<Subscribers<T>>>,
    /// Values waiting to be dispatched while a dispatch is running
    pending: RefCell<VecDeque<T>>,
    /// Value being delivered by the running dispatch
    in_flight: RefCell<Option<T>>,
    dispatching: Cell<bool>,
}

impl<T: Clone + 'static> Observable<T> {
    /// Create an observable holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            value: RefCell::new(initial),
            subscribers: Rc::new(RefCell::new(Subscribers {
                next_id: 0,
                entries: Vec::new(),
            })),
            pending: RefCell::new(VecDeque::new()),
            in_flight: RefCell::new(None),
            dispatching: Cell::new(false),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Register an observer.
    ///
    /// The observer is invoked once with the current value before this returns,
    /// then with every subsequent value. Subscribing from inside an observer
    /// replays the value being delivered; queued values follow in order.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        let observer: Observer<T> = Rc::new(observer);
        let id = {
            let mut subscribers = self.subscribers.borrow_mut();
            let id = subscribers.next_id;
            subscribers.next_id += 1;
            subscribers.entries.push((id, observer.clone()));
            id
        };

        let current = self.in_flight.borrow().clone().unwrap_or_else(|| self.get());
        observer(&current);

        let weak: Weak<RefCell<Subscribers<T>>> = Rc::downgrade(&self.subscribers);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(subscribers) = weak.upgrade() {
                    subscribers
                        .borrow_mut()
                        .entries
                        .retain(|(entry_id, _)| *entry_id != id);
                }
            })),
        }
    }

    /// Replace the value and notify every subscriber
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value.clone();
        self.pending.borrow_mut().push_back(value);

        // A set issued from inside an observer is delivered after the
        // current value has reached every subscriber.
        if self.dispatching.get() {
            return;
        }

        let _guard = DispatchGuard::enter(self);
        loop {
            let Some(next) = self.pending.borrow_mut().pop_front() else {
                break;
            };
            *self.in_flight.borrow_mut() = Some(next.clone());
            self.dispatch(&next);
        }
    }

    /// Replace the value with `transform(current)` and notify subscribers
    pub fn update(&self, transform: impl FnOnce(T) -> T) {
        let next = transform(self.get());
        self.set(next);
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().entries.len()
    }

    fn dispatch(&self, value: &T) {
        let snapshot: Vec<(u64, Observer<T>)> = self
            .subscribers
            .borrow()
            .entries
            .iter()
            .map(|(id, observer)| (*id, observer.clone()))
            .collect();

        for (id, observer) in snapshot {
            // Skip observers removed by an earlier observer in this round
            if !self.subscribers.borrow().contains(id) {
                continue;
            }
            observer(value);
        }
    }
}

impl<T: Clone + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value.borrow())
            .field("subscribers", &self.subscribers.borrow().entries.len())
            .finish()
    }
}

/// Ends a dispatch round, dropping undelivered values if an observer panicked
struct DispatchGuard<'a, T>(&'a Observable<T>);

impl<'a, T> DispatchGuard<'a, T> {
    fn enter(observable: &'a Observable<T>) -> Self {
        observable.dispatching.set(true);
        Self(observable)
    }
}

impl<T> Drop for DispatchGuard<'_, T> {
    fn drop(&mut self) {
        self.0.pending.borrow_mut().clear();
        self.0.in_flight.borrow_mut().take();
        self.0.dispatching.set(false);
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping the handle leaves the observer registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[must_use = "call `unsubscribe` to stop receiving values"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the observer. No-op if the observable is gone.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
