//! Single-threaded message runtime.
//!
//! The runtime owns the application and a FIFO of pending messages. Messages
//! sent while `update` is running (for example by a synchronous completion
//! callback) are queued and drained by the outermost dispatch, so `update`
//! is never re-entered.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::Application;

type Observer<A> = Box<dyn Fn(&A)>;

struct Shared<A: Application> {
    app: RefCell<Option<A>>,
    queue: RefCell<VecDeque<A::Message>>,
    observer: RefCell<Option<Observer<A>>>,
}

/// Handle used by asynchronous work to post messages back to the application.
pub struct Sender<M> {
    deliver: Rc<dyn Fn(M)>,
}

impl<M> Clone for Sender<M> {
    fn clone(&self) -> Self {
        Self {
            deliver: Rc::clone(&self.deliver),
        }
    }
}

impl<M> fmt::Debug for Sender<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sender")
    }
}

impl<M: 'static> Sender<M> {
    /// Build a sender from a plain function. Shells and tests use this to
    /// capture messages without a runtime.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(M) + 'static,
    {
        Self {
            deliver: Rc::new(f),
        }
    }

    /// Post a message. Delivery happens immediately unless an update is in
    /// progress, in which case it runs right after that update.
    pub fn send(&self, message: M) {
        (self.deliver)(message);
    }
}

/// Owns an application and feeds it messages one at a time.
pub struct Runtime<A: Application> {
    shared: Rc<Shared<A>>,
}

impl<A: Application + 'static> Runtime<A> {
    /// Create the application with a sender wired back into this runtime.
    pub fn new<F>(init: F) -> Self
    where
        F: FnOnce(Sender<A::Message>) -> A,
    {
        let shared: Rc<Shared<A>> = Rc::new(Shared {
            app: RefCell::new(None),
            queue: RefCell::new(VecDeque::new()),
            observer: RefCell::new(None),
        });

        let weak: Weak<Shared<A>> = Rc::downgrade(&shared);
        let sender = Sender::from_fn(move |message| match weak.upgrade() {
            Some(shared) => {
                shared.queue.borrow_mut().push_back(message);
                drain(&shared);
            }
            None => log::debug!("Message dropped, runtime already gone"),
        });

        let app = init(sender);
        *shared.app.borrow_mut() = Some(app);

        let runtime = Self { shared };
        // Anything posted from inside `init` is still waiting.
        runtime.pump();
        runtime
    }

    /// Queue a message and process the queue.
    pub fn dispatch(&self, message: A::Message) {
        self.shared.queue.borrow_mut().push_back(message);
        self.pump();
    }

    /// Process every queued message.
    pub fn pump(&self) {
        drain(&self.shared);
    }

    /// Register a function that sees the application every time the queue
    /// has been drained after at least one update. Shells render from here.
    ///
    /// The observer must not send messages; they would wait for the next dispatch.
    pub fn set_observer<F>(&self, observer: F)
    where
        F: Fn(&A) + 'static,
    {
        *self.shared.observer.borrow_mut() = Some(Box::new(observer));
    }

    /// Number of messages waiting to be processed.
    pub fn pending(&self) -> usize {
        self.shared.queue.borrow().len()
    }

    /// Read the application state, e.g. to render it.
    ///
    /// Returns `None` when called from inside `update`.
    pub fn with_app<R>(&self, f: impl FnOnce(&A) -> R) -> Option<R> {
        let slot = self.shared.app.try_borrow().ok()?;
        slot.as_ref().map(f)
    }
}

impl<A: Application> Clone for Runtime<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

fn drain<A: Application>(shared: &Shared<A>) {
    // Already inside an update: the outer drain loop will pick the message up.
    let Ok(mut slot) = shared.app.try_borrow_mut() else {
        return;
    };
    let Some(app) = slot.as_mut() else {
        return;
    };

    let mut processed = 0usize;
    loop {
        let next = shared.queue.borrow_mut().pop_front();
        let Some(message) = next else {
            break;
        };
        app.update(message);
        processed += 1;
    }

    if processed > 0 {
        if let Some(observer) = shared.observer.borrow().as_ref() {
            observer(app);
        }
    }
}
