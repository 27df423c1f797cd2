//! Trailing-edge debouncer
//!
//! Every trigger starts a fresh quiet window; only the action of the last
//! trigger runs, once its window elapses without another trigger.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use futures::task::{LocalSpawn, LocalSpawnExt};

use super::traits::Sleeper;

pub struct Debouncer {
    window: Duration,
    generation: Rc<Cell<u64>>,
    sleeper: Rc<dyn Sleeper>,
    spawner: Rc<dyn LocalSpawn>,
}

impl Debouncer {
    pub fn new(window: Duration, sleeper: Rc<dyn Sleeper>, spawner: Rc<dyn LocalSpawn>) -> Self {
        Self {
            window,
            generation: Rc::new(Cell::new(0)),
            sleeper,
            spawner,
        }
    }

    /// Schedule `action`, cancelling any action still waiting.
    pub fn trigger<F>(&self, action: F)
    where
        F: FnOnce() + 'static,
    {
        let ticket = self.generation.get().wrapping_add(1);
        self.generation.set(ticket);

        let generation = Rc::clone(&self.generation);
        let delay = self.sleeper.sleep(self.window);
        let task = async move {
            delay.await;
            if generation.get() == ticket {
                action();
            }
        };

        if let Err(e) = self.spawner.spawn_local(task) {
            tracing::warn!("Failed to schedule debounced action: {}", e);
        }
    }

    /// Drop the waiting action, if any.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::testing::ManualSleeper;
    use futures::executor::LocalPool;
    use std::cell::RefCell;

    fn debouncer(pool: &LocalPool, sleeper: &Rc<ManualSleeper>) -> Debouncer {
        Debouncer::new(
            Duration::from_millis(100),
            Rc::clone(sleeper) as Rc<dyn Sleeper>,
            Rc::new(pool.spawner()),
        )
    }

    #[test]
    fn test_burst_runs_last_action_once() {
        let mut pool = LocalPool::new();
        let sleeper = Rc::new(ManualSleeper::default());
        let debouncer = debouncer(&pool, &sleeper);
        let fired = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let fired = Rc::clone(&fired);
            debouncer.trigger(move || fired.borrow_mut().push(i));
        }
        pool.run_until_stalled();
        assert!(fired.borrow().is_empty());
        assert_eq!(sleeper.waiting(), 3);
        assert_eq!(sleeper.requested(), vec![Duration::from_millis(100); 3]);

        sleeper.wake_all();
        pool.run_until_stalled();
        assert_eq!(*fired.borrow(), vec![2]);
    }

    #[test]
    fn test_separate_windows_each_fire() {
        let mut pool = LocalPool::new();
        let sleeper = Rc::new(ManualSleeper::default());
        let debouncer = debouncer(&pool, &sleeper);
        let count = Rc::new(Cell::new(0));

        for _ in 0..2 {
            let count = Rc::clone(&count);
            debouncer.trigger(move || count.set(count.get() + 1));
            pool.run_until_stalled();
            sleeper.wake_all();
            pool.run_until_stalled();
        }
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_cancel_drops_waiting_action() {
        let mut pool = LocalPool::new();
        let sleeper = Rc::new(ManualSleeper::default());
        let debouncer = debouncer(&pool, &sleeper);
        let count = Rc::new(Cell::new(0));

        let counter = Rc::clone(&count);
        debouncer.trigger(move || counter.set(counter.get() + 1));
        debouncer.cancel();
        pool.run_until_stalled();
        sleeper.wake_all();
        pool.run_until_stalled();
        assert_eq!(count.get(), 0);
    }
}
