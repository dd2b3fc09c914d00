//! Deferred-tick scheduling.
//!
//! The sequence runner never sleeps itself. It hands each step to a
//! [`Scheduler`], which later delivers a [`SequenceTick`] back to whoever owns
//! the state machine. [`VirtualScheduler`] fires ticks when its clock is
//! advanced by hand; [`TokioScheduler`] fires them from a `tokio::time` driver.

use std::collections::BTreeMap;
use std::time::Duration;

use futures::channel::mpsc::UnboundedSender;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Identifier of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Identifier of one sequence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

/// Payload delivered when a sequence timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceTick {
    /// The run that scheduled this tick.
    pub run: RunId,
    /// Index of the script step.
    pub step: usize,
}

/// Something that can deliver a tick after a delay, and take it back.
pub trait Scheduler {
    /// Arranges for `tick` to be delivered once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration, tick: SequenceTick) -> TimerId;

    /// Cancels a timer. Unknown or already fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Scheduler driven by an explicitly advanced virtual clock.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_id: u64,
    /// Keyed by (deadline, id) so equal deadlines fire in scheduling order.
    pending: BTreeMap<(Duration, TimerId), SequenceTick>,
}

impl VirtualScheduler {
    /// Creates a scheduler with its clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers that have not fired or been cancelled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Moves the clock forward and returns every tick that came due, in order.
    pub fn advance(&mut self, by: Duration) -> Vec<SequenceTick> {
        self.now += by;

        let mut fired = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            fired.push(entry.remove());
        }
        fired
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay: Duration, tick: SequenceTick) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert((self.now + delay, id), tick);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|(_, timer), _| *timer != id);
    }
}

/// Requests from a [`TokioScheduler`] to its driver task.
#[derive(Debug)]
enum Command {
    Schedule {
        deadline: Instant,
        id: TimerId,
        tick: SequenceTick,
    },
    Cancel(TimerId),
}

/// Scheduler backed by a single `tokio` driver task.
///
/// The driver owns every pending timer and sends fired ticks on the channel
/// given at construction, in deadline order with ties broken by scheduling
/// order. It is spawned on the first `schedule` call, which must happen inside
/// a tokio runtime. Dropping the scheduler stops the driver, so timers that
/// have not fired never will.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: UnboundedSender<SequenceTick>,
    next_id: u64,
    driver: Option<Driver>,
}

#[derive(Debug)]
struct Driver {
    commands: mpsc::UnboundedSender<Command>,
    handle: JoinHandle<()>,
}

impl TokioScheduler {
    /// Creates a scheduler delivering ticks to `tx`.
    pub fn new(tx: UnboundedSender<SequenceTick>) -> Self {
        Self {
            tx,
            next_id: 0,
            driver: None,
        }
    }

    /// Stops the driver task, dropping every timer that has not fired.
    pub fn shutdown(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.handle.abort();
        }
    }

    fn commands(&mut self) -> &mpsc::UnboundedSender<Command> {
        let driver = self.driver.get_or_insert_with(|| {
            let (commands, rx) = mpsc::unbounded_channel();
            let handle = tokio::spawn(drive(rx, self.tx.clone()));
            Driver { commands, handle }
        });
        &driver.commands
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, tick: SequenceTick) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let command = Command::Schedule {
            deadline: Instant::now() + delay,
            id,
            tick,
        };
        if self.commands().send(command).is_err() {
            tracing::debug!("Timer driver gone, dropping tick for step {}", tick.step);
        }
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(driver) = &self.driver {
            let _ = driver.commands.send(Command::Cancel(id));
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Driver loop: sleeps until the earliest deadline, then sends every due tick.
async fn drive(
    mut commands: mpsc::UnboundedReceiver<Command>,
    tx: UnboundedSender<SequenceTick>,
) {
    let mut pending: BTreeMap<(Instant, TimerId), SequenceTick> = BTreeMap::new();

    loop {
        let next = pending.keys().next().map(|(deadline, _)| *deadline);

        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Schedule { deadline, id, tick }) => {
                    pending.insert((deadline, id), tick);
                }
                Some(Command::Cancel(id)) => {
                    pending.retain(|(_, timer), _| *timer != id);
                }
                None => break,
            },
            _ = tokio::time::sleep_until(next.unwrap_or_else(Instant::now)), if next.is_some() => {
                let now = Instant::now();
                while let Some(entry) = pending.first_entry() {
                    if entry.key().0 > now {
                        break;
                    }
                    let tick = entry.remove();
                    if tx.unbounded_send(tick).is_err() {
                        tracing::debug!("Tick receiver closed, stopping timer driver");
                        return;
                    }
                }
            }
        }
    }
}
