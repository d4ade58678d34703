use std::future::Future;

use futures::{StreamExt, stream::FuturesUnordered};

/// Counting join over independently completing fetches.
///
/// Every [`enter`](Self::enter) raises the pending count, every completed
/// fetch lowers it, and the continuation handed to [`wait`](Self::wait)
/// runs once the count is back at zero. `wait` consumes the barrier so the
/// continuation can only run once.
pub struct CompletionBarrier<F: Future> {
    pending: usize,
    in_flight: FuturesUnordered<F>,
}

impl<F: Future> Default for CompletionBarrier<F> {
    fn default() -> Self {
        Self {
            pending: 0,
            in_flight: FuturesUnordered::new(),
        }
    }
}

impl<F: Future> CompletionBarrier<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, fetch: F) {
        self.pending += 1;
        self.in_flight.push(fetch);
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Drives all fetches on the current task, then calls `notify` with the
    /// results in completion order. With nothing entered `notify` runs
    /// immediately with an empty vector.
    pub async fn wait<N, R>(mut self, notify: N) -> R
    where
        N: FnOnce(Vec<F::Output>) -> R,
    {
        let mut results = Vec::with_capacity(self.pending);

        while let Some(output) = self.in_flight.next().await {
            self.pending -= 1;
            trace!("fetch completed, {} pending", self.pending);
            results.push(output);
        }

        debug_assert_eq!(self.pending, 0);
        notify(results)
    }
}
