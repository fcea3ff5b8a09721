// ---------------------------------------------------------------------------
// Change signal – a zero-payload event with any number of subscribers
// ---------------------------------------------------------------------------

/// Handle returned by [`ChangeSignal::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Synchronous notification channel.
///
/// `emit` calls every subscriber once, in subscription order, before
/// returning. There is no batching.
#[derive(Default)]
pub struct ChangeSignal {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut()>)>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn emit(&mut self) {
        for (_, callback) in &mut self.subscribers {
            callback();
        }
    }
}

impl std::fmt::Debug for ChangeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeSignal")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
