// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use strum_macros::EnumDiscriminants;

/// Represents a high-level event in the system.
///
/// Each `Event` wraps an [`EventKind`], which defines the actual type
/// and data carried by the event.
///
/// This structure is designed to be passed through an [`EventBus`]
/// between asynchronous modules.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// The inner event type and associated data.
    pub kind: EventKind,
}

impl Event {
    /// Returns the [`EventKindType`] of the wrapped [`EventKind`].
    ///
    /// Only the variant type is reported; any payload data is ignored.
    /// Useful for filtering events without destructuring them.
    pub fn event_type(&self) -> EventKindType {
        EventKindType::from(&self.kind)
    }
}

/// A thread-safe, reference-counted pointer to a [`TrackingSnapshot`](common::snapshot::TrackingSnapshot).
///
/// This type alias wraps a [`TrackingSnapshot`](common::snapshot::TrackingSnapshot) inside an
/// [`Arc`](std::sync::Arc), allowing multiple parts of the program (or multiple modules) to share
/// ownership of the same tracking state without copying it.
pub type TrackingSnapshotPtr = std::sync::Arc<common::snapshot::TrackingSnapshot>;

/// Enumerates the different kinds of events that can be emitted
/// and transmitted via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, EnumDiscriminants)]
#[strum_discriminants(derive(Hash))]
pub enum EventKind {
    /// Indicates that a module shall terminate.
    QuitEvent,

    /// Requests that the tracker starts following a vehicle.
    ///
    /// The payload is the raw vehicle identifier as the user entered it,
    /// before any normalization or validation.
    TrackVehicleEvent(String),

    /// Requests that the tracker stops following the current vehicle.
    StopTrackingEvent,

    /// A tracking state update.
    ///
    /// This event carries a [`common::snapshot::TrackingSnapshot`] structure
    /// with the currently tracked vehicle, its last known location and any
    /// pending error message.
    TrackingSnapshotEvent(TrackingSnapshotPtr),

    /// Confirms that tracking has stopped and the session is idle again.
    TrackingStoppedEvent,

    /// Requests that the map switches to the base layer with the given key.
    SelectLayerEvent(String),
}

/// The payload-free discriminant of an [`EventKind`].
///
/// Allows comparing and storing event types without cloning payload data.
pub type EventKindType = EventKindDiscriminants;

/// Extracts a reference to the payload of a specific [`EventKind`] variant.
///
/// Expands to an `Option` holding a reference to the payload when the given
/// expression matches the named variant, and `None` otherwise.
#[macro_export]
macro_rules! payload_ref {
    ($kind:expr, $variant:path) => {
        match &$kind {
            $variant(payload) => Some(payload),
            _ => None,
        }
    };
}

/// A simple asynchronous event bus for publishing and subscribing to [`Event`]s.
///
/// The event bus uses a [`tokio::sync::broadcast::channel`] under the hood,
/// allowing multiple receivers to listen for the same stream of events.
///
/// Each published event is cloned and distributed to all active subscribers.
/// If no subscribers exist at the time of publication, the event is discarded silently.
pub struct EventBus {
    /// The broadcast sender used internally to distribute events.
    sender: tokio::sync::broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new [`EventBus`] with a fixed buffer capacity of 100 messages.
    ///
    /// When the buffer is full, the oldest messages are dropped automatically
    /// as new ones are published.
    pub fn new() -> Self {
        let (sender, _) = tokio::sync::broadcast::channel(100);
        EventBus { sender }
    }

    /// Subscribes to the event bus and returns a [`tokio::sync::broadcast::Receiver`].
    ///
    /// The returned receiver will receive all future events published after the
    /// subscription is created.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Publishes an [`Event`] to all active subscribers.
    ///
    /// This method clones the event and attempts to send it to each receiver.
    /// If no subscribers exist, the event is discarded silently.
    ///
    /// # Arguments
    ///
    /// * `event` - The event instance to be published.
    pub fn publish(&self, event: &Event) {
        let _ = self.sender.send(event.clone());
    }

    /// Creates a [`ModuleCtx`] bound to this [`EventBus`].
    ///
    /// The returned context can be used by modules implementing [`Module`]
    /// to send and receive events within their execution scope.
    pub fn context(&self) -> ModuleCtx {
        ModuleCtx::new(self)
    }
}

/// Provides a default instance of [`EventBus`].
impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Defines the common interface for an asynchronous module
/// that can be executed and communicate via the [`EventBus`].
#[async_trait::async_trait]
pub trait Module {
    /// Runs the module asynchronously until completion.
    ///
    /// This function typically contains the module's main event loop,
    /// reacting to messages received through the [`ModuleCtx`].
    async fn run(&mut self) -> Result<(), ()>;
}

/// Provides a module-scoped context for interacting with the [`EventBus`].
///
/// Each `ModuleCtx` owns both a sender and a receiver, allowing the module
/// to both publish and listen for events concurrently.
pub struct ModuleCtx {
    /// The broadcast sender used to publish events.
    pub sender: tokio::sync::broadcast::Sender<Event>,

    /// The broadcast receiver used to listen for events.
    pub receiver: tokio::sync::broadcast::Receiver<Event>,
}

impl ModuleCtx {
    /// Constructs a new [`ModuleCtx`] from the given [`EventBus`].
    ///
    /// Clones the internal broadcast sender and creates a new receiver.
    pub fn new(event_bus: &EventBus) -> Self {
        ModuleCtx {
            sender: event_bus.sender.clone(),
            receiver: event_bus.subscribe(),
        }
    }

    /// Wraps the given [`EventKind`] in an [`Event`] and publishes it.
    ///
    /// # Arguments
    ///
    /// * `kind` - The event type and payload to publish.
    ///
    /// # Errors
    ///
    /// Returns an error when the event could not be delivered because no
    /// active receiver exists on the bus.
    pub fn publish_event(
        &self,
        kind: EventKind,
    ) -> Result<(), tokio::sync::broadcast::error::SendError<Event>> {
        self.sender.send(Event { kind }).map(|_| ())
    }
}

pub mod test_helper;
