use directive::ComponentId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::mpsc::{self, Receiver, Sender};

mod queue;
pub use queue::UpdateQueue;

/// Client-to-server notification that a component variable changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableUpdate {
    pub component: ComponentId,
    pub key: String,
    pub value: Value,
    pub immediate: bool,
}

impl VariableUpdate {
    pub fn new(
        component: ComponentId,
        key: impl Into<String>,
        value: impl Into<Value>,
        immediate: bool,
    ) -> Self {
        Self {
            component,
            key: key.into(),
            value: value.into(),
            immediate,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ChannelError {
    #[error("send failed")]
    SendFailed,
    #[error("receive failed")]
    RecvFailed,
}

pub trait UpdateChannel: Send {
    fn send(&self, update: VariableUpdate) -> Result<(), ChannelError>;
    fn try_recv(&self) -> Result<Option<VariableUpdate>, ChannelError>;
}

/// Clonable producer handle, injected into widgets at bind time.
#[derive(Debug, Clone)]
pub struct UpdateSender {
    inner: Sender<VariableUpdate>,
}

impl UpdateSender {
    pub fn send(&self, update: VariableUpdate) -> Result<(), ChannelError> {
        self.inner.send(update).map_err(|_| ChannelError::SendFailed)
    }
}

#[derive(Debug)]
pub struct InProcessChannel {
    sender: Sender<VariableUpdate>,
    receiver: Receiver<VariableUpdate>,
}

impl InProcessChannel {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> UpdateSender {
        UpdateSender {
            inner: self.sender.clone(),
        }
    }
}

impl Default for InProcessChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateChannel for InProcessChannel {
    fn send(&self, update: VariableUpdate) -> Result<(), ChannelError> {
        self.sender.send(update).map_err(|_| ChannelError::SendFailed)
    }

    fn try_recv(&self) -> Result<Option<VariableUpdate>, ChannelError> {
        match self.receiver.try_recv() {
            Ok(update) => Ok(Some(update)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(ChannelError::RecvFailed),
        }
    }
}
