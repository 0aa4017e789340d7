//! Completion notices sent when a request finishes.

use crate::pathfinding::PathFinderRequest;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Identifies the sender or receiver of a [`Telegram`].
pub type AgentId = Uuid;

/// A message about a finished request.
///
/// The request travels by mutable reference, so a dispatcher that delivers
/// immediately can renew it and the controller will run it again in the same
/// call.
pub struct Telegram<'a, N, H> {
    pub sender: AgentId,
    pub receiver: Option<AgentId>,
    pub code: i32,
    pub request: &'a mut PathFinderRequest<N, H>,
}

pub trait MessageDispatcher<N, H> {
    fn dispatch(&mut self, telegram: Telegram<'_, N, H>);
}

impl<N, H, F> MessageDispatcher<N, H> for F
where
    F: FnMut(Telegram<'_, N, H>),
{
    fn dispatch(&mut self, telegram: Telegram<'_, N, H>) {
        self(telegram)
    }
}

/// Drops every telegram.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDispatcher;

impl<N, H> MessageDispatcher<N, H> for NullDispatcher {
    fn dispatch(&mut self, _telegram: Telegram<'_, N, H>) {}
}

/// What a receiver learns about a finished request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResponse<N> {
    pub sender: AgentId,
    pub receiver: Option<AgentId>,
    pub code: i32,
    pub path_found: bool,
    pub nodes: Vec<N>,
    pub execution_frames: u32,
}

impl<N: Clone> PathResponse<N> {
    pub fn from_telegram<H>(telegram: &Telegram<'_, N, H>) -> Self {
        Self {
            sender: telegram.sender,
            receiver: telegram.receiver,
            code: telegram.code,
            path_found: telegram.request.path_found(),
            nodes: telegram.request.result_path.as_slice().to_vec(),
            execution_frames: telegram.request.execution_frames(),
        }
    }
}

/// Stores a snapshot of every telegram for later delivery.
#[derive(Debug, Clone)]
pub struct TelegramQueue<N> {
    responses: VecDeque<PathResponse<N>>,
}

impl<N> TelegramQueue<N> {
    pub fn new() -> Self {
        Self {
            responses: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Takes the stored responses, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = PathResponse<N>> + '_ {
        self.responses.drain(..)
    }
}

impl<N> Default for TelegramQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone, H> MessageDispatcher<N, H> for TelegramQueue<N> {
    fn dispatch(&mut self, telegram: Telegram<'_, N, H>) {
        self.responses.push_back(PathResponse::from_telegram(&telegram));
    }
}
