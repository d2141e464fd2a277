//! Request dispatch between the UI loop and the HTTP client.
//!
//! The UI thread owns `App` and never awaits the network. Each [`Request`]
//! runs as its own tokio task; the result comes back as a [`Completion`]
//! on an unbounded channel that the event loop drains between frames.
//!
//! ```text
//!   App ──Request──▶ Dispatcher ──spawn──▶ TriviaClient
//!    ▲                                          │
//!    └─────────── Completion (mpsc) ◀───────────┘
//! ```
//!
//! There is no ordering or cancellation: two overlapping requests complete
//! in whatever order the server answers, and the last one applied wins.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{ApiError, QuestionList, TriviaClient};
use crate::question::NewQuestion;

/// One call the view wants made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Unfiltered listing
    ListPage { page: u32 },
    /// Listing restricted to one category
    ListByCategory { category: u32, page: u32 },
    Search { term: String },
    Delete { id: u32 },
    Create { question: NewQuestion },
}

impl Request {
    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            Request::ListPage { .. } => "list",
            Request::ListByCategory { .. } => "list-by-category",
            Request::Search { .. } => "search",
            Request::Delete { .. } => "delete",
            Request::Create { .. } => "create",
        }
    }
}

/// Successful result of a [`Request`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Questions(QuestionList),
    Deleted,
    Created(Option<u32>),
}

/// A finished request, tagged with what was asked
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub request: Request,
    pub result: Result<Payload, ApiError>,
}

/// Spawns requests and hands back completions
pub struct Dispatcher {
    client: TriviaClient,
    tx: UnboundedSender<Completion>,
    next_seq: u64,
}

impl Dispatcher {
    pub fn new(client: TriviaClient) -> (Self, UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            client,
            tx,
            next_seq: 0,
        };
        (dispatcher, rx)
    }

    /// Fire a request; its completion arrives on the receiver later
    pub fn dispatch(&mut self, request: Request) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        tracing::info!(seq, kind = request.label(), "dispatching {:?}", request);

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = execute(&client, &request).await;
            // Receiver gone means the UI loop has exited
            let _ = tx.send(Completion {
                seq,
                request,
                result,
            });
        });
        seq
    }
}

/// Run one request against the server
pub async fn execute(client: &TriviaClient, request: &Request) -> Result<Payload, ApiError> {
    match request {
        Request::ListPage { page } => client.list_questions(*page).await.map(Payload::Questions),
        Request::ListByCategory { category, page } => client
            .list_by_category(*category, *page)
            .await
            .map(Payload::Questions),
        Request::Search { term } => client.search(term).await.map(Payload::Questions),
        Request::Delete { id } => client.delete_question(*id).await.map(|_| Payload::Deleted),
        Request::Create { question } => client
            .create_question(question)
            .await
            .map(Payload::Created),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Request::ListPage { page: 1 }.label(), "list");
        assert_eq!(
            Request::ListByCategory { category: 2, page: 1 }.label(),
            "list-by-category"
        );
        assert_eq!(Request::Delete { id: 4 }.label(), "delete");
    }

    #[tokio::test]
    async fn test_unreachable_server_completes_with_error() {
        // Port 9 (discard) on localhost is not an HTTP server
        let client = TriviaClient::new("http://127.0.0.1:9");
        let (mut dispatcher, mut rx) = Dispatcher::new(client);

        let seq = dispatcher.dispatch(Request::ListPage { page: 1 });
        let completion = rx.recv().await.unwrap();

        assert_eq!(completion.seq, seq);
        assert_eq!(completion.request, Request::ListPage { page: 1 });
        assert!(completion.result.is_err());
    }
}
