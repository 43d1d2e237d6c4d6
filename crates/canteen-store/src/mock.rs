//! # Mock Store & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running store. Use it to
//! test code that sits on top of a client (a service, or a store whose hooks
//! call another store) without spawning the other actors.
//!
//! | | MockClient | Real store actor |
//! |---|---|---|
//! | **State** | none, answers are scripted | real collection |
//! | **Determinism** | fully scripted | scheduler dependent |
//! | **Error injection** | `return_err` | hard |
//!
//! Expectations are consumed in order. A request that does not match the
//! next expectation panics the mock task, and the caller sees
//! [`StoreError::ActorDropped`].
//!
//! ```rust
//! use canteen_store::mock::MockClient;
//! use canteen_store::{ActorEntity, StoreError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Ticket { id: u32 }
//! #[derive(Debug)] struct TicketCreate;
//! #[derive(Debug)] struct TicketUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("ticket error")] struct TicketError;
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32; type Create = TicketCreate; type Update = TicketUpdate;
//!     type Context = (); type Error = TicketError;
//!     fn from_create_params(id: u32, _: TicketCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id })
//!     }
//!     async fn on_update(&mut self, _: TicketUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Ticket>::new();
//!     mock.expect_list().return_ok(vec![Ticket { id: 1 }]);
//!     mock.expect_get(2).return_err(StoreError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.list().await.unwrap().len(), 1);
//!     assert!(matches!(client.get(2).await, Err(StoreError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::StoreError;
use crate::message::{ResourceRequest, Upserted};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T, StoreError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    List {
        response: Result<Vec<T>, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    Upsert {
        response: Result<Upserted<T>, StoreError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A client backed by scripted answers.
///
/// ```ignore
/// let mut mock = MockClient::<User>::new();
/// mock.expect_get(UserId(1)).return_ok(Some(user));
/// let client = UserClient::new(mock.client());
/// // exercise the code under test...
/// mock.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();
                match (request, expectation) {
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "get for an unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "update for an unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "delete for an unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Upsert { respond_to, .. },
                        Some(Expectation::Upsert { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!(
                            "Unexpected request or expectation mismatch: {}",
                            request.kind()
                        );
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// The client to hand to the code under test.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::Create { response }
        })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Get { id, response }
        })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::List { response }
        })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Update { id, response }
        })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Delete { id, response }
        })
    }

    pub fn expect_upsert(&mut self) -> ExpectationBuilder<T, Upserted<T>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::Upsert { response }
        })
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Queues one expectation once its answer is known.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Expectations<T>,
    build: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: Expectations<T>,
        build: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            build: Box::new(build),
        }
    }

    /// Answer the request with `value`.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Answer the request with `error`.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.build)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// Creates a client and the receiving end of its channel, for tests that
/// want to inspect raw requests and answer them by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is an Update.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, StoreError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Plate {
        id: u32,
        label: String,
    }

    #[derive(Debug)]
    struct PlateCreate {
        label: String,
    }

    #[derive(Debug)]
    struct PlateRelabel(String);

    #[derive(Debug, thiserror::Error)]
    #[error("Plate error")]
    struct PlateError;

    #[async_trait]
    impl ActorEntity for Plate {
        type Id = u32;
        type Create = PlateCreate;
        type Update = PlateRelabel;
        type Context = ();
        type Error = PlateError;

        fn from_create_params(id: u32, params: PlateCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                label: params.label,
            })
        }

        async fn on_update(
            &mut self,
            update: PlateRelabel,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            self.label = update.0;
            Ok(())
        }
    }

    fn plate(id: u32, label: &str) -> Plate {
        Plate {
            id,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_raw_update_request_can_be_answered_by_hand() {
        let (client, mut receiver) = create_mock_client::<Plate>(10);

        let update_task =
            tokio::spawn(async move { client.update(7, PlateRelabel("blue".into())).await });

        let (id, update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, 7);
        assert_eq!(update.0, "blue");
        responder.send(Ok(plate(7, "blue"))).unwrap();

        let result = update_task.await.unwrap();
        assert_eq!(result.unwrap().label, "blue");
    }

    #[tokio::test]
    async fn test_mock_client_answers_in_order() {
        let mut mock = MockClient::<Plate>::new();
        mock.expect_create().return_ok(plate(1, "red"));
        mock.expect_list().return_ok(vec![plate(1, "red")]);
        mock.expect_delete(1).return_ok(());

        let client = mock.client();
        let created = client
            .create(PlateCreate {
                label: "red".into(),
            })
            .await
            .unwrap();
        assert_eq!(created, plate(1, "red"));
        assert_eq!(client.list().await.unwrap(), vec![plate(1, "red")]);
        client.delete(1).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_mismatch_surfaces_as_dropped() {
        let mut mock = MockClient::<Plate>::new();
        mock.expect_list().return_ok(vec![]);

        let result = mock.client().get(3).await;
        assert!(matches!(result, Err(StoreError::ActorDropped)));
    }
}
