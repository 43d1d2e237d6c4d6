use canteen::clients::{FeedbackClient, OrderClient, UserClient};
use canteen::error::ErrorKind;
use canteen::model::{
    Feedback, FeedbackId, Order, OrderCreate, OrderId, OrderStatus, Role, User, UserId,
};
use canteen_store::mock::MockClient;
use canteen_store::{ActorClient, StoreError};
use chrono::{DateTime, TimeZone, Utc};
use tokio::task::JoinHandle;

/// Real order store with mocked user and feedback stores.
///
/// Exercises the order hooks (owner check on create, feedback cascade on
/// delete) without spawning the stores they depend on.
struct Harness {
    users: MockClient<User>,
    feedback: MockClient<Feedback>,
    orders: OrderClient,
    handle: JoinHandle<()>,
}

impl Harness {
    fn start() -> Self {
        let users = MockClient::<User>::new();
        let feedback = MockClient::<Feedback>::new();
        let (order_actor, orders) = canteen::order_actor::new(32);
        let handle = tokio::spawn(order_actor.run((
            UserClient::new(users.client()),
            FeedbackClient::new(feedback.client()),
        )));
        Self {
            users,
            feedback,
            orders,
            handle,
        }
    }

    async fn finish(self) {
        self.users.verify();
        self.feedback.verify();
        drop(self.orders);
        self.handle.await.unwrap();
    }
}

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap()
}

fn kojo() -> User {
    User {
        id: UserId(1),
        name: "Kojo".into(),
        email: "kojo@canteen.example".into(),
        role: Role::Worker,
        profile_image: None,
        created_at: None,
    }
}

fn waakye_for(user: u32) -> OrderCreate {
    OrderCreate {
        user_id: UserId(user),
        meal_id: None,
        meal_name: "Waakye".into(),
        quantity: 2,
        price_per_unit: 30.0,
        ordered_by_role: Role::Worker,
        placed_at: noon(),
    }
}

#[tokio::test]
async fn test_create_checks_the_owner() {
    let mut harness = Harness::start();
    harness.users.expect_get(UserId(1)).return_ok(Some(kojo()));

    let order = harness.orders.create_order(waakye_for(1)).await.unwrap();
    assert_eq!(order.id, OrderId(1));
    assert_eq!(order.total_price, 60.0);
    assert_eq!(order.status, OrderStatus::Pending);

    let stored: Option<Order> = harness.orders.get(order.id).await.unwrap();
    assert_eq!(stored, Some(order));

    harness.finish().await;
}

#[tokio::test]
async fn test_create_for_unknown_user_is_rejected() {
    let mut harness = Harness::start();
    harness.users.expect_get(UserId(9)).return_ok(None);

    let err = harness.orders.create_order(waakye_for(9)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(harness.orders.list().await.unwrap().is_empty());

    harness.finish().await;
}

#[tokio::test]
async fn test_delete_removes_feedback_first() {
    let mut harness = Harness::start();
    harness.users.expect_get(UserId(1)).return_ok(Some(kojo()));
    let order = harness.orders.create_order(waakye_for(1)).await.unwrap();

    let feedback = Feedback {
        id: FeedbackId(1),
        order_id: order.id,
        user_id: UserId(1),
        eaten: "yes".into(),
        delivered: "yes".into(),
        comment: String::new(),
        created_at: noon(),
    };
    harness.feedback.expect_list().return_ok(vec![feedback]);
    harness.feedback.expect_delete(FeedbackId(1)).return_ok(());

    harness.orders.delete(order.id).await.unwrap();
    assert_eq!(harness.orders.get(order.id).await.unwrap(), None);

    harness.finish().await;
}

#[tokio::test]
async fn test_order_survives_failed_cascade() {
    let mut harness = Harness::start();
    harness.users.expect_get(UserId(1)).return_ok(Some(kojo()));
    let order = harness.orders.create_order(waakye_for(1)).await.unwrap();

    harness.feedback.expect_list().return_err(StoreError::ActorClosed);

    let err = harness.orders.delete(order.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persistence);
    assert!(harness.orders.get(order.id).await.unwrap().is_some());

    harness.finish().await;
}
