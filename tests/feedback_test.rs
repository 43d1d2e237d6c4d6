mod common;

use canteen::context::RequestContext;
use canteen::error::ErrorKind;
use canteen::lifecycle::CanteenSystem;
use canteen::model::{FeedbackFields, OrderId, OrderInput, OrderView, Role};
use common::{midweek_morning, sign_in, staff, start_at, Staff};

async fn worker_order(system: &CanteenSystem, staff: &Staff) -> OrderView {
    system
        .ordering
        .create_order(
            &staff.worker,
            OrderInput::new(staff.worker.actor.id, 1, 40.0).meal_name("Jollof Rice"),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_first_submission_creates_a_resolved_record() {
    let (system, _clock) = start_at(midweek_morning());
    let staff = staff(&system).await;
    let order = worker_order(&system, &staff).await;

    assert_eq!(
        system
            .reconciler
            .get_feedback_for_order(&staff.worker, order.id)
            .await
            .unwrap(),
        None
    );

    let saved = system
        .reconciler
        .save_feedback(&staff.worker, order.id, FeedbackFields::default().eaten("yes"))
        .await
        .unwrap();

    assert_eq!(saved.feedback.eaten, "yes");
    assert_eq!(saved.feedback.delivered, "");
    assert_eq!(saved.feedback.comment, "");
    assert_eq!(saved.feedback.created_at, midweek_morning());
    assert_eq!(saved.order.id, order.id);
    assert_eq!(saved.order.meal_name, "Jollof Rice");
    assert_eq!(saved.order.user_id, staff.worker.actor.id);
    assert_eq!(saved.submitted_by.id, staff.worker.actor.id);
    assert_eq!(saved.submitted_by.email, "kojo@canteen.example");
    assert_eq!(saved.submitted_by.name, "Kojo");

    let fetched = system
        .reconciler
        .get_feedback_for_order(&staff.worker, order.id)
        .await
        .unwrap();
    assert_eq!(fetched, Some(saved));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_partial_edit_preserves_other_fields() {
    let (system, _clock) = start_at(midweek_morning());
    let staff = staff(&system).await;
    let order = worker_order(&system, &staff).await;

    system
        .reconciler
        .save_feedback(
            &staff.worker,
            order.id,
            FeedbackFields::default().eaten("yes").delivered("yes").comment(""),
        )
        .await
        .unwrap();

    let merged = system
        .reconciler
        .save_feedback(&staff.worker, order.id, FeedbackFields::default().comment("x"))
        .await
        .unwrap();

    assert_eq!(merged.feedback.eaten, "yes");
    assert_eq!(merged.feedback.delivered, "yes");
    assert_eq!(merged.feedback.comment, "x");

    let all = system.reconciler.list_feedback(&staff.admin).await.unwrap();
    assert_eq!(all.len(), 1, "one record per order");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_save_is_idempotent() {
    let (system, _clock) = start_at(midweek_morning());
    let staff = staff(&system).await;
    let order = worker_order(&system, &staff).await;
    let fields = FeedbackFields::default().eaten("no").comment("cold");

    let first = system
        .reconciler
        .save_feedback(&staff.worker, order.id, fields.clone())
        .await
        .unwrap();
    let second = system
        .reconciler
        .save_feedback(&staff.worker, order.id, fields)
        .await
        .unwrap();

    assert_eq!(first, second);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_who_may_submit() {
    let (system, _clock) = start_at(midweek_morning());
    let staff = staff(&system).await;
    let order = worker_order(&system, &staff).await;
    let colleague = sign_in(&system, "Yaw", Role::Worker).await;

    let err = system
        .reconciler
        .save_feedback(&colleague, order.id, FeedbackFields::default().eaten("yes"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    let err = system
        .reconciler
        .get_feedback_for_order(&colleague, order.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    let by_caterer = system
        .reconciler
        .save_feedback(&staff.caterer, order.id, FeedbackFields::default().delivered("yes"))
        .await
        .unwrap();
    assert_eq!(by_caterer.submitted_by.id, staff.caterer.actor.id);
    assert_eq!(by_caterer.order.user_id, staff.worker.actor.id);

    let err = system
        .reconciler
        .save_feedback(&staff.admin, OrderId(99), FeedbackFields::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_and_foreign_orders_look_the_same_to_workers() {
    let (system, _clock) = start_at(midweek_morning());
    let staff = staff(&system).await;
    let order = worker_order(&system, &staff).await;
    let colleague = sign_in(&system, "Yaw", Role::Worker).await;

    for order_id in [order.id, OrderId(99)] {
        let err = system
            .reconciler
            .save_feedback(&colleague, order_id, FeedbackFields::default().eaten("yes"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization, "save on {order_id}");

        let err = system
            .reconciler
            .get_feedback_for_order(&colleague, order_id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization, "get on {order_id}");
    }

    let err = system
        .reconciler
        .get_feedback_for_order(&staff.caterer, OrderId(99))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_first_submissions_share_one_record() {
    let (system, _clock) = start_at(midweek_morning());
    let staff = staff(&system).await;
    let order = worker_order(&system, &staff).await;

    let (by_worker, by_caterer) = tokio::join!(
        system
            .reconciler
            .save_feedback(&staff.worker, order.id, FeedbackFields::default().eaten("yes")),
        system
            .reconciler
            .save_feedback(&staff.caterer, order.id, FeedbackFields::default().comment("late")),
    );
    let by_worker = by_worker.unwrap();
    let by_caterer = by_caterer.unwrap();
    assert_eq!(by_worker.feedback.id, by_caterer.feedback.id);

    let all = system.reconciler.list_feedback(&staff.admin).await.unwrap();
    assert_eq!(all.len(), 1, "one record per order");
    assert_eq!(all[0].feedback.eaten, "yes");
    assert_eq!(all[0].feedback.comment, "late");
    assert_eq!(all[0].feedback.delivered, "");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unstored_actor_writes_nothing() {
    let (system, _clock) = start_at(midweek_morning());
    let staff = staff(&system).await;
    let order = worker_order(&system, &staff).await;

    let stranger = RequestContext::from_identity_json(
        r#"{"id": 50, "name": "Ama", "email": "ama@canteen.example", "role": "caterer"}"#,
    )
    .unwrap();
    let err = system
        .reconciler
        .save_feedback(&stranger, order.id, FeedbackFields::default().comment("cold"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert!(system
        .reconciler
        .list_feedback(&staff.admin)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        system
            .reconciler
            .get_feedback_for_order(&staff.worker, order.id)
            .await
            .unwrap(),
        None
    );

    let saved = system
        .reconciler
        .save_feedback(&staff.worker, order.id, FeedbackFields::default().eaten("yes"))
        .await
        .unwrap();
    assert_eq!(saved.submitted_by.id, staff.worker.actor.id);
    assert_eq!(saved.feedback.comment, "");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_workers_list_feedback_on_their_own_orders() {
    let (system, _clock) = start_at(midweek_morning());
    let staff = staff(&system).await;
    let colleague = sign_in(&system, "Yaw", Role::Worker).await;

    let mine = worker_order(&system, &staff).await;
    let theirs = system
        .ordering
        .create_order(
            &colleague,
            OrderInput::new(colleague.actor.id, 1, 30.0).meal_name("Waakye"),
        )
        .await
        .unwrap();

    for (who, order) in [(&staff.worker, mine.id), (&colleague, theirs.id)] {
        system
            .reconciler
            .save_feedback(who, order, FeedbackFields::default().eaten("yes"))
            .await
            .unwrap();
    }

    let own = system.reconciler.list_feedback(&staff.worker).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].order.id, mine.id);

    let all = system.reconciler.list_feedback(&staff.caterer).await.unwrap();
    assert_eq!(all.len(), 2);

    system.shutdown().await.unwrap();
}
