use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{error, info, instrument};

use crate::analytics::AnalyticsAggregator;
use crate::catalog::MealCatalog;
use crate::clients::{FeedbackClient, MealClient, OrderClient, UserClient};
use crate::config::CanteenConfig;
use crate::context::{IdentityPayload, RequestContext};
use crate::error::CanteenError;
use crate::feedback::FeedbackReconciler;
use crate::model::UserCreate;
use crate::ordering::OrderLifecycleManager;

/// Runs the four stores and hands out the services built on them.
///
/// # Architecture
///
/// - **User store**: users mirrored from the identity provider
/// - **Meal store**: the weekly menu
/// - **Feedback store**: one record per order at most
/// - **Order store**: depends on users (owner check) and feedback (delete cascade)
///
/// # Example
///
/// ```rust
/// use canteen::config::CanteenConfig;
/// use canteen::lifecycle::CanteenSystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), canteen::error::CanteenError> {
///     let system = CanteenSystem::new(CanteenConfig::default());
///     let ctx = system
///         .sign_in(r#"{"id": 0, "name": "Ama", "email": "ama@example.com", "role": "admin"}"#)
///         .await?;
///     assert_eq!(ctx.actor.id.to_string(), "user_1");
///     system.shutdown().await
/// }
/// ```
pub struct CanteenSystem {
    pub users: UserClient,
    pub meals: MealClient,
    pub orders: OrderClient,
    pub feedback: FeedbackClient,

    pub ordering: OrderLifecycleManager,
    pub reconciler: FeedbackReconciler,
    pub catalog: MealCatalog,
    pub analytics: AnalyticsAggregator,

    clock: Arc<dyn Clock + Send + Sync>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CanteenSystem {
    /// Starts the system on the wall clock. Must be called inside a Tokio runtime.
    pub fn new(config: CanteenConfig) -> Self {
        Self::with_clock(config, Arc::new(DefaultClock))
    }

    /// Starts the system on `clock`; tests pass a fixed or adjustable clock here.
    pub fn with_clock(config: CanteenConfig, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let buffer = config.store_buffer;
        let config = Arc::new(config);

        // 1. Create stores (no dependencies yet)
        let (user_actor, users) = crate::user_actor::new(buffer);
        let (meal_actor, meals) = crate::meal_actor::new(buffer);
        let (feedback_actor, feedback) = crate::feedback_actor::new(buffer);
        let (order_actor, orders) = crate::order_actor::new(buffer);

        // 2. Start them with their context injected
        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(meal_actor.run(())),
            tokio::spawn(feedback_actor.run(())),
            tokio::spawn(order_actor.run((users.clone(), feedback.clone()))),
        ];

        // 3. Services
        let ordering = OrderLifecycleManager::new(
            orders.clone(),
            meals.clone(),
            config.clone(),
            clock.clone(),
        );
        let reconciler =
            FeedbackReconciler::new(feedback.clone(), orders.clone(), users.clone(), clock.clone());
        let catalog = MealCatalog::new(meals.clone());
        let analytics = AnalyticsAggregator::new(
            users.clone(),
            orders.clone(),
            feedback.clone(),
            config.utc_offset,
            clock.clone(),
        );

        info!(
            weekly_cutoff = %config.weekly_cutoff,
            daily_cutoff = %config.daily_cutoff,
            "Canteen system started"
        );

        Self {
            users,
            meals,
            orders,
            feedback,
            ordering,
            reconciler,
            catalog,
            analytics,
            clock,
            handles,
        }
    }

    /// Turns the identity provider's payload into a request context.
    ///
    /// The user is matched by email; unknown users are stored first, so the
    /// context always carries the store's id for them.
    #[instrument(skip_all)]
    pub async fn sign_in(&self, identity_json: &str) -> Result<RequestContext, CanteenError> {
        let identity = IdentityPayload::from_json(identity_json)?.into_user();
        if let Some(known) = self.users.find_by_email(&identity.email).await? {
            return Ok(RequestContext::new(known));
        }

        let mut params = UserCreate::new(identity.name, identity.email, identity.role)
            .created_at(identity.created_at.unwrap_or_else(|| self.clock.utc()));
        params.profile_image = identity.profile_image;
        let user = self.users.create_user(params).await?;
        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(RequestContext::new(user))
    }

    /// Drops every client and waits for the stores to stop.
    ///
    /// The order store holds the user and feedback clients in its context,
    /// so those two stop only after it has.
    pub async fn shutdown(self) -> Result<(), CanteenError> {
        info!("Shutting down system...");
        let Self {
            users,
            meals,
            orders,
            feedback,
            ordering,
            reconciler,
            catalog,
            analytics,
            handles,
            ..
        } = self;
        drop((ordering, reconciler, catalog, analytics));
        drop((users, meals, orders, feedback));

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(CanteenError::Persistence(format!("store task failed: {e}")));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
