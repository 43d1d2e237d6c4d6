//! # Meal Catalog
//!
//! Role-gated access to the menu. Anyone may list and search it; only roles
//! with [`Capability::ManageMealCatalog`] may add or remove meals. Prices are
//! left out of every meal returned to roles that may not see them.

use canteen_store::ActorClient;
use tracing::{info, instrument};

use crate::authorizer::{Capability, RoleAuthorizer};
use crate::clients::MealClient;
use crate::context::RequestContext;
use crate::error::CanteenError;
use crate::model::{Meal, MealCreate, MealId, MealView};
use crate::search::MealMatcher;

#[derive(Clone)]
pub struct MealCatalog {
    meals: MealClient,
}

impl MealCatalog {
    pub fn new(meals: MealClient) -> Self {
        Self { meals }
    }

    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn list_meals(&self, ctx: &RequestContext) -> Result<Vec<MealView>, CanteenError> {
        let meals = self.meals.list().await?;
        Ok(Self::views(ctx, meals))
    }

    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn create_meal(
        &self,
        ctx: &RequestContext,
        input: MealCreate,
    ) -> Result<MealView, CanteenError> {
        RoleAuthorizer::require(&ctx.actor, Capability::ManageMealCatalog)?;
        let meal = self.meals.create_meal(input).await?;
        info!(meal_id = %meal.id, day = %meal.day, name = %meal.name, "Meal added");
        Ok(MealView::new(meal, RoleAuthorizer::can_see_prices(ctx.role())))
    }

    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn delete_meal(
        &self,
        ctx: &RequestContext,
        meal_id: MealId,
    ) -> Result<(), CanteenError> {
        RoleAuthorizer::require(&ctx.actor, Capability::ManageMealCatalog)?;
        self.meals.delete(meal_id).await?;
        info!(%meal_id, "Meal removed");
        Ok(())
    }

    /// Fetches the catalog once and filters it with [`MealMatcher::search`].
    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn search(
        &self,
        ctx: &RequestContext,
        query: &str,
    ) -> Result<Vec<MealView>, CanteenError> {
        let catalog = self.meals.list().await?;
        let found: Vec<Meal> = MealMatcher::search(query, &catalog)
            .into_iter()
            .cloned()
            .collect();
        Ok(Self::views(ctx, found))
    }

    fn views(ctx: &RequestContext, meals: Vec<Meal>) -> Vec<MealView> {
        let show_prices = RoleAuthorizer::can_see_prices(ctx.role());
        meals
            .into_iter()
            .map(|meal| MealView::new(meal, show_prices))
            .collect()
    }
}
