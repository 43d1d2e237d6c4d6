use async_trait::async_trait;
use canteen_store::ActorEntity;
use std::convert::Infallible;

use crate::error::CanteenError;
use crate::model::{Meal, MealCreate, MealId};

#[async_trait]
impl ActorEntity for Meal {
    type Id = MealId;
    type Create = MealCreate;
    type Update = Infallible;
    type Context = ();
    type Error = CanteenError;

    fn from_create_params(id: MealId, params: MealCreate) -> Result<Self, CanteenError> {
        let params = params.normalized()?;
        Ok(Self {
            id,
            day: params.day,
            name: params.name,
            price: params.price,
            keywords: params.keywords,
            image: params.image,
        })
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), CanteenError> {
        match update {}
    }
}
