//! # Meal Store
//!
//! Holds the weekly menu. Meals are created and deleted but never edited;
//! payloads are normalised (working day, name, price, keywords) before a
//! record is built.

pub mod entity;

use crate::clients::MealClient;
use crate::model::Meal;
use canteen_store::ResourceActor;

/// Creates a new Meal store and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Meal>, MealClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, MealClient::new(generic_client))
}
